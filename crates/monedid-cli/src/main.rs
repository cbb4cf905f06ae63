use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let json = std::env::args().any(|a| a == "--json");
    let displays = monedid_xrandr::detect_displays().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&displays)?);
        return Ok(());
    }
    if displays.is_empty() {
        println!("no displays with EDID found");
        return Ok(());
    }
    for (i, d) in displays.iter().enumerate() {
        let name = d.output.as_deref().unwrap_or("unknown output");
        let header = if d.header_ok() { "valid header" } else { "unusual header" };
        println!("{}: {} ({} bytes, id {}, {})", i + 1, name, d.edid.len(), d.edid_id(), header);
    }
    Ok(())
}
