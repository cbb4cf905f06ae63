use serde::{Deserialize, Serialize};

/// One physical or virtual monitor, identified by its raw EDID block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub output: Option<String>, // xrandr connector name, when known
    pub edid: Vec<u8>,          // raw EDID block, 128 bytes minimum
}

impl DisplayRecord {
    pub fn new(edid: Vec<u8>) -> Self {
        Self { output: None, edid }
    }

    /// Whether the block starts with the fixed EDID header
    /// 00 FF FF FF FF FF FF 00. Diagnostic only; records are kept either way.
    pub fn header_ok(&self) -> bool {
        self.edid.len() >= 8
            && self.edid[0] == 0x00
            && self.edid[1..7].iter().all(|&b| b == 0xFF)
            && self.edid[7] == 0x00
    }

    /// Hex of the first 16 bytes, a stable identity for logs and dedup.
    pub fn edid_id(&self) -> String {
        let n = self.edid.len().min(16);
        self.edid[..n].iter().map(|b| format!("{:02X}", b)).collect()
    }
}
