use monedid_core::model::DisplayRecord;

fn base_block() -> Vec<u8> {
    let mut edid = vec![0u8; 128];
    edid[1..7].fill(0xFF);
    edid
}

#[test]
fn test_header_ok_on_standard_block() {
    let rec = DisplayRecord::new(base_block());
    assert!(rec.header_ok());
}

#[test]
fn test_header_ok_rejects_garbage() {
    let mut edid = base_block();
    edid[0] = 0x12;
    assert!(!DisplayRecord::new(edid).header_ok());
    assert!(!DisplayRecord::new(vec![0x00, 0xFF]).header_ok());
}

#[test]
fn test_edid_id_covers_first_sixteen_bytes() {
    let rec = DisplayRecord::new(base_block());
    assert_eq!(rec.edid_id(), format!("00{}00{}", "FF".repeat(6), "00".repeat(8)));
    assert_eq!(rec.edid_id().len(), 32);
}

#[test]
fn test_record_serialization() {
    let rec = DisplayRecord {
        output: Some("HDMI-1".to_string()),
        edid: base_block(),
    };
    let json = serde_json::to_string(&rec).unwrap();
    let back: DisplayRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back.output.as_deref(), Some("HDMI-1"));
    assert_eq!(back.edid, rec.edid);
}
