use super::*;
use serde_json::json;

#[test]
fn parses_long_and_short_hex() {
    let c: Rgb = serde_json::from_value(json!("#243447")).unwrap();
    assert_eq!(c, Rgb::from_packed(0x243447));

    let c: Rgb = serde_json::from_value(json!("#fA0")).unwrap();
    assert_eq!(
        c,
        Rgb {
            r: 0xff,
            g: 0xaa,
            b: 0x00
        }
    );
}

#[test]
fn parses_packed_integer() {
    let c: Rgb = serde_json::from_value(json!(0x6ab7ec)).unwrap();
    assert_eq!(c.packed(), 0x6ab7ec);
}

#[test]
fn rejects_malformed_hex() {
    assert!(serde_json::from_value::<Rgb>(json!("#12345")).is_err());
    assert!(serde_json::from_value::<Rgb>(json!("#gg0000")).is_err());
    assert!(Rgb::parse_hex("#ééé").is_err());
}

#[test]
fn packed_ignores_high_bits() {
    assert_eq!(Rgb::from_packed(0xff00_0000), Rgb::BLACK);
    assert_eq!(Rgb::WHITE.to_premul(), [255, 255, 255, 255]);
}
