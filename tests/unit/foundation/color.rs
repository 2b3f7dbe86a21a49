use super::*;

#[test]
fn parses_long_short_and_alpha_forms() {
    assert_eq!(parse_hex_color("#FF0000").unwrap(), Rgba8::opaque(255, 0, 0));
    assert_eq!(parse_hex_color("a00000").unwrap(), Rgba8::opaque(160, 0, 0));
    assert_eq!(parse_hex_color("#f80").unwrap(), Rgba8::opaque(255, 136, 0));
    assert_eq!(
        parse_hex_color("#11223380").unwrap(),
        Rgba8 {
            r: 0x11,
            g: 0x22,
            b: 0x33,
            a: 0x80
        }
    );
}

#[test]
fn rejects_empty_and_malformed() {
    assert!(parse_hex_color("").is_err());
    assert!(parse_hex_color("   ").is_err());
    assert!(parse_hex_color("#12345").is_err());
    assert!(parse_hex_color("#zzzzzz").is_err());
    assert!(parse_hex_color("#红色红").is_err());
}

#[test]
fn serde_accepts_hex_and_arrays() {
    let c: Rgba8 = serde_json::from_str("\"#00ff00\"").unwrap();
    assert_eq!(c, Rgba8::opaque(0, 255, 0));
    let c: Rgba8 = serde_json::from_str("[1, 2, 3, 4]").unwrap();
    assert_eq!(c, Rgba8 { r: 1, g: 2, b: 3, a: 4 });
    assert!(serde_json::from_str::<Rgba8>("[1, 2]").is_err());
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#01020304\"");
}
