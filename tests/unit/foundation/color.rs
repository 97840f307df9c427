use super::*;

#[test]
fn parses_opaque_and_translucent_hex() {
    assert_eq!(Rgba8::from_hex("#4285F4").unwrap(), Rgba8::rgb(0x42, 0x85, 0xF4));
    assert_eq!(
        Rgba8::from_hex("12121280").unwrap(),
        Rgba8 {
            r: 0x12,
            g: 0x12,
            b: 0x12,
            a: 0x80
        }
    );
}

#[test]
fn rejects_malformed_hex() {
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#GG0000").is_err());
    assert!(Rgba8::from_hex("#ééé").is_err());
}

#[test]
fn serde_uses_hex_strings() {
    let c: Rgba8 = serde_json::from_str("\"#fbbc05\"").unwrap();
    assert_eq!(c, Rgba8::rgb(0xFB, 0xBC, 0x05));
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#FBBC05\"");
}

#[test]
fn mix_and_shade_hit_endpoints() {
    let c = Rgba8::rgb(200, 100, 50);
    assert_eq!(c.mix(Rgba8::WHITE, 0.0), c);
    assert_eq!(c.mix(Rgba8::WHITE, 1.0), Rgba8::WHITE);
    assert_eq!(c.shade(0.0), Rgba8::BLACK);
    assert_eq!(c.shade(1.0), c);
}
