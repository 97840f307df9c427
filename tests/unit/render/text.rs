use super::*;

#[test]
fn missing_configured_font_is_an_error() {
    let err = resolve_font(Some(Path::new("/definitely/not/a/font.ttf"))).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn garbage_bytes_do_not_register() {
    assert!(TextLayoutEngine::new(b"not a font").is_err());
}

#[test]
fn system_font_lays_out_multiline_text() {
    let Some(bytes) = resolve_font(None).unwrap() else {
        eprintln!("no system font available; skipping");
        return;
    };
    let mut engine = TextLayoutEngine::new(&bytes).unwrap();
    assert!(!engine.family_name().is_empty());

    let brush = TextBrushRgba8 {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
    let layout = engine
        .layout_plain("John Dalton proposed that:\n1. Matter", 24.0, brush, None)
        .unwrap();
    assert!(layout.lines().count() >= 2);
    assert!(layout.width() > 0.0);

    assert!(engine.layout_plain("x", 0.0, brush, None).is_err());
}
