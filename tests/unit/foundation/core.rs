use super::*;

#[test]
fn premul_scales_color_channels_only() {
    let c = Color4f::new(0.0, 1.0, 0.5, 0.5).premul();
    assert_eq!(c, Color4f::new(0.0, 0.5, 0.25, 0.5));
}

#[test]
fn unpremul_of_transparent_is_transparent() {
    assert_eq!(
        Color4f::new(0.3, 0.3, 0.3, 0.0).unpremul(),
        Color4f::TRANSPARENT
    );
    let c = Color4f::new(0.25, 0.5, 0.0, 0.5).unpremul();
    assert_eq!(c, Color4f::new(0.5, 1.0, 0.0, 0.5));
}

#[test]
fn lerp_endpoints_and_midpoint() {
    let a = Color4f::BLUE;
    let b = Color4f::YELLOW;
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    let mid = a.lerp(b, 0.5);
    assert!(mid.max_abs_diff(Color4f::new(0.5, 0.5, 0.5, 1.0)) < 1e-6);
}

#[test]
fn rgba8_packing_clamps_out_of_range_channels() {
    let px = Color4f::new(1.5, -0.25, 0.5, 1.0).to_rgba8_premul();
    assert_eq!(px.to_bytes(), [255, 0, 128, 255]);
}

#[test]
fn paint_defaults_to_opaque_black() {
    let p = Paint::default();
    assert_eq!(p.premul_color(), Color4f::BLACK);
    let p = Paint::new(Color4f::new(1.0, 1.0, 1.0, 0.25));
    assert_eq!(p.premul_color(), Color4f::new(0.25, 0.25, 0.25, 0.25));
}
