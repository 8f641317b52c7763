use super::*;
use crate::shader::factory::make_color;

#[test]
fn constant_shader_fills_frame_with_premultiplied_bytes() {
    let input = make_color(Color4f::new(1.0, 0.0, 0.0, 0.5));
    let frame = render_rgba8(&input, &Paint::default(), 3, 2, &RenderOpts::default()).unwrap();
    assert!(frame.premultiplied);
    assert_eq!(frame.data.len(), 3 * 2 * 4);
    for px in frame.data.chunks_exact(4) {
        assert_eq!(px, [128, 0, 0, 128]);
    }
}

#[test]
fn paint_input_renders_paint_color() {
    let paint = Paint::new(Color4f::new(0.0, 0.0, 1.0, 1.0));
    let frame = render_rgba8(&Input::PaintColor, &paint, 2, 2, &RenderOpts::default()).unwrap();
    for px in frame.data.chunks_exact(4) {
        assert_eq!(px, [0, 0, 255, 255]);
    }
}

#[test]
fn zero_sized_frames_are_rejected() {
    let input = make_color(Color4f::RED);
    assert!(matches!(
        render_rgba8(&input, &Paint::default(), 0, 4, &RenderOpts::default()),
        Err(PixmixError::Validation(_))
    ));
}

#[test]
fn zero_threads_is_rejected() {
    let input = make_color(Color4f::RED);
    let opts = RenderOpts {
        parallel: true,
        threads: Some(0),
        ..RenderOpts::default()
    };
    assert!(matches!(
        render_rgba8(&input, &Paint::default(), 2, 2, &opts),
        Err(PixmixError::Validation(_))
    ));
}

#[test]
fn parallel_build_errors_keep_their_kind() {
    let input = make_color(Color4f::RED);
    let opts = RenderOpts {
        parallel: true,
        raster: RasterOpts {
            lane_width: 0,
            ..RasterOpts::default()
        },
        ..RenderOpts::default()
    };
    assert!(matches!(
        render_rgba8(&input, &Paint::default(), 4, 4, &opts),
        Err(PixmixError::Validation(_))
    ));
}
