use super::*;
use crate::blend::mode::BlendMode;
use crate::flatten::{deserialize_shader, serialize_shader};
use crate::shader::factory::{make_blend, make_color};

fn blend_record(mode: u32) -> Vec<u8> {
    let mut w = WriteBuffer::new();
    w.write_u32(ShaderKind::Blend.tag());
    w.write_u32(12);
    w.write_u32(PAINT_COLOR_TAG);
    w.write_u32(PAINT_COLOR_TAG);
    w.write_u32(mode);
    w.into_bytes()
}

fn lerp_record(weight: f32) -> Vec<u8> {
    let mut w = WriteBuffer::new();
    w.write_u32(ShaderKind::Lerp.tag());
    w.write_u32(8 + 16 + 4);
    w.write_u32(PAINT_COLOR_TAG);
    w.write_shader(&make_color(Color4f::RED));
    w.write_f32(weight);
    w.into_bytes()
}

fn assert_malformed(res: PixmixResult<Input>) {
    match res {
        Err(PixmixError::MalformedData(_)) => {}
        other => panic!("expected malformed data, got {other:?}"),
    }
}

#[test]
fn color_record_layout() {
    let bytes = serialize_shader(&make_color(Color4f::new(1.0, 0.5, 0.25, 1.0)));
    let mut r = ReadBuffer::new(&bytes);
    assert_eq!(r.read_u32().unwrap(), ShaderKind::Color.tag());
    assert_eq!(r.read_u32().unwrap(), 16);
    assert_eq!(
        r.read_color4f().unwrap(),
        Color4f::new(1.0, 0.5, 0.25, 1.0)
    );
    r.finish().unwrap();
}

#[test]
fn paint_color_is_a_bare_tag() {
    let bytes = serialize_shader(&Input::PaintColor);
    assert_eq!(bytes, PAINT_COLOR_TAG.to_le_bytes());
    assert!(deserialize_shader(&bytes).unwrap().is_paint_color());
}

#[test]
fn blend_mode_ordinals_are_range_checked() {
    assert_eq!(
        deserialize_shader(&blend_record(BlendMode::LAST_MODE.ordinal()))
            .unwrap()
            .kind(),
        Some(ShaderKind::Blend)
    );
    assert_malformed(deserialize_shader(&blend_record(29)));
    assert_malformed(deserialize_shader(&blend_record(u32::MAX)));
}

#[test]
fn degenerate_records_collapse_on_read() {
    let src = deserialize_shader(&blend_record(BlendMode::Src.ordinal())).unwrap();
    assert!(src.is_paint_color());

    let clear = deserialize_shader(&blend_record(BlendMode::Clear.ordinal())).unwrap();
    assert_eq!(clear.kind(), Some(ShaderKind::Color));

    let lerp = deserialize_shader(&lerp_record(1.0)).unwrap();
    assert_eq!(lerp.kind(), Some(ShaderKind::Color));
    let lerp = deserialize_shader(&lerp_record(0.0)).unwrap();
    assert!(lerp.is_paint_color());
}

#[test]
fn nan_weight_is_malformed() {
    assert_malformed(deserialize_shader(&lerp_record(f32::NAN)));
    assert_eq!(
        deserialize_shader(&lerp_record(0.5)).unwrap().kind(),
        Some(ShaderKind::Lerp)
    );
}

#[test]
fn unknown_tag_is_malformed() {
    let mut w = WriteBuffer::new();
    w.write_u32(9);
    w.write_u32(0);
    assert_malformed(deserialize_shader(w.as_bytes()));
}

#[test]
fn truncated_and_trailing_bytes_are_malformed() {
    let node = make_blend(BlendMode::Overlay, make_color(Color4f::RED), Input::PaintColor);
    let bytes = serialize_shader(&node);

    assert_malformed(deserialize_shader(&bytes[..bytes.len() - 1]));
    assert_malformed(deserialize_shader(&bytes[..bytes.len() - 4]));
    assert_malformed(deserialize_shader(&[]));

    let mut padded = bytes.clone();
    padded.extend_from_slice(&[0, 0, 0, 0]);
    assert_malformed(deserialize_shader(&padded));
}

#[test]
fn declared_length_must_match_payload() {
    let mut bytes = blend_record(BlendMode::Multiply.ordinal());
    bytes[4..8].copy_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    assert_malformed(deserialize_shader(&bytes));

    let mut bytes = blend_record(BlendMode::Multiply.ordinal());
    bytes[4..8].copy_from_slice(&64u32.to_le_bytes());
    assert_malformed(deserialize_shader(&bytes));
}

fn blend_chain(levels: u32) -> Input {
    let mut node = make_color(Color4f::RED);
    for _ in 0..levels {
        node = make_blend(BlendMode::SrcOver, node, Input::PaintColor);
    }
    node
}

#[test]
fn nesting_depth_is_bounded() {
    // Root plus leaf: MAX_NESTING_DEPTH records on the deepest path.
    let at_limit = serialize_shader(&blend_chain(MAX_NESTING_DEPTH - 1));
    assert_eq!(
        deserialize_shader(&at_limit).unwrap().kind(),
        Some(ShaderKind::Blend)
    );

    let too_deep = serialize_shader(&blend_chain(MAX_NESTING_DEPTH));
    assert_malformed(deserialize_shader(&too_deep));
}

#[test]
fn hostile_nesting_fails_without_exhausting_the_stack() {
    let mut w = WriteBuffer::new();
    for _ in 0..400_000 {
        w.write_u32(ShaderKind::Blend.tag());
        w.write_u32(0);
    }
    assert_malformed(deserialize_shader(w.as_bytes()));
}

#[test]
fn reader_depth_recovers_after_sibling_records() {
    let wide = make_blend(
        BlendMode::Xor,
        blend_chain(MAX_NESTING_DEPTH - 2),
        blend_chain(MAX_NESTING_DEPTH - 2),
    );
    let bytes = serialize_shader(&wide);
    assert_eq!(
        deserialize_shader(&bytes).unwrap().kind(),
        Some(ShaderKind::Blend)
    );
}

#[test]
fn non_finite_gradient_record_is_malformed() {
    let mut w = WriteBuffer::new();
    w.write_u32(ShaderKind::LinearGradient.tag());
    w.write_u32(8 + 8 + 16 + 16);
    w.write_point(Point::new(0.0, 0.0));
    w.write_f32(f32::INFINITY);
    w.write_f32(0.0);
    w.write_color4f(Color4f::RED);
    w.write_color4f(Color4f::BLUE);
    assert_malformed(deserialize_shader(w.as_bytes()));
}
