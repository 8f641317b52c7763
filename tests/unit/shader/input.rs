use super::*;
use crate::blend::mode::BlendMode;
use crate::foundation::core::{Color4f, Paint};
use crate::pipeline::builder::{RasterOpts, RasterPipeline, StageArena};
use crate::pipeline::stage::Stage;
use crate::shader::color::ColorShader;
use crate::shader::factory::{make_blend, make_color};

#[test]
fn same_node_is_identity_not_equality() {
    let a = make_color(Color4f::RED);
    let b = make_color(Color4f::RED);
    assert!(a.same_node(&a.clone()));
    assert!(!a.same_node(&b));
    assert!(Input::PaintColor.same_node(&Input::PaintColor));
    assert!(!a.same_node(&Input::PaintColor));
    assert!(!Input::PaintColor.same_node(&a));
}

#[test]
fn paint_color_appends_premultiplied_paint() {
    let paint = Paint::new(Color4f::new(1.0, 0.5, 0.0, 0.5));
    let mut pipeline = RasterPipeline::new(RasterOpts::default());
    let mut alloc = StageArena::default();
    let mut rec = StageRec {
        pipeline: &mut pipeline,
        alloc: &mut alloc,
        paint: &paint,
    };
    Input::PaintColor.append_stages(&mut rec).unwrap();

    assert_eq!(
        pipeline.stages(),
        &[Stage::ConstantColor(Color4f::new(0.5, 0.25, 0.0, 0.5))]
    );
    assert!(alloc.is_empty());
}

#[test]
fn optional_node_converts_to_input() {
    assert!(Input::from(None::<ShaderRef>).is_paint_color());

    let node: ShaderRef = Arc::new(ColorShader::new(Color4f::GREEN));
    let input = Input::from(Some(node.clone()));
    assert_eq!(input.kind(), Some(ShaderKind::Color));
    assert!(input.same_node(&Input::from(node)));
}

#[test]
fn describe_tree_indents_children_destination_first() {
    let inner = make_blend(BlendMode::Multiply, Input::PaintColor, make_color(Color4f::RED));
    let root = make_blend(BlendMode::SrcOver, inner, Input::PaintColor);

    assert_eq!(
        root.describe_tree(),
        "blend(src_over)\n  blend(multiply)\n    paint\n    color(1, 0, 0, 1)\n  paint\n"
    );
}

#[test]
fn kind_tags_are_stable() {
    for kind in [
        ShaderKind::Color,
        ShaderKind::LinearGradient,
        ShaderKind::Blend,
        ShaderKind::Lerp,
    ] {
        assert_eq!(ShaderKind::from_tag(kind.tag()), Some(kind));
    }
    assert_eq!(ShaderKind::Blend.tag(), 3);
    assert_eq!(ShaderKind::from_tag(0), None);
    assert_eq!(ShaderKind::from_tag(5), None);
}
