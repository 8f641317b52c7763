use super::*;

#[test]
fn degenerate_modes_skip_the_combinator() {
    let src = FragmentProcessor::ConstColor(Color4f::RED);
    let dst = FragmentProcessor::ConstColor(Color4f::BLUE);
    assert_eq!(
        make_from_two_processors(src.clone(), dst.clone(), BlendMode::Src),
        src
    );
    assert_eq!(
        make_from_two_processors(src.clone(), dst.clone(), BlendMode::Dst),
        dst
    );
    assert_eq!(
        make_from_two_processors(src, dst, BlendMode::Clear),
        FragmentProcessor::ConstColor(Color4f::TRANSPARENT)
    );
}

#[test]
fn compose_two_evaluates_src_onto_dst() {
    let fp = make_from_two_processors(
        FragmentProcessor::ConstColor(Color4f::new(0.0, 0.5, 0.0, 0.5)),
        FragmentProcessor::ConstColor(Color4f::RED),
        BlendMode::SrcOver,
    );
    assert_eq!(fp.num_nodes(), 3);
    let got = fp.eval(Point::new(3.5, 7.5));
    assert!(got.max_abs_diff(Color4f::new(0.5, 0.5, 0.0, 1.0)) < 1e-6);
}

#[test]
fn gradient_processor_follows_position() {
    let fp = FragmentProcessor::LinearGradient(GradientCtx {
        start: Point::new(0.0, 0.0),
        end: Point::new(0.0, 10.0),
        c0: Color4f::BLACK,
        c1: Color4f::WHITE,
    });
    assert_eq!(fp.eval(Point::new(4.0, -3.0)), Color4f::BLACK);
    assert_eq!(fp.eval(Point::new(4.0, 30.0)), Color4f::WHITE);
    assert!((fp.eval(Point::new(0.0, 5.0)).g - 0.5).abs() < 1e-6);
}
