use super::*;
use crate::foundation::core::Point;

fn gradient() -> GradientCtx {
    GradientCtx {
        start: Point::new(0.0, 0.0),
        end: Point::new(10.0, 0.0),
        c0: Color4f::BLACK,
        c1: Color4f::WHITE,
    }
}

#[test]
fn default_opts_use_full_stride_and_all_caps() {
    let opts = RasterOpts::default();
    assert_eq!(opts.lane_width, MAX_STRIDE);
    assert!(opts.caps.gradients);
    opts.validate().unwrap();
}

#[test]
fn opts_reject_out_of_range_lane_width() {
    for lane_width in [0, MAX_STRIDE + 1] {
        let opts = RasterOpts {
            lane_width,
            ..RasterOpts::default()
        };
        assert!(matches!(opts.validate(), Err(PixmixError::Validation(_))));
    }
}

#[test]
fn opts_deserialize_with_defaults() {
    let opts: RasterOpts = serde_json::from_str(r#"{ "caps": { "gradients": false } }"#).unwrap();
    assert_eq!(opts.lane_width, MAX_STRIDE);
    assert!(!opts.caps.gradients);
}

#[test]
fn arena_hands_out_sequential_handles() {
    let mut arena = StageArena::default();
    assert!(arena.is_empty());
    let a = arena.alloc_scratch();
    let b = arena.alloc_scratch();
    assert_ne!(a, b);
    assert_eq!(arena.len(), 2);
    assert!(arena.buffer(a).unwrap().iter().all(|v| *v == 0.0));
    assert!(arena.buffer(ScratchId(7)).is_err());
}

#[test]
fn stages_are_recorded_in_append_order() {
    let mut p = RasterPipeline::new(RasterOpts::default());
    let id = ScratchId(0);
    p.append_constant_color(Color4f::RED);
    p.append_store_src(id);
    p.append_linear_gradient(gradient()).unwrap();
    p.append_load_dst(id);
    p.append_blend(BlendMode::Multiply);
    p.append_lerp_1_float(0.5);

    let names: Vec<_> = p.stages().iter().map(Stage::name).collect();
    assert_eq!(
        names,
        [
            "constant_color",
            "store_src",
            "linear_gradient",
            "load_dst",
            "blend",
            "lerp_1_float"
        ]
    );
}

#[test]
fn gradient_stage_needs_capability() {
    let mut p = RasterPipeline::new(RasterOpts {
        caps: PipelineCaps { gradients: false },
        ..RasterOpts::default()
    });
    let err = p.append_linear_gradient(gradient()).unwrap_err();
    assert!(matches!(err, PixmixError::StageAppend(_)));
    assert!(p.is_empty());
}
