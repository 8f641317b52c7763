use super::*;
use crate::shader::ShaderKind;

fn parse(json: &str) -> PixmixResult<Scene> {
    Scene::from_reader(json.as_bytes())
}

#[test]
fn parses_nested_graph() {
    let scene = parse(
        r#"{
            "width": 8, "height": 4,
            "paint": [1, 1, 1, 0.5],
            "shader": { "lerp": {
                "weight": 0.25,
                "dst": { "color": { "rgba": [0, 0, 1, 1] } },
                "src": { "blend": {
                    "mode": "multiply",
                    "dst": { "linear_gradient": {
                        "start": [0, 0], "end": [8, 0],
                        "colors": [[0, 0, 0, 1], [1, 1, 1, 1]]
                    } },
                    "src": "paint"
                } }
            } }
        }"#,
    )
    .unwrap();

    assert_eq!((scene.width(), scene.height()), (8, 4));
    assert_eq!(scene.paint().color, Color4f::new(1.0, 1.0, 1.0, 0.5));

    let input = scene.build().unwrap();
    assert_eq!(input.kind(), Some(ShaderKind::Lerp));
    let tree = input.describe_tree();
    let lines: Vec<_> = tree.lines().collect();
    assert_eq!(lines[0], "lerp(0.25)");
    assert!(lines[1].starts_with("  color("));
    assert_eq!(lines[2], "  blend(multiply)");
    assert!(lines[3].starts_with("    linear_gradient("));
    assert_eq!(lines[4], "    paint");
}

#[test]
fn paint_defaults_to_opaque_black() {
    let scene = parse(r#"{ "width": 1, "height": 1, "shader": "paint" }"#).unwrap();
    assert_eq!(scene.paint(), Paint::default());
    assert!(scene.build().unwrap().is_paint_color());
}

#[test]
fn degenerate_nodes_collapse_while_building() {
    let scene = parse(
        r#"{ "width": 1, "height": 1, "shader": { "blend": {
            "mode": "dst",
            "dst": { "color": { "rgba": [1, 0, 0, 1] } },
            "src": "paint"
        } } }"#,
    )
    .unwrap();
    assert_eq!(scene.build().unwrap().kind(), Some(ShaderKind::Color));

    let scene = parse(
        r#"{ "width": 1, "height": 1, "shader": { "lerp": {
            "weight": 2.0, "dst": "paint", "src": { "color": { "rgba": [0, 1, 0, 1] } }
        } } }"#,
    )
    .unwrap();
    assert_eq!(scene.build().unwrap().kind(), Some(ShaderKind::Color));
}

#[test]
fn rejects_bad_documents() {
    assert!(matches!(
        parse(r#"{ "width": 0, "height": 1, "shader": "paint" }"#),
        Err(PixmixError::Validation(_))
    ));
    assert!(matches!(
        parse(r#"{ "width": 1, "height": 1, "shader": { "blend": { "mode": "normal", "dst": "paint", "src": "paint" } } }"#),
        Err(PixmixError::Serde(_))
    ));
    assert!(matches!(
        parse(r#"{ "width": 1, "height": 1, "shader": "paint", "extra": true }"#),
        Err(PixmixError::Serde(_))
    ));
}
