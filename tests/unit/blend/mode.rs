use super::*;

#[test]
fn ordinals_match_table_order() {
    for (i, m) in BlendMode::ALL.iter().enumerate() {
        assert_eq!(m.ordinal() as usize, i);
        assert_eq!(BlendMode::from_ordinal(i as u32), Some(*m));
    }
    assert_eq!(BlendMode::LAST_MODE.ordinal(), 28);
}

#[test]
fn ordinals_past_last_mode_are_rejected() {
    assert_eq!(BlendMode::from_ordinal(29), None);
    assert_eq!(BlendMode::from_ordinal(u32::MAX), None);
}

#[test]
fn names_parse_back() {
    for m in BlendMode::ALL {
        assert_eq!(m.name().parse::<BlendMode>().unwrap(), m);
    }
    assert_eq!(
        "Src-Over".parse::<BlendMode>().unwrap(),
        BlendMode::SrcOver
    );
    assert!("normal".parse::<BlendMode>().is_err());
}

#[test]
fn serde_spelling_matches_name() {
    for m in BlendMode::ALL {
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, format!("\"{}\"", m.name()));
    }
}

#[test]
fn mode_groups() {
    assert!(BlendMode::Screen.is_coefficient_mode());
    assert!(!BlendMode::Overlay.is_coefficient_mode());
    assert!(BlendMode::Multiply.is_separable());
    assert!(!BlendMode::Hue.is_separable());
    assert!(BlendMode::Clear.is_degenerate());
    assert!(BlendMode::Src.is_degenerate());
    assert!(BlendMode::Dst.is_degenerate());
    assert!(!BlendMode::SrcOver.is_degenerate());
}
