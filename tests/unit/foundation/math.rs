use super::*;

#[test]
fn unit_to_u8_clamps_and_rounds() {
    assert_eq!(unit_to_u8(-0.5), 0);
    assert_eq!(unit_to_u8(0.0), 0);
    assert_eq!(unit_to_u8(0.5), 128);
    assert_eq!(unit_to_u8(1.0), 255);
    assert_eq!(unit_to_u8(7.0), 255);
    assert_eq!(unit_to_u8(f32::NAN), 0);
}

#[test]
fn rcp_of_zero_is_zero() {
    assert_eq!(rcp_or_zero(0.0), 0.0);
    assert_eq!(rcp_or_zero(4.0), 0.25);
}
