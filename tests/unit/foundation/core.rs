use super::*;

#[test]
fn canvas_center_is_half_extent() {
    let c = Canvas::square(452);
    assert_eq!(c.center(), Point::new(226.0, 226.0));
}

#[test]
fn deg_to_rad_quarter_turn() {
    assert!((deg_to_rad(90.0) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    assert!((deg_to_rad(-210.0) + 7.0 * std::f64::consts::PI / 6.0).abs() < 1e-12);
}

#[test]
fn canvas_serializes_as_plain_integers() {
    let json = serde_json::to_string(&Canvas::square(452)).unwrap();
    assert_eq!(json, r#"{"width":452,"height":452}"#);
}
