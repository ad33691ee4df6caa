use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn rect_of_polar_is_identity() {
    for (x, y) in [(1.0, 0.0), (0.0, 1.0), (-2.5, 3.25), (0.001, -7.0), (-1.0, -1.0)] {
        let back = rect(polar(Vec2::new(x, y)));
        assert!(close(back.x, x), "x: {} vs {x}", back.x);
        assert!(close(back.y, y), "y: {} vs {y}", back.y);
    }
}

#[test]
fn polar_uses_degrees() {
    let p = polar(Vec2::new(0.0, 2.0));
    assert!(close(p.len, 2.0));
    assert!(close(p.angle_deg, 90.0));

    let p = polar(Vec2::new(-1.0, 0.0));
    assert!(close(p.angle_deg.abs(), 180.0));
}

#[test]
fn normalize_wraps_both_directions() {
    assert!(close(normalize(450.0, 360.0), 90.0));
    assert!(close(normalize(-90.0, 360.0), 270.0));
    assert!(close(frac(1.25), 0.25));
    assert!(close(frac(-0.25), 0.75));
    assert_eq!(frac(3.0), 0.0);
}
