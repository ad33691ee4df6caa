use super::*;

fn grid() -> impl Iterator<Item = f64> {
    (-40..=40).map(|k| f64::from(k) * 0.0625 + 0.01)
}

#[test]
fn every_shape_stays_within_amplitude() {
    for shape in Waveform::ALL {
        for amp in [0.0, 1.0, 10.0, 360.0] {
            for phase in [0.0, 45.0, 90.0, 270.0, -30.0, 720.0] {
                for i in grid() {
                    let v = shape.sample(i, amp, phase);
                    assert!(
                        (-1e-9..=amp + 1e-9).contains(&v),
                        "{shape} i={i} amp={amp} phase={phase} -> {v}"
                    );
                }
            }
        }
    }
}

#[test]
fn sine_starts_at_zero_peaks_at_half_and_has_period_one() {
    let s = Waveform::Sine;
    assert!(s.sample(0.0, 2.0, 0.0).abs() < 1e-12);
    assert!((s.sample(0.5, 2.0, 0.0) - 2.0).abs() < 1e-12);
    for i in grid() {
        assert!((s.sample(i, 3.0, 10.0) - s.sample(i + 1.0, 3.0, 10.0)).abs() < 1e-9);
    }
}

#[test]
fn sine_is_continuous() {
    let step = 1e-4;
    let mut prev = Waveform::Sine.sample(-2.0, 1.0, 30.0);
    let mut i = -2.0;
    while i < 2.0 {
        i += step;
        let v = Waveform::Sine.sample(i, 1.0, 30.0);
        assert!((v - prev).abs() < 1e-3, "jump at i={i}");
        prev = v;
    }
}

#[test]
fn square_jumps_exactly_at_half_period() {
    let sq = Waveform::Square;
    assert_eq!(sq.sample(0.25, 10.0, 0.0), 0.0);
    assert_eq!(sq.sample(0.75, 10.0, 0.0), 10.0);
    assert_eq!(sq.sample(0.5 - 1e-9, 10.0, 0.0), 0.0);
    assert_eq!(sq.sample(0.5, 10.0, 0.0), 10.0);
    // A half-period phase swaps the halves.
    assert_eq!(sq.sample(0.25, 10.0, 180.0), 10.0);
}

#[test]
fn saws_and_triangle_follow_the_ramp() {
    assert!((Waveform::SawUp.sample(0.25, 4.0, 0.0) - 1.0).abs() < 1e-12);
    assert!((Waveform::SawDown.sample(0.25, 4.0, 0.0) - 3.0).abs() < 1e-12);
    assert!((Waveform::Triangle.sample(0.25, 4.0, 0.0) - 2.0).abs() < 1e-12);
    assert!((Waveform::Triangle.sample(0.75, 4.0, 0.0) - 2.0).abs() < 1e-12);
    assert!((Waveform::SawUp.sample(0.0, 4.0, 90.0) - 1.0).abs() < 1e-12);
}

#[test]
fn shape_tokens_round_trip_and_reject_unknown() {
    for shape in Waveform::ALL {
        assert_eq!(Waveform::parse(shape.as_str()).unwrap(), shape);
    }
    assert!(matches!(
        Waveform::parse("sawtooth"),
        Err(FlameError::Validation(_))
    ));
}
