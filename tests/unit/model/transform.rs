use super::*;
use crate::{animation::oscillator::Waveform, foundation::error::FlameError};

fn var(name: &str) -> VariationId {
    VariationId::from_name(name).unwrap()
}

fn xform_el(attrs: &[(&str, &str)]) -> Element {
    let mut el = Element::new(XFORM_TAG);
    for (k, v) in attrs {
        el.set(*k, *v);
    }
    el
}

#[test]
fn defaults_are_identity_with_linear() {
    let xf = Transform::new();
    assert!(xf.coefs().is_identity());
    assert_eq!(xf.linear(), 1.0);
    assert_eq!(xf.weight, 1.0);
    assert_eq!(xf.color_speed, 0.5);
    assert_eq!(xf.opacity, 1.0);
    assert!(!xf.is_post());
    assert!(xf.post().is_none());
}

#[test]
fn parses_typed_catalog_and_extra_attributes() {
    let el = xform_el(&[
        ("coefs", "0.5 0 0 0.5 0.25 0"),
        ("weight", "0.7"),
        ("color", "1"),
        ("julian", "0.3"),
        ("julian_power", "5"),
        ("linear", "0"),
        ("plotmode", "off"),
    ]);
    let xf = Transform::from_element(&el, XformSlot::Indexed(2), 3).unwrap();
    assert_eq!(xf.coefs().to_array(), [0.5, 0.0, 0.0, 0.5, 0.25, 0.0]);
    assert_eq!(xf.weight, 0.7);
    assert_eq!(xf.color, 1.0);
    assert_eq!(xf.variation(var("julian")), Some(0.3));
    assert_eq!(
        xf.variable(VariableId::from_name("julian_power").unwrap()),
        Some(5.0)
    );
    assert_eq!(
        xf.extras().get("plotmode"),
        Some(&AttrValue::Text("off".to_owned()))
    );
    assert_eq!(xf.index(), Some(2));
    assert!(!xf.is_final());
}

#[test]
fn list_vars_skips_zero_weights_and_uses_catalog_order() {
    let mut xf = Transform::new();
    xf.set_variation(var("swirl"), 0.5);
    xf.set_variation(var("spherical"), 0.25);
    xf.set_variation(VariationId::LINEAR, 0.0);
    assert_eq!(xf.list_vars(), vec!["spherical", "swirl"]);
}

#[test]
fn malformed_typed_numbers_are_format_errors() {
    let el = xform_el(&[("coefs", "1 0 0 1 0 0"), ("weight", "heavy")]);
    assert!(matches!(
        Transform::from_element(&el, XformSlot::Indexed(0), 1),
        Err(FlameError::Format(_))
    ));
    let el = xform_el(&[("coefs", "1 0 0 1 0")]);
    assert!(matches!(
        Transform::from_element(&el, XformSlot::Indexed(0), 1),
        Err(FlameError::Format(_))
    ));
}

#[test]
fn inactive_post_and_chaos_parse_as_absent() {
    let el = xform_el(&[("post", "1 0 0 1 0 0"), ("chaos", "1 1")]);
    let xf = Transform::from_element(&el, XformSlot::Indexed(0), 2).unwrap();
    assert!(xf.post().is_none());
    assert!(xf.chaos().is_none());

    let el = xform_el(&[("post", "1 0 0 1 0 1"), ("chaos", "0")]);
    let xf = Transform::from_element(&el, XformSlot::Indexed(0), 2).unwrap();
    assert!(xf.post().unwrap().is_active());
    assert_eq!(xf.chaos().unwrap().weights(), &[0.0, 1.0]);
    let out = xf.to_element();
    assert_eq!(out.get("post"), Some("1 0 0 1 0 1"));
    assert_eq!(out.get("chaos"), Some("0 1"));
}

#[test]
fn add_post_attaches_then_overwrites() {
    let mut xf = Transform::new();
    xf.add_post(Coefs::IDENTITY);
    assert!(xf.post().is_some());
    assert!(!xf.post().unwrap().is_active());
    assert!(xf.to_element().get("post").is_none());

    let shifted = Coefs::new(1.0, 0.0, 0.0, 1.0, 2.0, 0.0);
    xf.add_post(shifted);
    assert_eq!(*xf.post().unwrap().coefs(), shifted);
}

#[test]
fn binding_to_unset_attribute_synthesizes_zero() {
    let mut xf = Transform::new();
    let julia = var("julia");
    assert_eq!(xf.variation(julia), None);
    xf.bind_target("julia").unwrap().amp = 0.5;
    assert_eq!(xf.variation(julia), Some(0.0));
    assert!(xf.bind_target("nonsense").is_err());
    assert_eq!(xf.bindings().len(), 1);
}

#[test]
fn state_at_applies_bindings_to_a_copy_only() {
    let mut xf = Transform::new();
    xf.bind(
        OscillatorBinding::for_target("weight")
            .unwrap()
            .with_shape(Waveform::SawUp)
            .with_amp(1.0),
    );
    xf.bind(
        OscillatorBinding::for_target("rotate")
            .unwrap()
            .with_shape(Waveform::Square)
            .with_amp(90.0),
    );
    let before = xf.clone();

    let early = xf.state_at(0.25);
    assert!((early.weight - 1.25).abs() < 1e-12);
    for (got, want) in early.coefs().to_array().iter().zip(Coefs::IDENTITY.to_array()) {
        assert!((got - want).abs() < 1e-12);
    }
    assert!(early.bindings().is_empty());

    let late = xf.state_at(0.75);
    assert!((late.weight - 1.75).abs() < 1e-12);
    assert!((late.coefs().xy - 1.0).abs() < 1e-12);
    assert!((late.coefs().yx + 1.0).abs() < 1e-12);

    assert_eq!(xf, before);
    assert_eq!(xf.state_at(0.25), early);
}

#[test]
fn post_targets_drive_the_post_transform() {
    let mut xf = Transform::new();
    xf.bind(
        OscillatorBinding::for_target("porbit")
            .unwrap()
            .with_shape(Waveform::Square)
            .with_amp(90.0),
    );
    xf.add_post(Coefs::new(1.0, 0.0, 0.0, 1.0, 1.0, 0.0));
    let s = xf.state_at(0.75);
    let post = s.post().unwrap().coefs();
    assert!(post.ox.abs() < 1e-12);
    assert!((post.oy - 1.0).abs() < 1e-12);
    assert_eq!(s.coefs().o(), kurbo::Vec2::ZERO);

    let mut bare = Transform::new();
    bare.bind(
        OscillatorBinding::for_target("protate")
            .unwrap()
            .with_shape(Waveform::Square)
            .with_amp(45.0),
    );
    assert!(bare.state_at(0.75).post().unwrap().is_active());
    assert!(bare.post().is_none());
}

#[test]
fn get_at_snapshot_has_no_lfo_children() {
    let mut xf = Transform::new();
    xf.bind_target("color").unwrap().amp = 0.5;
    assert_eq!(xf.to_element().children.len(), 1);
    assert!(xf.get_at(0.5).children.is_empty());
}

#[test]
fn element_round_trip_keeps_everything() {
    let el = xform_el(&[
        ("coefs", "0.5 0.1 -0.1 0.5 0.25 -0.75"),
        ("post", "1 0 0 1 0.5 0"),
        ("chaos", "1 0 1"),
        ("weight", "0.25"),
        ("color", "0.5"),
        ("color_speed", "0.2"),
        ("opacity", "0.9"),
        ("animate", "0"),
        ("linear", "0.5"),
        ("ngon", "0.5"),
        ("ngon_sides", "5"),
        ("symmetry", "0"),
    ]);
    let mut el = el;
    el.push(
        Element::new(LFO_TAG)
            .with_attr("target", "ngon_sides")
            .with_attr("amp", "2")
            .with_attr("shape", "triangle"),
    );
    let xf = Transform::from_element(&el, XformSlot::Indexed(1), 3).unwrap();
    let back = Transform::from_element(&xf.to_element(), XformSlot::Indexed(1), 3).unwrap();
    assert_eq!(back, xf);
    assert!(!back.animate);
}

#[test]
fn final_slot_uses_final_tag_and_no_index() {
    let xf = Transform::from_element(&xform_el(&[]), XformSlot::Final, 2).unwrap();
    assert!(xf.is_final());
    assert_eq!(xf.index(), None);
    assert!(!xf.animate);
    let el = xf.to_element();
    assert_eq!(el.tag, FINAL_XFORM_TAG);
    assert!(el.get("animate").is_none());
}

#[test]
fn polar_edits_recompute_raw_coefficients() {
    let mut xf = Transform::new();
    let mut p = xf.polars();
    p.x.len = 2.0;
    xf.set_polars(p);
    assert!((xf.coefs().xx - 2.0).abs() < 1e-12);
    xf.scale_x(0.5);
    assert!((xf.coefs().xx - 1.0).abs() < 1e-12);
}
