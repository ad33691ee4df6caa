use super::*;
use crate::{
    catalog::variations::VariationId, foundation::error::FlameError, model::coefs::AffineMap,
};

fn flame_el(attrs: &[(&str, &str)]) -> Element {
    let mut el = Element::new(FLAME_TAG);
    for (k, v) in attrs {
        el.set(*k, *v);
    }
    el
}

#[test]
fn defaults_match_documented_values() {
    let f = Flame::new();
    assert_eq!(f.name, "none");
    assert_eq!((f.width, f.height), (720, 360));
    assert_eq!(f.scale(), 20.0);
    assert_eq!(f.brightness, 4.0);
    assert_eq!(f.gamma_threshold, 0.04);
    assert_eq!(f.highlight_power, -1.0);
    assert_eq!(f.interpolation_type, InterpolationType::Log);
    assert_eq!(f.quality, 100);
    assert!(f.xforms().is_empty());
    assert!(f.final_xform().is_none());
    assert_eq!(f.palette.len(), 256);
}

#[test]
fn parses_bespoke_typed_and_extra_attributes() {
    let el = flame_el(&[
        ("name", "spiral"),
        ("size", "800 600"),
        ("center", "0.5 -0.25"),
        ("scale", "200"),
        ("gamma", "2.5"),
        ("background", "0.1 0.2 0.3"),
        ("interpolation", "smooth"),
        ("palette_mode", "step"),
        ("quality", "50"),
        ("zoom", "1"),
        ("version", "Apophysis 2.09"),
    ]);
    let f = Flame::from_element(&el).unwrap();
    assert_eq!(f.name, "spiral");
    assert_eq!((f.width, f.height), (800, 600));
    assert_eq!(f.center, Point::new(0.5, -0.25));
    assert!((f.scale() - 25.0).abs() < 1e-12);
    assert_eq!(f.gamma, 2.5);
    assert_eq!(f.background, [0.1, 0.2, 0.3]);
    assert_eq!(f.interpolation, InterpolationMode::Smooth);
    assert_eq!(f.palette_mode, PaletteMode::Step);
    assert_eq!(f.quality, 50);
    assert_eq!(f.extras().get("zoom"), Some(&AttrValue::Float(1.0)));
    assert_eq!(
        f.extras().get("version"),
        Some(&AttrValue::Text("Apophysis 2.09".to_owned()))
    );
}

#[test]
fn empty_name_falls_back_to_none() {
    let f = Flame::from_element(&flame_el(&[("name", "")])).unwrap();
    assert_eq!(f.name, "none");
}

#[test]
fn scale_is_width_corrected_both_ways() {
    let el = flame_el(&[("size", "720 360"), ("scale", "250")]);
    let f = Flame::from_element(&el).unwrap();
    assert!((f.scale() - 250.0 * 100.0 / 720.0).abs() < 1e-12);
    assert_eq!(f.to_element().get("scale"), Some("250"));
}

#[test]
fn malformed_typed_attributes_are_format_errors() {
    for attrs in [
        [("size", "800")],
        [("size", "wide tall")],
        [("center", "0")],
        [("gamma", "bright")],
        [("interpolation", "cubic")],
        [("quality", "0")],
        [("background", "0 0")],
    ] {
        let err = Flame::from_element(&flame_el(&attrs)).unwrap_err();
        assert!(matches!(err, FlameError::Format(_)), "{attrs:?}: {err}");
    }
}

#[test]
fn second_final_transform_is_rejected() {
    let mut el = flame_el(&[]);
    el.push(Element::new(FINAL_XFORM_TAG));
    el.push(Element::new(FINAL_XFORM_TAG));
    let err = Flame::from_element(&el).unwrap_err();
    assert!(matches!(err, FlameError::Validation(_)));
}

#[test]
fn children_become_transforms_final_and_palette() {
    let mut el = flame_el(&[]);
    el.push(Element::new(XFORM_TAG).with_attr("weight", "0.5"));
    el.push(Element::new(XFORM_TAG).with_attr("weight", "0.25"));
    el.push(Element::new(FINAL_XFORM_TAG).with_attr("color", "1"));
    el.push(
        Element::new(COLOR_TAG)
            .with_attr("index", "3")
            .with_attr("rgb", "255 0 0"),
    );
    el.push(Element::new("edit"));
    let f = Flame::from_element(&el).unwrap();
    assert_eq!(f.xforms().len(), 2);
    assert_eq!(f.xforms()[1].index(), Some(1));
    assert_eq!(f.xforms()[1].weight, 0.25);
    let fin = f.final_xform().unwrap();
    assert!(fin.is_final());
    assert!(!fin.animate);
    assert_eq!(f.palette.get(3).unwrap().rgb(), [255.0, 0.0, 0.0]);
    assert_eq!(f.palette.get(4).unwrap().rgb(), [0.0, 0.0, 0.0]);
}

#[test]
fn serialization_orders_attributes_and_children() {
    let mut f = Flame::new();
    f.push_xform(Transform::new());
    f.set_final(Transform::new());
    f.set_extra("zoom", AttrValue::Float(0.0)).unwrap();
    let el = f.to_element();

    let keys: Vec<&str> = el.attrs.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(&keys[..4], ["name", "size", "center", "scale"]);
    assert_eq!(keys[4], "time");
    assert_eq!(keys.last(), Some(&"zoom"));
    assert_eq!(el.get("interpolation_type"), Some("log"));
    assert_eq!(el.get("background"), Some("0 0 0"));

    assert_eq!(el.children[0].tag, XFORM_TAG);
    assert_eq!(el.children[1].tag, FINAL_XFORM_TAG);
    assert_eq!(el.children.len(), 2 + 256);
    assert!(el.children[2..].iter().all(|c| c.tag == COLOR_TAG));
}

#[test]
fn parse_of_serialized_flame_is_equal() {
    let mut f = Flame::new();
    f.name = "roundtrip".to_owned();
    f.width = 640;
    let mut xf = Transform::new();
    xf.rotate(30.0);
    xf.set_variation(VariationId::from_name("swirl").unwrap(), 0.5);
    xf.bind_target("rotate").unwrap().amp = 10.0;
    f.push_xform(xf);
    f.palette.set(0, crate::model::color::Color::new(255.0, 0.0, 0.0)).unwrap();

    let el = f.to_element();
    let back = Flame::from_element(&el).unwrap();
    assert_eq!(back.to_element(), el);
    assert_eq!(back.xforms(), f.xforms());
    assert_eq!(back.palette, f.palette);
}

#[test]
fn get_at_leaves_the_flame_untouched() {
    let mut f = Flame::new();
    let idx = f.push_xform(Transform::new());
    let binding = f.xform_mut(idx).unwrap().bind_target("weight").unwrap();
    binding.amp = 1.0;
    binding.shape = crate::animation::oscillator::Waveform::Square;
    let before = f.clone();

    let snap = f.get_at(0.75);
    assert_eq!(f, before);
    assert_eq!(f.get_at(0.75), snap);

    let xf = &snap.children[0];
    assert_eq!(xf.get("weight"), Some("2"));
    assert!(xf.children_named("lfo").next().is_none());
}

#[test]
fn final_transform_bindings_are_applied() {
    let mut f = Flame::new();
    f.push_xform(Transform::new());
    let mut fin = Transform::new();
    fin.bind_target("color").unwrap().amp = 0.5;
    f.set_final(fin);

    let state = f.state_at(0.25);
    assert!((state.final_xform().unwrap().color - 0.5).abs() < 1e-12);
    assert!(state.final_xform().unwrap().bindings().is_empty());
    assert_eq!(f.final_xform().unwrap().color, 0.0);
}

#[test]
fn editing_keeps_slots_in_sync() {
    let mut f = Flame::new();
    for w in [1.0, 2.0, 3.0] {
        let mut xf = Transform::new();
        xf.weight = w;
        f.push_xform(xf);
    }
    let removed = f.remove_xform(0).unwrap();
    assert_eq!(removed.weight, 1.0);
    assert!(f.remove_xform(5).is_none());
    let slots: Vec<_> = f.xforms().iter().map(Transform::index).collect();
    assert_eq!(slots, [Some(0), Some(1)]);

    assert!(f.set_final(Transform::new()).is_none());
    assert!(f.set_final(Transform::new()).is_some());
    assert!(f.take_final().unwrap().is_final());
    assert!(f.final_xform().is_none());
}

#[test]
fn copy_is_structurally_equal_and_independent() {
    let mut f = Flame::new();
    f.push_xform(Transform::new());
    let mut dup = f.copy().unwrap();
    assert_eq!(dup, f);
    dup.xform_mut(0).unwrap().weight = 9.0;
    assert_eq!(f.xforms()[0].weight, 1.0);
}

#[test]
fn flame_attr_names_round_trip() {
    for attr in FlameAttr::ALL {
        assert_eq!(FlameAttr::from_name(attr.name()), Some(attr));
    }
    assert_eq!(FlameAttr::from_name("scale"), None);
}

#[test]
fn full_precision_scale_survives_save_and_load() {
    let el = flame_el(&[("size", "720 480"), ("scale", "36.4912280701754")]);
    let f = Flame::from_element(&el).unwrap();
    let written = f.to_element();
    assert_eq!(written.get("scale"), Some("36.4912280701754"));
    let again = Flame::from_element(&written).unwrap();
    assert_eq!(again, f);
    assert_eq!(again.scale(), f.scale());
}

#[test]
fn set_scale_is_width_corrected() {
    let mut f = Flame::new();
    f.width = 800;
    f.set_scale(25.0);
    assert_eq!(f.to_element().get("scale"), Some("200"));
    assert_eq!(f.scale(), 25.0);
}

#[test]
fn extras_cannot_shadow_typed_attributes() {
    let mut f = Flame::new();
    for name in ["gamma", "size", "scale", "name", "quality"] {
        let err = f.set_extra(name, AttrValue::Float(1.0)).unwrap_err();
        assert!(matches!(err, FlameError::Validation(_)), "{name}");
    }
    assert!(f.extras().is_empty());
    assert_eq!(f.to_element().get("gamma"), Some("4"));
}

#[test]
fn chaos_follows_sibling_edits() {
    let mut el = flame_el(&[]);
    el.push(Element::new(XFORM_TAG).with_attr("chaos", "0 1"));
    el.push(Element::new(XFORM_TAG).with_attr("chaos", "1 0.5"));
    let mut f = Flame::from_element(&el).unwrap();

    f.push_xform(Transform::new());
    assert_eq!(f.xforms()[0].chaos().unwrap().weights(), [0.0, 1.0, 1.0]);
    assert_eq!(f.xforms()[1].chaos().unwrap().weights(), [1.0, 0.5, 1.0]);
    assert!(f.xforms()[2].chaos().is_none());

    f.remove_xform(0);
    assert_eq!(f.xforms()[0].chaos().unwrap().weights(), [0.5, 1.0]);

    f.remove_xform(0);
    assert!(f.xforms()[0].chaos().is_none());
    assert_eq!(f.xforms().len(), 1);
}
