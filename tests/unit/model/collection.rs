use super::*;

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "flamekit_{name}_{}_{}.flame",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

const TWO_FLAMES: &str = r#"<flames>
  <flame name="a"><xform weight="1"/></flame>
  <flame name="b"/>
  <comment/>
</flames>"#;

#[test]
fn flames_root_yields_every_flame_child() {
    let c = FlameCollection::parse(TWO_FLAMES).unwrap();
    let names: Vec<&str> = c.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(c.flames()[0].xforms().len(), 1);
}

#[test]
fn lone_flame_root_is_accepted() {
    let c = FlameCollection::parse(r#"<flame name="solo"/>"#).unwrap();
    assert_eq!(c.len(), 1);
    assert_eq!(c.to_element().tag, FLAMES_TAG);
}

#[test]
fn other_roots_are_format_errors() {
    let err = FlameCollection::parse("<scene/>").unwrap_err();
    assert!(matches!(err, FlameError::Format(_)));
}

#[test]
fn builder_needs_exactly_one_source() {
    let el = Element::parse_str(TWO_FLAMES).unwrap();
    assert_eq!(FlameCollection::builder().element(&el).build().unwrap().len(), 2);

    let err = FlameCollection::builder().build().unwrap_err();
    assert!(matches!(err, FlameError::Construction(_)));

    let err = FlameCollection::builder()
        .element(&el)
        .file("unused.flame")
        .build()
        .unwrap_err();
    assert!(matches!(err, FlameError::Construction(_)));
}

#[test]
fn save_then_load_round_trips() {
    let path = temp_file("save_load");
    let c = FlameCollection::parse(TWO_FLAMES).unwrap();
    c.save(&path).unwrap();

    let loaded = FlameCollection::builder().file(&path).build().unwrap();
    assert_eq!(loaded, c);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file_reports_the_path() {
    let path = temp_file("missing");
    let err = FlameCollection::load(&path).unwrap_err();
    assert!(matches!(err, FlameError::Other(_)));
    assert!(err.to_string().contains("failed to read flame document"));
}
