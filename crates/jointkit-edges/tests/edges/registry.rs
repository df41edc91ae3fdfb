use crate::common::{ctx, overrides, registry};
use jointkit_core::{
    ConfigError, FamilyOverrides, FamilySettings, JointError, ParamValue,
};
use jointkit_edges::{
    DoveTailSettings, EdgeRegistry, FingerJointSettings, StackableSettings, FAMILY_NAMES,
};
use std::sync::Arc;

#[test]
fn test_standard_tags() {
    let registry = registry();
    let tags: String = registry.tags().collect();
    for tag in "eEgfFhsSiIjJkKoOpPqQuUvVlLnmNMcCdDR".chars() {
        assert!(tags.contains(tag), "missing edge '{tag}' in {tags}");
    }
    assert!(!registry.contains('X'));
    assert!(registry.finger_holes().is_some());
}

#[test]
fn test_unknown_tag() {
    let err = registry().resolve('Z').unwrap_err();
    assert_eq!(err, JointError::Config(ConfigError::UnknownEdge('Z')));
    assert!(registry().resolve_all("efZ").is_err());
    assert_eq!(registry().resolve_all("efF").unwrap().len(), 3);
}

#[test]
fn test_unknown_family() {
    let mut all = FamilyOverrides::default();
    all.families.insert("Dovetail".to_string(), overrides(&[]));
    let err = EdgeRegistry::standard(&ctx(), &all).unwrap_err();
    assert_eq!(
        err,
        JointError::Config(ConfigError::UnknownFamily("Dovetail".to_string()))
    );
}

#[test]
fn test_bad_override_is_reported() {
    let mut all = FamilyOverrides::default();
    all.families.insert(
        "Flex".to_string(),
        overrides(&[("stretch", ParamValue::from("lots"))]),
    );
    let err = EdgeRegistry::standard(&ctx(), &all).unwrap_err();
    assert!(matches!(
        err,
        JointError::Config(ConfigError::TypeMismatch { .. })
    ));
}

#[test]
fn test_every_family_is_known() {
    assert_eq!(FAMILY_NAMES.len(), 11);
    assert!(FAMILY_NAMES.contains(&"DoveTail"));
}

#[test]
fn test_add_family_with_custom_chars() {
    let mut registry = EdgeRegistry::new();
    let dovetail = Arc::new(DoveTailSettings::with_defaults(3.0).unwrap());
    let edges = registry.add_family(&dovetail, &ctx(), Some("x")).unwrap();
    assert_eq!(edges.len(), 2);
    assert!(registry.contains('x'));
    assert!(registry.contains('D'));
    assert!(!registry.contains('d'));
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_stackable_needs_finger_holes() {
    let mut registry = EdgeRegistry::new();
    let stackable = Arc::new(StackableSettings::with_defaults(3.0).unwrap());
    let err = registry.add_family(&stackable, &ctx(), None).unwrap_err();
    assert!(matches!(
        err,
        JointError::Config(ConfigError::MissingDependency(_))
    ));

    let fingers = Arc::new(FingerJointSettings::with_defaults(3.0).unwrap());
    registry.add_family(&fingers, &ctx(), None).unwrap();
    registry.add_family(&stackable, &ctx(), None).unwrap();
    assert!(registry.contains('s') && registry.contains('S'));
}

#[test]
fn test_absolute_overrides() {
    let mut all = FamilyOverrides::default();
    all.relative = false;
    all.families.insert(
        "FingerJoint".to_string(),
        overrides(&[("finger", ParamValue::from(10.0))]),
    );
    let registry = EdgeRegistry::standard(&ctx(), &all).unwrap();
    assert!(registry.resolve('f').is_ok());
    let settings = FingerJointSettings::new(3.0, false, &all.family("FingerJoint")).unwrap();
    assert_eq!(settings.finger(), 10.0);
    assert_eq!(settings.space(), 2.0);
}
