use jointkit_core::{
    normalize_degrees, Cursor, FamilyOverrides, JointContext, Overrides, ParamValue, Point,
    RecordingCursor,
};
use jointkit_edges::{Edge, EdgeRef, EdgeRegistry};

pub fn ctx() -> JointContext {
    JointContext::default()
}

pub fn registry() -> EdgeRegistry {
    EdgeRegistry::standard(&ctx(), &FamilyOverrides::default()).unwrap()
}

pub fn edge(tag: char) -> EdgeRef {
    registry().resolve(tag).unwrap()
}

pub fn overrides(values: &[(&str, ParamValue)]) -> Overrides {
    values
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

/// Standard registry with overrides for a single family.
pub fn registry_with(family: &str, values: &[(&str, ParamValue)]) -> EdgeRegistry {
    let mut all = FamilyOverrides::default();
    all.families.insert(family.to_string(), overrides(values));
    EdgeRegistry::standard(&ctx(), &all).unwrap()
}

pub fn trace(edge: &dyn Edge, length: f64) -> RecordingCursor {
    let mut cursor = RecordingCursor::new();
    edge.draw(&mut cursor, length, None).unwrap();
    cursor
}

/// Draws `edge` and checks it ends at `(length, start_width - end_width)`
/// pointing the way it started.
pub fn assert_ends_on_line(edge: &dyn Edge, length: f64) -> RecordingCursor {
    let cursor = trace(edge, length);
    let expected = Point::new(length, edge.start_width() - edge.end_width());
    assert!(
        cursor.position().approx_eq(&expected, 1e-6),
        "{} ended at {:?}, expected {:?}",
        edge.description(),
        cursor.position(),
        expected
    );
    assert!(
        normalize_degrees(cursor.heading()).abs() < 1e-6,
        "{} ended with heading {}",
        edge.description(),
        cursor.heading()
    );
    cursor
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}
