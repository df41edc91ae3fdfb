use crate::common::{assert_close, assert_ends_on_line, edge, registry, registry_with};
use jointkit_core::{Cursor, FamilySettings, ParamValue, Point, Primitive, RecordingCursor};
use jointkit_edges::{CabinetHingeEdge, CabinetHingeSettings, EdgeRegistry};
use std::sync::Arc;

fn path_length(registry: &EdgeRegistry, tag: char, length: f64) -> f64 {
    let edge = registry.resolve(tag).unwrap();
    assert_ends_on_line(edge.as_ref(), length).path_length()
}

#[test]
fn test_outset_hinge_lengths() {
    let registry = registry();
    assert_close(path_length(&registry, 'i', 100.0), 133.596, 1e-3);
    assert_close(path_length(&registry, 'j', 100.0), 133.596, 1e-3);
    assert_close(path_length(&registry, 'k', 100.0), 167.193, 1e-3);
    assert_close(path_length(&registry, 'I', 100.0), 106.0, 1e-9);
    assert_close(path_length(&registry, 'J', 100.0), 106.0, 1e-9);
    assert_close(path_length(&registry, 'K', 100.0), 112.0, 1e-9);
}

#[test]
fn test_flush_hinge_lengths() {
    let registry = registry_with("Hinge", &[("style", ParamValue::from("flush"))]);
    assert_close(path_length(&registry, 'i', 100.0), 109.206, 1e-3);
    assert_close(path_length(&registry, 'j', 100.0), 109.206, 1e-3);
    assert_close(path_length(&registry, 'k', 100.0), 118.412, 1e-3);
}

#[test]
fn test_outset_lid_pins_get_grips() {
    let registry = registry_with(
        "Hinge",
        &[
            ("outset", ParamValue::from(true)),
            ("grip_percentage", ParamValue::from(0.1)),
        ],
    );
    assert_close(path_length(&registry, 'I', 100.0), 114.708, 1e-3);
    assert_close(path_length(&registry, 'J', 100.0), 114.708, 1e-3);
    assert_close(path_length(&registry, 'K', 100.0), 118.0, 1e-3);

    let pin = registry.resolve('I').unwrap();
    let end = assert_ends_on_line(pin.as_ref(), 100.0).position();
    assert!(end.approx_eq(&Point::new(100.0, -3.0), 1e-6));
    let pin = registry.resolve('J').unwrap();
    let end = assert_ends_on_line(pin.as_ref(), 100.0).position();
    assert!(end.approx_eq(&Point::new(100.0, 3.0), 1e-6));
}

#[test]
fn test_hinge_eye_margin() {
    assert_eq!(edge('i').margin(), 9.0);
}

#[test]
fn test_hinge_pin_too_short() {
    let pin = edge('K');
    let mut cursor = RecordingCursor::new();
    assert!(pin.draw(&mut cursor, 2.0, None).is_err());
}

#[test]
fn test_chest_hinge_lengths() {
    let registry = registry();
    assert_close(path_length(&registry, 'o', 100.0), 139.412, 1e-3);
    assert_close(path_length(&registry, 'O', 100.0), 139.412, 1e-3);
    assert_close(path_length(&registry, 'p', 100.0), 111.308, 1e-3);
    assert_close(path_length(&registry, 'P', 100.0), 111.308, 1e-3);
    assert_close(path_length(&registry, 'q', 100.0), 130.0, 1e-3);
    assert_close(path_length(&registry, 'Q', 100.0), 100.0, 1e-9);

    let o = registry.resolve('o').unwrap();
    assert!(assert_ends_on_line(o.as_ref(), 100.0)
        .position()
        .approx_eq(&Point::new(100.0, -9.0), 1e-6));
    let p = registry.resolve('p').unwrap();
    assert!(assert_ends_on_line(p.as_ref(), 100.0)
        .position()
        .approx_eq(&Point::new(100.0, -9.3), 1e-6));
    assert_eq!(registry.resolve('q').unwrap().margin(), 9.0);
    assert_eq!(registry.resolve('Q').unwrap().start_width(), 9.0);
}

#[test]
fn test_cabinet_hinge_lengths() {
    let registry = registry();
    assert_close(path_length(&registry, 'u', 200.0), 252.8, 1e-6);
    assert_close(path_length(&registry, 'U', 200.0), 241.4, 1e-6);
    assert_close(path_length(&registry, 'v', 200.0), 240.8, 1e-6);
    assert_close(path_length(&registry, 'V', 200.0), 241.4, 1e-6);
}

#[test]
fn test_single_cabinet_hinge_is_centred() {
    let registry = registry_with("CabinetHinge", &[("hinges", ParamValue::from(1i64))]);
    assert_close(path_length(&registry, 'u', 200.0), 226.4, 1e-6);
    assert_close(path_length(&registry, 'U', 200.0), 220.7, 1e-6);
    assert_close(path_length(&registry, 'v', 200.0), 220.4, 1e-6);
    assert_close(path_length(&registry, 'V', 200.0), 220.7, 1e-6);
}

#[test]
fn test_cabinet_hinge_falls_back_to_straight() {
    let cursor = assert_ends_on_line(edge('u').as_ref(), 10.0);
    assert_close(cursor.path_length(), 10.0, 1e-9);
}

#[test]
fn test_cabinet_hinge_parts() {
    let settings = Arc::new(CabinetHingeSettings::with_defaults(3.0).unwrap());
    let edge = CabinetHingeEdge::new(settings, false, false);
    let mut cursor = RecordingCursor::new();
    let extent = edge.draw_parts(&mut cursor, 0.6);

    let bores = cursor
        .primitives()
        .iter()
        .filter(|p| matches!(p, Primitive::Hole { .. }))
        .count();
    assert_eq!(bores, 10);
    assert!(extent.width > 0.0 && extent.height > 0.0);
    assert!(cursor.position().approx_eq(&Point::new(0.0, 0.0), 1e-9));
}
