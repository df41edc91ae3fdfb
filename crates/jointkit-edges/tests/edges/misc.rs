use crate::common::{assert_close, assert_ends_on_line, ctx, edge, registry, registry_with};
use jointkit_core::{
    Cursor, FamilySettings, JointError, ParamValue, Point, Primitive, RecordingCursor,
};
use jointkit_edges::{
    ClickSettings, CompoundEdge, Edge, FlexEdge, FlexSettings, SlottedEdge,
};
use std::f64::consts::PI;
use std::sync::Arc;

#[test]
fn test_straight_edges() {
    assert_ends_on_line(edge('e').as_ref(), 40.0);
    assert_ends_on_line(edge('E').as_ref(), 40.0);
    assert_eq!(edge('E').start_width(), 3.0);
    assert_eq!(edge('e').spacing(), 0.0);
}

#[test]
fn test_grip_styles() {
    let cursor = assert_ends_on_line(edge('g').as_ref(), 50.0);
    assert_close(cursor.path_length(), 25.0 * PI, 1e-9);

    let bumps = registry_with("Grip", &[("style", ParamValue::from("bumps"))]);
    let g = bumps.resolve('g').unwrap();
    assert_close(assert_ends_on_line(g.as_ref(), 50.0).path_length(), 25.0 * PI, 1e-9);

    let inset = registry_with(
        "Grip",
        &[
            ("style", ParamValue::from("bumps")),
            ("outset", ParamValue::from(false)),
        ],
    );
    let g = inset.resolve('g').unwrap();
    assert_close(assert_ends_on_line(g.as_ref(), 50.0).path_length(), 80.3255, 1e-3);
}

#[test]
fn test_stackable_feet() {
    for tag in ['s', 'S'] {
        let cursor = assert_ends_on_line(edge(tag).as_ref(), 100.0);
        assert_close(cursor.path_length(), 104.348, 1e-3);
    }
    assert_close(edge('s').start_width(), 12.0, 1e-9);
    assert_close(edge('S').margin(), 12.0, 1e-9);

    let holes = assert_ends_on_line(edge('s').as_ref(), 100.0)
        .primitives()
        .iter()
        .filter(|p| matches!(p, Primitive::RectangularHole { .. }))
        .count();
    assert_eq!(holes, 7);
}

#[test]
fn test_stackable_too_short() {
    let mut cursor = RecordingCursor::new();
    let err = edge('s').draw(&mut cursor, 20.0, None).unwrap_err();
    assert!(matches!(err, JointError::Geometry(_)));
}

#[test]
fn test_lid_edges() {
    let registry = registry();
    let length = |tag: char| {
        let edge = registry.resolve(tag).unwrap();
        assert_ends_on_line(edge.as_ref(), 100.0).path_length()
    };
    assert_close(length('l'), 136.0, 1e-9);
    assert_close(length('n'), 151.027, 1e-3);
    assert_close(length('m'), 151.027, 1e-3);
    assert_close(length('N'), 136.6, 1e-6);
    assert_close(length('M'), 136.6, 1e-6);
    assert_ends_on_line(registry.resolve('L').unwrap().as_ref(), 100.0);

    assert_eq!(registry.resolve('l').unwrap().margin(), 3.0);
    assert_eq!(registry.resolve('L').unwrap().start_width(), 6.0);
    assert_eq!(registry.resolve('n').unwrap().start_width(), 3.0);
    assert_eq!(registry.resolve('m').unwrap().end_width(), 3.0);
    assert_eq!(registry.resolve('N').unwrap().start_width(), 6.0);
    assert_eq!(registry.resolve('M').unwrap().end_width(), 6.0);
}

#[test]
fn test_plain_lid_edges() {
    let registry = registry_with(
        "Lid",
        &[
            ("spring", ParamValue::from("none")),
            ("second_pin", ParamValue::from(false)),
        ],
    );
    for (tag, expected) in [('n', 103.0), ('m', 103.0), ('N', 118.3), ('M', 118.3)] {
        let edge = registry.resolve(tag).unwrap();
        let cursor = assert_ends_on_line(edge.as_ref(), 100.0);
        assert_close(cursor.path_length(), expected, 1e-6);
    }
}

#[test]
fn test_lid_needs_room_for_the_pin() {
    let mut cursor = RecordingCursor::new();
    assert!(edge('n').draw(&mut cursor, 10.0, None).is_err());
}

#[test]
fn test_click_edges() {
    let c = edge('c');
    assert_ends_on_line(c.as_ref(), 100.0);
    assert_eq!(c.margin(), 6.0);

    let cursor = assert_ends_on_line(edge('C').as_ref(), 100.0);
    assert_close(cursor.path_length(), 112.0, 1e-6);
    assert_eq!(edge('C').start_width(), 3.0);
}

#[test]
fn test_click_connector_needs_two_assemblies() {
    let settings = ClickSettings::with_defaults(3.0).unwrap();
    let too_short = 2.0 * settings.assembly_length() - 1.0;
    let mut cursor = RecordingCursor::new();
    assert!(edge('c').draw(&mut cursor, too_short, None).is_err());
}

#[test]
fn test_rack_edge() {
    let rack = edge('R');
    let cursor = assert_ends_on_line(rack.as_ref(), 100.0);
    assert!(cursor.path_length() > 100.0);
    assert_close(rack.margin(), 3.3, 1e-9);

    // shorter than one pitch
    let cursor = assert_ends_on_line(rack.as_ref(), 2.0);
    assert_close(cursor.path_length(), 2.0, 1e-9);
}

#[test]
fn test_rack_teeth_are_identical() {
    let rack = edge('R');
    let extra = |length: f64| assert_ends_on_line(rack.as_ref(), length).path_length() - length;

    // pitch 3: one, two and 33 teeth
    let tooth = extra(5.0);
    assert!(tooth > 0.0);
    assert_close(extra(8.0), 2.0 * tooth, 1e-9);
    assert_close(extra(100.0), 33.0 * tooth, 1e-9);
}

#[test]
fn test_flex_edge_cuts_slits() {
    let settings = Arc::new(FlexSettings::with_defaults(3.0).unwrap());
    let flex = FlexEdge::new(settings, &ctx(), 40.0);
    let cursor = assert_ends_on_line(&flex, 50.0);
    assert_close(cursor.path_length(), 50.0, 1e-9);

    let slits: Vec<(Point, Point)> = cursor
        .primitives()
        .iter()
        .filter_map(|p| match p {
            Primitive::Slit { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert!(!slits.is_empty());
    for (from, to) in slits {
        assert_eq!(from.x, to.x);
        assert!(from.x > 0.0 && from.x < 50.0);
    }
}

#[test]
fn test_compound_edge_jogs_between_widths() {
    let registry = registry();
    let compound = CompoundEdge::from_tags(&registry, "eFe", vec![10.0, 50.0, 10.0]).unwrap();
    assert_eq!(compound.length(), 70.0);
    assert_eq!(compound.margin(), 3.0);
    assert_ends_on_line(&compound, 70.0);

    let mut cursor = RecordingCursor::new();
    assert!(compound.draw(&mut cursor, 0.0, None).is_ok());
    assert!(cursor.position().approx_eq(&Point::new(70.0, 0.0), 1e-9));

    let err = compound.draw(&mut cursor, 80.0, None).unwrap_err();
    assert!(matches!(err, JointError::LengthMismatch(_)));
    let err = compound.draw(&mut cursor, 69.0, None).unwrap_err();
    assert!(matches!(err, JointError::LengthMismatch(_)));
}

#[test]
fn test_slotted_edge() {
    let slotted = SlottedEdge::new(edge('e'), vec![20.0, 30.0], 5.0, 3.0).unwrap();
    assert_eq!(slotted.length(), 53.0);
    let cursor = assert_ends_on_line(&slotted, 53.0);
    assert_close(cursor.path_length(), 63.0, 1e-9);

    let mut cursor = RecordingCursor::new();
    let err = slotted.draw(&mut cursor, 60.0, None).unwrap_err();
    assert!(matches!(err, JointError::LengthMismatch(_)));
}
