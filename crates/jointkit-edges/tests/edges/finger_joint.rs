use crate::common::{assert_close, assert_ends_on_line, ctx, edge, registry, registry_with, trace};
use jointkit_core::{BedBolts, Cursor, FamilySettings, ParamValue, Point, Primitive, RecordingCursor};
use jointkit_edges::{CrossingFingerHoleEdge, Edge, FingerJointSettings};
use proptest::prelude::*;

fn settings() -> FingerJointSettings {
    FingerJointSettings::with_defaults(3.0).unwrap()
}

fn lines(cursor: &RecordingCursor) -> Vec<(Point, Point)> {
    cursor
        .primitives()
        .iter()
        .filter_map(|p| match p {
            Primitive::Line { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_both_halves_close() {
    for tag in ['f', 'F', 'h'] {
        assert_ends_on_line(edge(tag).as_ref(), 100.0);
    }
    assert_close(trace(edge('f').as_ref(), 100.0).path_length(), 142.0, 1e-9);
    assert_close(trace(edge('F').as_ref(), 100.0).path_length(), 142.0, 1e-9);
}

#[test]
fn test_widths_and_margins() {
    let f = edge('f');
    let h = edge('h');
    assert_eq!(f.start_width(), 0.0);
    assert_eq!(f.margin(), 3.0);
    assert_eq!(edge('F').start_width(), 3.0);
    assert_eq!(edge('F').margin(), 0.0);
    assert_eq!(h.start_width(), 6.0);
    assert_eq!(h.spacing(), 6.0);
}

#[test]
fn test_acute_angle_shortens_fingers() {
    let registry = registry_with("FingerJoint", &[("angle", ParamValue::from(60.0))]);
    let f = registry.resolve('f').unwrap();
    let cursor = assert_ends_on_line(f.as_ref(), 100.0);
    assert_close(cursor.path_length(), 136.373, 1e-3);
}

#[test]
fn test_fingers_line_up_with_holes() {
    let s = settings();
    let positions = s.finger_positions(100.0, None);
    assert_eq!(positions.len(), 7);

    let holes: Vec<Point> = trace(edge('h').as_ref(), 100.0)
        .primitives()
        .iter()
        .filter_map(|p| match p {
            Primitive::RectangularHole { center, .. } => Some(*center),
            _ => None,
        })
        .collect();
    assert_eq!(holes.len(), positions.len());
    for (hole, pos) in holes.iter().zip(&positions) {
        assert_close(hole.x, pos + s.finger() / 2.0, 1e-9);
        assert_close(hole.y, s.edge_width() + s.thickness() / 2.0, 1e-9);
    }

    let f_lines = lines(&trace(edge('f').as_ref(), 100.0));
    let big_f_lines = lines(&trace(edge('F').as_ref(), 100.0));
    for pos in &positions {
        let tip = Point::new(*pos, -3.0);
        assert!(
            f_lines.iter().any(|(from, _)| from.approx_eq(&tip, 1e-9)),
            "no finger tip at {pos}"
        );
        let gap = Point::new(*pos, 3.0);
        assert!(
            big_f_lines.iter().any(|(from, _)| from.approx_eq(&gap, 1e-9)),
            "no recess at {pos}"
        );
    }
}

#[test]
fn test_short_edge_draws_straight() {
    let cursor = assert_ends_on_line(edge('f').as_ref(), 5.0);
    assert_close(cursor.path_length(), 5.0, 1e-9);
    assert!(lines(&cursor).iter().all(|(from, to)| from.y == 0.0 && to.y == 0.0));
}

#[test]
fn test_counterpart_bolts_get_round_holes() {
    let bolts = BedBolts::even(2);
    let f = edge('F');
    let mut cursor = RecordingCursor::new();
    f.draw(&mut cursor, 100.0, Some(&bolts)).unwrap();
    let holes = cursor
        .primitives()
        .iter()
        .filter(|p| matches!(p, Primitive::Hole { .. }))
        .count();
    assert_eq!(holes, 2);
    assert!(cursor.position().approx_eq(&Point::new(100.0, 0.0), 1e-9));
}

#[test]
fn test_positive_bolts_keep_edge_closed() {
    let bolts = BedBolts::even(2);
    let mut cursor = RecordingCursor::new();
    edge('f').draw(&mut cursor, 100.0, Some(&bolts)).unwrap();
    assert!(cursor.position().approx_eq(&Point::new(100.0, 0.0), 1e-9));
    // two nut pockets on top of the plain finger outline
    assert!(cursor.path_length() > 142.0 + 2.0 * 15.0);
}

proptest! {
    #[test]
    fn prop_fingers_fill_the_length(length in 1.0f64..500.0) {
        let s = settings();
        let layout = s.calc_fingers(length, None);
        prop_assert!(layout.leftover >= 0.0);
        if layout.fingers > 0 {
            let pitch = s.space() + s.finger();
            let used = layout.fingers as f64 * pitch - s.space() + layout.leftover;
            prop_assert!((used - length).abs() < 1e-9);
        } else {
            prop_assert_eq!(layout.leftover, length);
        }
    }
}

#[test]
fn test_crossing_holes_run_across_the_edge() {
    let holes = registry().finger_holes().unwrap();
    let crossing = CrossingFingerHoleEdge::new(holes, &ctx(), 60.0);
    assert_eq!(crossing.tag(), Some('|'));

    let cursor = assert_ends_on_line(&crossing, 100.0);
    assert_close(cursor.path_length(), 100.0, 1e-9);

    let expected = settings().calc_fingers(60.0, None).fingers;
    let centres: Vec<_> = cursor
        .primitives()
        .iter()
        .filter_map(|p| match p {
            Primitive::RectangularHole {
                center, rotation, ..
            } => Some((*center, *rotation)),
            _ => None,
        })
        .collect();
    assert_eq!(centres.len(), expected);
    for (center, rotation) in centres {
        assert_close(center.x, 50.0, 1e-9);
        assert!(center.y > ctx().burn && center.y < 60.0 + ctx().burn);
        assert_close(rotation, 90.0, 1e-9);
    }
}
