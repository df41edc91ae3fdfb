use crate::common::{assert_close, assert_ends_on_line, edge, registry_with};
use jointkit_core::{JointError, ParamValue, RecordingCursor};

#[test]
fn test_default_dovetails() {
    for tag in ['d', 'D'] {
        let cursor = assert_ends_on_line(edge(tag).as_ref(), 100.0);
        assert_close(cursor.path_length(), 187.0186, 1e-3);
    }
}

#[test]
fn test_leftover_goes_to_the_ends() {
    let cursor = assert_ends_on_line(edge('d').as_ref(), 97.3);
    assert_close(cursor.path_length(), 184.3186, 1e-3);
}

#[test]
fn test_custom_dovetail() {
    let registry = registry_with(
        "DoveTail",
        &[
            ("angle", ParamValue::from(30.0)),
            ("size", ParamValue::from(2.0)),
            ("depth", ParamValue::from(1.0)),
        ],
    );
    let d = registry.resolve('d').unwrap();
    let cursor = assert_ends_on_line(d.as_ref(), 77.7);
    assert_close(cursor.path_length(), 120.330, 2e-3);
    assert_close(d.margin(), 3.0, 1e-9);
}

#[test]
fn test_dovetail_variants_close() {
    // (angle, size, depth, length), none of the lengths a whole number of pitches
    let cases = [
        (-30.0, 2.0, 1.0, 55.5),
        (70.0, 4.0, 2.0, 63.0),
        (10.0, 1.0, 0.5, 31.7),
    ];
    for (angle, size, depth, length) in cases {
        let registry = registry_with(
            "DoveTail",
            &[
                ("angle", ParamValue::from(angle)),
                ("size", ParamValue::from(size)),
                ("depth", ParamValue::from(depth)),
            ],
        );
        for tag in ['d', 'D'] {
            let edge = registry.resolve(tag).unwrap();
            let cursor = assert_ends_on_line(edge.as_ref(), length);
            assert!(cursor.path_length() > length, "{tag} at angle {angle}");
        }
    }
}

#[test]
fn test_margins() {
    assert_close(edge('d').margin(), 4.5, 1e-9);
    assert_eq!(edge('D').margin(), 0.0);
}

#[test]
fn test_short_edge_is_straight() {
    let cursor = assert_ends_on_line(edge('d').as_ref(), 5.0);
    assert_close(cursor.path_length(), 5.0, 1e-9);
}

#[test]
fn test_right_angle_is_rejected() {
    let registry = registry_with("DoveTail", &[("angle", ParamValue::from(90.0))]);
    let d = registry.resolve('d').unwrap();
    let mut cursor = RecordingCursor::new();
    let err = d.draw(&mut cursor, 100.0, None).unwrap_err();
    assert!(matches!(err, JointError::Geometry(_)));
}
