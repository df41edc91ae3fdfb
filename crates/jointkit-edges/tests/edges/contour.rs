use crate::common::{assert_close, ctx, edge, registry};
use jointkit_core::{
    BedBolts, Cursor, FamilySettings, GeometryError, JointError, Point, Primitive, RecordingCursor,
};
use jointkit_edges::{
    panel_flex_wall, plan_contour, polygon_wall, rectangular_wall, ContourPlan, EdgeRef,
    FlexSettings, PartLayout,
};
use std::f64::consts::PI;
use std::sync::Arc;

fn rectangle(width: f64, height: f64) -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width, height),
        Point::new(0.0, height),
    ]
}

fn outline_ends(cursor: &RecordingCursor) -> (Point, Point) {
    let outline: Vec<(Point, Point)> = cursor
        .primitives()
        .iter()
        .filter_map(|p| match p {
            Primitive::Line { from, to } => Some((*from, *to)),
            Primitive::Arc { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    let first = outline.first().map(|(from, _)| *from).unwrap();
    let last = outline.last().map(|(_, to)| *to).unwrap();
    (first, last)
}

#[test]
fn test_counter_clockwise_turns_left() {
    let plan = plan_contour(&rectangle(40.0, 20.0), &[0.0]).unwrap();
    assert_eq!(plan.sides.len(), 4);
    for side in &plan.sides {
        assert_close(side.turn, 90.0, 1e-9);
    }
    assert_close(plan.perimeter(), 120.0, 1e-9);
}

#[test]
fn test_polygon_wall_closes() {
    for tag in ['e', 'f'] {
        let edges: Vec<EdgeRef> = vec![edge(tag)];
        let mut cursor = RecordingCursor::new();
        polygon_wall(&mut cursor, &rectangle(40.0, 20.0), &edges, &[0.0], &[]).unwrap();
        let (first, last) = outline_ends(&cursor);
        assert!(first.approx_eq(&last, 1e-6), "{tag}: {first:?} != {last:?}");
        assert!(cursor.position().approx_eq(&Point::origin(), 1e-9));
    }
}

#[test]
fn test_rounded_contour() {
    let points = rectangle(60.0, 40.0);
    let radii = [0.0, 10.0, 10.0, 10.0];
    let plan = plan_contour(&points, &radii).unwrap();
    let lines: Vec<f64> = plan.sides.iter().map(|s| s.line_length()).collect();
    for (actual, expected) in lines.iter().zip([50.0, 20.0, 40.0, 30.0]) {
        assert_close(*actual, expected, 1e-9);
    }
    assert_close(plan.perimeter(), 140.0 + 15.0 * PI, 1e-9);

    let mut cursor = RecordingCursor::new();
    let lengths = polygon_wall(&mut cursor, &points, &[edge('e')], &radii, &[]).unwrap();
    assert_eq!(lengths, plan.line_lengths());
    let (first, last) = outline_ends(&cursor);
    assert!(first.approx_eq(&last, 1e-6));
}

#[test]
fn test_plan_serializes() {
    let plan = plan_contour(&rectangle(60.0, 40.0), &[0.0, 10.0, 10.0, 10.0]).unwrap();
    let json = serde_json::to_value(&plan).unwrap();
    let sides = json["sides"].as_array().unwrap();
    assert_eq!(sides.len(), 4);
    assert_eq!(sides[0]["radius"], 10.0);
    assert_eq!(sides[3]["radius"], 0.0);

    let restored: ContourPlan = serde_json::from_value(json).unwrap();
    for (a, b) in restored.line_lengths().iter().zip(plan.line_lengths()) {
        assert_close(*a, b, 1e-9);
    }
}

#[test]
fn test_rounded_contour_closes_with_outset_edges() {
    let points = rectangle(60.0, 40.0);
    let radii = [0.0, 10.0, 10.0, 10.0];
    for tags in ["fFfF", "heee", "EeEe", "EEEE", "hhhh"] {
        let edges: Vec<EdgeRef> = tags.chars().map(edge).collect();
        let mut cursor = RecordingCursor::new();
        polygon_wall(&mut cursor, &points, &edges, &radii, &[]).unwrap();
        let (first, last) = outline_ends(&cursor);
        assert!(first.approx_eq(&last, 1e-6), "{tags}: {first:?} != {last:?}");
    }
}

#[test]
fn test_concave_rounded_corner_closes() {
    let points = vec![
        Point::new(0.0, 0.0),
        Point::new(60.0, 0.0),
        Point::new(60.0, 20.0),
        Point::new(30.0, 20.0),
        Point::new(30.0, 40.0),
        Point::new(0.0, 40.0),
    ];
    let radii = [0.0, 0.0, 0.0, 5.0, 0.0, 0.0];
    let plan = plan_contour(&points, &radii).unwrap();
    assert_close(plan.sides[2].turn, -90.0, 1e-9);

    for tag in ['e', 'E'] {
        let mut cursor = RecordingCursor::new();
        polygon_wall(&mut cursor, &points, &[edge(tag)], &radii, &[]).unwrap();
        let (first, last) = outline_ends(&cursor);
        assert!(first.approx_eq(&last, 1e-6), "{tag}: {first:?} != {last:?}");
    }
}

#[test]
fn test_contour_errors() {
    let err = plan_contour(&rectangle(10.0, 10.0)[..2], &[0.0]).unwrap_err();
    assert_eq!(err, JointError::Geometry(GeometryError::TooFewVertices(2)));

    let err = plan_contour(&rectangle(10.0, 10.0), &[1.0]).unwrap_err();
    assert_eq!(err, JointError::Geometry(GeometryError::StartCornerRadius(1.0)));

    let mut points = rectangle(10.0, 10.0);
    points.insert(1, Point::new(0.0, 0.0));
    let err = plan_contour(&points, &[0.0]).unwrap_err();
    assert_eq!(err, JointError::Geometry(GeometryError::DegenerateSide(0)));

    let err = plan_contour(&rectangle(10.0, 10.0), &[0.0, 8.0]).unwrap_err();
    assert!(matches!(
        err,
        JointError::Geometry(GeometryError::LengthTooShort { .. })
    ));
}

#[test]
fn test_flex_panel_matches_contour() {
    let points = rectangle(60.0, 40.0);
    let radii = [0.0, 10.0, 10.0, 10.0];
    let mut wall = RecordingCursor::new();
    let lengths = polygon_wall(&mut wall, &points, &[edge('e')], &radii, &[]).unwrap();

    let flex = Arc::new(FlexSettings::with_defaults(3.0).unwrap());
    let mut cursor = RecordingCursor::new();
    let panel = panel_flex_wall(&mut cursor, &lengths, 30.0, &ctx(), &flex, &[], false).unwrap();

    assert_close(panel.contour_length(), 140.0 + 15.0 * PI, 1e-9);
    assert_close(panel.flex, 15.0 * PI, 1e-9);
    assert_eq!(panel.ends, 0.0);
    let (first, last) = outline_ends(&cursor);
    assert!(first.approx_eq(&last, 1e-6));
    assert!(cursor
        .primitives()
        .iter()
        .any(|p| matches!(p, Primitive::Slit { .. })));
}

#[test]
fn test_flex_panel_rejects_mismatched_bolts() {
    let flex = Arc::new(FlexSettings::with_defaults(3.0).unwrap());
    let mut cursor = RecordingCursor::new();
    let bolts = vec![Some(BedBolts::even(1))];
    let err = panel_flex_wall(&mut cursor, &[10.0, 5.0, 10.0, 5.0], 20.0, &ctx(), &flex, &bolts, true)
        .unwrap_err();
    assert!(matches!(err, JointError::Geometry(GeometryError::InvalidProfile(_))));

    let err = panel_flex_wall(&mut cursor, &[10.0, 5.0, 10.0], 20.0, &ctx(), &flex, &[], true)
        .unwrap_err();
    assert!(matches!(err, JointError::Geometry(GeometryError::InvalidProfile(_))));
}

#[test]
fn test_rectangular_wall_extent() {
    let registry = registry();
    let edges: [EdgeRef; 4] = ['f', 'F', 'e', 'h'].map(|tag| registry.resolve(tag).unwrap());
    let mut cursor = RecordingCursor::new();
    let extent = rectangular_wall(&mut cursor, 80.0, 40.0, &edges, [None; 4]).unwrap();

    assert_close(extent.width, 80.0 + 6.0 + 3.0, 1e-9);
    assert_close(extent.height, 40.0 + 3.0, 1e-9);
    let (first, last) = outline_ends(&cursor);
    assert!(first.approx_eq(&last, 1e-6));

    let mut layout = PartLayout::new(2.0);
    assert_eq!(layout.place(extent), Point::origin());
    assert_eq!(layout.place(extent), Point::new(extent.width + 2.0, 0.0));
}
