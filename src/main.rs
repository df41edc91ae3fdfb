use anyhow::Context;
use jointkit::{
    init_logging, panel_flex_wall, polygon_wall, rectangular_wall, EdgeRef, EdgeRegistry,
    FamilySettings, FlexSettings, JointProfile, PartExtent, PartLayout, Point, Primitive,
    ProfileStore, RecordingCursor, BUILD_DATE, VERSION,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// One drawn part of the demo sheet.
#[derive(Serialize)]
struct Part {
    name: &'static str,
    origin: Point,
    extent: PartExtent,
    primitives: Vec<Primitive>,
}

fn usage() -> ! {
    eprintln!("usage: jointkit [--profile <file.toml|file.json>] [--params]");
    std::process::exit(2);
}

fn load_profile(path: Option<PathBuf>) -> anyhow::Result<JointProfile> {
    if let Some(path) = path {
        return JointProfile::load_from_file(&path)
            .with_context(|| format!("failed to load profile {}", path.display()));
    }
    match ProfileStore::open_default() {
        Ok(store) => Ok(store.load_or_default()?),
        Err(e) => {
            warn!(error = %e, "no profile location, using defaults");
            Ok(JointProfile::default())
        }
    }
}

fn print_parameters() -> anyhow::Result<()> {
    let params: Vec<_> = jointkit::edges::family_schemas()
        .iter()
        .flat_map(|schema| schema.parameters())
        .collect();
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!(version = VERSION, built = BUILD_DATE, "jointkit starting");

    let mut profile_path = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--params" => return print_parameters(),
            "--profile" => profile_path = Some(PathBuf::from(args.next().unwrap_or_else(|| usage()))),
            _ => usage(),
        }
    }

    let profile = load_profile(profile_path)?;
    let ctx = profile.context();
    let registry = EdgeRegistry::standard(&ctx, &profile.family_overrides())?;
    let mut layout = PartLayout::new(ctx.spacing() * 4.0).with_max_width(600.0);
    let mut parts = Vec::new();

    // finger jointed side wall
    let edges: [EdgeRef; 4] = [
        registry.resolve('f')?,
        registry.resolve('F')?,
        registry.resolve('e')?,
        registry.resolve('F')?,
    ];
    let mut cursor = RecordingCursor::new();
    let extent = rectangular_wall(&mut cursor, 120.0, 60.0, &edges, [None; 4])?;
    parts.push(Part {
        name: "side wall",
        origin: layout.place(extent),
        extent,
        primitives: cursor.into_primitives(),
    });

    // rounded wall and the flex panel wrapped around it
    let points = [
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 60.0),
        Point::new(0.0, 60.0),
    ];
    let radii = [0.0, 15.0];
    let mut cursor = RecordingCursor::new();
    let line_lengths = polygon_wall(&mut cursor, &points, &[registry.resolve('e')?], &radii, &[])?;
    parts.push(Part {
        name: "rounded wall",
        origin: layout.place(PartExtent::new(100.0, 60.0)),
        extent: PartExtent::new(100.0, 60.0),
        primitives: cursor.into_primitives(),
    });

    let flex = Arc::new(FlexSettings::new(
        ctx.thickness,
        profile.relative,
        &profile.family_overrides().family(FlexSettings::schema().family),
    )?);
    let mut cursor = RecordingCursor::new();
    let panel = panel_flex_wall(&mut cursor, &line_lengths, 40.0, &ctx, &flex, &[], false)?;
    info!(
        rigid = panel.rigid,
        flex = panel.flex,
        "flex panel laid out"
    );
    layout.next_row();
    parts.push(Part {
        name: "flex panel",
        origin: layout.place(panel.extent),
        extent: panel.extent,
        primitives: cursor.into_primitives(),
    });

    println!("{}", serde_json::to_string_pretty(&parts)?);
    Ok(())
}
