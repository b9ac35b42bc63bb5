use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use bevy_asset::{AssetApp, AssetPlugin};
use tempfile::tempdir;

use vidi_graph::core::{GraphConfig, GraphTheme};
use vidi_graph::render::{
    GraphHandle, GraphRenderPlugin, GridTexture, GridWall, Marker, PendingData, ScatterGraph,
    ThemeRes,
};

/// Headless app that loads assets from `dir`, with no window or renderer
fn app(dir: &Path) -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        AssetPlugin {
            file_path: dir.display().to_string(),
            ..default()
        },
    ))
    .init_asset::<Mesh>()
    .init_asset::<StandardMaterial>()
    .init_asset::<Image>()
    .insert_resource(ThemeRes::new(GraphTheme {
        grid_texture: "grid-textures/missing.png".to_string(),
        ..GraphTheme::default()
    }))
    .add_plugins(GraphRenderPlugin);
    app
}

/// Step the app until `done` holds; loads finish on the IO task pool
fn update_until(app: &mut App, mut done: impl FnMut(&mut World) -> bool) -> bool {
    for _ in 0..400 {
        app.update();
        if done(app.world_mut()) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}

fn marker_count(world: &mut World) -> usize {
    world.query::<&Marker>().iter(world).count()
}

#[test]
fn csv_asset_is_plotted_under_the_origin() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("points.csv"),
        "x,y,z,name\n0,0,0,a\n10,5,2,b\n5,2.5,1,c\n",
    )
    .unwrap();

    let mut app = app(dir.path());
    let graph = app
        .world_mut()
        .spawn(ScatterGraph(GraphConfig::new().csv("points.csv").id(3)))
        .id();

    assert!(update_until(&mut app, |world| marker_count(world) == 3));
    // one more frame so the marker parenting is applied
    app.update();

    let world = app.world();
    assert!(world.get::<PendingData>(graph).is_none());
    let handle = *world.get::<GraphHandle>(graph).unwrap();
    let children = world.get::<Children>(handle.origin).unwrap().to_vec();
    assert_eq!(children.len(), 3);

    let positions: Vec<Vec3> = children
        .iter()
        .map(|e| world.get::<Transform>(*e).unwrap().translation)
        .collect();
    assert_eq!(positions[0], Vec3::ZERO);
    assert_eq!(positions[1], Vec3::new(1.0, 1.0, -1.0));
    assert_eq!(positions[2], Vec3::new(0.5, 0.5, -0.5));
}

#[test]
fn malformed_csv_leaves_the_frame_without_markers() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("bad.csv"), "x,y,z\n1,2,3\n4,five,6\n").unwrap();

    let mut app = app(dir.path());
    let graph = app
        .world_mut()
        .spawn(ScatterGraph(GraphConfig::new().csv("bad.csv")))
        .id();

    assert!(update_until(&mut app, |world| {
        world.get::<GraphHandle>(graph).is_some() && world.get::<PendingData>(graph).is_none()
    }));
    app.update();

    assert_eq!(marker_count(app.world_mut()), 0);
    let handle = *app.world().get::<GraphHandle>(graph).unwrap();
    assert!(app.world().get::<Children>(handle.origin).is_none());
}

#[test]
fn missing_grid_texture_leaves_walls_untextured() {
    let dir = tempdir().unwrap();
    let mut app = app(dir.path());
    app.world_mut().spawn(ScatterGraph(GraphConfig::new().id(1)));

    assert!(update_until(&mut app, |world| world.resource::<GridTexture>().failed));

    // a graph attached after the failure is built untextured as well
    app.world_mut().spawn(ScatterGraph(GraphConfig::new().id(2)));
    app.update();

    let world = app.world_mut();
    let walls: Vec<Handle<StandardMaterial>> = world
        .query_filtered::<&MeshMaterial3d<StandardMaterial>, With<GridWall>>()
        .iter(world)
        .map(|m| m.0.clone())
        .collect();
    assert_eq!(walls.len(), 6);

    let materials = world.resource::<Assets<StandardMaterial>>();
    for wall in &walls {
        assert!(materials.get(wall).unwrap().base_color_texture.is_none());
    }
}
