//! Scene construction for one graph: grid box, captions, origin and markers.

use bevy::prelude::*;
use bevy_math::Affine2;

use super::labels::spawn_floating_text;
use crate::core::{GraphConfig, GraphTheme};
use crate::frame::{self, PlaneSpec};
use crate::plot::MarkerPlan;
use crate::render::{
    AxisCaption, GraphBox, GraphHandle, GridWall, Marker, MarkerAssets, OriginAnchor,
};

/// Build the static frame of `graph` and return its handle.
///
/// Spawns the grid box with its three walls and axis captions, and the
/// origin anchor that markers are later parented to. Walls are left
/// untextured when `grid_image` is `None`.
pub fn spawn_graph_frame(
    commands: &mut Commands,
    graph: Entity,
    config: &GraphConfig,
    theme: &GraphTheme,
    grid_image: Option<&Handle<Image>>,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> GraphHandle {
    let dims = config.dimensions();

    let graph_box = commands
        .spawn((
            GraphBox,
            Name::new("graphBox"),
            Transform::default(),
            Visibility::default(),
        ))
        .id();
    commands.entity(graph).add_child(graph_box);

    for plane in frame::grid_planes(dims, theme.grid_density) {
        let wall = spawn_grid_wall(commands, &plane, grid_image, meshes, materials);
        commands.entity(graph_box).add_child(wall);
    }

    for caption in frame::axis_labels(dims, theme) {
        let anchor = commands
            .spawn((
                AxisCaption(caption.axis),
                Transform::from_translation(caption.position),
                Visibility::default(),
            ))
            .id();
        commands.entity(graph_box).add_child(anchor);
        spawn_floating_text(
            commands,
            anchor,
            caption.text,
            theme.axis_font_size,
            theme.axis_label_color.into(),
        );
    }

    let origin = commands
        .spawn((
            OriginAnchor { graph },
            Name::new(format!("originPoint{}", config.id)),
            Transform::from_translation(frame::origin_position(dims)),
            Visibility::default(),
        ))
        .id();
    commands.entity(graph).add_child(origin);

    GraphHandle {
        id: config.id,
        graph_box,
        origin,
    }
}

fn spawn_grid_wall(
    commands: &mut Commands,
    plane: &PlaneSpec,
    grid_image: Option<&Handle<Image>>,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let mesh = meshes.add(Rectangle::new(plane.size.x, plane.size.y));
    let material = materials.add(StandardMaterial {
        base_color_texture: grid_image.cloned(),
        uv_transform: Affine2::from_scale(plane.uv_repeat),
        unlit: true,
        cull_mode: None, // visible from inside and outside the box
        double_sided: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    commands
        .spawn((
            GridWall(plane.wall),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            plane.transform,
        ))
        .id()
}

/// Spawn one marker per plan under the graph's origin anchor
pub fn spawn_markers(
    commands: &mut Commands,
    handle: &GraphHandle,
    config: &GraphConfig,
    plans: &[MarkerPlan],
    assets: &MarkerAssets,
) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(plans.len());

    for plan in plans {
        let entity = commands
            .spawn((
                Marker::new(plan.point, config.interaction, config.height),
                Mesh3d(assets.mesh.clone()),
                MeshMaterial3d(assets.material.clone()),
                Transform::from_translation(plan.position),
            ))
            .id();
        commands.entity(handle.origin).add_child(entity);
        spawned.push(entity);
    }

    spawned
}
