use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_asset::LoadState;
use tracing::{debug, error, info, warn};

use super::*;
use crate::error::GraphError;
use crate::interaction::{LabelEffect, PointerEvent, transition};
use crate::plot::plan_markers;

/// Pointer activity on one marker
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerInteraction {
    pub marker: Entity,
    pub event: PointerEvent,
}

/// Build the frame of every newly added graph and register its id
pub fn attach_graphs(
    mut commands: Commands,
    mut registry: ResMut<GraphRegistry>,
    theme: Res<ThemeRes>,
    grid: Res<GridTexture>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    added: Query<(Entity, &ScatterGraph), Added<ScatterGraph>>,
) {
    for (entity, graph) in added.iter() {
        let config = &graph.0;

        if let Err(report) = config.validate() {
            error!("graph {}: {report:?}", config.id);
            continue;
        }

        if let Some(existing) = registry.get(config.id) {
            let err = GraphError::Configuration(format!(
                "graph id {} is already attached to {existing}",
                config.id
            ));
            error!("{err}");
            continue;
        }

        let handle = spawn_graph_frame(
            &mut commands,
            entity,
            config,
            &theme.0,
            (!grid.failed).then_some(&grid.image),
            &mut meshes,
            &mut materials,
        );
        commands.entity(entity).insert(handle);
        registry.by_id.insert(config.id, entity);

        debug!("attached graph {} ({:?})", config.id, config.dimensions());
    }
}

/// Free a graph's id once its handle goes away, so the id can be attached again
pub fn release_graph_id(remove: On<Remove, GraphHandle>, mut registry: ResMut<GraphRegistry>) {
    let graph = remove.entity;
    registry.by_id.retain(|_, entity| *entity != graph);
}

/// Start loading the CSV of each freshly attached graph
pub fn request_graph_data(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    attached: Query<(Entity, &ScatterGraph), Added<GraphHandle>>,
) {
    for (entity, graph) in attached.iter() {
        let Some(path) = graph.0.csv.as_ref() else {
            continue;
        };
        let handle: Handle<PointCloud> = asset_server.load(path.clone());
        commands.entity(entity).insert(PendingData(handle));
        debug!("graph {}: requested {path}", graph.0.id);
    }
}

/// Plot graphs whose data finished loading. A failed load leaves the graph
/// with its frame only.
pub fn plot_loaded_data(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    clouds: Res<Assets<PointCloud>>,
    assets: Res<MarkerAssets>,
    pending: Query<(Entity, &ScatterGraph, &GraphHandle, &PendingData)>,
) {
    for (entity, graph, handle, data) in pending.iter() {
        let config = &graph.0;

        if let Some(cloud) = clouds.get(&data.0) {
            commands.entity(entity).remove::<PendingData>();
            match plan_markers(&cloud.points, config.dimensions(), config.degenerate_axis) {
                Ok(plans) => {
                    let markers = spawn_markers(&mut commands, handle, config, &plans, &assets);
                    info!("graph {}: plotted {} points", config.id, markers.len());
                }
                Err(report) => error!("graph {}: {report:?}", config.id),
            }
            continue;
        }

        if let LoadState::Failed(err) = asset_server.load_state(data.0.id()) {
            commands.entity(entity).remove::<PendingData>();
            error!("graph {}: {err}", config.id);
        }
    }
}

/// Closest candidate to `cursor` within `radius` pixels
pub fn nearest_marker(
    cursor: Vec2,
    candidates: impl IntoIterator<Item = (Entity, Vec2)>,
    radius: f32,
) -> Option<Entity> {
    candidates
        .into_iter()
        .map(|(entity, screen)| (entity, screen.distance_squared(cursor)))
        .filter(|(_, d2)| *d2 <= radius * radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}

/// Track which marker is under the cursor and emit enter/leave messages
pub fn detect_marker_hover(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    markers: Query<(Entity, &GlobalTransform), With<Marker>>,
    theme: Res<ThemeRes>,
    mut hovered: ResMut<HoveredMarker>,
    mut out: MessageWriter<MarkerInteraction>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };

    let current = window.cursor_position().and_then(|cursor| {
        let on_screen = markers.iter().filter_map(|(entity, transform)| {
            camera
                .world_to_viewport(camera_transform, transform.translation())
                .ok()
                .map(|screen| (entity, screen))
        });
        nearest_marker(cursor, on_screen, theme.0.hover_radius_px)
    });

    out.write_batch(hover_messages(hovered.0, current));
    hovered.0 = current;
}

/// Messages for the hovered marker changing from `previous` to `current`:
/// the old marker is left before the new one is entered.
pub fn hover_messages(
    previous: Option<Entity>,
    current: Option<Entity>,
) -> Vec<MarkerInteraction> {
    if previous == current {
        return Vec::new();
    }
    let leave = previous.map(|marker| MarkerInteraction {
        marker,
        event: PointerEvent::Leave,
    });
    let enter = current.map(|marker| MarkerInteraction {
        marker,
        event: PointerEvent::Enter,
    });
    leave.into_iter().chain(enter).collect()
}

/// Run marker messages through the label state machine and apply the effects
pub fn apply_marker_interactions(
    mut commands: Commands,
    mut events: MessageReader<MarkerInteraction>,
    mut markers: Query<(
        &mut Marker,
        &Transform,
        &mut Mesh3d,
        &mut MeshMaterial3d<StandardMaterial>,
    )>,
    assets: Res<MarkerAssets>,
    theme: Res<ThemeRes>,
) {
    for ev in events.read() {
        let Ok((mut marker, transform, mut mesh, mut material)) = markers.get_mut(ev.marker)
        else {
            continue;
        };

        let (next, effects) = transition(marker.mode, marker.state, ev.event);
        for effect in effects {
            match effect {
                LabelEffect::TearDown => {
                    if let Some(label) = marker.label.take() {
                        despawn_data_label(&mut commands, label);
                    }
                }
                LabelEffect::RestoreDefault => {
                    mesh.0 = assets.mesh.clone();
                    material.0 = assets.material.clone();
                }
                LabelEffect::Show => {
                    // One label per marker
                    if let Some(stale) = marker.label.take() {
                        warn!("marker {} already had a label", ev.marker);
                        despawn_data_label(&mut commands, stale);
                    }
                    let label = spawn_data_label(
                        &mut commands,
                        ev.marker,
                        &marker.point,
                        transform.translation.y,
                        marker.graph_height,
                        &theme.0,
                    );
                    marker.label = Some(label);
                }
                LabelEffect::Highlight => {
                    mesh.0 = assets.highlight_mesh.clone();
                    material.0 = assets.highlight_material.clone();
                }
            }
        }
        marker.state = next;
    }
}

/// Move floating text to the screen position of its anchor. Text whose
/// anchor is gone is despawned.
pub fn place_floating_text(
    mut commands: Commands,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    anchors: Query<&GlobalTransform>,
    mut texts: Query<(Entity, &FloatingText, &mut Node, &mut Visibility)>,
) {
    let camera = cameras.single().ok();

    for (entity, text, mut node, mut visibility) in texts.iter_mut() {
        let Ok(anchor) = anchors.get(text.anchor) else {
            commands.entity(entity).try_despawn();
            continue;
        };

        let screen = camera.and_then(|(camera, camera_transform)| {
            camera
                .world_to_viewport(camera_transform, anchor.translation())
                .ok()
        });

        match screen {
            Some(pos) => {
                node.left = Val::Px(pos.x);
                node.top = Val::Px(pos.y);
                visibility.set_if_neq(Visibility::Inherited);
            }
            None => {
                visibility.set_if_neq(Visibility::Hidden);
            }
        }
    }
}

/// Drop the grid texture from wall materials if it failed to load, so the
/// walls still render
pub fn handle_grid_texture_failure(
    asset_server: Res<AssetServer>,
    mut grid: ResMut<GridTexture>,
    walls: Query<&MeshMaterial3d<StandardMaterial>, With<GridWall>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if grid.failed {
        return;
    }
    let LoadState::Failed(err) = asset_server.load_state(grid.image.id()) else {
        return;
    };

    let err = GraphError::ResourceLoad {
        path: asset_server
            .get_path(grid.image.id())
            .map(|p| p.to_string())
            .unwrap_or_default(),
        reason: err.to_string(),
    };
    warn!("{err}; drawing grid walls untextured");

    for material in walls.iter() {
        if let Some(mat) = materials.get_mut(material.0.id()) {
            mat.base_color_texture = None;
        }
    }
    grid.failed = true;
}
