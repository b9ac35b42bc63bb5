use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::core::{GraphConfig, GraphTheme};
use crate::render::{GraphRenderPlugin, ScatterGraph, ThemeRes};

/// Space left between neighbouring graphs
const GRAPH_GAP: f32 = 0.5;

#[derive(Clone, Debug)]
pub struct RuntimeOptions {
    /// Root that CSV and texture paths are resolved against
    pub asset_dir: String,
    pub theme: GraphTheme,
    /// Install Bevy's own log subscriber. Turn off when the host already did.
    pub bevy_logging: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            asset_dir: "assets".to_string(),
            theme: GraphTheme::default(),
            bevy_logging: true,
        }
    }
}

/// Centers of graphs laid out left to right along X
pub fn layout_row(configs: &[GraphConfig]) -> Vec<Vec3> {
    let total: f32 = configs.iter().map(|c| c.width).sum::<f32>()
        + GRAPH_GAP * configs.len().saturating_sub(1) as f32;

    let mut left = -total / 2.0;
    configs
        .iter()
        .map(|c| {
            let center = Vec3::new(left + c.width / 2.0, 0.0, 0.0);
            left += c.width + GRAPH_GAP;
            center
        })
        .collect()
}

fn spawn_scene(configs: Vec<GraphConfig>) -> impl FnMut(Commands) {
    move |mut commands: Commands| {
        let centers = layout_row(&configs);
        let span = configs
            .iter()
            .zip(&centers)
            .map(|(c, p)| (p.x.abs() + c.width / 2.0).max(c.height).max(c.depth))
            .fold(1.0_f32, f32::max);
        let mid_height = configs.iter().map(|c| c.height).fold(0.0_f32, f32::max) / 2.0;

        commands.spawn((
            Camera3d::default(),
            Transform::from_xyz(0.0, mid_height + span * 0.6, span * 2.5)
                .looking_at(Vec3::new(0.0, mid_height, 0.0), Vec3::Y),
        ));
        commands.spawn((
            DirectionalLight {
                illuminance: 8_000.0,
                ..default()
            },
            Transform::from_xyz(4.0, 8.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        ));

        for (config, center) in configs.iter().zip(centers) {
            commands.spawn((ScatterGraph(config.clone()), Transform::from_translation(center)));
        }
    }
}

fn build_app(configs: Vec<GraphConfig>, options: RuntimeOptions, window: Window) -> App {
    let mut plugins = DefaultPlugins
        .set(AssetPlugin {
            file_path: options.asset_dir.clone(),
            ..default()
        })
        .set(WindowPlugin {
            primary_window: Some(window),
            ..default()
        });
    if !options.bevy_logging {
        plugins = plugins.disable::<LogPlugin>();
    }

    let mut app = App::new();
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.09)))
        .insert_resource(ThemeRes::new(options.theme))
        .add_plugins((plugins, GraphRenderPlugin))
        .add_systems(Startup, spawn_scene(configs));
    app
}

#[cfg(not(target_arch = "wasm32"))]
pub fn run_graphs(configs: Vec<GraphConfig>, options: RuntimeOptions) {
    let window = Window {
        title: "vidi-graph".to_string(),
        ..default()
    };
    build_app(configs, options, window).run();
}

#[cfg(target_arch = "wasm32")]
pub fn run_graphs(configs: Vec<GraphConfig>, options: RuntimeOptions, canvas_id: &str) {
    let window = Window {
        canvas: Some(format!("#{}", canvas_id)),
        fit_canvas_to_parent: true,
        ..default()
    };
    build_app(configs, options, window).run();
}
