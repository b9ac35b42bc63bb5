//! Open one or more 3D scatter graphs from CSV files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidi_graph::core::{DegenerateAxisPolicy, GraphConfig, InteractionMode, PlotType};
use vidi_graph::data::load_points;
use vidi_graph::plot::plan_markers;
use vidi_graph::runtime::{RuntimeOptions, run_graphs};

/// Render CSV (x, y, z) data as an interactive 3D scatter graph
#[derive(Parser, Clone, Debug)]
#[command(name = "vidi-graph")]
struct Args {
    /// CSV file, relative to the asset directory
    #[arg(long)]
    csv: Option<String>,

    /// Graph id; must be unique across graphs
    #[arg(long, default_value = "0")]
    id: i32,

    #[arg(long, default_value = "1")]
    width: f32,

    #[arg(long, default_value = "1")]
    height: f32,

    #[arg(long, default_value = "1")]
    depth: f32,

    /// Label behaviour: `hover` or `replace`
    #[arg(long, default_value = "hover", value_parser = parse_interaction)]
    interaction: InteractionMode,

    /// Constant-axis handling: `low`, `midpoint` or `reject`
    #[arg(long, default_value = "low", value_parser = parse_degenerate)]
    degenerate: DegenerateAxisPolicy,

    /// JSON file holding an array of graph configs; overrides the single-graph flags
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Directory CSV files and the grid texture are loaded from
    #[arg(long, default_value = "assets")]
    assets: String,

    /// Parse and scale the data, print marker positions, and exit
    #[arg(long)]
    check: bool,
}

fn parse_interaction(s: &str) -> Result<InteractionMode, String> {
    s.parse::<InteractionMode>()
        .map_err(|r| r.current_context().to_string())
}

fn parse_degenerate(s: &str) -> Result<DegenerateAxisPolicy, String> {
    s.parse::<DegenerateAxisPolicy>()
        .map_err(|r| r.current_context().to_string())
}

impl Args {
    fn configs(&self) -> anyhow::Result<Vec<GraphConfig>> {
        if let Some(scene) = &self.scene {
            let text = std::fs::read_to_string(scene)
                .with_context(|| format!("reading {}", scene.display()))?;
            let configs: Vec<GraphConfig> = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", scene.display()))?;
            return Ok(configs);
        }

        Ok(vec![GraphConfig {
            csv: self.csv.clone(),
            plot_type: PlotType::Scatter,
            id: self.id,
            width: self.width,
            height: self.height,
            depth: self.depth,
            interaction: self.interaction,
            degenerate_axis: self.degenerate,
        }])
    }
}

fn check(configs: &[GraphConfig], asset_dir: &Path) -> anyhow::Result<()> {
    for config in configs {
        config
            .validate()
            .map_err(|r| anyhow::anyhow!("graph {}: {r:?}", config.id))?;
        let Some(csv) = &config.csv else {
            println!("graph {}: no data", config.id);
            continue;
        };

        let points = load_points(asset_dir.join(csv))
            .map_err(|r| anyhow::anyhow!("graph {}: {r:?}", config.id))?;
        let plans = plan_markers(&points, config.dimensions(), config.degenerate_axis)
            .map_err(|r| anyhow::anyhow!("graph {}: {r:?}", config.id))?;

        println!("graph {}: {} points", config.id, plans.len());
        for plan in plans {
            let p = plan.position;
            println!(
                "  {} -> ({:.3}, {:.3}, {:.3})",
                plan.point.label_text(),
                p.x,
                p.y,
                p.z
            );
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidi_graph=debug,wgpu=error,bevy_render=info".into()),
        )
        .init();

    let args = Args::parse();
    let configs = args.configs()?;

    if args.check {
        return check(&configs, Path::new(&args.assets));
    }

    info!("Opening {} graph(s) from {}", configs.len(), args.assets);
    launch(
        configs,
        RuntimeOptions {
            asset_dir: args.assets,
            bevy_logging: false,
            ..RuntimeOptions::default()
        },
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn launch(configs: Vec<GraphConfig>, options: RuntimeOptions) {
    run_graphs(configs, options);
}

/// Browser builds draw into the page's `#vidi-graph` canvas
#[cfg(target_arch = "wasm32")]
fn launch(configs: Vec<GraphConfig>, options: RuntimeOptions) {
    run_graphs(configs, options, CANVAS_ID);
}

#[cfg(target_arch = "wasm32")]
const CANVAS_ID: &str = "vidi-graph";
