pub mod components;
pub mod draw;
pub mod loader;
pub mod resources;
pub mod systems;

pub use components::*;
pub use draw::*;
pub use loader::*;
pub use resources::*;
pub use systems::*;

use bevy::prelude::*;
use bevy_asset::AssetApp;

/// Attaches every `ScatterGraph` entity, loads its data and drives marker
/// labels from pointer hover.
#[derive(Default)]
pub struct GraphRenderPlugin;

impl Plugin for GraphRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ThemeRes>()
            .init_resource::<GraphRegistry>()
            .init_resource::<HoveredMarker>()
            .init_asset::<PointCloud>()
            .init_asset_loader::<CsvPointsLoader>()
            .add_message::<MarkerInteraction>()
            .add_observer(release_graph_id)
            .add_systems(Startup, (setup_marker_assets, load_grid_texture))
            .add_systems(
                Update,
                (
                    attach_graphs,
                    request_graph_data,
                    plot_loaded_data,
                    detect_marker_hover,
                    apply_marker_interactions,
                    place_floating_text,
                    handle_grid_texture_failure,
                )
                    .chain(),
            );
    }
}
