use std::collections::HashMap;

use bevy::image::{ImageAddressMode, ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;

use crate::core::GraphTheme;

#[derive(Resource, Clone, Default)]
pub struct ThemeRes(pub GraphTheme);

impl ThemeRes {
    pub fn new(theme: GraphTheme) -> Self {
        Self(theme)
    }
}

/// Attached graphs by id. An id can only be attached once.
#[derive(Resource, Default)]
pub struct GraphRegistry {
    pub by_id: HashMap<i32, Entity>,
}

impl GraphRegistry {
    pub fn get(&self, id: i32) -> Option<Entity> {
        self.by_id.get(&id).copied()
    }
}

/// The marker currently under the cursor
#[derive(Resource, Default)]
pub struct HoveredMarker(pub Option<Entity>);

/// Shared meshes and materials for markers in their two looks
#[derive(Resource, Clone, Default)]
pub struct MarkerAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    pub highlight_mesh: Handle<Mesh>,
    pub highlight_material: Handle<StandardMaterial>,
}

#[derive(Resource, Clone, Default)]
pub struct GridTexture {
    pub image: Handle<Image>,
    /// Set once a load failure has been handled
    pub failed: bool,
}

pub fn setup_marker_assets(
    mut commands: Commands,
    theme: Res<ThemeRes>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let theme = &theme.0;
    let material = |color: crate::core::Color| StandardMaterial {
        base_color: color.into(),
        perceptual_roughness: 0.6,
        ..default()
    };

    commands.insert_resource(MarkerAssets {
        mesh: meshes.add(Sphere::new(theme.marker_radius)),
        material: materials.add(material(theme.marker_color)),
        highlight_mesh: meshes.add(Sphere::new(theme.highlight_radius)),
        highlight_material: materials.add(material(theme.highlight_color)),
    });
}

pub fn load_grid_texture(
    mut commands: Commands,
    theme: Res<ThemeRes>,
    asset_server: Res<AssetServer>,
) {
    let anisotropy = theme.0.grid_anisotropy;
    let image = asset_server.load_with_settings(
        theme.0.grid_texture.clone(),
        move |settings: &mut ImageLoaderSettings| {
            settings.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
                address_mode_u: ImageAddressMode::Repeat,
                address_mode_v: ImageAddressMode::Repeat,
                anisotropy_clamp: anisotropy,
                ..ImageSamplerDescriptor::linear()
            });
        },
    );
    commands.insert_resource(GridTexture {
        image,
        failed: false,
    });
}
