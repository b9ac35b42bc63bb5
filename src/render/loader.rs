//! Asset loader that parses `.csv` files into point clouds off the main thread.

use bevy::reflect::TypePath;
use bevy_asset::io::Reader;
use bevy_asset::{Asset, AssetLoader, LoadContext};

use crate::core::DataPoint;
use crate::data::parse_points;
use crate::error::GraphError;

#[derive(Asset, TypePath, Clone, Debug, Default)]
pub struct PointCloud {
    pub points: Vec<DataPoint>,
}

#[derive(Default, TypePath)]
pub struct CsvPointsLoader;

impl AssetLoader for CsvPointsLoader {
    type Asset = PointCloud;
    type Settings = ();
    type Error = GraphError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let path = load_context.asset_path().to_string();

        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .await
            .map_err(|e| GraphError::ResourceLoad {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let points = parse_points(&bytes).map_err(|report| {
            tracing::debug!("{path}: {report:?}");
            report.current_context().clone()
        })?;

        tracing::info!("{path}: loaded {} points", points.len());
        Ok(PointCloud { points })
    }

    fn extensions(&self) -> &[&str] {
        &["csv"]
    }
}
