//! Marker placement for a loaded dataset.

use bevy_math::Vec3;

use crate::core::{DataPoint, DegenerateAxisPolicy, Dimensions};
use crate::scale::AxisScales;

/// Where one data point is drawn, relative to the graph's origin anchor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerPlan {
    pub point: DataPoint,
    pub position: Vec3,
}

/// One plan per point, in input order. Duplicate points get duplicate markers.
pub fn plan_markers(
    points: &[DataPoint],
    dims: Dimensions,
    policy: DegenerateAxisPolicy,
) -> crate::Result<Vec<MarkerPlan>> {
    let scales = AxisScales::fit(points, dims, policy)?;
    Ok(points
        .iter()
        .map(|p| {
            let [x, y, z] = scales.apply(p);
            MarkerPlan {
                point: *p,
                position: Vec3::new(x as f32, y as f32, z as f32),
            }
        })
        .collect())
}
