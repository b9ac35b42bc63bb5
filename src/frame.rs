//! Static geometry of the graph box: grid walls, axis label anchors and the
//! origin anchor. Everything here is a pure function of the box dimensions.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::Transform;
use bevy_math::{Quat, Vec2, Vec3};

use crate::core::{Axis, Dimensions, GraphTheme};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wall {
    Bottom,
    Far,
    Side,
}

/// One textured grid plane. `size` is in the plane's local XY.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneSpec {
    pub wall: Wall,
    pub size: Vec2,
    pub transform: Transform,
    /// Texture repeats along U and V
    pub uv_repeat: Vec2,
}

impl PlaneSpec {
    fn new(wall: Wall, size: Vec2, transform: Transform, density: f32) -> Self {
        Self {
            wall,
            size,
            transform,
            uv_repeat: size * density,
        }
    }
}

/// The floor, far wall and left wall, in that order
pub fn grid_planes(dims: Dimensions, density: f32) -> [PlaneSpec; 3] {
    let Dimensions {
        width,
        height,
        depth,
    } = dims;

    [
        PlaneSpec::new(
            Wall::Bottom,
            Vec2::new(width, depth),
            Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
            density,
        ),
        PlaneSpec::new(
            Wall::Far,
            Vec2::new(width, height),
            Transform::from_xyz(0.0, 0.5 * height, -0.5 * depth),
            density,
        ),
        PlaneSpec::new(
            Wall::Side,
            Vec2::new(depth, height),
            Transform::from_xyz(-0.5 * width, 0.5 * height, 0.0)
                .with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
            density,
        ),
    ]
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabelSpec {
    pub axis: Axis,
    pub text: String,
    pub position: Vec3,
}

/// Anchors for the "x", "y" and "z" captions around the box
pub fn axis_labels(dims: Dimensions, theme: &GraphTheme) -> [AxisLabelSpec; 3] {
    let Dimensions {
        width,
        height,
        depth,
    } = dims;
    let [below, front] = theme.x_label_offset;
    let side = theme.side_label_offset;
    let back = theme.y_label_back_offset;

    let label = |axis: Axis, position: Vec3| AxisLabelSpec {
        axis,
        text: axis.column().to_string(),
        position,
    };

    [
        label(Axis::X, Vec3::new(0.0, below, depth / 2.0 + front)),
        label(
            Axis::Y,
            Vec3::new(width / 2.0 + side, height / 2.0, -(depth / 2.0) + back),
        ),
        label(Axis::Z, Vec3::new(width / 2.0 + side, below, 0.0)),
    ]
}

/// Front-left corner of the floor; data positions are relative to this point
pub fn origin_position(dims: Dimensions) -> Vec3 {
    Vec3::new(-dims.width / 2.0, 0.0, dims.depth / 2.0)
}

/// Local offset that puts a marker's label just above the graph box
pub fn label_offset(graph_height: f32, marker_y: f32, padding: f32) -> Vec3 {
    Vec3::new(0.0, graph_height + padding - marker_y, 0.0)
}
