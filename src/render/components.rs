use bevy::prelude::*;

use crate::core::{Axis, DataPoint, GraphConfig, InteractionMode};
use crate::frame::Wall;
use crate::interaction::LabelState;

/// Attach a graph by spawning an entity with this component
#[derive(Component, Clone, Debug)]
#[require(Transform, Visibility)]
pub struct ScatterGraph(pub GraphConfig);

/// Added once a graph has been attached. Dependents reach the graph's
/// subtree through these entities.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphHandle {
    pub id: i32,
    pub graph_box: Entity,
    pub origin: Entity,
}

/// Holds the grid walls and axis captions
#[derive(Component)]
pub struct GraphBox;

/// Front-left floor corner; markers are its children
#[derive(Component)]
pub struct OriginAnchor {
    pub graph: Entity,
}

#[derive(Component, Clone, Copy, Debug)]
pub struct GridWall(pub Wall);

/// 3D anchor of an "x" / "y" / "z" caption
#[derive(Component, Clone, Copy, Debug)]
pub struct AxisCaption(pub Axis);

/// CSV requested but not plotted yet
#[derive(Component)]
pub struct PendingData(pub Handle<super::PointCloud>);

/// Entities making up one marker label
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelHandle {
    pub anchor: Entity,
    pub text: Entity,
}

/// One plotted data point
#[derive(Component, Clone, Debug)]
pub struct Marker {
    pub point: DataPoint,
    pub mode: InteractionMode,
    /// Height of the owning graph box, used to lift the label above it
    pub graph_height: f32,
    pub state: LabelState,
    pub label: Option<LabelHandle>,
}

impl Marker {
    pub fn new(point: DataPoint, mode: InteractionMode, graph_height: f32) -> Self {
        Self {
            point,
            mode,
            graph_height,
            state: LabelState::Hidden,
            label: None,
        }
    }
}

/// 3D anchor of a marker's coordinate label
#[derive(Component)]
pub struct DataLabel {
    pub marker: Entity,
}

/// Screen-space text that follows a 3D anchor
#[derive(Component)]
pub struct FloatingText {
    pub anchor: Entity,
}
