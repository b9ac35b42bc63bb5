use bevy::prelude::*;

use crate::core::{DataPoint, GraphTheme};
use crate::frame::label_offset;
use crate::render::{DataLabel, FloatingText, LabelHandle};

/// Screen-space text pinned to `anchor`. Hidden until first placed.
pub fn spawn_floating_text(
    commands: &mut Commands,
    anchor: Entity,
    text: impl Into<String>,
    font_size: f32,
    color: Color,
) -> Entity {
    commands
        .spawn((
            FloatingText { anchor },
            Text::new(text),
            TextFont {
                font_size,
                ..default()
            },
            TextColor(color),
            Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
        ))
        .id()
}

/// Label above `marker` showing its coordinates
pub fn spawn_data_label(
    commands: &mut Commands,
    marker: Entity,
    point: &DataPoint,
    marker_y: f32,
    graph_height: f32,
    theme: &GraphTheme,
) -> LabelHandle {
    let anchor = commands
        .spawn((
            DataLabel { marker },
            Name::new("tempDataLabel"),
            Transform::from_translation(label_offset(
                graph_height,
                marker_y,
                theme.label_padding,
            )),
            Visibility::default(),
        ))
        .id();
    commands.entity(marker).add_child(anchor);

    let text = spawn_floating_text(
        commands,
        anchor,
        point.label_text(),
        theme.label_font_size,
        theme.label_color.into(),
    );

    LabelHandle { anchor, text }
}

pub fn despawn_data_label(commands: &mut Commands, label: LabelHandle) {
    commands.entity(label.text).try_despawn();
    commands.entity(label.anchor).try_despawn();
}
