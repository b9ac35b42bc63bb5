use std::fmt;
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
    /// `0xRRGGBB` in sRGB space
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
        )
    }

    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
}

impl From<Color> for bevy::prelude::Color {
    #[inline]
    fn from(c: Color) -> Self {
        bevy::prelude::Color::srgba(c.r, c.g, c.b, c.a)
    }
}

/// One of the three plotted axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub const fn column(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A single CSV row
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl DataPoint {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Coordinates as shown on a marker label: `(x,y,z)` at one decimal
    pub fn label_text(&self) -> String {
        format!(
            "({},{},{})",
            round_tenth(self.x),
            round_tenth(self.y),
            round_tenth(self.z)
        )
    }
}

/// Round half up to one decimal place. `-0` collapses to `0`.
fn round_tenth(v: f64) -> f64 {
    // Anything this large has no fractional part, and scaling it would overflow
    if v.abs() >= 1e15 {
        return v;
    }
    let r = (v * 10.0 + 0.5).floor() / 10.0;
    if r == 0.0 { 0.0 } else { r }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotType {
    #[default]
    #[serde(rename = "scatter")]
    Scatter,
}

impl FromStr for PlotType {
    type Err = Report<GraphError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "scatter" => Ok(PlotType::Scatter),
            other => Err(Report::new(GraphError::Configuration(format!(
                "unsupported plot type `{other}`"
            )))),
        }
    }
}

/// How pointer events toggle a marker's label
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    /// Label shown while the pointer is over the marker
    #[default]
    #[serde(rename = "hover")]
    HoverPair,
    /// Every enter rebuilds the label; leaving keeps it
    #[serde(rename = "replace")]
    EnterReplace,
}

impl FromStr for InteractionMode {
    type Err = Report<GraphError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "hover" => Ok(InteractionMode::HoverPair),
            "replace" => Ok(InteractionMode::EnterReplace),
            other => Err(Report::new(GraphError::Configuration(format!(
                "unknown interaction mode `{other}` (expected `hover` or `replace`)"
            )))),
        }
    }
}

/// What a scale does when every value on its axis is equal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegenerateAxisPolicy {
    /// Map every value to the low end of the range
    #[default]
    #[serde(rename = "low")]
    ClampToLow,
    #[serde(rename = "midpoint")]
    Midpoint,
    #[serde(rename = "reject")]
    Reject,
}

impl FromStr for DegenerateAxisPolicy {
    type Err = Report<GraphError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "low" => Ok(DegenerateAxisPolicy::ClampToLow),
            "midpoint" => Ok(DegenerateAxisPolicy::Midpoint),
            "reject" => Ok(DegenerateAxisPolicy::Reject),
            other => Err(Report::new(GraphError::Configuration(format!(
                "unknown degenerate-axis policy `{other}`"
            )))),
        }
    }
}

/// Size of the graph box in world units
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }
    }
}

/// Everything needed to attach one graph. Never mutated after attachment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Asset path of the CSV file; a graph without one only draws its frame
    pub csv: Option<String>,
    #[serde(rename = "type")]
    pub plot_type: PlotType,
    pub id: i32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub interaction: InteractionMode,
    #[serde(rename = "degenerate")]
    pub degenerate_axis: DegenerateAxisPolicy,
}

impl Default for GraphConfig {
    fn default() -> Self {
        let dims = Dimensions::default();
        Self {
            csv: None,
            plot_type: PlotType::default(),
            id: 0,
            width: dims.width,
            height: dims.height,
            depth: dims.depth,
            interaction: InteractionMode::default(),
            degenerate_axis: DegenerateAxisPolicy::default(),
        }
    }
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn csv(mut self, path: impl Into<String>) -> Self {
        self.csv = Some(path.into());
        self
    }

    pub fn id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn size(mut self, width: f32, height: f32, depth: f32) -> Self {
        self.width = width;
        self.height = height;
        self.depth = depth;
        self
    }

    pub fn interaction(mut self, mode: InteractionMode) -> Self {
        self.interaction = mode;
        self
    }

    pub fn degenerate_axis(mut self, policy: DegenerateAxisPolicy) -> Self {
        self.degenerate_axis = policy;
        self
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
            depth: self.depth,
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Report::new(GraphError::Configuration(format!(
                    "{name} must be a positive number, got {value}"
                ))));
            }
        }
        Ok(())
    }
}

/// Parses the attribute form `csv: data/points.csv; width: 2; id: 3`.
/// Missing keys keep their defaults.
impl FromStr for GraphConfig {
    type Err = Report<GraphError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config = GraphConfig::default();

        for pair in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((key, value)) = pair.split_once(':') else {
                return Err(Report::new(GraphError::Configuration(format!(
                    "expected `key: value`, got `{pair}`"
                ))));
            };
            let value = value.trim();

            match key.trim() {
                "csv" => config.csv = (!value.is_empty()).then(|| value.to_string()),
                "type" => config.plot_type = value.parse()?,
                "id" => config.id = parse_field(key, value)?,
                "width" => config.width = parse_field(key, value)?,
                "height" => config.height = parse_field(key, value)?,
                "depth" => config.depth = parse_field(key, value)?,
                "interaction" => config.interaction = value.parse()?,
                "degenerate" => config.degenerate_axis = value.parse()?,
                other => {
                    return Err(Report::new(GraphError::Configuration(format!(
                        "unknown attribute `{other}`"
                    ))));
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_field<T: FromStr>(key: &str, value: &str) -> crate::Result<T> {
    value.parse().map_err(|_| {
        Report::new(GraphError::Configuration(format!(
            "`{}` is not a valid value for {}",
            value,
            key.trim()
        )))
    })
}

/// Cosmetic constants used while building a graph
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphTheme {
    pub marker_radius: f32,
    pub marker_color: Color,
    pub highlight_radius: f32,
    pub highlight_color: Color,
    /// Gap between the top of the graph box and a marker label
    pub label_padding: f32,
    pub label_font_size: f32,
    pub label_color: Color,
    pub axis_font_size: f32,
    pub axis_label_color: Color,
    /// Offset of the x label from the front edge of the floor
    pub x_label_offset: [f32; 2],
    /// Offset of the y/z labels from the right edge of the box
    pub side_label_offset: f32,
    /// Offset of the y label from the back edge of the box
    pub y_label_back_offset: f32,
    pub grid_texture: String,
    /// Grid tiles per world unit
    pub grid_density: f32,
    pub grid_anisotropy: u16,
    /// Screen distance within which the cursor counts as over a marker
    pub hover_radius_px: f32,
}

impl Default for GraphTheme {
    fn default() -> Self {
        Self {
            marker_radius: 0.02,
            marker_color: Color::hex(0xD50000),
            highlight_radius: 0.03,
            highlight_color: Color::BLUE,
            label_padding: 0.2,
            label_font_size: 16.0,
            label_color: Color::WHITE,
            axis_font_size: 20.0,
            axis_label_color: Color::WHITE,
            x_label_offset: [-0.1, 0.01],
            side_label_offset: 0.15,
            y_label_back_offset: -0.1,
            grid_texture: "grid-textures/grid3.png".to_string(),
            grid_density: 4.0,
            grid_anisotropy: 16,
            hover_radius_px: 12.0,
        }
    }
}
