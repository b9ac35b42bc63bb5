//! Scene construction helpers, organized by what they draw.

pub mod graph_3d;
pub mod labels;

pub use graph_3d::*;
pub use labels::*;
