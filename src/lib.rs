pub mod core;
pub mod data;
pub mod error;
pub mod frame;
pub mod interaction;
pub mod plot;
pub mod render;
pub mod runtime;
pub mod scale;

pub use error::GraphError;

pub type Result<T> = std::result::Result<T, error_stack::Report<GraphError>>;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

pub mod prelude {
    pub use crate::core::*;
    pub use crate::error::GraphError;
    pub use crate::render::*;
    pub use crate::runtime::*;
}
