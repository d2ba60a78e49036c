pub mod palette;
pub mod renderer;

pub use renderer::{Renderer, View};
