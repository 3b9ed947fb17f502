pub mod bind;
pub mod camera;
pub mod error;
pub mod geometry;
pub mod input;
pub mod pipeline;
pub mod render;
pub mod settings;
pub mod text;
pub mod texture;
pub mod transform;
pub mod window;

pub use winit::{dpi::PhysicalSize, window::Window};
