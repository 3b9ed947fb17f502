pub mod loader;

pub use loader::{Asset, AssetError, Loader};
