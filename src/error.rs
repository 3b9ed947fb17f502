use std::path::PathBuf;

use glyphquad_asset::AssetError;
use thiserror::Error;
use wgpu::{CreateSurfaceError, RequestDeviceError};

#[derive(Debug, Error)]
pub enum GlyphError {
    #[error("font not found at {0:?}")]
    FontNotFound(PathBuf),
    #[error("failed to load font")]
    FontLoad(#[source] AssetError),
    #[error("failed to parse font: {0}")]
    FontParse(String),
    #[error("glyph for {0:?} is not available in the font")]
    GlyphUnavailable(char),
    #[error("glyph for {0:?} rasterized to an empty bitmap")]
    EmptyBitmap(char),
}

impl From<AssetError> for GlyphError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::NotFound(path) => GlyphError::FontNotFound(path),
            err => GlyphError::FontLoad(err),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("couldn't create a surface for the window")]
    Surface(#[from] CreateSurfaceError),
    #[error("no suitable adapter found")]
    NoAdapter,
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("couldn't open the graphics device")]
    RequestDevice(#[from] RequestDeviceError),
    #[error("shader program failed to build: {0}")]
    Shader(String),
    #[error("out of memory while acquiring the next frame")]
    OutOfMemory,
}
