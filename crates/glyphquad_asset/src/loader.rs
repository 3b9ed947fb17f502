use std::{
    collections::HashMap,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found at {0:?}")]
    NotFound(PathBuf),
    #[error("couldn't read asset at {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Clone, Debug)]
pub struct Asset {
    pub bytes: Arc<[u8]>,
}

/// Reads files into memory once and hands out shared copies afterwards.
pub struct Loader {
    assets: HashMap<PathBuf, Asset>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
        }
    }

    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<Asset> {
        self.assets.get(path.as_ref()).cloned()
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<Asset, AssetError> {
        let path = path.as_ref();
        if let Some(asset) = self.get(path) {
            return Ok(asset);
        }

        let mut file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => AssetError::NotFound(path.to_path_buf()),
            _ => AssetError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded {} bytes from {:?}", bytes.len(), path);

        let asset = Asset {
            bytes: bytes.into(),
        };
        self.assets.insert(path.to_path_buf(), asset.clone());
        Ok(asset)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    const FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/DejaVuSans.ttf");

    #[test]
    fn missing_file_is_not_found() {
        let mut loader = Loader::new();
        let err = loader.load("/definitely/not/here.ttf").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(path) if path == Path::new("/definitely/not/here.ttf")));
    }

    #[test]
    fn second_load_hits_the_cache() {
        let mut loader = Loader::new();
        assert!(loader.get(FONT).is_none());

        let first = loader.load(FONT).unwrap();
        let second = loader.load(FONT).unwrap();
        assert!(!first.bytes.is_empty());
        assert!(Arc::ptr_eq(&first.bytes, &second.bytes));
        assert!(loader.get(FONT).is_some());
    }
}
