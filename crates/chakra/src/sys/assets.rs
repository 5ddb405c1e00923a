use gdk_pixbuf::Pixbuf;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Longest side the wheel image is decoded at.
pub const WHEEL_IMAGE_SIZE: i32 = 1024;
const DATA_SUBDIR: &str = "chakra";

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Asset '{}' not found in any data directory", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to decode '{}': {source}", path.display())]
    Decode { path: PathBuf, source: glib::Error },
}

fn data_directories() -> Vec<PathBuf> {
    let xdg = xdg::BaseDirectories::new();
    let mut dirs = Vec::new();

    if let Some(home) = xdg.get_data_home() {
        dirs.push(home.join(DATA_SUBDIR));
    }

    dirs.extend(
        xdg.get_data_dirs()
            .into_iter()
            .map(|p| p.join(DATA_SUBDIR)),
    );
    dirs
}

/// Absolute paths are taken as-is; relative ones are looked up in the data
/// directories, user directory first.
pub fn resolve(asset: &Path) -> Result<PathBuf, AssetError> {
    if asset.is_absolute() {
        return asset
            .exists()
            .then(|| asset.to_path_buf())
            .ok_or_else(|| AssetError::NotFound(asset.to_path_buf()));
    }

    data_directories()
        .into_iter()
        .map(|dir| dir.join(asset))
        .find(|candidate| candidate.exists())
        .ok_or_else(|| AssetError::NotFound(asset.to_path_buf()))
}

pub fn load_wheel_image(asset: &Path) -> Result<Pixbuf, AssetError> {
    let path = resolve(asset)?;
    Pixbuf::from_file_at_scale(&path, WHEEL_IMAGE_SIZE, WHEEL_IMAGE_SIZE, true)
        .map_err(|source| AssetError::Decode { path, source })
}
