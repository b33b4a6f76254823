//! Reading and writing module images on disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::image::ModuleImage;

/// File extension of module image files.
pub const IMAGE_EXTENSION: &str = "avmi";

/// Raw bytes of an image file, undecoded.
pub fn read_image_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read {}", path.display()))
}

pub fn read_image_file(path: &Path) -> Result<ModuleImage> {
    let bytes = read_image_bytes(path)?;
    ModuleImage::from_bytes(&bytes).with_context(|| format!("decode {}", path.display()))
}

/// Paths of every `*.avmi` file in `dir`, sorted. Fails when there are none.
pub fn list_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("read {}", dir.display()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("list {}", dir.display()))?;
    entries.sort_by_key(|e| e.path());

    let paths: Vec<PathBuf> = entries
        .into_iter()
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().and_then(|s| s.to_str()) == Some(IMAGE_EXTENSION))
        .collect();
    if paths.is_empty() {
        return Err(anyhow!("no .{} files found in {}", IMAGE_EXTENSION, dir.display()));
    }
    Ok(paths)
}

pub fn read_image_dir(dir: &Path) -> Result<Vec<ModuleImage>> {
    list_image_files(dir)?
        .iter()
        .map(|path| read_image_file(path))
        .collect()
}

pub fn write_image_file(path: &Path, image: &ModuleImage) -> Result<()> {
    let bytes = image
        .to_bytes()
        .with_context(|| format!("encode module {}", image.name))?;
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))
}
