// Image file naming.
// Derives on-disk file names from API responses and display names from paths.

use std::path::{Path, PathBuf};

use crate::error::{NekoError, Result};
use crate::id::RemoteId;
use crate::nekos::Category;

/// Extension given to images from the random API.
pub const RANDOM_EXTENSION: &str = "webp";

/// File name for a categorized image: the part of the URL after the last
/// `<category>/`, or the whole URL if the category does not appear in it.
pub fn category_file_name(category: Category, url: &str) -> Result<String> {
    let marker = format!("{}/", category);
    let name = url
        .rsplit_once(marker.as_str())
        .map(|(_, name)| name)
        .unwrap_or(url);
    non_empty(sanitize_name(name))
}

/// File name for a random image: `<id>.webp`.
pub fn random_file_name(id: &RemoteId) -> Result<String> {
    non_empty(sanitize_name(&format!("{}.{}", id, RANDOM_EXTENSION)))
}

/// Path of an image inside the image directory.
pub fn image_path(image_dir: &Path, name: &str) -> PathBuf {
    image_dir.join(name)
}

/// Name shown on the instance for an uploaded image (its final path component).
pub fn display_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| NekoError::InvalidFileName(path.to_path_buf()))
}

fn non_empty(name: String) -> Result<String> {
    if name.is_empty() || name.chars().all(|c| c == '.') {
        return Err(NekoError::InvalidFileName(PathBuf::from(name)));
    }
    Ok(name)
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
