//! Path helpers for media files

use std::path::{Path, PathBuf};

use crate::domain::model::MediaKind;

/// Path utilities
pub struct PathUtils;

impl PathUtils {
    /// Lowercased extension without the dot, empty when there is none
    pub fn extension(path: &Path) -> String {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    /// Media kind inferred from the extension
    pub fn media_kind(path: &Path) -> Option<MediaKind> {
        MediaKind::from_extension(&Self::extension(path))
    }

    /// `<dir>/<stem>_<suffix>.<ext>` next to the input
    pub fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        let extension = Self::extension(path);
        let name = if extension.is_empty() {
            format!("{}_{}", stem, suffix)
        } else {
            format!("{}_{}.{}", stem, suffix, extension)
        };
        path.with_file_name(name)
    }
}
