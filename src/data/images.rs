use std::collections::BTreeMap;
use std::path::Path;

use super::error::DataError;

/// Label → URL table shipped with the binary.
const BUILTIN_TABLE: &str = include_str!("../../assets/realtime_images.json");

// ---------------------------------------------------------------------------
// ImageCatalog – fixed label → locator mapping
// ---------------------------------------------------------------------------

/// Read-only mapping from an image filter name to the URL of its latest image.
///
/// Built once at startup and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCatalog {
    entries: BTreeMap<String, String>,
}

impl ImageCatalog {
    /// The table embedded in the binary.
    pub fn builtin() -> Result<Self, DataError> {
        Self::from_json_str(BUILTIN_TABLE)
    }

    /// Read a JSON object of `"label": "url"` pairs from disk.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&text)?;
        log::info!(
            "Loaded {} image locators from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_json_str(text: &str) -> Result<Self, DataError> {
        let entries: BTreeMap<String, String> = serde_json::from_str(text)?;
        if let Some((label, _)) = entries.iter().find(|(_, url)| url.trim().is_empty()) {
            return Err(DataError::EmptyLocator(label.clone()));
        }
        Ok(ImageCatalog { entries })
    }

    /// Locator for `label`.
    pub fn resolve(&self, label: &str) -> Result<&str, DataError> {
        self.entries
            .get(label)
            .map(String::as_str)
            .ok_or_else(|| DataError::UnknownLabel(label.to_string()))
    }

    /// Known labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
