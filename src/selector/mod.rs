use crate::config::SelectorConfig;
use std::path::PathBuf;

/// Source of the image path to convert.
///
/// `None` means the user chose nothing; callers treat it as "nothing to do".
pub trait FileSelector {
    fn select(&self) -> Option<PathBuf>;
}

/// Native modal open dialog filtered to image files.
pub struct DialogSelector {
    title: String,
    extensions: Vec<String>,
}

impl Default for DialogSelector {
    fn default() -> Self {
        Self::from_config(&SelectorConfig::default())
    }
}

impl DialogSelector {
    pub fn from_config(config: &SelectorConfig) -> Self {
        Self {
            title: config.title.clone(),
            extensions: config.extensions.clone(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl FileSelector for DialogSelector {
    fn select(&self) -> Option<PathBuf> {
        let selection = rfd::FileDialog::new()
            .set_title(&self.title)
            .add_filter("Image Files", self.extensions.as_slice())
            .pick_file();

        match &selection {
            Some(path) => tracing::info!(path = %path.display(), "File selected"),
            None => tracing::info!("File selection cancelled"),
        }
        selection
    }
}

/// Selector that always yields the same, already known path.
pub struct FixedSelector {
    path: Option<PathBuf>,
}

impl FixedSelector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A selector that behaves like a dismissed dialog.
    pub fn cancelled() -> Self {
        Self { path: None }
    }
}

impl FileSelector for FixedSelector {
    fn select(&self) -> Option<PathBuf> {
        self.path.clone()
    }
}
