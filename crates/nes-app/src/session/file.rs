use crate::emu::image::ProgramImage;
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// Options for the file picker, passed through as opaque string pairs
///
/// The native dialog understands `accept`, `multiple` and `title`; anything
/// else is carried along untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileOptions {
    entries: BTreeMap<String, String>,
}

impl FileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A file handle returned by a [`FilePicker`]
#[allow(async_fn_in_trait)]
pub trait FileBlob {
    fn name(&self) -> String;

    /// Entire contents; an unreadable file reads as empty
    async fn read_all(&self) -> Vec<u8>;
}

/// Native file-selection prompt
///
/// Resolves once the user is done with the dialog. A dismissed dialog and a
/// failed one both come back as an empty selection.
#[allow(async_fn_in_trait)]
pub trait FilePicker {
    type File: FileBlob;

    async fn pick(&self, options: &FileOptions) -> Vec<Self::File>;
}

/// Reads a picked file into a program image, `None` when there is no content
pub async fn extract_buffer<F: FileBlob>(file: &F) -> Option<ProgramImage> {
    let bytes = file.read_all().await;
    debug!("[file] read {} bytes from {}", bytes.len(), file.name());
    ProgramImage::from_bytes(bytes)
}

/// How [`DialogPicker`] reads [`FileOptions`]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DialogSettings {
    pub extensions: Vec<String>,
    pub multiple: bool,
    pub title: Option<String>,
}

impl DialogSettings {
    pub fn from_options(options: &FileOptions) -> Self {
        let mut settings = DialogSettings::default();
        for (key, value) in options.iter() {
            match key {
                "accept" => {
                    settings.extensions = value
                        .split(',')
                        .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
                        .filter(|ext| !ext.is_empty())
                        .collect();
                }
                "multiple" => {
                    settings.multiple = matches!(value, "" | "true" | "multiple");
                }
                "title" => settings.title = Some(value.to_string()),
                _ => debug!("[file] picker option {key}={value} passed through"),
            }
        }
        settings
    }
}

/// [`FilePicker`] backed by the platform file dialog
#[derive(Clone, Copy, Debug, Default)]
pub struct DialogPicker;

pub struct DialogFile {
    handle: rfd::FileHandle,
}

impl FileBlob for DialogFile {
    fn name(&self) -> String {
        self.handle.file_name()
    }

    async fn read_all(&self) -> Vec<u8> {
        match tokio::fs::read(self.handle.path()).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("[file] failed to read {}: {e}", self.handle.path().display());
                Vec::new()
            }
        }
    }
}

impl FilePicker for DialogPicker {
    type File = DialogFile;

    async fn pick(&self, options: &FileOptions) -> Vec<DialogFile> {
        let settings = DialogSettings::from_options(options);
        let mut dialog = rfd::AsyncFileDialog::new();
        if !settings.extensions.is_empty() {
            dialog = dialog.add_filter("NES ROM", settings.extensions.as_slice());
        }
        if let Some(title) = &settings.title {
            dialog = dialog.set_title(title);
        }

        let handles = if settings.multiple {
            dialog.pick_files().await.unwrap_or_default()
        } else {
            dialog.pick_file().await.into_iter().collect()
        };
        info!("[file] {} file(s) selected", handles.len());

        handles
            .into_iter()
            .map(|handle| DialogFile { handle })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_list_is_normalised() {
        let options = FileOptions::new().with("accept", ".nes, .NES,,unf");
        let settings = DialogSettings::from_options(&options);
        assert_eq!(settings.extensions, vec!["nes", "nes", "unf"]);
        assert!(!settings.multiple);
        assert_eq!(settings.title, None);
    }

    #[test]
    fn test_multiple_and_title() {
        let options = FileOptions::new()
            .with("multiple", "true")
            .with("title", "Pick a cartridge");
        let settings = DialogSettings::from_options(&options);
        assert!(settings.multiple);
        assert_eq!(settings.title.as_deref(), Some("Pick a cartridge"));
    }

    #[test]
    fn test_unknown_options_are_kept() {
        let options = FileOptions::new().with("capture", "user").with("accept", ".nes");
        let settings = DialogSettings::from_options(&options);
        assert_eq!(settings.extensions, vec!["nes"]);
        assert_eq!(options.get("capture"), Some("user"));
        assert_eq!(options.iter().count(), 2);
    }
}
