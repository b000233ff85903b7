/// Upload form state
///
/// Holds the metadata buffers, the currently selected GIF, and the
/// preview handle for it. The preview is the one client-side resource
/// with an explicit lifecycle: at most one is live at a time, the
/// previous one is released before a replacement is installed, and any
/// full form reset releases it too.

use std::path::Path;

use iced::widget::image;

/// Message shown when submit is pressed with no file selected
pub const NO_FILE_MESSAGE: &str = "Please choose a GIF to upload.";

/// A locally selected GIF waiting to be uploaded
#[derive(Debug, Clone)]
pub struct SelectedGif {
    /// Filename forwarded to the backend in the multipart part
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Owned preview resource for the selected file.
///
/// Replacing the preview drops the previous image handle first, so
/// repeated selections never accumulate live handles.
#[derive(Debug, Default)]
pub struct Preview {
    handle: Option<image::Handle>,
}

impl Preview {
    /// Install a preview for freshly selected bytes,
    /// releasing the previous handle first
    pub fn replace(&mut self, bytes: &[u8]) {
        self.clear();
        self.handle = Some(image::Handle::from_bytes(bytes.to_vec()));
    }

    /// Release the current handle, if any
    pub fn clear(&mut self) {
        self.handle = None;
    }

    pub fn handle(&self) -> Option<&image::Handle> {
        self.handle.as_ref()
    }

    /// Number of live handles (0 or 1 by construction)
    pub fn live_count(&self) -> usize {
        usize::from(self.handle.is_some())
    }
}

/// All state behind the upload panel
#[derive(Debug, Default)]
pub struct UploadForm {
    pub title: String,
    pub description: String,
    /// Tags exactly as typed, comma-separated
    pub tags: String,
    pub selected: Option<SelectedGif>,
    pub preview: Preview,
    /// Inline status line under the form
    pub status: String,
    /// Submit guard: true while an upload call is outstanding
    pub in_flight: bool,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a freshly picked file. Rejects bytes that are not a GIF;
    /// on success the previous preview (if any) is released and a new
    /// one installed.
    pub fn select_file(&mut self, path: &Path, bytes: Vec<u8>) -> Result<(), String> {
        match ::image::guess_format(&bytes) {
            Ok(::image::ImageFormat::Gif) => {}
            _ => {
                return Err(format!(
                    "{} is not a GIF file.",
                    path.file_name().unwrap_or_default().to_string_lossy()
                ));
            }
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.gif".to_string());

        self.preview.replace(&bytes);
        self.selected = Some(SelectedGif { file_name, bytes });

        Ok(())
    }

    /// Check the form is submittable. The only validation rule is that
    /// a file must be selected; metadata fields may be empty.
    pub fn validate(&self) -> Result<&SelectedGif, &'static str> {
        self.selected.as_ref().ok_or(NO_FILE_MESSAGE)
    }

    /// Clear every field and release the preview, keeping only the
    /// status line (set by the caller to report the outcome)
    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
        self.tags.clear();
        self.selected = None;
        self.preview.clear();
    }
}
