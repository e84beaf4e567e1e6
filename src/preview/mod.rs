//! Preview classification and the local side of previews

mod launch;
mod temp;

pub use launch::spawn_viewer;
pub use temp::TempFiles;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::AppResult;

/// What kind of preview a file gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewCategory {
    Image,
    Video,
    Audio,
    Pdf,
    Text,
    Unsupported,
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "aac", "wav", "flac", "ogg"];
const PDF_EXTENSIONS: &[&str] = &["pdf"];
const TEXT_EXTENSIONS: &[&str] = &["txt", "py", "log", "md", "json", "xml", "csv"];

impl PreviewCategory {
    /// Category implied by the file name's extension alone (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        let ext = ext.to_ascii_lowercase();
        let ext = ext.as_str();

        [
            (IMAGE_EXTENSIONS, PreviewCategory::Image),
            (VIDEO_EXTENSIONS, PreviewCategory::Video),
            (AUDIO_EXTENSIONS, PreviewCategory::Audio),
            (PDF_EXTENSIONS, PreviewCategory::Pdf),
            (TEXT_EXTENSIONS, PreviewCategory::Text),
        ]
        .into_iter()
        .find(|(exts, _)| exts.contains(&ext))
        .map(|(_, category)| category)
    }

    pub fn label(self) -> &'static str {
        match self {
            PreviewCategory::Image => "image",
            PreviewCategory::Video => "video",
            PreviewCategory::Audio => "audio",
            PreviewCategory::Pdf => "PDF",
            PreviewCategory::Text => "text",
            PreviewCategory::Unsupported => "unsupported",
        }
    }
}

/// Classify a local file: by extension first, then by sniffing up to
/// `sniff_limit` bytes for non-whitespace text.
pub fn classify(path: &Path, sniff_limit: usize) -> PreviewCategory {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    if let Some(category) = PreviewCategory::from_name(&name) {
        return category;
    }

    match read_lossy(path, sniff_limit) {
        Ok(text) if !text.trim().is_empty() => PreviewCategory::Text,
        Ok(_) => PreviewCategory::Unsupported,
        Err(e) => {
            log::debug!("sniffing {} failed: {}", path.display(), e);
            PreviewCategory::Unsupported
        }
    }
}

/// Text shown in the preview pane: at most `limit` characters, lossy UTF-8
pub fn read_text_preview(path: &Path, limit: usize) -> AppResult<String> {
    // A char is at most 4 bytes, so this is always enough input
    let text = read_lossy(path, limit.saturating_mul(4))?;
    Ok(text.chars().take(limit).collect())
}

fn read_lossy(path: &Path, max_bytes: usize) -> AppResult<String> {
    let file = File::open(path)?;
    let mut bytes = Vec::new();
    file.take(max_bytes as u64).read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
