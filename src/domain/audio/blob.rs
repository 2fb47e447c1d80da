//! Compressed audio blob value object

use std::fmt;
use std::sync::Arc;

/// Container types a recording can arrive in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerType {
    Webm,
    Ogg,
    Flac,
    Wav,
    Mp3,
    Mp4,
}

impl ContainerType {
    /// Get the MIME type string
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Webm => "audio/webm",
            Self::Ogg => "audio/ogg",
            Self::Flac => "audio/flac",
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Mp4 => "audio/mp4",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Webm => "webm",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Mp4 => "m4a",
        }
    }

    /// Guess the container from a file extension (case-insensitive).
    /// `.opus` files are Ogg, though their Opus audio may not decode.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "webm" | "mkv" => Some(Self::Webm),
            "ogg" | "oga" | "opus" => Some(Self::Ogg),
            "flac" => Some(Self::Flac),
            "wav" | "wave" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "mp4" | "m4a" | "aac" => Some(Self::Mp4),
            _ => None,
        }
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mime_type())
    }
}

/// Compressed audio bytes plus the declared container type.
/// Immutable once captured; clones share the same bytes.
#[derive(Debug, Clone)]
pub struct RawAudioBlob {
    data: Arc<[u8]>,
    container: ContainerType,
}

impl RawAudioBlob {
    /// Create a blob from owned bytes
    pub fn new(data: Vec<u8>, container: ContainerType) -> Self {
        Self {
            data: data.into(),
            container,
        }
    }

    /// Get the raw bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get a shared handle to the bytes
    pub fn shared_data(&self) -> Arc<[u8]> {
        Arc::clone(&self.data)
    }

    /// Get the declared container type
    pub fn container(&self) -> ContainerType {
        self.container
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        human_readable_size(self.size_bytes())
    }
}

/// Format a byte count as B / KB / MB
pub fn human_readable_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_mime_types() {
        assert_eq!(ContainerType::Webm.mime_type(), "audio/webm");
        assert_eq!(ContainerType::Flac.mime_type(), "audio/flac");
        assert_eq!(ContainerType::Wav.mime_type(), "audio/wav");
    }

    #[test]
    fn container_extensions() {
        assert_eq!(ContainerType::Webm.extension(), "webm");
        assert_eq!(ContainerType::Flac.extension(), "flac");
        assert_eq!(ContainerType::Mp4.extension(), "m4a");
    }

    #[test]
    fn container_from_extension() {
        assert_eq!(ContainerType::from_extension("FLAC"), Some(ContainerType::Flac));
        assert_eq!(ContainerType::from_extension("opus"), Some(ContainerType::Ogg));
        assert_eq!(ContainerType::from_extension("txt"), None);
    }

    #[test]
    fn clones_share_bytes() {
        let blob = RawAudioBlob::new(vec![1, 2, 3], ContainerType::Webm);
        let copy = blob.clone();
        assert!(Arc::ptr_eq(&blob.shared_data(), &copy.shared_data()));
        assert_eq!(copy.data(), &[1, 2, 3]);
    }

    #[test]
    fn human_readable_sizes() {
        assert_eq!(human_readable_size(500), "500 B");
        assert_eq!(human_readable_size(2048), "2.0 KB");
        assert_eq!(human_readable_size(2 * 1024 * 1024), "2.0 MB");
    }

    #[test]
    fn empty_blob() {
        let blob = RawAudioBlob::new(Vec::new(), ContainerType::Ogg);
        assert!(blob.is_empty());
        assert_eq!(blob.size_bytes(), 0);
    }
}
