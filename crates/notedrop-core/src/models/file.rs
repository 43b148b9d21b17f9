//! Files captured from a drop or paste gesture.

use bytes::Bytes;

/// Contents of a captured file, as delivered by the host platform.
///
/// The platform read happens before the pipeline runs; a failed read is
/// carried along so it can be reported per file instead of aborting the
/// batch.
#[derive(Clone, Debug)]
pub enum FileContents {
    Bytes(Bytes),
    /// The platform could not produce the file's bytes.
    Unavailable(String),
}

/// An image captured from a UI gesture. Created at capture time, consumed
/// once by the uploader, discarded after.
#[derive(Clone, Debug)]
pub struct PendingFile {
    pub name: String,
    pub content_type: String,
    pub size: u64,
    pub contents: FileContents,
}

impl PendingFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        let bytes = bytes.into();
        PendingFile {
            name: name.into(),
            content_type: content_type.into(),
            size: bytes.len() as u64,
            contents: FileContents::Bytes(bytes),
        }
    }

    /// A file whose bytes the platform failed to deliver.
    pub fn unavailable(
        name: impl Into<String>,
        content_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PendingFile {
            name: name.into(),
            content_type: content_type.into(),
            size: 0,
            contents: FileContents::Unavailable(reason.into()),
        }
    }

    /// Declared type begins with `image/`.
    pub fn is_image(&self) -> bool {
        self.content_type
            .to_ascii_lowercase()
            .starts_with("image/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_detection_is_case_insensitive_on_type() {
        assert!(PendingFile::new("a.png", "image/png", vec![1u8]).is_image());
        assert!(PendingFile::new("a.png", "IMAGE/PNG", vec![1u8]).is_image());
        assert!(!PendingFile::new("a.pdf", "application/pdf", vec![1u8]).is_image());
    }

    #[test]
    fn size_tracks_the_captured_bytes() {
        let file = PendingFile::new("a.png", "image/png", vec![0u8; 16]);
        assert_eq!(file.size, 16);
    }
}
