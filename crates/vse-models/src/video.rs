//! Video assets submitted for transcription.

use bytes::Bytes;
use std::fmt;

/// Maximum number of videos accepted by one transcription call.
pub const MAX_VIDEOS: usize = 3;

/// Media type used when the uploader declares none.
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// One uploaded video, held in memory for the duration of a request.
#[derive(Clone, PartialEq, Eq)]
pub struct VideoAsset {
    /// Raw file content
    pub data: Bytes,
    /// Declared media type (e.g. `video/mp4`)
    pub media_type: String,
    /// Original filename as sent by the uploader
    pub filename: String,
}

impl VideoAsset {
    pub fn new(
        data: impl Into<Bytes>,
        media_type: Option<&str>,
        filename: impl Into<String>,
    ) -> Self {
        let media_type = media_type
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MEDIA_TYPE);

        Self {
            data: data.into(),
            media_type: media_type.to_string(),
            filename: filename.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// Content is omitted; assets can be hundreds of megabytes.
impl fmt::Debug for VideoAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoAsset")
            .field("filename", &self.filename)
            .field("media_type", &self.media_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Guess a video media type from a filename extension.
pub fn media_type_for_filename(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mpeg" | "mpg" => "video/mpeg",
        "3gp" => "video/3gpp",
        "flv" => "video/x-flv",
        "wmv" => "video/x-ms-wmv",
        _ => DEFAULT_MEDIA_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_media_type() {
        let asset = VideoAsset::new(vec![1u8, 2, 3], None, "clip.mp4");
        assert_eq!(asset.media_type, DEFAULT_MEDIA_TYPE);
        assert_eq!(asset.len(), 3);

        let asset = VideoAsset::new(vec![1u8], Some("  "), "clip.mp4");
        assert_eq!(asset.media_type, DEFAULT_MEDIA_TYPE);

        let asset = VideoAsset::new(vec![1u8], Some("video/webm"), "clip.webm");
        assert_eq!(asset.media_type, "video/webm");
    }

    #[test]
    fn test_debug_omits_content() {
        let asset = VideoAsset::new(vec![0u8; 1024], Some("video/mp4"), "a.mp4");
        let debug = format!("{:?}", asset);
        assert!(debug.contains("bytes: 1024"));
        assert!(!debug.contains("[0, 0"));
    }

    #[test]
    fn test_media_type_for_filename() {
        assert_eq!(media_type_for_filename("clip.MP4"), "video/mp4");
        assert_eq!(media_type_for_filename("a.b.mov"), "video/quicktime");
        assert_eq!(media_type_for_filename("noext"), DEFAULT_MEDIA_TYPE);
    }
}
