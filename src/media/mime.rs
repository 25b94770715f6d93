use std::path::Path;

/// Every MIME type the server advertises in ConnectionManager `GetProtocolInfo`.
/// Subtitle types are recognised by [`classify`] but never advertised.
pub const SUPPORTED_MIMES: &[&str] = &[
    "video/mp4",
    "video/x-matroska",
    "video/x-msvideo",
    "video/quicktime",
    "video/MP2T",
    "video/mpeg",
    "video/x-ms-wmv",
    "video/x-flv",
    "video/ogg",
    "video/webm",
    "video/3gpp",
    "audio/mpeg",
    "audio/flac",
    "audio/wav",
    "audio/mp4",
    "audio/aac",
    "audio/ogg",
    "audio/x-ms-wma",
    "audio/aiff",
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/bmp",
    "image/tiff",
];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
    Image,
    Subtitle,
}

impl MediaKind {
    /// UPnP class used for DIDL-Lite `<upnp:class>`. `None` for kinds that are
    /// never published as items.
    pub fn upnp_class(self) -> Option<&'static str> {
        match self {
            MediaKind::Video => Some("object.item.videoItem"),
            MediaKind::Audio => Some("object.item.audioItem.musicTrack"),
            MediaKind::Image => Some("object.item.imageItem.photo"),
            MediaKind::Subtitle => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MediaType {
    pub kind: MediaKind,
    pub mime: &'static str,
}

// (lowercase extension, kind, mime). DLNA-correct MIME strings, e.g. video/MP2T for .ts.
const EXTENSIONS: &[(&str, MediaKind, &str)] = &[
    ("mp4", MediaKind::Video, "video/mp4"),
    ("m4v", MediaKind::Video, "video/mp4"),
    ("mkv", MediaKind::Video, "video/x-matroska"),
    ("avi", MediaKind::Video, "video/x-msvideo"),
    ("mov", MediaKind::Video, "video/quicktime"),
    ("ts", MediaKind::Video, "video/MP2T"),
    ("m2ts", MediaKind::Video, "video/MP2T"),
    ("mts", MediaKind::Video, "video/MP2T"),
    ("mpg", MediaKind::Video, "video/mpeg"),
    ("mpeg", MediaKind::Video, "video/mpeg"),
    ("wmv", MediaKind::Video, "video/x-ms-wmv"),
    ("flv", MediaKind::Video, "video/x-flv"),
    ("ogv", MediaKind::Video, "video/ogg"),
    ("webm", MediaKind::Video, "video/webm"),
    ("3gp", MediaKind::Video, "video/3gpp"),
    ("mp3", MediaKind::Audio, "audio/mpeg"),
    ("flac", MediaKind::Audio, "audio/flac"),
    ("wav", MediaKind::Audio, "audio/wav"),
    ("m4a", MediaKind::Audio, "audio/mp4"),
    ("aac", MediaKind::Audio, "audio/aac"),
    ("ogg", MediaKind::Audio, "audio/ogg"),
    ("oga", MediaKind::Audio, "audio/ogg"),
    ("opus", MediaKind::Audio, "audio/ogg"),
    ("wma", MediaKind::Audio, "audio/x-ms-wma"),
    ("aiff", MediaKind::Audio, "audio/aiff"),
    ("aif", MediaKind::Audio, "audio/aiff"),
    ("jpg", MediaKind::Image, "image/jpeg"),
    ("jpeg", MediaKind::Image, "image/jpeg"),
    ("png", MediaKind::Image, "image/png"),
    ("gif", MediaKind::Image, "image/gif"),
    ("webp", MediaKind::Image, "image/webp"),
    ("bmp", MediaKind::Image, "image/bmp"),
    ("tiff", MediaKind::Image, "image/tiff"),
    ("tif", MediaKind::Image, "image/tiff"),
    ("srt", MediaKind::Subtitle, "text/srt"),
    ("vtt", MediaKind::Subtitle, "text/vtt"),
];

/// Classify a file by extension (case-insensitive). `None` for anything unrecognised.
pub fn classify(path: &Path) -> Option<MediaType> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    EXTENSIONS
        .iter()
        .find(|(e, _, _)| *e == ext)
        .map(|&(_, kind, mime)| MediaType { kind, mime })
}

/// `protocolInfo` for a plain HTTP GET resource: `http-get:*:{mime}:*`.
pub fn protocol_info(mime: &str) -> String {
    format!("http-get:*:{mime}:*")
}

/// Comma-separated `Source` list for `GetProtocolInfo`.
pub fn source_protocol_info() -> String {
    SUPPORTED_MIMES
        .iter()
        .map(|mime| protocol_info(mime))
        .collect::<Vec<_>>()
        .join(",")
}
