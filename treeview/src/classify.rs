//! Media classification for string leaves.
//!
//! A string is an image, video or file reference when its extension, its URI
//! shape or the key it sits under says so. Rules are checked in the order
//! image, video, file and the first match wins, so broad file keys such as
//! `data` never shadow a genuine image or video reference. All matching is
//! case-insensitive.

use url::Url;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "svg"];
const IMAGE_KEYS: &[&str] = &["photo", "image", "picture", "img", "snapshot", "camera"];

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "m4v", "3gp"];
/// Web-playable subset checked inside http(s) URLs.
const VIDEO_URL_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "m4v"];
const VIDEO_KEYS: &[&str] = &["video", "movie", "clip", "recording"];

const FILE_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "xls", "xlsx", "csv", "txt", "zip", "rar"];
const FILE_KEYS: &[&str] = &["file", "document", "attachment", "data"];

const DEVICE_URI_PREFIX: &str = "content://";

/// How a string leaf is displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Plain,
    Image,
    Video,
    File,
}

impl MediaKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Image => "image",
            Self::Video => "video",
            Self::File => "file",
        }
    }
}

/// Classify a string value, using the mapping key it appears under if any.
///
/// The result depends only on `value` and `key`.
#[must_use]
pub fn classify(value: &str, key: Option<&str>) -> MediaKind {
    let value = value.to_lowercase();
    let key = key.map(str::to_lowercase);
    let key = key.as_deref();

    if is_image(&value, key) {
        MediaKind::Image
    } else if is_video(&value, key) {
        MediaKind::Video
    } else if is_file(&value, key) {
        MediaKind::File
    } else {
        MediaKind::Plain
    }
}

fn is_image(value: &str, key: Option<&str>) -> bool {
    has_extension(value, IMAGE_EXTENSIONS)
        || key_matches(key, IMAGE_KEYS)
        || is_device_uri(value, "images")
        || http_url_mentions(value, IMAGE_EXTENSIONS)
}

fn is_video(value: &str, key: Option<&str>) -> bool {
    has_extension(value, VIDEO_EXTENSIONS)
        || key_matches(key, VIDEO_KEYS)
        || is_device_uri(value, "video")
        || http_url_mentions(value, VIDEO_URL_EXTENSIONS)
}

fn is_file(value: &str, key: Option<&str>) -> bool {
    has_extension(value, FILE_EXTENSIONS) || key_matches(key, FILE_KEYS)
}

/// `value` ends in `.<ext>` for one of `extensions`.
fn has_extension(value: &str, extensions: &[&str]) -> bool {
    value
        .rsplit_once('.')
        .is_some_and(|(_, ext)| extensions.contains(&ext))
}

fn key_matches(key: Option<&str>, patterns: &[&str]) -> bool {
    key.is_some_and(|key| patterns.iter().any(|p| key.contains(p)))
}

/// Device content URIs such as `content://media/external/images/media/12`.
fn is_device_uri(value: &str, segment: &str) -> bool {
    value
        .strip_prefix(DEVICE_URI_PREFIX)
        .is_some_and(|rest| rest.contains(segment))
}

/// An http(s) URL with `.<ext>` anywhere after the scheme, so query strings
/// after the file name still match.
fn http_url_mentions(value: &str, extensions: &[&str]) -> bool {
    let Some(rest) = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"))
    else {
        return false;
    };
    extensions.iter().any(|ext| rest.contains(&format!(".{ext}")))
}

/// Whether the viewer can fetch the reference itself (`http` or `https`).
#[must_use]
pub fn is_fetchable(value: &str) -> bool {
    Url::parse(value.trim()).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Name shown next to a media reference: the key when present, otherwise
/// the last path segment of the value.
#[must_use]
pub fn display_name(value: &str, key: Option<&str>) -> String {
    if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
        return key.to_owned();
    }
    match value.rsplit_once('/') {
        Some((_, last)) if !last.is_empty() => last.to_owned(),
        _ => value.to_owned(),
    }
}

/// Icon class for a file reference, chosen by extension.
#[must_use]
pub fn file_icon(value: &str) -> &'static str {
    let ext = value
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "file-pdf",
        "doc" | "docx" => "file-word",
        "xls" | "xlsx" => "file-excel",
        "csv" => "file-csv",
        "txt" => "file-text",
        "zip" | "rar" => "file-archive",
        _ => "file",
    }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
