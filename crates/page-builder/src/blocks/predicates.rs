//! Shape checks shared by the rule evaluator and the page-wide audits.
//!
//! URL checks are structural only: no DNS lookups, no fetching. They accept
//! absolute URLs with an authority, `mailto:`/`tel:` links, and site-relative
//! paths or fragments, which is what the builder stores for internal links.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static ABSOLUTE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+(?:[/?#]\S*)?$")
        .expect("absolute url pattern compiles")
});

static OPAQUE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:mailto|tel):[^\s]+$").expect("opaque url pattern compiles")
});

static RELATIVE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:/|#)\S*$").expect("relative url pattern compiles"));

static IMAGE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(?:jpe?g|png|gif|webp|svg|avif)(?:[?#]\S*)?$")
        .expect("image extension pattern compiles")
});

static DATA_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:image/[A-Za-z0-9.+\-]+;base64,[A-Za-z0-9+/=]+$")
        .expect("data image pattern compiles")
});

static VIDEO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^https?://(?:",
        r"(?:www\.|m\.)?youtube\.com/(?:watch\?v=|embed/|shorts/)[\w\-]{6,}",
        r"|youtu\.be/[\w\-]{6,}",
        r"|(?:www\.)?vimeo\.com/\d+",
        r"|player\.vimeo\.com/video/\d+",
        r")(?:[?&#/]\S*)?$"
    ))
    .expect("video url pattern compiles")
});

/// True for a well-formed absolute, `mailto:`/`tel:`, or site-relative URL.
pub fn is_valid_url(candidate: &str) -> bool {
    let candidate = candidate.trim();
    if candidate.is_empty() || candidate.starts_with("//") {
        return false;
    }

    ABSOLUTE_URL_RE.is_match(candidate)
        || OPAQUE_URL_RE.is_match(candidate)
        || RELATIVE_URL_RE.is_match(candidate)
}

/// True for a URL whose path ends in a known raster/vector image extension,
/// or for an inline base64 `data:image/*` URL.
pub fn is_valid_image_url(candidate: &str) -> bool {
    let candidate = candidate.trim();
    if DATA_IMAGE_RE.is_match(candidate) {
        return true;
    }

    is_valid_url(candidate) && !candidate.starts_with('#') && IMAGE_PATH_RE.is_match(candidate)
}

/// True for YouTube and Vimeo watch, short, or embed URLs.
pub fn is_valid_video_url(candidate: &str) -> bool {
    VIDEO_URL_RE.is_match(candidate.trim())
}

/// Absent, null, or a string that trims to nothing.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

/// Truthiness as the builder front end evaluates it: `null`, `false`, `0`,
/// and `""` are falsy; arrays and objects are truthy even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Integer view of a number or numeric string; fractional values are rejected.
pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|n| n.fract() == 0.0 && n.is_finite())
                .map(|n| n as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}
