use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("markup tag regex must compile"));

/// Strip markup tags from narrative text and trim it.
///
/// Returns `None` when the input is absent or nothing but whitespace remains,
/// so an empty summary is never surfaced as `""`.
pub fn sanitize(text: Option<&str>) -> Option<String> {
    let raw = text?;
    let stripped = MARKUP_TAG_RE.replace_all(raw, "");
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Types carrying narrative text that must be sanitized after validation.
pub trait Sanitize {
    fn sanitize(self) -> Self;
}

impl<T: Sanitize> Sanitize for Vec<T> {
    fn sanitize(self) -> Self {
        self.into_iter().map(Sanitize::sanitize).collect()
    }
}
