/// Default base URL for Gemini API requests.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// API version segment used when the base URL does not carry one.
pub const DEFAULT_API_VERSION: &str = "v1beta";

/// Build the `generateContent` endpoint for `model` under `base`.
///
/// Normalization rules:
/// 1) keep a URL already ending in `:generateContent` unchanged
/// 2) append `/models/{model}:generateContent` when the path ends in a version segment
/// 3) append `/v1beta/models/{model}:generateContent` otherwise
///
/// A leading `models/` on the model id is accepted and not duplicated.
pub fn generate_content_url(base: &str, model: &str) -> String {
    let base = if base.trim().is_empty() {
        DEFAULT_GEMINI_BASE_URL
    } else {
        base.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with(":generateContent") {
        return trimmed.to_string();
    }

    let model = model.trim();
    let model = model.strip_prefix("models/").unwrap_or(model);
    if ends_with_version_segment(trimmed) {
        return format!("{trimmed}/models/{model}:generateContent");
    }
    format!("{trimmed}/{DEFAULT_API_VERSION}/models/{model}:generateContent")
}

fn ends_with_version_segment(url: &str) -> bool {
    let Some((_, last)) = url.rsplit_once('/') else {
        return false;
    };
    let Some(rest) = last.strip_prefix('v') else {
        return false;
    };
    let digits = rest.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
