//! Markdown link assembly and display-name sanitization.

/// Characters that break the host's link or file-path rendering.
const DISALLOWED: &[char] = &[
    '[', ']', '(', ')', '#', '^', '|', '{', '}', '<', '>', ':', '"', '?', '*', '\\', '/', '\n',
    '\r', '\t',
];

/// Replace every character illegal in link text with `_`.
///
/// The result is only ever a display name; the stored key is derived
/// elsewhere and never contains the original name.
pub fn sanitize_display_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| if DISALLOWED.contains(&c) { '_' } else { c })
        .collect();
    if sanitized.trim().is_empty() {
        "image".to_string()
    } else {
        sanitized
    }
}

/// Markdown image tag for an uploaded object.
pub fn image_link(display_name: &str, url: &str) -> String {
    format!("![{}]({})", sanitize_display_name(display_name), url)
}
