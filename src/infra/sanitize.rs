//! Safe file names for exported artifacts.

/// Characters no common file system accepts in a file name.
pub const ILLEGAL_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Stand-in for every illegal character.
pub const SUBSTITUTE: char = '÷';

/// Longest name produced, in characters.
pub const MAX_LENGTH: usize = 200;

/// Name used when nothing printable is left.
pub const UNTITLED: &str = "Untitled";

/// Converts a title to a name that is safe on any file system.
///
/// - Replaces `/ \ : * ? " < > |` with `÷`
/// - Trims leading/trailing whitespace
/// - Truncates to 200 characters
/// - Returns "Untitled" for empty results
///
/// The function is idempotent.
///
/// # Examples
///
/// ```
/// use cardport::infra::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("Hello/World"), "Hello÷World");
/// assert_eq!(sanitize_file_name("  Notes  "), "Notes");
/// assert_eq!(sanitize_file_name(""), "Untitled");
/// ```
pub fn sanitize_file_name(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| if ILLEGAL_CHARS.contains(&c) { SUBSTITUTE } else { c })
        .collect();

    let truncated: String = replaced.trim().chars().take(MAX_LENGTH).collect();

    // Truncation can expose whitespace that was interior before.
    let result = truncated.trim_end();
    if result.is_empty() {
        return UNTITLED.to_string();
    }
    result.to_string()
}

/// Sanitizes the stem of a file name, keeping its extension.
///
/// ```
/// use cardport::infra::safe_file_name;
///
/// assert_eq!(safe_file_name("a/b.canvas"), "a÷b.canvas");
/// assert_eq!(safe_file_name(".canvas"), "Untitled.canvas");
/// ```
pub fn safe_file_name(name: &str) -> String {
    match name.rfind('.') {
        Some(dot) if !name[dot + 1..].contains(ILLEGAL_CHARS) => {
            format!("{}{}", sanitize_file_name(&name[..dot]), &name[dot..])
        }
        _ => sanitize_file_name(name),
    }
}
