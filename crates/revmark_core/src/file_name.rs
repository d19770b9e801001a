//! Download file names for generated documents.
//!
//! The engine never writes a file name into the document; this only decides
//! what a caller should call the file it hands out.

/// Name used when no usable file name was supplied.
pub const DEFAULT_FILE_NAME: &str = "edited-manuscript.docx";

/// Extension every generated document carries.
pub const DOCX_EXTENSION: &str = ".docx";

/// Turn a caller-supplied name into a safe download name.
///
/// Absent or blank names, names with control characters and names containing
/// path separators fall back to [`DEFAULT_FILE_NAME`]. A missing `.docx`
/// extension is appended.
pub fn sanitize(name: Option<&str>) -> String {
    let Some(name) = name.map(str::trim) else {
        return DEFAULT_FILE_NAME.to_string();
    };

    if !is_valid(name) {
        return DEFAULT_FILE_NAME.to_string();
    }

    if name.to_ascii_lowercase().ends_with(DOCX_EXTENSION) {
        name.to_string()
    } else {
        format!("{}{}", name, DOCX_EXTENSION)
    }
}

/// Whether `name` can be used as-is (before extension handling).
pub fn is_valid(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.chars().any(|c| c.is_control() || c == '/' || c == '\\')
}
