//! Photo file storage
//!
//! Two areas under the root folder:
//! - **Staging** (`temp_uploads/`): uploads held between wizard steps, never served
//! - **Media** (`media/`): committed photos, served at `/media/`

mod media;
mod staging;

pub use media::{MediaStore, PHOTO_CATEGORY};
pub use staging::{PhotoStaging, STAGED_PREFIX};

/// Extension of `file_name` including the dot, lowercased, or empty
///
/// Only ASCII alphanumerics survive so the result is safe inside a file name.
pub fn sanitized_extension(file_name: &str) -> String {
    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    let clean: String = ext
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(10)
        .collect::<String>()
        .to_ascii_lowercase();

    if clean.is_empty() {
        String::new()
    } else {
        format!(".{}", clean)
    }
}

/// True when `name` is a bare file name with no directory components
pub(crate) fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}
