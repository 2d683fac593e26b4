//! Client-side guards for image attachments.
//!
//! Files are checked before any network call: an oversized file or one
//! outside the accepted image formats never starts an upload. A file
//! that passes is held as a [`SelectedImage`] with a data-URL preview
//! until the form is submitted.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Maximum accepted image size (10 MiB).
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Accepted MIME types for portfolio images.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

pub const FILE_TOO_LARGE: &str = "Файл слишком большой. Максимальный размер: 10 МБ";
pub const BAD_FILE_TYPE: &str =
    "Недопустимый формат файла. Используйте JPG, PNG, GIF или WEBP";

/// A validated file selection held until the form is submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    /// data: URL for the local preview.
    pub preview: String,
}

/// MIME type inferred from the file extension. The browser file picker
/// does not expose the MIME type through the file engine, so the
/// extension is the contract here.
pub fn image_mime(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit('.').next()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Validate a chosen file. Returns the MIME type the upload should carry,
/// or the message to show the user.
pub fn check_image(file_name: &str, size: u64) -> Result<&'static str, &'static str> {
    if size > MAX_IMAGE_BYTES {
        return Err(FILE_TOO_LARGE);
    }
    image_mime(file_name).ok_or(BAD_FILE_TYPE)
}

/// Build the data: URL used for the inline preview.
pub fn preview_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_file_rejected() {
        assert_eq!(check_image("photo.png", MAX_IMAGE_BYTES), Ok("image/png"));
        assert_eq!(
            check_image("photo.png", MAX_IMAGE_BYTES + 1),
            Err(FILE_TOO_LARGE)
        );
    }

    #[test]
    fn test_disallowed_types_rejected() {
        assert_eq!(check_image("doc.pdf", 100), Err(BAD_FILE_TYPE));
        assert_eq!(check_image("archive", 100), Err(BAD_FILE_TYPE));
        assert_eq!(check_image("shot.svg", 100), Err(BAD_FILE_TYPE));
    }

    #[test]
    fn test_allowed_extensions_map_to_allowed_mimes() {
        for (name, mime) in [
            ("a.jpg", "image/jpeg"),
            ("b.JPEG", "image/jpeg"),
            ("c.png", "image/png"),
            ("d.gif", "image/gif"),
            ("e.webp", "image/webp"),
        ] {
            let got = image_mime(name).unwrap();
            assert_eq!(got, mime);
            assert!(ALLOWED_IMAGE_TYPES.contains(&got));
        }
    }

    #[test]
    fn test_preview_data_url() {
        assert_eq!(
            preview_data_url("image/png", &[1, 2, 3]),
            "data:image/png;base64,AQID"
        );
    }
}
