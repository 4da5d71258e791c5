use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("file is empty")]
    Empty,
}

/// Guess an image MIME type: magic bytes first, then the file extension.
pub fn sniff_mime(name: &str, bytes: &[u8]) -> &'static str {
    if let Some(mime) = mime_from_magic(bytes) {
        return mime;
    }
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => FALLBACK_MIME,
    }
}

fn mime_from_magic(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"BM") {
        Some("image/bmp")
    } else {
        None
    }
}

/// Encode the selected file as a `data:` URI usable as an image source.
pub fn encode_data_uri(name: &str, bytes: &[u8]) -> Result<String, PreviewError> {
    if bytes.is_empty() {
        return Err(PreviewError::Empty);
    }
    let mime = sniff_mime(name, bytes);
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn magic_bytes_win_over_extension() {
        assert_eq!(sniff_mime("photo.jpg", PNG_HEADER), "image/png");
        assert_eq!(sniff_mime("x", &[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(sniff_mime("x", b"RIFF\0\0\0\0WEBPVP8 "), "image/webp");
    }

    #[test]
    fn extension_is_used_when_magic_is_unknown() {
        assert_eq!(sniff_mime("REEF.JPEG", b"??"), "image/jpeg");
        assert_eq!(sniff_mime("notes.txt", b"??"), FALLBACK_MIME);
        assert_eq!(sniff_mime("no_extension", b"??"), FALLBACK_MIME);
    }

    #[test]
    fn data_uri_round_trips_bytes() {
        let uri = encode_data_uri("reef.png", PNG_HEADER).unwrap();
        let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), PNG_HEADER);
    }

    #[test]
    fn empty_file_is_rejected() {
        assert_eq!(encode_data_uri("reef.png", &[]), Err(PreviewError::Empty));
    }
}
