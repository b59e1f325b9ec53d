use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Content types the image host accepts as declared. Anything else is sent as PNG.
pub const SUPPORTED_IMAGE_TYPES: [&str; 5] = [
    "image/gif",
    "image/jpeg",
    "image/pjpeg",
    "image/png",
    "image/tiff",
];

pub const FALLBACK_IMAGE_TYPE: &str = "image/png";

/// Builds a `data:<mime>;base64,<payload>` URI for the upload API.
///
/// The bytes are not sniffed; an unsupported or missing `content_type` only
/// changes the declared type, never the payload.
pub fn encode_data_uri(bytes: &[u8], content_type: Option<&str>) -> String {
    let mime = declared_image_type(content_type);
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

fn declared_image_type(content_type: Option<&str>) -> &'static str {
    content_type
        .and_then(|ct| SUPPORTED_IMAGE_TYPES.iter().find(|supported| **supported == ct))
        .copied()
        .unwrap_or(FALLBACK_IMAGE_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_of(uri: &str) -> Vec<u8> {
        let (_, encoded) = uri.split_once(";base64,").unwrap();
        STANDARD.decode(encoded).unwrap()
    }

    #[test]
    fn test_supported_types_keep_their_prefix() {
        for mime in SUPPORTED_IMAGE_TYPES {
            let uri = encode_data_uri(b"\x89PNG", Some(mime));
            assert!(
                uri.starts_with(&format!("data:{mime};base64,")),
                "unexpected prefix for {mime}: {uri}"
            );
        }
    }

    #[test]
    fn test_unknown_types_fall_back_to_png() {
        let declared = [
            Some(""),
            Some("image/webp"),
            Some("application/pdf"),
            Some("IMAGE/JPEG"),
            None,
        ];
        for ct in declared {
            let uri = encode_data_uri(b"GIF89a", ct);
            assert!(uri.starts_with("data:image/png;base64,"), "{ct:?} -> {uri}");
        }
    }

    #[test]
    fn test_payload_round_trips() {
        let jpeg_header: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
        let all_bytes: Vec<u8> = (0..=255).collect();

        assert_eq!(payload_of(&encode_data_uri(jpeg_header, Some("image/jpeg"))), jpeg_header);
        assert_eq!(payload_of(&encode_data_uri(&all_bytes, Some("image/x-icon"))), all_bytes);
        assert_eq!(encode_data_uri(&[], Some("image/gif")), "data:image/gif;base64,");
    }

    #[test]
    fn test_mismatched_content_is_not_rejected() {
        // PNG bytes declared as GIF are passed through untouched.
        let png_magic: &[u8] = b"\x89PNG\r\n\x1a\n";
        let uri = encode_data_uri(png_magic, Some("image/gif"));
        assert!(uri.starts_with("data:image/gif;base64,"));
        assert_eq!(payload_of(&uri), png_magic);
    }
}
