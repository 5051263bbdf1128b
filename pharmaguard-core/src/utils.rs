use std::io::Read;

use flate2::read::MultiGzDecoder;

use crate::errors::InputError;

/// gzip magic bytes
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

///
/// Turn raw upload bytes into text, inflating gzip content first.
///
/// Compression is detected from the magic bytes so a mislabelled file still
/// decodes. Anything that is not UTF-8 after inflation is an encoding error.
///
/// # Arguments
/// - bytes: the raw file content
///
/// # Returns
/// - the decoded text
pub fn decode_text(bytes: &[u8]) -> Result<String, InputError> {
    let raw = if bytes.starts_with(&GZIP_MAGIC) {
        let mut inflated = Vec::new();
        MultiGzDecoder::new(bytes).read_to_end(&mut inflated)?;
        inflated
    } else {
        bytes.to_vec()
    };

    String::from_utf8(raw).map_err(|e| InputError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;

    #[rstest]
    fn test_decode_plain_and_gzip() {
        let text = "#CHROM\tPOS\n";
        assert_eq!(decode_text(text.as_bytes()).unwrap(), text);

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();
        assert_eq!(decode_text(&compressed).unwrap(), text);
    }

    #[rstest]
    fn test_decode_rejects_invalid_utf8() {
        let result = decode_text(&[0x23, 0xff, 0xfe, 0x0a]);
        assert!(matches!(result, Err(InputError::Encoding(_))));
    }
}
