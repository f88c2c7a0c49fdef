//! Byte-to-text decoding shared by every input path.

/// Decode `bytes` as UTF-8, dropping invalid sequences instead of failing or
/// substituting U+FFFD.
pub fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}
