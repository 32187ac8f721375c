//! Balanced `{}` block extraction from free-form CLI text.
//!
//! The Meshtastic CLI prints its node table as a JSON object embedded in
//! human-oriented diagnostic output. Peer records nest arbitrarily, so the
//! block boundary is found by counting braces rather than pattern matching.

/// Return the first top-level `{ ... }` block in `text`, byte-for-byte.
///
/// Scanning starts at the first `{`. Depth goes up on `{` and down on `}`;
/// the block ends at the `}` that brings depth back to zero. Returns `None`
/// when there is no `{` at all or the block is never closed.
pub fn extract_balanced_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth: usize = 0;
    // Braces are ASCII, so byte offsets from char_indices are valid slice bounds.
    for (offset, ch) in text[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }
    None
}
