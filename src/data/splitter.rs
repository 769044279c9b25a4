// ============================================================
// Layer 4 - Train/Validation Text Splitter
// ============================================================
// Splits one corpus into a training prefix and a held-out
// validation suffix:
//
//   |<------- train (1 - f) ------->|<-- valid (f) -->|
//
// Unlike sample-level splitting there is no shuffle here. A
// character model is evaluated on contiguous text, so the
// held-out part is simply the tail of the corpus. The split
// point is counted in characters, never bytes, so multi-byte
// UTF-8 text is never cut inside a code point.

/// Split `text` into (train, valid) where valid holds roughly
/// `valid_fraction` of the characters.
///
/// # Example
/// ```ignore
/// let (train, valid) = split_text("abcdefghij", 0.2);
/// assert_eq!(valid, "ij");
/// ```
pub fn split_text(text: &str, valid_fraction: f64) -> (String, String) {
    let total = text.chars().count();
    let fraction = valid_fraction.clamp(0.0, 1.0);

    let valid_len = ((total as f64) * fraction).round() as usize;
    let split_at  = total - valid_len.min(total);

    // Convert the char position to a byte offset
    let byte_at = text
        .char_indices()
        .nth(split_at)
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    let (train, valid) = text.split_at(byte_at);

    tracing::debug!(
        "Corpus split: {} training chars, {} validation chars",
        split_at,
        total - split_at,
    );

    (train.to_string(), valid.to_string())
}
