//! Printable-string recovery from binary universe members.
//!
//! The legacy format stores table and join metadata as undocumented binary
//! blobs with readable fragments embedded in them. Recovery is a single
//! left-to-right pass that collects maximal runs of printable ASCII.

/// Minimum run length used by the legacy readers: a run must be strictly
/// longer than this to be kept, so every returned string has at least
/// `DEFAULT_MIN_RUN_LEN + 1` characters.
pub const DEFAULT_MIN_RUN_LEN: usize = 3;

/// Collects maximal printable-ASCII runs (bytes 32..=126) longer than
/// `min_len` from `data`.
///
/// A short run bounded by non-printable bytes is discarded, never merged
/// with a neighboring run. A dangling run at end of input is flushed under
/// the same length rule. Output order follows input order; legacy callers
/// de-duplicate through a `HashSet` afterwards, which is why recovered
/// legacy collections are documented as unordered sets.
pub fn scan_printable_strings(data: &[u8], min_len: usize) -> Vec<String> {
    let mut strings = Vec::new();
    let mut current = String::new();

    for &byte in data {
        if (32..=126).contains(&byte) {
            current.push(byte as char);
        } else {
            if current.len() > min_len {
                strings.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }
    }
    if current.len() > min_len {
        strings.push(current);
    }

    strings
}
