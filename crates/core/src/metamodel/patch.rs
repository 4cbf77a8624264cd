//! Marker-based patching of a hand-maintained file.
//!
//! Everything from the first marker line to the end of the file belongs to the
//! generator; everything before it is left untouched.

/// Prefix identifying the first line of a generated block.
pub const MARKER_PREFIX: &str = "-- Generated by";

/// Full marker line written at the top of every generated block.
pub const GENERATED_MARKER: &str = "-- Generated by lspgen, keep at end of file.";

/// Byte offset of the first line starting with [`MARKER_PREFIX`].
fn marker_offset(content: &str) -> Option<usize> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.starts_with(MARKER_PREFIX) {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

/// Replace the generated tail of `old` with `block`, or append `block` if
/// there is no marker yet.
pub fn apply_generated_block(old: &str, block: &str) -> String {
    let mut new = match marker_offset(old) {
        Some(offset) => old[..offset].to_string(),
        None => {
            let mut kept = old.to_string();
            if !kept.is_empty() && !kept.ends_with('\n') {
                kept.push('\n');
            }
            kept
        }
    };
    new.push_str(block);
    new
}
