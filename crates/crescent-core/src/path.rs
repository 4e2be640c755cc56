//! Path grammar for the store.
//!
//! A full path is a sequence of name segments joined by `/`. Before any
//! comparison or storage each segment is trimmed of surrounding
//! whitespace and empty segments are dropped, which also strips leading
//! and trailing separators. Case is preserved.

use smallvec::SmallVec;

/// Name of the root directory; the first segment of every canonical path.
pub const ROOT: &str = "root";

/// Path segments. Most store paths are shallow, so they stay inline.
pub type Segments<'a> = SmallVec<[&'a str; 8]>;

/// Split `path` into trimmed, non-empty segments.
pub fn segments(path: &str) -> Segments<'_> {
    path.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Canonical form of `path`: trimmed segments joined by `/`.
pub fn normalize(path: &str) -> String {
    segments(path).join("/")
}

/// Append `name` to a directory path, normalizing both sides.
pub fn join(dir_path: &str, name: &str) -> String {
    let mut segs = segments(dir_path);
    segs.extend(segments(name));
    segs.join("/")
}

/// Split a path into its directory segments and its leaf segment.
///
/// Returns `None` when the path has no segments at all.
pub fn split_leaf(path: &str) -> Option<(Segments<'_>, &str)> {
    let mut segs = segments(path);
    let leaf = segs.pop()?;
    Some((segs, leaf))
}

/// Drop a leading [`ROOT`] segment, if present.
///
/// Store-level paths may name the root explicitly (`root/orbital`) or
/// implicitly (`orbital`); both resolve from the root directory.
pub fn strip_root<'a, 'b>(segs: &'b [&'a str]) -> &'b [&'a str] {
    match segs.first() {
        Some(&first) if first == ROOT => &segs[1..],
        _ => segs,
    }
}
