//! Zero-copy line segmentation over a memory-mapped file.
//!
//! [`open_region`] maps the whole input read-only. [`count_lines`] and
//! [`segment`] then work on the mapped bytes, producing [`LineRecord`]s that
//! are plain `(offset, len)` pairs into the region. No line bytes are copied.
//!
//! # Line convention
//!
//! Only `\n` terminates a line. A single trailing `\n` closes the last line
//! and does not start an empty one, so `"a\nb\n"` and `"a\nb"` both hold two
//! lines. An input consisting of nothing but that one terminator holds none.

use std::fs::File;
use std::iter;
use std::ops::{Deref, Range};
use std::path::Path;

use memchr::memchr_iter;
use memmap2::Mmap;

use crate::error::{RandlnError, Result};

const TERMINATOR: u8 = b'\n';

// ---------------------------------------------------------------------------
// Byte region
// ---------------------------------------------------------------------------

/// Read-only view over the full contents of an input file.
///
/// Either a memory map or empty. An empty region has no mapping at all, since
/// zero-length maps are rejected by most platforms.
#[derive(Debug)]
pub struct ByteRegion {
    map: Option<Mmap>,
}

impl ByteRegion {
    /// A region with no bytes and no mapping.
    pub fn empty() -> Self {
        Self { map: None }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }

    /// Whether the region is backed by a live mapping.
    pub fn is_mapped(&self) -> bool {
        self.map.is_some()
    }
}

impl Deref for ByteRegion {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Open `path` and map its entire contents read-only.
///
/// Returns an empty region when the file has no bytes or is not a regular
/// file (pipes, character devices), since neither has a size to map.
pub fn open_region(path: impl AsRef<Path>) -> Result<ByteRegion> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| RandlnError::io(path, e))?;
    let meta = file.metadata().map_err(|e| RandlnError::io(path, e))?;

    if !meta.is_file() {
        log::warn!(
            "{} is not a regular file; treating it as empty",
            path.display()
        );
        return Ok(ByteRegion::empty());
    }
    if meta.len() == 0 {
        log::debug!("{} is empty", path.display());
        return Ok(ByteRegion::empty());
    }

    // SAFETY: the map is read-only and private to this process. Truncating
    // the file while it is mapped is outside what a line filter can guard
    // against; every other access goes through `&[u8]`.
    let map = unsafe { Mmap::map(&file) }.map_err(|e| RandlnError::io(path, e))?;
    log::debug!("mapped {} bytes from {}", map.len(), path.display());

    Ok(ByteRegion { map: Some(map) })
}

// ---------------------------------------------------------------------------
// Line records
// ---------------------------------------------------------------------------

/// One line's position inside a region, terminator excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineRecord {
    pub offset: usize,
    pub len: usize,
}

impl LineRecord {
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    /// The line's bytes within `text`.
    ///
    /// # Panics
    /// Panics if the record does not lie inside `text`.
    pub fn bytes<'t>(&self, text: &'t [u8]) -> &'t [u8] {
        &text[self.range()]
    }
}

/// Fixed-size, reorderable sequence of line records over one region.
///
/// The records are only ever reordered; their bytes stay in the region, which
/// the borrow keeps alive until the collection is dropped.
#[derive(Debug, Clone)]
pub struct LineCollection<'r> {
    text: &'r [u8],
    records: Vec<LineRecord>,
}

impl<'r> LineCollection<'r> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[LineRecord] {
        &self.records
    }

    /// Mutable access for in-place reordering. The slice length is fixed.
    pub fn records_mut(&mut self) -> &mut [LineRecord] {
        &mut self.records
    }

    /// Bytes of the line at position `index`, if any.
    pub fn line(&self, index: usize) -> Option<&'r [u8]> {
        let text = self.text;
        self.records.get(index).map(|r| r.bytes(text))
    }

    /// Line bytes in current collection order.
    pub fn lines(&self) -> impl Iterator<Item = &'r [u8]> + '_ {
        let text = self.text;
        self.records.iter().map(move |r| r.bytes(text))
    }
}

// ---------------------------------------------------------------------------
// Counting and segmentation
// ---------------------------------------------------------------------------

/// Drop one trailing terminator, if present.
fn body(text: &[u8]) -> &[u8] {
    text.strip_suffix(&[TERMINATOR]).unwrap_or(text)
}

/// Count the lines in `text` with a single terminator scan.
///
/// Every terminator ends a line; a trailing terminator ends the final line
/// instead of opening an empty one.
pub fn count_lines(text: &[u8]) -> usize {
    let body = body(text);
    if body.is_empty() {
        return 0;
    }
    memchr_iter(TERMINATOR, body).count() + 1
}

/// Split `text` into exactly `expected` line records, in file order.
///
/// `expected` must come from [`count_lines`] on the same bytes. Running out
/// of lines early, or finding lines left over once `expected` records exist,
/// returns [`RandlnError::LineCountMismatch`] and no collection.
pub fn segment(text: &[u8], expected: usize) -> Result<LineCollection<'_>> {
    let body = body(text);
    let mut records = Vec::with_capacity(expected);

    if !body.is_empty() {
        let mut start = 0;
        for end in memchr_iter(TERMINATOR, body).chain(iter::once(body.len())) {
            if records.len() == expected {
                let leftover = 1 + memchr_iter(TERMINATOR, &body[end..]).count();
                return Err(RandlnError::LineCountMismatch {
                    expected,
                    produced: expected + leftover,
                });
            }
            records.push(LineRecord {
                offset: start,
                len: end - start,
            });
            start = end + 1;
        }
    }

    if records.len() != expected {
        return Err(RandlnError::LineCountMismatch {
            expected,
            produced: records.len(),
        });
    }

    Ok(LineCollection { text, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn split(text: &[u8]) -> Vec<&[u8]> {
        let lines = segment(text, count_lines(text)).unwrap();
        lines.lines().collect()
    }

    // -----------------------------------------------------------------------
    // count_lines tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_count_with_trailing_terminator() {
        assert_eq!(count_lines(b"a\nb\nc\n"), 3);
    }

    #[test]
    fn test_count_without_trailing_terminator() {
        assert_eq!(count_lines(b"a\nb\nc"), 3);
    }

    #[test]
    fn test_count_empty() {
        assert_eq!(count_lines(b""), 0);
    }

    #[test]
    fn test_count_lone_terminator_does_not_underflow() {
        assert_eq!(count_lines(b"\n"), 0);
    }

    #[test]
    fn test_count_blank_lines() {
        assert_eq!(count_lines(b"\n\n"), 2);
        assert_eq!(count_lines(b"a\n\nb\n"), 3);
        assert_eq!(count_lines(b"a\n\n"), 2);
    }

    #[test]
    fn test_count_ignores_carriage_returns() {
        assert_eq!(count_lines(b"a\r\nb\r\n"), 2);
        assert_eq!(count_lines(b"a\rb\rc"), 1);
    }

    // -----------------------------------------------------------------------
    // segment tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_segment_keeps_file_order() {
        let lines = split(b"a\nbb\nccc\n");
        assert_eq!(lines, vec![&b"a"[..], b"bb", b"ccc"]);
    }

    #[test]
    fn test_segment_final_partial_line() {
        let lines = split(b"one\ntwo");
        assert_eq!(lines, vec![&b"one"[..], b"two"]);
    }

    #[test]
    fn test_segment_records_are_offsets() {
        let text = b"a\nbb\nccc\n";
        let lines = segment(text, 3).unwrap();
        assert_eq!(
            lines.records(),
            &[
                LineRecord { offset: 0, len: 1 },
                LineRecord { offset: 2, len: 2 },
                LineRecord { offset: 5, len: 3 },
            ]
        );
        assert_eq!(lines.line(2), Some(&b"ccc"[..]));
        assert_eq!(lines.line(3), None);
    }

    #[test]
    fn test_segment_blank_lines() {
        let lines = split(b"a\n\nb\n");
        assert_eq!(lines, vec![&b"a"[..], b"", b"b"]);
        assert_eq!(split(b"\n\n"), vec![&b""[..], b""]);
    }

    #[test]
    fn test_segment_carriage_return_is_content() {
        let lines = split(b"x\r\ny\r\n");
        assert_eq!(lines, vec![&b"x\r"[..], b"y\r"]);
    }

    #[test]
    fn test_segment_empty_inputs() {
        assert!(segment(b"", 0).unwrap().is_empty());
        assert!(segment(b"\n", 0).unwrap().is_empty());
    }

    #[test]
    fn test_segment_too_few_lines_is_mismatch() {
        let err = segment(b"a\nb\n", 3).unwrap_err();
        assert!(matches!(
            err,
            RandlnError::LineCountMismatch {
                expected: 3,
                produced: 2
            }
        ));
    }

    #[test]
    fn test_segment_leftover_lines_is_mismatch() {
        let err = segment(b"a\nb\nc\nd", 2).unwrap_err();
        assert!(matches!(
            err,
            RandlnError::LineCountMismatch {
                expected: 2,
                produced: 4
            }
        ));
    }

    #[test]
    fn test_segment_nonzero_expected_on_empty_is_mismatch() {
        assert!(segment(b"", 1).unwrap_err().is_internal());
    }

    #[test]
    fn test_segment_zero_expected_with_lines_is_mismatch() {
        let err = segment(b"only\n", 0).unwrap_err();
        assert!(matches!(
            err,
            RandlnError::LineCountMismatch {
                expected: 0,
                produced: 1
            }
        ));
    }

    // -----------------------------------------------------------------------
    // open_region tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_open_region_maps_contents() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"one\ntwo\nthree\n").unwrap();
        tmp.flush().unwrap();

        let region = open_region(tmp.path()).unwrap();
        assert!(region.is_mapped());
        assert_eq!(region.as_bytes(), b"one\ntwo\nthree\n");
        assert_eq!(count_lines(&region), 3);
    }

    #[test]
    fn test_open_region_empty_file_has_no_mapping() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let region = open_region(tmp.path()).unwrap();
        assert!(!region.is_mapped());
        assert!(region.is_empty());
        assert_eq!(count_lines(&region), 0);
    }

    #[test]
    fn test_open_region_missing_file_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.txt");
        let err = open_region(&missing).unwrap_err();
        assert!(matches!(err, RandlnError::Io { ref path, .. } if *path == missing));
    }

    #[cfg(unix)]
    #[test]
    fn test_open_region_directory_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let region = open_region(tmp.path()).unwrap();
        assert!(region.is_empty());
    }
}
