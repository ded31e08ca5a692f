//! Strip connection banners and summary footers from a ping log.
//!
//! A raw log starts with lines like `Pinging 9.9.9.9 with 32 bytes of data:`
//! and may end with the `Ping statistics for ...` block, or with timeouts after
//! the link dropped. Only the block from the first reply to the last reply is
//! analyzable.

use std::ops::Range;

use super::parse::is_reply;

/// Locate the block of lines from the first reply to the last reply, inclusive.
///
/// Returns `None` when no line is a reply (an empty source).
pub fn reply_range<S: AsRef<str>>(lines: &[S]) -> Option<Range<usize>> {
    let first = lines.iter().position(|ln| is_reply(ln.as_ref()))?;
    // rposition cannot miss once position found a reply
    let last = lines.iter().rposition(|ln| is_reply(ln.as_ref()))?;
    Some(first..last + 1)
}

/// Drop everything before the first reply line and after the last one.
///
/// The returned slice starts and ends with a reply line. Applying `trim` to its
/// own output returns the same slice.
pub fn trim<S: AsRef<str>>(lines: &[S]) -> Option<&[S]> {
    reply_range(lines).map(|range| &lines[range])
}
