//! Fenced block detection for the interpolation rewrite.
//!
//! A block opens with a run of at least [`MIN_FENCE_LEN`] identical fence
//! characters and closes at the first later occurrence of the *identical*
//! run. The closing run is matched as a substring, so it may be the prefix
//! of a longer run. When the full opening run has no closer, shorter prefixes
//! of it are tried down to the minimum length.

/// Minimum number of repeated characters that can open a fence.
pub const MIN_FENCE_LEN: usize = 3;

/// Fence characters used when none are configured.
pub const DEFAULT_FENCE_MARKERS: &[char] = &['`'];

/// A complete fenced block, delimiters included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FencedBlock {
    /// Byte offset of the opening run.
    pub start: usize,
    /// Byte offset just past the closing run.
    pub end: usize,
    /// Fence character.
    pub marker: char,
    /// Number of fence characters in the opening (and closing) run.
    pub length: usize,
}

/// Result of scanning a byte offset for a fenced block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceScan {
    /// No fence run of sufficient length starts here.
    NotFence,
    /// A closed block starts here.
    Block(FencedBlock),
    /// A fence run starts here but no identical run follows it.
    Unclosed {
        /// Fence character.
        marker: char,
        /// Length of the whole run, in characters.
        length: usize,
    },
}

/// Counts consecutive `marker` characters starting at byte offset `start`.
///
/// Offsets past the end or inside a multi-byte char count as zero.
pub fn run_length(input: &str, start: usize, marker: char) -> usize {
    input
        .get(start..)
        .map_or(0, |rest| rest.chars().take_while(|c| *c == marker).count())
}

/// Scans `start` for a fenced block using the given fence characters.
///
/// Offsets past the end or inside a multi-byte char are [`FenceScan::NotFence`].
pub fn scan_fence(input: &str, start: usize, markers: &[char]) -> FenceScan {
    let Some(first) = input.get(start..).and_then(|rest| rest.chars().next()) else {
        return FenceScan::NotFence;
    };
    if !markers.contains(&first) {
        return FenceScan::NotFence;
    }

    let run = run_length(input, start, first);
    if run < MIN_FENCE_LEN {
        return FenceScan::NotFence;
    }

    let width = first.len_utf8();
    for length in (MIN_FENCE_LEN..=run).rev() {
        let open_end = start + length * width;
        let closer: String = std::iter::repeat_n(first, length).collect();
        if let Some(rel) = input[open_end..].find(closer.as_str()) {
            return FenceScan::Block(FencedBlock {
                start,
                end: open_end + rel + closer.len(),
                marker: first,
                length,
            });
        }
    }

    FenceScan::Unclosed {
        marker: first,
        length: run,
    }
}
