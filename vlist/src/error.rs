use core::fmt;

/// An offset table no longer forms a contiguous partition of `[0, total_extent)`.
///
/// Correct `build`/`update` sequences cannot produce this. Seeing it means the table was
/// corrupted (or restored from bad data) and every window resolved from it is suspect, so it
/// should be reported to the host instead of being retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The first entry does not start at offset zero.
    NonZeroOrigin { start: u64 },
    /// An entry's `end` is not `start + extent`.
    ExtentMismatch {
        index: usize,
        start: u64,
        extent: u32,
        end: u64,
    },
    /// An entry does not start where the previous one ended.
    Discontinuity {
        index: usize,
        previous_end: u64,
        start: u64,
    },
    /// The cached total disagrees with the last entry's end.
    TotalMismatch { expected: u64, actual: u64 },
    /// The table and the item list it describes have different lengths.
    LengthMismatch { items: usize, entries: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NonZeroOrigin { start } => {
                write!(f, "offset table starts at {start} instead of 0")
            }
            Self::ExtentMismatch {
                index,
                start,
                extent,
                end,
            } => write!(
                f,
                "entry {index} ends at {end} but start {start} + extent {extent} disagrees"
            ),
            Self::Discontinuity {
                index,
                previous_end,
                start,
            } => write!(
                f,
                "entry {index} starts at {start} but the previous entry ends at {previous_end}"
            ),
            Self::TotalMismatch { expected, actual } => write!(
                f,
                "total extent is {actual} but the entries sum to {expected}"
            ),
            Self::LengthMismatch { items, entries } => write!(
                f,
                "offset table has {entries} entries for {items} items"
            ),
        }
    }
}

impl core::error::Error for InvariantViolation {}
