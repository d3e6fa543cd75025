/// A host scroll source.
///
/// Only the most recent offset matters; hosts coalesce intermediate positions themselves.
pub trait ScrollController {
    /// Returns the latest scroll offset if it changed since the previous poll.
    fn poll_offset(&mut self) -> Option<i64>;
}

impl<S: ScrollController + ?Sized> ScrollController for &mut S {
    fn poll_offset(&mut self) -> Option<i64> {
        (**self).poll_offset()
    }
}

/// A latest-value scroll source: writers report offsets, the reader polls the newest one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollCell {
    latest: i64,
    pending: bool,
}

impl ScrollCell {
    pub fn new(initial: i64) -> Self {
        Self {
            latest: initial,
            pending: false,
        }
    }

    /// Records a new offset. Returns `false` if it equals the latest one.
    pub fn report(&mut self, offset: i64) -> bool {
        if offset == self.latest {
            return false;
        }
        self.latest = offset;
        self.pending = true;
        true
    }

    pub fn latest(&self) -> i64 {
        self.latest
    }
}

impl ScrollController for ScrollCell {
    fn poll_offset(&mut self) -> Option<i64> {
        core::mem::take(&mut self.pending).then_some(self.latest)
    }
}
