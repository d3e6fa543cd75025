use vlist::Measurement;

use crate::key::{ProbeKey, ProbeMap};

/// Converts a host layout size (usually `f32` logical pixels or cells) into an item extent.
///
/// NaN and negative sizes become `0`; everything else is rounded to the nearest integer and
/// saturates at `u32::MAX`.
pub fn extent_from_layout(size: f32) -> u32 {
    if size.is_nan() || size <= 0.0 {
        return 0;
    }
    // `as` saturates on overflow.
    (size + 0.5) as u32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Attachment {
    index: usize,
    generation: u64,
    last_reported: Option<u32>,
    epoch: u64,
}

/// Registry of size probes for the currently mounted items.
///
/// A probe is attached when its item is rendered and detached when it leaves the render window.
/// Layout observations for attached items become [`Measurement`] messages, exactly one per
/// change: repeating the same extent is suppressed, and a detached probe never reports again.
#[derive(Clone, Debug)]
pub struct ProbeSet<K> {
    attachments: ProbeMap<K, Attachment>,
    epoch: u64,
}

impl<K: ProbeKey> Default for ProbeSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ProbeKey> ProbeSet<K> {
    pub fn new() -> Self {
        Self {
            attachments: ProbeMap::new(),
            epoch: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    pub fn is_attached(&self, key: &K) -> bool {
        self.attachments.contains_key(key)
    }

    /// Attaches a probe for `key` at `index`, taken under list `generation`.
    ///
    /// Re-attaching an already mounted key keeps its last reported extent unless the
    /// generation changed.
    pub fn attach(&mut self, key: K, index: usize, generation: u64) {
        let epoch = self.epoch;
        match self.attachments.get_mut(&key) {
            Some(probe) if probe.generation == generation => {
                probe.index = index;
                probe.epoch = epoch;
            }
            Some(probe) => {
                *probe = Attachment {
                    index,
                    generation,
                    last_reported: None,
                    epoch,
                };
            }
            None => {
                atrace!(index, generation, "probe attached");
                self.attachments.insert(
                    key,
                    Attachment {
                        index,
                        generation,
                        last_reported: None,
                        epoch,
                    },
                );
            }
        }
    }

    /// Detaches the probe for `key`. Returns whether it was attached.
    pub fn detach(&mut self, key: &K) -> bool {
        self.attachments.remove(key).is_some()
    }

    /// Records a layout observation. Returns a measurement only when the extent differs from
    /// the last one reported for this probe.
    pub fn observe(&mut self, key: &K, extent: u32) -> Option<Measurement> {
        let Some(probe) = self.attachments.get_mut(key) else {
            atrace!(extent, "observation for a detached probe");
            return None;
        };
        if probe.last_reported == Some(extent) {
            return None;
        }
        probe.last_reported = Some(extent);
        Some(Measurement {
            index: probe.index,
            extent,
            generation: probe.generation,
        })
    }

    /// [`Self::observe`] for a raw host layout size.
    pub fn observe_layout(&mut self, key: &K, size: f32) -> Option<Measurement> {
        self.observe(key, extent_from_layout(size))
    }

    /// Makes the attached set exactly `mounted`: new keys are attached, known keys keep their
    /// state, and keys missing from `mounted` are detached.
    pub fn sync(&mut self, mounted: impl IntoIterator<Item = (K, usize)>, generation: u64) {
        self.epoch = self.epoch.wrapping_add(1);
        for (key, index) in mounted {
            self.attach(key, index, generation);
        }
        let epoch = self.epoch;
        let before = self.attachments.len();
        self.attachments.retain(|_, probe| probe.epoch == epoch);
        let detached = before - self.attachments.len();
        if detached > 0 {
            adebug!(detached, attached = self.attachments.len(), "probes synced");
        }
    }

    pub fn clear(&mut self) {
        self.attachments.clear();
    }
}
