use alloc::sync::Arc;

use crate::resolver::DEFAULT_SCAN_BUDGET;

/// Maps an item to its stable identity. Keys must be unique within the current item list.
pub type KeyFn<T, K> = Arc<dyn Fn(&T) -> K + Send + Sync>;

/// Maps an item to its extent along the scroll axis (exact or estimated, depending on
/// [`Sizing`]).
pub type ExtentFn<T> = Arc<dyn Fn(&T) -> u32 + Send + Sync>;

/// How item extents are obtained.
pub enum Sizing<T> {
    /// Every item is exactly [`WindowConfig::estimate_extent`] long. Measurements are ignored.
    Uniform,
    /// Every item's exact extent is known up front. Measurements are ignored.
    Precomputed(ExtentFn<T>),
    /// Extents start as estimates and are corrected by measurement reports after rendering.
    ///
    /// Without an estimator, every item is estimated at [`WindowConfig::estimate_extent`].
    Measured { estimate: Option<ExtentFn<T>> },
}

impl<T> Sizing<T> {
    pub fn accepts_measurements(&self) -> bool {
        matches!(self, Self::Measured { .. })
    }

    pub(crate) fn extent_of(&self, item: &T, fallback: u32) -> u32 {
        match self {
            Self::Uniform | Self::Measured { estimate: None } => fallback,
            Self::Precomputed(f) | Self::Measured { estimate: Some(f) } => f(item),
        }
    }

    /// Whether `other` produces the same extents (same variant, same closure).
    pub(crate) fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Uniform, Self::Uniform) => true,
            (Self::Precomputed(a), Self::Precomputed(b)) => Arc::ptr_eq(a, b),
            (Self::Measured { estimate: a }, Self::Measured { estimate: b }) => match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                _ => false,
            },
            _ => false,
        }
    }
}

impl<T> Clone for Sizing<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Uniform => Self::Uniform,
            Self::Precomputed(f) => Self::Precomputed(Arc::clone(f)),
            Self::Measured { estimate } => Self::Measured {
                estimate: estimate.clone(),
            },
        }
    }
}

impl<T> Default for Sizing<T> {
    fn default() -> Self {
        Self::Measured { estimate: None }
    }
}

impl<T> core::fmt::Debug for Sizing<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Uniform => f.write_str("Uniform"),
            Self::Precomputed(_) => f.write_str("Precomputed(..)"),
            Self::Measured { estimate: None } => f.write_str("Measured"),
            Self::Measured { estimate: Some(_) } => f.write_str("Measured(..)"),
        }
    }
}

/// The plain numeric part of the configuration.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`, so hosts can keep
/// it in their own settings files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowConfig {
    /// Fixed visible size of the scroll container.
    pub viewport_extent: u32,
    /// Extent assumed for an item before it is measured, or the extent of every item in
    /// [`Sizing::Uniform`] mode.
    pub estimate_extent: u32,
    /// Extra items kept mounted beyond the visible range, on each side.
    pub buffer_count: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            viewport_extent: 400,
            estimate_extent: 50,
            buffer_count: 2,
        }
    }
}

/// Configuration for [`crate::VirtualList`].
///
/// Cheap to clone: closures are stored in `Arc`s so hosts can tweak a field and call
/// `VirtualList::set_options` without reallocating them.
pub struct VListOptions<T, K> {
    pub config: WindowConfig,
    pub sizing: Sizing<T>,
    pub get_item_key: KeyFn<T, K>,
    /// How many items the hinted range scan may step over before falling back to binary search.
    pub scan_budget: usize,
}

impl<T, K> Clone for VListOptions<T, K> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            sizing: self.sizing.clone(),
            get_item_key: Arc::clone(&self.get_item_key),
            scan_budget: self.scan_budget,
        }
    }
}

impl<T, K> VListOptions<T, K> {
    /// Creates options with default geometry (viewport 400, estimate 50, buffer 2) and measured
    /// sizing.
    pub fn new(get_item_key: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        Self {
            config: WindowConfig::default(),
            sizing: Sizing::default(),
            get_item_key: Arc::new(get_item_key),
            scan_budget: DEFAULT_SCAN_BUDGET,
        }
    }

    pub fn with_config(mut self, config: WindowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_viewport_extent(mut self, viewport_extent: u32) -> Self {
        self.config.viewport_extent = viewport_extent;
        self
    }

    pub fn with_estimate_extent(mut self, estimate_extent: u32) -> Self {
        self.config.estimate_extent = estimate_extent;
        self
    }

    pub fn with_buffer_count(mut self, buffer_count: usize) -> Self {
        self.config.buffer_count = buffer_count;
        self
    }

    pub fn with_sizing(mut self, sizing: Sizing<T>) -> Self {
        self.sizing = sizing;
        self
    }

    /// Every item is `extent` long.
    pub fn with_uniform_extent(mut self, extent: u32) -> Self {
        self.config.estimate_extent = extent;
        self.sizing = Sizing::Uniform;
        self
    }

    /// Every item's exact extent is `extent_of(item)`.
    pub fn with_precomputed_extent(
        mut self,
        extent_of: impl Fn(&T) -> u32 + Send + Sync + 'static,
    ) -> Self {
        self.sizing = Sizing::Precomputed(Arc::new(extent_of));
        self
    }

    /// Items are measured after rendering; `estimate(item)` seeds the table until then.
    pub fn with_measured_estimate(
        mut self,
        estimate: impl Fn(&T) -> u32 + Send + Sync + 'static,
    ) -> Self {
        self.sizing = Sizing::Measured {
            estimate: Some(Arc::new(estimate)),
        };
        self
    }

    pub fn with_get_item_key(
        mut self,
        get_item_key: impl Fn(&T) -> K + Send + Sync + 'static,
    ) -> Self {
        self.get_item_key = Arc::new(get_item_key);
        self
    }

    pub fn with_scan_budget(mut self, scan_budget: usize) -> Self {
        self.scan_budget = scan_budget;
        self
    }

    pub(crate) fn extent_of(&self, item: &T) -> u32 {
        self.sizing.extent_of(item, self.config.estimate_extent)
    }
}

impl<T, K> core::fmt::Debug for VListOptions<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VListOptions")
            .field("config", &self.config)
            .field("sizing", &self.sizing)
            .field("scan_budget", &self.scan_budget)
            .finish_non_exhaustive()
    }
}
