/// Identity of a probed item.
///
/// With `std`, probe registries are hash maps; without it they are ordered maps.
#[cfg(feature = "std")]
pub trait ProbeKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<T: core::hash::Hash + Eq + Clone> ProbeKey for T {}

#[cfg(not(feature = "std"))]
pub trait ProbeKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<T: Ord + Clone> ProbeKey for T {}

#[cfg(feature = "std")]
pub(crate) type ProbeMap<K, V> = std::collections::HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type ProbeMap<K, V> = alloc::collections::BTreeMap<K, V>;
