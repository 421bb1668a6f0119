//! Specialized collection types

pub use slotmap::{Key, KeyData, SlotMap};

slotmap::new_key_type! {
    /// Versioned key for backend-owned resources.
    ///
    /// A key removed from its map never resolves again, even if the slot is
    /// reused, which is what lets backends detect stale handles.
    pub struct ResourceKey;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<ResourceKey, T>;

/// Pack a resource key into the opaque `u64` carried by public handles
pub fn key_to_raw(key: ResourceKey) -> u64 {
    key.data().as_ffi()
}

/// Recover a resource key from an opaque `u64` handle value
pub fn key_from_raw(raw: u64) -> ResourceKey {
    KeyData::from_ffi(raw).into()
}
