//! Birthday Collision Table
//!
//! A fixed-capacity, direct-mapped table keyed by chaining value. Slot
//! `h mod 2^bits` holds at most one entry and a later insertion into the same
//! slot silently replaces the earlier one: a birthday search only needs *a*
//! witness per bucket, not all of them.
//!
//! Because the index is a truncation of the 48-bit key, a hit only means "same
//! bucket". [`CollisionTable::lookup`] therefore always runs a caller-supplied
//! exact check before reporting a [`Lookup::Hit`].

use crate::types::{ChainingValue, SearchError};

// =============================================================================
// LOOKUP RESULT
// =============================================================================

/// Outcome of a verified lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a, V> {
    /// Nothing stored in the bucket.
    Empty,
    /// The bucket is occupied but the exact check failed (index truncation).
    Mismatch,
    /// The bucket holds an entry that passed the exact check.
    Hit(&'a V),
}

// =============================================================================
// TABLE
// =============================================================================

/// Overwrite-on-collision table with `2^bits` slots.
#[derive(Debug, Clone)]
pub struct CollisionTable<V> {
    slots: Vec<Option<V>>,
    mask: u64,
    occupied: usize,
    overwrites: u64,
}

impl<V: Copy> CollisionTable<V> {
    /// Allocate an empty table of `2^bits` slots.
    ///
    /// # Errors
    /// Returns [`SearchError::TableAllocation`] if the slots cannot be
    /// allocated (or `2^bits` does not fit in memory at all).
    pub fn with_bits(bits: u32) -> Result<Self, SearchError> {
        let len = 1usize
            .checked_shl(bits)
            .ok_or(SearchError::TableAllocation { slots: usize::MAX })?;

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(len)
            .map_err(|_| SearchError::TableAllocation { slots: len })?;
        slots.resize(len, None);

        Ok(Self {
            slots,
            mask: (len as u64) - 1,
            occupied: 0,
            overwrites: 0,
        })
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    #[must_use]
    pub const fn occupied(&self) -> usize {
        self.occupied
    }

    /// Number of insertions that replaced an earlier entry.
    #[must_use]
    pub const fn overwrites(&self) -> u64 {
        self.overwrites
    }

    /// Slot index of `key` (`key mod 2^bits`).
    #[must_use]
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn index_of(&self, key: ChainingValue) -> usize {
        (key.get() & self.mask) as usize
    }

    /// Store `value` in the bucket of `key`, returning the entry it evicted.
    pub fn insert(&mut self, key: ChainingValue, value: V) -> Option<V> {
        let idx = self.index_of(key);
        let evicted = self.slots[idx].replace(value);
        if evicted.is_some() {
            self.overwrites += 1;
        } else {
            self.occupied += 1;
        }
        evicted
    }

    /// Raw bucket content for `key`, without the exact check.
    #[must_use]
    #[inline]
    pub fn get(&self, key: ChainingValue) -> Option<&V> {
        self.slots[self.index_of(key)].as_ref()
    }

    /// Look `key` up and confirm the stored entry with `verify`.
    #[inline]
    pub fn lookup<F>(&self, key: ChainingValue, verify: F) -> Lookup<'_, V>
    where
        F: FnOnce(&V) -> bool,
    {
        match self.get(key) {
            None => Lookup::Empty,
            Some(entry) if verify(entry) => Lookup::Hit(entry),
            Some(_) => Lookup::Mismatch,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Entry {
        key: ChainingValue,
        tag: u32,
    }

    fn cv(v: u64) -> ChainingValue {
        ChainingValue::new(v)
    }

    #[test]
    fn test_forced_collisions_keep_latest() {
        let mut table = CollisionTable::with_bits(4).unwrap();
        assert_eq!(table.capacity(), 16);

        // All of these land in bucket 3.
        let keys = [cv(0x03), cv(0x13), cv(0xFFFF_FFF3), cv(0x1234_5678_9A03)];
        for (tag, key) in (0u32..).zip(keys) {
            table.insert(key, Entry { key, tag });
        }

        assert_eq!(table.occupied(), 1);
        assert_eq!(table.overwrites(), 3);
        assert_eq!(table.get(cv(0x03)).map(|e| e.tag), Some(3));

        // Older keys now only reach a mismatching witness.
        for &key in &keys[..3] {
            assert_eq!(table.lookup(key, |e| e.key == key), Lookup::Mismatch);
        }
        let last = keys[3];
        assert_eq!(
            table.lookup(last, |e| e.key == last),
            Lookup::Hit(&Entry { key: last, tag: 3 })
        );
    }

    #[test]
    fn test_empty_and_distinct_buckets() {
        let mut table = CollisionTable::with_bits(2).unwrap();
        assert_eq!(table.lookup(cv(1), |_: &u8| true), Lookup::Empty);

        assert_eq!(table.insert(cv(0), 10u8), None);
        assert_eq!(table.insert(cv(1), 11u8), None);
        assert_eq!(table.insert(cv(4), 12u8), Some(10));
        assert_eq!(table.occupied(), 2);
        assert_eq!(table.get(cv(8)), Some(&12));
        assert_eq!(table.get(cv(2)), None);
    }

    #[test]
    fn test_repeated_churn_is_stable() {
        let mut table = CollisionTable::with_bits(3).unwrap();
        for i in 0..10_000u64 {
            let key = cv(i.wrapping_mul(0x9E37_79B9_7F4A_7C15));
            table.insert(key, key);
            assert_eq!(table.lookup(key, |&e| e == key), Lookup::Hit(&key));
        }
        assert_eq!(table.occupied() as u64 + table.overwrites(), 10_000);
    }

    #[test]
    fn test_oversized_table_is_rejected() {
        let err = CollisionTable::<u8>::with_bits(usize::BITS).unwrap_err();
        assert!(matches!(err, SearchError::TableAllocation { .. }));
    }
}
