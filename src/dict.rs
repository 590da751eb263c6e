use std::fmt;

use thiserror::Error;

use crate::value::Value;

/// Error returned when a [`Dict`] is created with an unusable capacity.
///
/// Capacities must be non-zero powers of two so that probe positions can be
/// derived by masking the key hash.
///
/// # Examples
///
/// ```
/// use musubi::{Dict, InvalidCapacity};
///
/// assert_eq!(Dict::with_capacity(6).err(), Some(InvalidCapacity(6)));
/// assert!(Dict::with_capacity(8).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("dict capacity must be a non-zero power of two, got {0}")]
pub struct InvalidCapacity(pub usize);

/// One table slot.
///
/// `Vacant` has never held an entry and terminates probe sequences.
/// `Tombstone` held an entry that was since deleted: probes continue past
/// it, and inserts may reclaim it.
enum Slot {
    Vacant,
    Tombstone { key: String },
    Occupied { key: String, value: Value },
}

/// A fixed-capacity open-addressing table mapping string keys to owned
/// [`Value`]s.
///
/// Collisions resolve by linear probing, so every entry lives directly in
/// the backing array with no per-entry chain allocation. Deletion leaves a
/// tombstone instead of shifting entries back, which keeps probe sequences
/// intact at the cost of probes lengthening over the table's lifetime.
///
/// The table never grows. Insertion fails once a probe cycles through every
/// slot without finding one to claim, so callers size generously up front;
/// the expected use is a small, bounded set of task-data keys per process
/// run.
///
/// # Examples
///
/// ```
/// use musubi::{Dict, Value};
///
/// let mut dict = Dict::with_capacity(8)?;
///
/// assert!(dict.insert("attempts", Value::from(3i64)));
/// assert_eq!(dict.get("attempts").and_then(Value::as_i64), Some(3));
///
/// assert!(dict.remove("attempts"));
/// assert!(dict.get("attempts").is_none());
/// # Ok::<(), musubi::InvalidCapacity>(())
/// ```
pub struct Dict {
    slots: Box<[Slot]>,
    mask: usize,
    len: usize,
}

fn hash_key(key: &str) -> u64 {
    // FNV-1a
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    for byte in key.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }

    hash
}

impl Dict {
    /// Creates an empty table with the given number of slots.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`] unless `capacity` is a non-zero power of
    /// two.
    pub fn with_capacity(capacity: usize) -> Result<Self, InvalidCapacity> {
        if capacity == 0 || !capacity.is_power_of_two() {
            return Err(InvalidCapacity(capacity));
        }

        Ok(Self::with_pow2_capacity(capacity))
    }

    pub(crate) fn with_pow2_capacity(capacity: usize) -> Self {
        debug_assert!(capacity != 0 && capacity.is_power_of_two());

        let slots = std::iter::repeat_with(|| Slot::Vacant)
            .take(capacity)
            .collect();

        Self {
            slots,
            mask: capacity - 1,
            len: 0,
        }
    }

    /// Creates a table sized to hold the given entries, and inserts them.
    ///
    /// The capacity is the entry count rounded up to the next power of two.
    /// Later entries overwrite earlier ones with the same key.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`] when `entries` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use musubi::{Dict, Value};
    ///
    /// let dict = Dict::from_entries([
    ///     ("paid", Value::from(true)),
    ///     ("total", Value::from(4200i64)),
    ///     ("currency", Value::from("EUR")),
    /// ])?;
    ///
    /// assert_eq!(dict.len(), 3);
    /// assert_eq!(dict.capacity(), 4);
    /// # Ok::<(), musubi::InvalidCapacity>(())
    /// ```
    pub fn from_entries<K, I>(entries: I) -> Result<Self, InvalidCapacity>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let entries: Vec<(String, Value)> = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();

        if entries.is_empty() {
            return Err(InvalidCapacity(0));
        }

        let mut dict = Self::with_pow2_capacity(entries.len().next_power_of_two());
        for (key, value) in entries {
            dict.insert(&key, value);
        }

        Ok(dict)
    }

    fn start_slot(&self, key: &str) -> usize {
        hash_key(key) as usize & self.mask
    }

    /// Returns the value stored under `key`, if any.
    ///
    /// A key whose entry was deleted reads as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let start = self.start_slot(key);
        let mut i = start;

        loop {
            match &self.slots[i] {
                Slot::Vacant => return None,
                Slot::Tombstone { key: existing } if existing == key => return None,
                Slot::Occupied { key: existing, value } if existing == key => {
                    return Some(value);
                }
                _ => {}
            }

            i = (i + 1) & self.mask;
            if i == start {
                return None;
            }
        }
    }

    /// Stores `value` under `key`, claiming the first reclaimable slot on
    /// the key's probe path or overwriting the key's live entry in place.
    ///
    /// Overwriting drops the previous value. Returns `false` when the probe
    /// cycles through every slot without finding one to claim, meaning the
    /// table is full; the value is dropped.
    pub fn insert(&mut self, key: &str, value: Value) -> bool {
        let start = self.start_slot(key);
        let mut i = start;

        loop {
            let was_live = match &self.slots[i] {
                Slot::Occupied { key: existing, .. } if existing != key => {
                    i = (i + 1) & self.mask;
                    if i == start {
                        return false;
                    }
                    continue;
                }
                Slot::Occupied { .. } => true,
                Slot::Vacant | Slot::Tombstone { .. } => false,
            };

            // Replacing the slot drops any previous key and value.
            self.slots[i] = Slot::Occupied {
                key: key.to_owned(),
                value,
            };

            if !was_live {
                self.len += 1;
            }

            return true;
        }
    }

    /// Deletes the entry stored under `key`.
    ///
    /// The slot becomes a tombstone so that probe sequences for other keys
    /// stay intact. Returns `false` when the key is absent or already
    /// deleted.
    pub fn remove(&mut self, key: &str) -> bool {
        let start = self.start_slot(key);
        let mut i = start;

        loop {
            match &self.slots[i] {
                Slot::Vacant => return false,
                Slot::Tombstone { key: existing } if existing == key => return false,
                Slot::Occupied { key: existing, .. } if existing == key => {
                    // Replacing the slot drops its key and value.
                    self.slots[i] = Slot::Tombstone {
                        key: key.to_owned(),
                    };
                    self.len -= 1;
                    return true;
                }
                _ => {}
            }

            i = (i + 1) & self.mask;
            if i == start {
                return false;
            }
        }
    }

    /// Count of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the table holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of slots. Fixed for the table's lifetime.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl fmt::Debug for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dict")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_must_be_power_of_two() {
        for capacity in [1, 2, 4, 64, 1024] {
            assert!(Dict::with_capacity(capacity).is_ok());
        }

        for capacity in [0, 3, 6, 100] {
            assert_eq!(
                Dict::with_capacity(capacity).err(),
                Some(InvalidCapacity(capacity))
            );
        }
    }

    #[test]
    fn test_get_of_never_set_key() {
        let dict = Dict::with_capacity(8).unwrap();
        assert!(dict.get("missing").is_none());
    }

    #[test]
    fn test_remove_of_never_set_key() {
        let mut dict = Dict::with_capacity(8).unwrap();
        assert!(!dict.remove("missing"));
    }

    #[test]
    fn test_insert_then_get() {
        let mut dict = Dict::with_capacity(8).unwrap();

        assert!(dict.insert("x", Value::from(11i64)));
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("x").and_then(Value::as_i64), Some(11));
    }

    #[test]
    fn test_overwrite_keeps_only_latest_value() {
        let mut dict = Dict::with_capacity(8).unwrap();

        assert!(dict.insert("x", Value::from(11i64)));
        assert!(dict.insert("x", Value::from(22i64)));

        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("x").and_then(Value::as_i64), Some(22));
    }

    #[test]
    fn test_overwrite_may_change_kind() {
        let mut dict = Dict::with_capacity(8).unwrap();

        assert!(dict.insert("x", Value::from(11i64)));
        assert!(dict.insert("x", Value::from(true)));

        assert_eq!(dict.get("x").and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn test_remove_then_absent() {
        let mut dict = Dict::with_capacity(8).unwrap();

        assert!(dict.insert("x", Value::from(11i64)));
        assert!(dict.remove("x"));

        assert!(dict.get("x").is_none());
        assert!(!dict.remove("x"));
        assert_eq!(dict.len(), 0);
    }

    #[test]
    fn test_remove_then_reinsert() {
        let mut dict = Dict::with_capacity(8).unwrap();

        assert!(dict.insert("x", Value::from(11i64)));
        assert!(dict.remove("x"));
        assert!(dict.insert("x", Value::from("reborn")));

        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("x").and_then(Value::as_str), Some("reborn"));
    }

    #[test]
    fn test_independent_keys() {
        let mut dict = Dict::with_capacity(8).unwrap();

        assert!(dict.insert("x", Value::from(11i64)));
        assert!(dict.insert("y", Value::from(22i64)));

        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("x").and_then(Value::as_i64), Some(11));
        assert_eq!(dict.get("y").and_then(Value::as_i64), Some(22));
    }

    #[test]
    fn test_full_table_rejects_new_keys() {
        let mut dict = Dict::with_capacity(2).unwrap();

        assert!(dict.insert("a", Value::from(1i64)));
        assert!(dict.insert("b", Value::from(2i64)));

        // No slot left to claim, but existing keys still overwrite in place.
        assert!(!dict.insert("c", Value::from(3i64)));
        assert!(dict.insert("a", Value::from(10i64)));

        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("a").and_then(Value::as_i64), Some(10));
    }

    #[test]
    fn test_get_terminates_on_full_table() {
        let mut dict = Dict::with_capacity(2).unwrap();

        assert!(dict.insert("a", Value::from(1i64)));
        assert!(dict.insert("b", Value::from(2i64)));

        // Every slot is occupied by another key: the probe must cycle once
        // and give up rather than loop forever.
        assert!(dict.get("c").is_none());
    }

    #[test]
    fn test_tombstone_is_reclaimed() {
        let mut dict = Dict::with_capacity(2).unwrap();

        assert!(dict.insert("a", Value::from(1i64)));
        assert!(dict.insert("b", Value::from(2i64)));
        assert!(dict.remove("a"));

        // "b" is still reachable past the tombstone, and the tombstone is
        // claimable by a new key.
        assert_eq!(dict.get("b").and_then(Value::as_i64), Some(2));
        assert!(dict.insert("c", Value::from(3i64)));

        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("c").and_then(Value::as_i64), Some(3));
    }

    #[test]
    fn test_len_counts_live_entries_only() {
        let mut dict = Dict::with_capacity(8).unwrap();
        assert!(dict.is_empty());

        assert!(dict.insert("a", Value::from(1i64)));
        assert!(dict.insert("b", Value::from(2i64)));
        assert!(dict.insert("a", Value::from(3i64)));
        assert_eq!(dict.len(), 2);

        assert!(dict.remove("a"));
        assert_eq!(dict.len(), 1);

        assert!(dict.insert("a", Value::from(4i64)));
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_nested_dict_values() {
        let mut inner = Dict::with_capacity(2).unwrap();
        assert!(inner.insert("deep", Value::from(99i64)));

        let mut dict = Dict::with_capacity(4).unwrap();
        assert!(dict.insert("nested", Value::from(inner)));

        let nested = dict.get("nested").and_then(Value::as_dict).unwrap();
        assert_eq!(nested.get("deep").and_then(Value::as_i64), Some(99));
    }

    #[test]
    fn test_from_entries_rounds_capacity_up() {
        let dict = Dict::from_entries([
            ("a", Value::from(1i64)),
            ("b", Value::from(2i64)),
            ("c", Value::from(3i64)),
        ])
        .unwrap();

        assert_eq!(dict.len(), 3);
        assert_eq!(dict.capacity(), 4);
    }

    #[test]
    fn test_from_entries_rejects_empty() {
        let entries: [(&str, Value); 0] = [];
        assert_eq!(Dict::from_entries(entries).err(), Some(InvalidCapacity(0)));
    }
}
