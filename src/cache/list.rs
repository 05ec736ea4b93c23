//! Key List Module
//!
//! Intrusive doubly-linked list of keys. The list itself only stores head,
//! tail and length; the links live in the [`CacheEntry`] values of the map
//! passed to every operation, so membership and removal from the middle
//! are O(1) without any pointers.

use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::CacheEntry;

// == Key List ==
/// Ordered sequence of keys, front = oldest, back = newest.
#[derive(Debug)]
pub struct KeyList<K> {
    head: Option<K>,
    tail: Option<K>,
    len: usize,
}

impl<K> Default for KeyList<K> {
    fn default() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }
}

impl<K: Eq + Hash + Clone> KeyList<K> {
    // == Constructor ==
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push Back ==
    /// Appends `key` at the newest end.
    ///
    /// The key must be present in `entries` and not linked into any list.
    pub fn push_back<V>(&mut self, entries: &mut HashMap<K, CacheEntry<K, V>>, key: &K) {
        let old_tail = self.tail.clone();
        match entries.get_mut(key) {
            Some(entry) => {
                entry.prev = old_tail.clone();
                entry.next = None;
            }
            None => return,
        }

        match old_tail {
            Some(tail_key) => {
                if let Some(tail) = entries.get_mut(&tail_key) {
                    tail.next = Some(key.clone());
                }
            }
            None => self.head = Some(key.clone()),
        }

        self.tail = Some(key.clone());
        self.len += 1;
    }

    // == Unlink ==
    /// Detaches `key` from the list, patching its neighbours.
    ///
    /// The key must currently be a member of this list.
    pub fn unlink<V>(&mut self, entries: &mut HashMap<K, CacheEntry<K, V>>, key: &K) {
        let (prev, next) = match entries.get_mut(key) {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match &prev {
            Some(prev_key) => {
                if let Some(entry) = entries.get_mut(prev_key) {
                    entry.next = next.clone();
                }
            }
            None => self.head = next.clone(),
        }

        match &next {
            Some(next_key) => {
                if let Some(entry) = entries.get_mut(next_key) {
                    entry.prev = prev.clone();
                }
            }
            None => self.tail = prev,
        }

        self.len = self.len.saturating_sub(1);
    }

    // == Pop Front ==
    /// Detaches and returns the oldest key.
    pub fn pop_front<V>(&mut self, entries: &mut HashMap<K, CacheEntry<K, V>>) -> Option<K> {
        let key = self.head.clone()?;
        self.unlink(entries, &key);
        Some(key)
    }

    // == Move To Back ==
    /// Moves a member key to the newest end.
    pub fn move_to_back<V>(&mut self, entries: &mut HashMap<K, CacheEntry<K, V>>, key: &K) {
        if self.tail.as_ref() == Some(key) {
            return;
        }
        self.unlink(entries, key);
        self.push_back(entries, key);
    }

    /// Returns the oldest key without removing it.
    pub fn front(&self) -> Option<&K> {
        self.head.as_ref()
    }

    /// Returns the newest key.
    pub fn back(&self) -> Option<&K> {
        self.tail.as_ref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iter ==
    /// Walks the keys from oldest to newest.
    pub fn iter<'a, V>(
        &'a self,
        entries: &'a HashMap<K, CacheEntry<K, V>>,
    ) -> impl Iterator<Item = &'a K> + 'a {
        std::iter::successors(self.head.as_ref(), move |key| {
            entries.get(*key).and_then(|entry| entry.next.as_ref())
        })
    }
}
