//! Persistent group: an immutable set of unique values.
//!
//! `add` and `delete` never touch the receiver. They return a new group that
//! shares structure with the old one:
//!
//! - `add` links one new node onto the existing chain, so the entire old group
//!   is shared.
//! - `delete` shares everything inserted before the removed value and copies
//!   only the values inserted after it.
//!
//! ```
//! use mailbot_logic::pgroup::PGroup;
//!
//! let a = PGroup::empty().add("a");
//! let ab = a.add("b");
//! let b = ab.delete(&"a");
//!
//! assert!(b.has(&"b"));
//! assert!(!b.has(&"a"));
//! assert!(a.has(&"a"));
//! assert!(!a.has(&"b"));
//! ```

use std::fmt;
use std::sync::Arc;

struct Node<T> {
    value: T,
    /// Previously inserted value.
    prev: Option<Arc<Node<T>>>,
}

/// Immutable collection of unique values, kept in insertion order.
pub struct PGroup<T> {
    /// Most recently inserted value; the chain runs backwards in time.
    last: Option<Arc<Node<T>>>,
    len: usize,
}

impl<T> PGroup<T> {
    /// The group with no members.
    pub const fn empty() -> Self {
        Self { last: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let mut newest_first = Vec::with_capacity(self.len);
        let mut cur = self.last.as_deref();
        while let Some(node) = cur {
            newest_first.push(&node.value);
            cur = node.prev.as_deref();
        }
        newest_first.into_iter().rev()
    }

    fn nodes(&self) -> impl Iterator<Item = &Node<T>> {
        std::iter::successors(self.last.as_deref(), |node| node.prev.as_deref())
    }

    /// True if two groups share the same underlying storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.last, &other.last) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: PartialEq> PGroup<T> {
    pub fn has(&self, value: &T) -> bool {
        self.nodes().any(|node| &node.value == value)
    }

    /// A group that also contains `value`. Returns an equal group if it's
    /// already a member.
    pub fn add(&self, value: T) -> Self {
        if self.has(&value) {
            return self.clone();
        }
        Self {
            last: Some(Arc::new(Node {
                value,
                prev: self.last.clone(),
            })),
            len: self.len + 1,
        }
    }
}

impl<T: PartialEq + Clone> PGroup<T> {
    /// A group without `value`. Returns an equal group if it isn't a member.
    pub fn delete(&self, value: &T) -> Self {
        let mut newer = Vec::new();
        let mut cur = self.last.as_ref();
        while let Some(node) = cur {
            if &node.value == value {
                let mut last = node.prev.clone();
                for v in newer.into_iter().rev() {
                    last = Some(Arc::new(Node { value: v, prev: last }));
                }
                return Self {
                    last,
                    len: self.len - 1,
                };
            }
            newer.push(node.value.clone());
            cur = node.prev.as_ref();
        }
        self.clone()
    }
}

impl<T> Clone for PGroup<T> {
    fn clone(&self) -> Self {
        Self {
            last: self.last.clone(),
            len: self.len,
        }
    }
}

impl<T> Default for PGroup<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Drop for PGroup<T> {
    // Unlink iteratively; recursive drop of a long chain would blow the stack.
    fn drop(&mut self) {
        let mut cur = self.last.take();
        while let Some(node) = cur {
            match Arc::try_unwrap(node) {
                Ok(mut node) => cur = node.prev.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T: PartialEq> FromIterator<T> for PGroup<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(PGroup::empty(), |group, value| group.add(value))
    }
}

impl<T: PartialEq> PartialEq for PGroup<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for PGroup<T> {}

impl<T: fmt::Debug> fmt::Debug for PGroup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
