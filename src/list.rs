//! Sorted singly-linked integer set, bounded by sentinel nodes.
//!
//! This is **not** a correct concurrent data structure, and that is a feature.
//! Every operation walks and splices the chain through plain raw-pointer reads
//! and writes: no locks, no atomics, no ordering. Under a single thread the
//! structure behaves like an ordinary sorted set; under concurrent mutation
//! the chain can lose updates or free nodes still being traversed. The stress
//! driver relies on exactly those interleavings to generate traces for
//! downstream race-analysis tools, so synchronization must not be added here.
//!
//! Two permanent sentinel nodes carry [`i64::MIN`] and [`i64::MAX`]. They are
//! never removed and bound every real value, which lets the traversal loop
//! test only `next.val < v` without null checks.

use std::fmt;
use std::ptr;

/// A single chain node. Value is fixed once placed; only `next` is rewired.
struct Node {
    val: i64,
    next: *mut Node,
}

impl Node {
    /// Heap-allocates a node. Allocation failure aborts the process, which
    /// matches the harness's fatal-on-OOM error model.
    fn alloc(val: i64, next: *mut Node) -> *mut Node {
        Box::into_raw(Box::new(Self { val, next }))
    }
}

/// Sorted integer set backed by a sentinel-bounded singly-linked list.
///
/// Invariant (single-threaded): node values strictly increase from the
/// [`i64::MIN`] sentinel to the [`i64::MAX`] sentinel, with no duplicates
/// in between. Concurrent mutation may violate this invariant; the harness
/// detects the damage only indirectly, as a final size mismatch.
pub struct IntSet {
    /// The minimum sentinel. Set once at construction, never reassigned;
    /// all mutation happens in the `next` fields of chain nodes.
    head: *mut Node,
}

// SAFETY: `IntSet` is shared across worker threads without synchronization on
// purpose. Data races on the chain are an accepted (and desired) behavior of
// the stress harness, not an invariant the type defends. Single-threaded use
// is sound; concurrent use is the documented racy mode.
unsafe impl Send for IntSet {}
// SAFETY: see the `Send` justification above.
unsafe impl Sync for IntSet {}

impl IntSet {
    /// Creates an empty set: the two sentinels and nothing between them.
    #[must_use]
    pub fn new() -> Self {
        let max = Node::alloc(i64::MAX, ptr::null_mut());
        let min = Node::alloc(i64::MIN, max);
        Self { head: min }
    }

    /// Walks the chain until `next.val >= v`, returning `(prev, next)`.
    ///
    /// The maximum sentinel guarantees termination: no real value compares
    /// `>= i64::MAX`, so the loop stops at the tail at the latest.
    fn locate(&self, v: i64) -> (*mut Node, *mut Node) {
        unsafe {
            let mut prev = self.head;
            let mut next = (*prev).next;
            while (*next).val < v {
                prev = next;
                next = (*prev).next;
            }
            (prev, next)
        }
    }

    /// Returns whether `v` is present.
    #[must_use]
    pub fn contains(&self, v: i64) -> bool {
        let (_, next) = self.locate(v);
        unsafe { (*next).val == v }
    }

    /// Inserts `v`, keeping the chain sorted. Returns `false` without
    /// mutating if `v` is already present.
    pub fn add(&self, v: i64) -> bool {
        let (prev, next) = self.locate(v);
        unsafe {
            if (*next).val == v {
                return false;
            }
            (*prev).next = Node::alloc(v, next);
        }
        true
    }

    /// Removes `v` if present, unlinking and freeing its node. Returns
    /// whether a node was removed.
    pub fn remove(&self, v: i64) -> bool {
        let (prev, next) = self.locate(v);
        unsafe {
            if (*next).val != v {
                return false;
            }
            (*prev).next = (*next).next;
            drop(Box::from_raw(next));
        }
        true
    }

    /// Number of values strictly between the sentinels. O(n) traversal.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut size = 0;
        unsafe {
            // The chain always holds at least the two sentinels.
            let mut node = (*self.head).next;
            while !(*node).next.is_null() {
                size += 1;
                node = (*node).next;
            }
        }
        size
    }

    /// Returns whether the set holds no values besides the sentinels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        unsafe { (*(*self.head).next).next.is_null() }
    }
}

impl Default for IntSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for IntSet {
    fn drop(&mut self) {
        // Drop requires unique access, so teardown itself cannot race.
        // Free every node, sentinels included, in chain order.
        let mut node = self.head;
        while !node.is_null() {
            let next = unsafe { (*node).next };
            drop(unsafe { Box::from_raw(node) });
            node = next;
        }
    }
}

impl fmt::Debug for IntSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntSet").field("len", &self.len()).finish()
    }
}
