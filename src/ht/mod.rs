//! HT — a 32-ary hash trie table of [`Hk`] keys, with per-node
//! marker-summary skip lists for `HashAtMarkerPoint` queries.
//!
//! The trie branches on 5-bit groups of the key's 128-bit digest, most
//! significant group first. Because the groups partition all 128 bits
//! with no remainder lost (26 groups of 5 bits cover the 128..130-bit
//! padded digest exactly), the path to a leaf fully determines its
//! digest -- two distinct digests can never collide on every group, so
//! leaves never need collision chaining.

mod debug;
mod iter;
mod msl;
mod setops;
mod summary;

pub use debug::check_consistent;
pub use iter::{Hti, Htib};
pub use setops::{difference, intersection, union};
pub use summary::Summary;

use crate::hk::{Digest, Hk};
use crate::mi::{Marker, Mi};
use msl::Msl;

const BITS_PER_GROUP: u32 = 5;
const GROUP_COUNT: u32 = 26;
const ARITY: usize = 1 << BITS_PER_GROUP;

#[inline]
fn path_digit(raw: u128, level: u32) -> usize {
    debug_assert!(level < GROUP_COUNT);
    let bit_start = BITS_PER_GROUP * (GROUP_COUNT - level - 1);
    ((raw >> bit_start) & 0x1F) as usize
}

pub(crate) enum Node {
    Empty,
    Leaf(Hk),
    Inner(Box<InnerNode>),
}

pub(crate) struct InnerNode {
    children: [Node; ARITY],
    msl: Msl,
    /// Marker-oblivious combined digest of every key in the subtree, kept
    /// alongside `msl` so `Ht::view_hash` never has to walk the tree.
    content: Digest,
}

impl InnerNode {
    fn new() -> InnerNode {
        InnerNode {
            children: std::array::from_fn(|_| Node::Empty),
            msl: Msl::empty(),
            content: Digest::ZERO,
        }
    }

    fn recompute_msl(&mut self) {
        let parts: Vec<Msl> = self
            .children
            .iter()
            .filter_map(|c| match c {
                Node::Empty => None,
                Node::Leaf(hk) => Some(Msl::leaf(hk)),
                Node::Inner(inner) => Some(inner.msl.clone()),
            })
            .collect();
        let refs: Vec<&Msl> = parts.iter().collect();
        self.msl = Msl::merge(&refs);
        self.content = self
            .children
            .iter()
            .fold(Digest::ZERO, |acc, c| Digest::reduce(acc, node_content(c)));
    }
}

fn node_content(node: &Node) -> Digest {
    match node {
        Node::Empty => Digest::ZERO,
        Node::Leaf(hk) => hk.digest(),
        Node::Inner(inner) => inner.content,
    }
}

/// A table of hash keys, addressed by their own digest.
pub struct Ht {
    root: Node,
    size: usize,
}

impl Default for Ht {
    fn default() -> Ht {
        Ht::new()
    }
}

impl Ht {
    /// An empty table.
    pub fn new() -> Ht {
        Ht {
            root: Node::Empty,
            size: 0,
        }
    }

    /// Number of keys stored.
    pub fn size(&self) -> usize {
        self.size
    }

    /// `true` iff the table holds no keys.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Borrow the stored key equal to `key`'s digest, if any, without
    /// affecting either counter.
    pub fn view(&self, key: &Hk) -> Option<&Hk> {
        find(&self.root, key.digest().as_u128(), 0)
    }

    /// A fresh handle (bumping `RefCount`) to the stored key, if present.
    pub fn get(&self, key: &Hk) -> Option<Hk> {
        self.view(key).cloned()
    }

    /// `true` iff a key with this digest is present.
    pub fn contains(&self, key: &Hk) -> bool {
        self.view(key).is_some()
    }

    /// `true` iff a key with this digest is present and valid at `m`.
    pub fn contains_at(&self, key: &Hk, m: Marker) -> bool {
        self.view(key).is_some_and(|k| k.marker_point_is_valid(m))
    }

    /// Insert `key`, replacing and returning any previous key with the
    /// same digest. Bumps the new key's `LockCount`; drops the old key's.
    pub fn set(&mut self, key: Hk) -> Option<Hk> {
        let raw = key.digest().as_u128();
        let (old, grew) = insert(&mut self.root, raw, 0, key);
        if grew {
            self.size += 1;
        }
        old
    }

    /// Insert `key` only if no key with this digest is already present;
    /// either way, return the table's key for this digest.
    pub fn set_default(&mut self, key: Hk) -> Hk {
        if let Some(existing) = self.view(&key) {
            return existing.clone();
        }
        self.set(key.clone());
        key
    }

    /// Transfer ownership of `key` into the table. Identical to [`Ht::set`]
    /// in a language without C's manual ownership transfer; kept as a
    /// distinct name for symmetry with the table's C ABI surface.
    pub fn give(&mut self, key: Hk) -> Option<Hk> {
        self.set(key)
    }

    /// Remove and return the key with this digest, if present. Drops its
    /// `LockCount` contribution from this table.
    pub fn pop(&mut self, key: &Hk) -> Option<Hk> {
        let raw = key.digest().as_u128();
        let removed = remove(&mut self.root, raw, 0);
        if removed.is_some() {
            self.size -= 1;
        }
        removed
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        drain_locks(&self.root);
        self.root = Node::Empty;
        self.size = 0;
    }

    /// The combined digest of every key valid at marker `m`, i.e. the
    /// modular sum of all stored keys whose marker-validity set contains
    /// `m` (an unmarked key is valid everywhere).
    pub fn hash_at_marker_point(&self, m: Marker) -> Digest {
        match &self.root {
            Node::Empty => Digest::ZERO,
            Node::Leaf(hk) => {
                if hk.marker_point_is_valid(m) {
                    hk.digest()
                } else {
                    Digest::ZERO
                }
            }
            Node::Inner(inner) => inner.msl.at(m),
        }
    }

    /// The combined digest of every key whose marker-validity set overlaps
    /// `[start, end)` at all. A key contributes its whole digest the moment
    /// any part of its validity falls inside the window -- this is a
    /// "does it show up here" query, not a weighted average, so a key
    /// valid across the entire window and one valid at just its first
    /// marker contribute identically.
    pub fn hash_of_marker_range(&self, start: Marker, end: Marker) -> Digest {
        if start >= end {
            return Digest::ZERO;
        }
        self.iter()
            .filter(|k| mi_overlaps(&k.effective_mi(), start, end))
            .fold(Digest::ZERO, |acc, k| Digest::reduce(acc, k.digest()))
    }

    /// The marker-oblivious combined digest of every stored key, as a
    /// cheap content fingerprint of the whole table.
    pub fn view_hash(&self) -> Digest {
        node_content(&self.root)
    }

    /// One-shot whole-table summary: a fresh table whose
    /// `hash_at_marker_point` answers match this one's, equivalent to
    /// folding a fresh [`Summary`] over just this table.
    pub fn reduce_table(&self) -> Ht {
        let mut s = Summary::new();
        s.update(self);
        s.finish()
    }

    /// This table's root marker-summary, shared with [`Summary`] so
    /// cross-table accumulation reuses the same merge routine as a single
    /// inner node's children.
    pub(crate) fn root_msl(&self) -> Msl {
        match &self.root {
            Node::Empty => Msl::empty(),
            Node::Leaf(hk) => Msl::leaf(hk),
            Node::Inner(inner) => inner.msl.clone(),
        }
    }

    /// Iterate keys in ascending trie-path order.
    pub fn iter(&self) -> Hti {
        Hti::new(self)
    }

    /// Iterate keys in descending trie-path order.
    pub fn iter_back(&self) -> Htib {
        Htib::new(self)
    }

    /// Build a table from a bulk collection of keys by inserting them one
    /// at a time.
    pub fn build_from<I: IntoIterator<Item = Hk>>(keys: I) -> Ht {
        let mut t = Ht::new();
        for k in keys {
            t.set(k);
        }
        t
    }

    /// Build a table from bulk byte-string inputs, hashing them into keys
    /// on rayon tasks before inserting sequentially. The hashing fan-out
    /// is embarrassingly parallel (each input is independent and
    /// read-only); insertion into the one shared trie stays single
    /// -threaded, matching `Ht`'s concurrency model -- this only
    /// parallelizes the part of bulk construction that has no
    /// shared-mutable-state hazard.
    #[cfg(feature = "rayon")]
    pub fn build_from_parallel_bytes<I>(items: I) -> Ht
    where
        I: rayon::iter::IntoParallelIterator<Item = Vec<u8>>,
    {
        use rayon::prelude::*;

        let keys: Vec<Hk> = items
            .into_par_iter()
            .map(|bytes| Hk::from_bytes(&bytes))
            .collect();
        Ht::build_from(keys)
    }
}

/// `true` iff some range in `mi` shares at least one marker with `[start, end)`.
fn mi_overlaps(mi: &Mi, start: Marker, end: Marker) -> bool {
    mi.ranges().iter().any(|r| r.start < end && start < r.end)
}

fn find<'a>(node: &'a Node, raw: u128, level: u32) -> Option<&'a Hk> {
    match node {
        Node::Empty => None,
        Node::Leaf(hk) => {
            if hk.digest().as_u128() == raw {
                Some(hk)
            } else {
                None
            }
        }
        Node::Inner(inner) => find(&inner.children[path_digit(raw, level)], raw, level + 1),
    }
}

/// Returns `(replaced_old_key, grew)`.
fn insert(node: &mut Node, raw: u128, level: u32, key: Hk) -> (Option<Hk>, bool) {
    match node {
        Node::Empty => {
            key.inc_lock();
            *node = Node::Leaf(key);
            (None, true)
        }
        Node::Leaf(existing) if existing.digest().as_u128() == raw => {
            existing.dec_lock();
            key.inc_lock();
            let old = std::mem::replace(existing, key);
            (Some(old), false)
        }
        Node::Leaf(_) => {
            let old_leaf = std::mem::replace(node, Node::Empty);
            let old_key = match old_leaf {
                Node::Leaf(k) => k,
                _ => unreachable!(),
            };
            let mut inner = Box::new(InnerNode::new());
            let old_idx = path_digit(old_key.digest().as_u128(), level);
            inner.children[old_idx] = Node::Leaf(old_key);
            let new_idx = path_digit(raw, level);
            let (old, grew) = insert(&mut inner.children[new_idx], raw, level + 1, key);
            inner.recompute_msl();
            *node = Node::Inner(inner);
            (old, grew)
        }
        Node::Inner(inner) => {
            let idx = path_digit(raw, level);
            let (old, grew) = insert(&mut inner.children[idx], raw, level + 1, key);
            inner.recompute_msl();
            (old, grew)
        }
    }
}

fn remove(node: &mut Node, raw: u128, level: u32) -> Option<Hk> {
    match node {
        Node::Empty => None,
        Node::Leaf(existing) if existing.digest().as_u128() == raw => {
            let k = match std::mem::replace(node, Node::Empty) {
                Node::Leaf(k) => k,
                _ => unreachable!(),
            };
            k.dec_lock();
            Some(k)
        }
        Node::Leaf(_) => None,
        Node::Inner(inner) => {
            let idx = path_digit(raw, level);
            let removed = remove(&mut inner.children[idx], raw, level + 1);
            if removed.is_some() {
                inner.recompute_msl();
                collapse(node);
            }
            removed
        }
    }
}

/// Shrink a now-sparse inner node back into `Empty` or a bare `Leaf` when
/// it holds zero or one children, keeping the trie minimal.
fn collapse(node: &mut Node) {
    let Node::Inner(inner) = node else { return };
    let mut remaining = None;
    let mut count = 0u32;
    for (i, c) in inner.children.iter().enumerate() {
        if !matches!(c, Node::Empty) {
            count += 1;
            remaining = Some(i);
        }
    }
    match (count, remaining) {
        (0, _) => *node = Node::Empty,
        (1, Some(i)) if matches!(inner.children[i], Node::Leaf(_)) => {
            *node = std::mem::replace(&mut inner.children[i], Node::Empty);
        }
        _ => {}
    }
}

fn drain_locks(node: &Node) {
    match node {
        Node::Empty => {}
        Node::Leaf(hk) => hk.dec_lock(),
        Node::Inner(inner) => inner.children.iter().for_each(drain_locks),
    }
}
