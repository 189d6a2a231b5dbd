//! HK — hash keys: a 128-bit digest plus optional marker-range metadata,
//! shared via reference counting.

pub mod digest;

pub use digest::{Digest, PRIME_OFFSET};

use crate::mi::{Marker, Mi};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

struct HkInner {
    digest: Cell<Digest>,
    mi: RefCell<Option<Mi>>,
    /// Bumped independently of `Rc::strong_count` whenever an `Ht` takes
    /// ownership of this key (see SPEC_FULL.md §4.4).
    lock_count: Cell<u32>,
}

/// A hash key: an immutable-by-contract digest (mutable only through the
/// explicit `reduce_update` algebra operation), an optional marker-interval
/// set describing where it is valid, and the two-counter reference-count
/// protocol described in §4.4 (`RefCount` via `Rc`, plus an independent
/// `LockCount` bumped by containing tables).
#[derive(Clone)]
pub struct Hk(Rc<HkInner>);

impl Hk {
    pub(crate) fn from_digest(digest: Digest) -> Hk {
        Hk(Rc::new(HkInner {
            digest: Cell::new(digest),
            mi: RefCell::new(None),
            lock_count: Cell::new(0),
        }))
    }

    /// Digest from a signed integer (domain-tagged).
    pub fn from_int(v: i64) -> Hk {
        Hk::from_digest(Digest::from_int(v))
    }

    /// Digest from an unsigned integer (distinct domain tag from `from_int`).
    pub fn from_unsigned_int(v: u64) -> Hk {
        Hk::from_digest(Digest::from_unsigned_int(v))
    }

    /// Digest from an arbitrary byte string.
    pub fn from_bytes(data: &[u8]) -> Hk {
        Hk::from_digest(Digest::from_bytes(data))
    }

    /// Digest from four explicit big-endian limbs.
    pub fn from_limbs(a: u32, b: u32, c: u32, d: u32) -> Hk {
        Hk::from_digest(Digest::from_limbs(a, b, c, d))
    }

    /// Digest from an exact 32-hex-digit string. Panics on malformed input;
    /// see [`Hk::try_from_hex`] for a non-panicking variant.
    pub fn from_hex(s: &str) -> Hk {
        Hk::from_digest(Digest::from_hex(s))
    }

    /// Digest from an exact 32-hex-digit string, returning
    /// `HrError::InvalidArgument` instead of panicking on malformed input.
    pub fn try_from_hex(s: &str) -> crate::error::HrResult<Hk> {
        Digest::try_from_hex(s).map(Hk::from_digest)
    }

    /// The underlying digest.
    #[inline]
    pub fn digest(&self) -> Digest {
        self.0.digest.get()
    }

    /// `reduce(a, b)`: commutative, associative sum mod `P`, as a fresh key.
    pub fn reduce(a: &Hk, b: &Hk) -> Hk {
        Hk::from_digest(Digest::reduce(a.digest(), b.digest()))
    }

    /// `negate(a)`: additive inverse, as a fresh key.
    pub fn negate(a: &Hk) -> Hk {
        Hk::from_digest(Digest::negate(a.digest()))
    }

    /// `rehash(a)`: non-identity permutation, as a fresh key.
    pub fn rehash(a: &Hk) -> Hk {
        Hk::from_digest(Digest::rehash(a.digest()))
    }

    /// `combine(a, b)`: non-commutative mixer, as a fresh key.
    pub fn combine(a: &Hk, b: &Hk) -> Hk {
        Hk::from_digest(Digest::combine(a.digest(), b.digest()))
    }

    /// In-place `self := self + x`. Only sound to call on a key that is not
    /// shared as a stable trie entry (mutating a key already stored in an
    /// `Ht` does not retroactively fix up the trie's MSL).
    pub fn reduce_update(&self, x: &Hk) {
        let updated = Digest::reduce(self.digest(), x.digest());
        self.0.digest.set(updated);
    }

    /// Merge `[start, end)` into this key's marker-validity set, creating
    /// one if absent. A malformed range is a silent no-op.
    pub fn add_valid_range(&self, start: Marker, end: Marker) {
        let mut slot = self.0.mi.borrow_mut();
        let mi = slot.get_or_insert_with(Mi::new);
        mi.add_range(start, end);
    }

    /// Drop all marker metadata; the key becomes valid everywhere again.
    pub fn clear_markers(&self) {
        *self.0.mi.borrow_mut() = None;
    }

    /// `true` iff this key carries marker metadata at all.
    pub fn is_marked(&self) -> bool {
        self.0.mi.borrow().is_some()
    }

    /// `true` iff `m` is within this key's validity set; an unmarked key is
    /// valid everywhere.
    pub fn marker_point_is_valid(&self, m: Marker) -> bool {
        match self.0.mi.borrow().as_ref() {
            Some(mi) => mi.is_valid(m),
            None => true,
        }
    }

    /// Adopt `mi` as this key's marker metadata, replacing any existing one.
    pub fn give_marker_info(&self, mi: Mi) {
        *self.0.mi.borrow_mut() = Some(mi);
    }

    /// A clone of this key's marker-validity set, with an absent MI
    /// normalised to the explicit universe -- guarantees `Ht_Summarize_*`
    /// (and MSL contribution, see `crate::ht::msl`) treat "no MI" and an
    /// explicit `[-inf, +inf)` MI identically, per SPEC_FULL.md §9.
    pub fn effective_mi(&self) -> Mi {
        self.0
            .mi
            .borrow()
            .clone()
            .unwrap_or_else(Mi::universe)
    }

    /// A snapshot of the raw marker metadata, or `None` if unmarked.
    pub fn marker_info(&self) -> Option<Mi> {
        self.0.mi.borrow().clone()
    }

    /// Object-runtime `RefCount`: the number of live handles sharing this
    /// key's storage.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Object-runtime `LockCount`: the number of containing tables holding
    /// this key, independent of `ref_count`.
    pub fn lock_count(&self) -> u32 {
        self.0.lock_count.get()
    }

    pub(crate) fn inc_lock(&self) {
        self.0.lock_count.set(self.0.lock_count.get() + 1);
    }

    pub(crate) fn dec_lock(&self) {
        let c = self.0.lock_count.get();
        self.0.lock_count.set(c.saturating_sub(1));
    }

    /// Raw pointer identity of the backing allocation, used by the FFI
    /// layer's `IncRef`/`DecRef`/`View` entry points.
    pub(crate) fn inner_ptr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for Hk {
    fn eq(&self, other: &Hk) -> bool {
        self.digest() == other.digest()
    }
}

impl Eq for Hk {}

impl std::hash::Hash for Hk {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.digest().hash(state);
    }
}

impl fmt::Debug for Hk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hk")
            .field("digest", &self.digest())
            .field("marked", &self.is_marked())
            .field("ref_count", &self.ref_count())
            .field("lock_count", &self.lock_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce_is_commutative_across_int_factories() {
        let a = Hk::from_int(0);
        let b = Hk::from_int(1);
        let ab = Hk::reduce(&a, &b);
        let ba = Hk::reduce(&b, &a);
        assert_eq!(ab, ba);
        assert_ne!(ab, a);
        assert_ne!(ab, b);
    }

    #[test]
    fn try_from_hex_reports_malformed_input_instead_of_panicking() {
        assert!(Hk::try_from_hex("nope").is_err());
        let hk = Hk::try_from_hex(&"7".repeat(32)).expect("valid hex");
        assert_eq!(hk, Hk::from_hex(&"7".repeat(32)));
    }

    #[test]
    fn equality_ignores_marker_metadata() {
        let a = Hk::from_int(42);
        let b = Hk::from_int(42);
        a.add_valid_range(Marker::of(0), Marker::of(10));
        assert_eq!(a, b);
        assert!(a.is_marked());
        assert!(!b.is_marked());
    }

    #[test]
    fn unmarked_key_is_valid_everywhere() {
        let a = Hk::from_int(1);
        assert!(a.marker_point_is_valid(Marker::of(i64::MIN)));
        assert!(a.marker_point_is_valid(Marker::of(i64::MAX)));
    }

    #[test]
    fn refcount_tracks_clones() {
        let a = Hk::from_int(7);
        assert_eq!(a.ref_count(), 1);
        let b = a.clone();
        assert_eq!(a.ref_count(), 2);
        drop(b);
        assert_eq!(a.ref_count(), 1);
    }

    #[test]
    fn lock_count_is_independent_of_refcount() {
        let a = Hk::from_int(7);
        a.inc_lock();
        a.inc_lock();
        let b = a.clone();
        assert_eq!(b.lock_count(), 2);
        assert_eq!(b.ref_count(), 2);
        a.dec_lock();
        assert_eq!(a.lock_count(), 1);
    }

    #[test]
    fn reduce_update_mutates_in_place() {
        let a = Hk::from_int(1);
        let before = a.digest();
        a.reduce_update(&Hk::from_int(2));
        assert_ne!(a.digest(), before);
        assert_eq!(a.digest(), Digest::reduce(before, Digest::from_int(2)));
    }

    #[test]
    fn effective_mi_normalizes_absent_to_universe() {
        let unmarked = Hk::from_int(1);
        assert_eq!(unmarked.effective_mi(), Mi::universe());

        let explicit_universe = Hk::from_int(2);
        explicit_universe.give_marker_info(Mi::universe());
        assert_eq!(explicit_universe.effective_mi(), Mi::universe());
    }
}
