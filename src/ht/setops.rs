//! Whole-table set algebra. Two tables combine key-by-key on digest
//! equality; when a digest is present in both operands, the resulting
//! key's marker-validity set is the corresponding [`Mi`] set operation
//! over the two operands' effective MIs.
//!
//! Every key placed into the output is freshly constructed (same digest,
//! independent storage) rather than an `Rc`-alias of an input key -- the
//! inputs must never be mutated by a set operation on their account.

use super::Ht;
use crate::hk::Hk;
use crate::mi::Mi;

fn rekeyed(source: &Hk, mi: Mi) -> Hk {
    let d = source.digest();
    let fresh = Hk::from_limbs(d.limb(0), d.limb(1), d.limb(2), d.limb(3));
    fresh.give_marker_info(mi);
    fresh
}

/// Union: every digest present in either table, with validity sets merged.
pub fn union(a: &Ht, b: &Ht) -> Ht {
    let mut out = Ht::new();
    for k in a.iter() {
        out.set(rekeyed(&k, k.effective_mi()));
    }
    for k in b.iter() {
        let merged = match out.view(&k) {
            Some(existing) => Mi::union(&existing.effective_mi(), &k.effective_mi()),
            None => k.effective_mi(),
        };
        out.set(rekeyed(&k, merged));
    }
    out
}

/// Intersection: digests present in both tables, with validity sets
/// intersected. A digest whose intersected validity set is empty is
/// dropped entirely.
pub fn intersection(a: &Ht, b: &Ht) -> Ht {
    let mut out = Ht::new();
    for k in a.iter() {
        if let Some(other) = b.view(&k) {
            let merged = Mi::intersection(&k.effective_mi(), &other.effective_mi());
            if merged.valid_anywhere() {
                out.set(rekeyed(&k, merged));
            }
        }
    }
    out
}

/// Difference `a \ b`: digests from `a`, with any overlapping validity
/// from `b` subtracted. A digest absent from `b` carries over unchanged;
/// one that ends up with an empty validity set is dropped.
pub fn difference(a: &Ht, b: &Ht) -> Ht {
    let mut out = Ht::new();
    for k in a.iter() {
        match b.view(&k) {
            Some(other) => {
                let merged = Mi::difference(&k.effective_mi(), &other.effective_mi());
                if merged.valid_anywhere() {
                    out.set(rekeyed(&k, merged));
                }
            }
            None => {
                out.set(rekeyed(&k, k.effective_mi()));
            }
        }
    }
    out
}
