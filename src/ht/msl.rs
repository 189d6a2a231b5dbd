//! Marker-summary skip lists: per-node caches answering "what is the
//! combined digest of every key valid at marker `m`" for the subtree
//! rooted at a node, without walking the whole subtree.
//!
//! Each leaf contributes a pair of delta events per marker range it is
//! valid over: `+digest` at the range's start, `-digest` (the additive
//! inverse) at its end. Summing every delta with a breakpoint `<= m`
//! (mod `P`) recovers the combined digest at `m`. Building an inner
//! node's list is just merging its children's delta lists -- no
//! recomputation of the deltas themselves, only the ordering.
//!
//! Propagation always uses [`Digest::reduce`] (modular addition), never
//! XOR: an XOR-based mixer cancels itself on repeated identical keys, so
//! five or more nested occurrences of the same digest at the same marker
//! collapse to zero and the table silently loses a distinguishing key.
//! Modular addition has no such blind spot.

use crate::hk::{Digest, Hk};
use crate::mi::{Marker, Mi};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Msl {
    /// Sorted by marker; ties keep insertion order, which is irrelevant
    /// since reduce is commutative and associative.
    deltas: Vec<(Marker, Digest)>,
}

impl Msl {
    pub(crate) fn empty() -> Msl {
        Msl { deltas: Vec::new() }
    }

    /// The delta list contributed by a single leaf key.
    pub(crate) fn leaf(key: &Hk) -> Msl {
        let mut deltas = Vec::new();
        let digest = key.digest();
        for r in key.effective_mi().ranges() {
            deltas.push((r.start, digest));
            deltas.push((r.end, Digest::negate(digest)));
        }
        deltas.sort_by_key(|(m, _)| *m);
        Msl { deltas }
    }

    /// Merge several children's delta lists into one, preserving marker
    /// order. Does not collapse duplicate breakpoints -- [`Msl::at`] sums
    /// everything up to and including the query point regardless.
    pub(crate) fn merge(parts: &[&Msl]) -> Msl {
        let mut deltas: Vec<(Marker, Digest)> =
            parts.iter().flat_map(|p| p.deltas.iter().copied()).collect();
        deltas.sort_by_key(|(m, _)| *m);
        Msl { deltas }
    }

    /// The combined digest of every contributing key valid at `m`.
    pub(crate) fn at(&self, m: Marker) -> Digest {
        let idx = self.deltas.partition_point(|(bp, _)| *bp <= m);
        self.deltas[..idx]
            .iter()
            .fold(Digest::ZERO, |acc, (_, d)| Digest::reduce(acc, *d))
    }

    /// Materialize this delta list as a flat set of keys: one per distinct
    /// nonzero combined digest, each carrying the marker ranges where that
    /// digest held. Round-trips through [`Msl::leaf`]-style deltas so a
    /// fresh [`super::Ht`] built from the result answers
    /// [`super::Ht::hash_at_marker_point`] identically to this list.
    pub(crate) fn to_keys(&self) -> Vec<Hk> {
        let mut acc = Digest::ZERO;
        let mut cursor = Marker::NegInf;
        let mut by_digest: BTreeMap<Digest, Mi> = BTreeMap::new();
        for &(bp, delta) in &self.deltas {
            if acc != Digest::ZERO && cursor < bp {
                by_digest.entry(acc).or_default().add_range(cursor, bp);
            }
            acc = Digest::reduce(acc, delta);
            cursor = bp;
        }
        if acc != Digest::ZERO && cursor < Marker::PosInf {
            by_digest.entry(acc).or_default().add_range(cursor, Marker::PosInf);
        }
        by_digest
            .into_iter()
            .map(|(digest, mi)| {
                let key = Hk::from_digest(digest);
                key.give_marker_info(mi);
                key
            })
            .collect()
    }
}
