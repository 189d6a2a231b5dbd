//! `Ht_Summarize_Update`/`Ht_Summarize_Finish`: an order-independent
//! running accumulator over one or more tables, producing a combined
//! marker-summary rather than a single scalar. The result is itself
//! queryable at a marker (the same shape as a table's own
//! `hash_at_marker_point`), since two tables whose keys carry different,
//! non-overlapping marker ranges must stay distinguishable after being
//! summarized together.

use super::msl::Msl;
use super::Ht;
use crate::hk::Digest;
use crate::mi::Marker;

/// A running, order-independent summary of zero or more tables' marker
/// validity.
#[derive(Clone, Debug)]
pub struct Summary {
    msl: Msl,
}

impl Default for Summary {
    fn default() -> Summary {
        Summary::new()
    }
}

impl Summary {
    /// A fresh accumulator summarizing nothing.
    pub fn new() -> Summary {
        Summary { msl: Msl::empty() }
    }

    /// Merge `table`'s root marker-summary into the running one, using the
    /// same merge routine an inner node uses to combine its children.
    pub fn update(&mut self, table: &Ht) {
        let table_msl = table.root_msl();
        self.msl = Msl::merge(&[&self.msl, &table_msl]);
    }

    /// The combined digest of every summarized table's keys valid at `m`,
    /// without consuming the accumulator.
    pub fn hash_at_marker_point(&self, m: Marker) -> Digest {
        self.msl.at(m)
    }

    /// Materialize the accumulated summary as a standalone table, whose
    /// `hash_at_marker_point` matches every update fed in so far.
    pub fn finish(self) -> Ht {
        Ht::build_from(self.msl.to_keys())
    }
}

#[cfg(feature = "rayon")]
impl Summary {
    /// Fold several independent, read-only tables' marker summaries into
    /// the running one at once, one rayon task per table's (read-only)
    /// `root_msl` before a single sequential merge. Never used for
    /// in-place mutation of a single table -- `Ht` is deliberately
    /// single-threaded (see SPEC_FULL.md's concurrency model); this is
    /// only safe because each task only reads its own table.
    pub fn update_many(&mut self, tables: &[Ht]) {
        use rayon::prelude::*;

        let partials: Vec<Msl> = tables.par_iter().map(Ht::root_msl).collect();
        let mut refs: Vec<&Msl> = Vec::with_capacity(partials.len() + 1);
        refs.push(&self.msl);
        refs.extend(partials.iter());
        self.msl = Msl::merge(&refs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hk::Hk;

    fn table_of(ints: &[i64]) -> Ht {
        let mut t = Ht::new();
        for &i in ints {
            t.set(Hk::from_int(i));
        }
        t
    }

    #[test]
    fn summary_is_independent_of_table_partitioning() {
        let whole = table_of(&[1, 2, 3, 4]);
        let mut s_whole = Summary::new();
        s_whole.update(&whole);

        let left = table_of(&[1, 2]);
        let right = table_of(&[3, 4]);
        let mut s_split = Summary::new();
        s_split.update(&left);
        s_split.update(&right);

        assert_eq!(s_whole.finish().view_hash(), s_split.finish().view_hash());
    }

    #[test]
    fn empty_summary_is_zero() {
        let s = Summary::new();
        assert_eq!(s.hash_at_marker_point(Marker::of(0)), Digest::ZERO);
        assert_eq!(s.finish().view_hash(), Digest::ZERO);
    }

    #[test]
    fn summary_preserves_marker_validity_across_tables() {
        // Grounded on the original project's testHAMV04_2Table_Double: two
        // tables contribute keys valid over different, partially
        // overlapping windows, and the merged summary must reproduce the
        // combined digest at every marker, not just a flattened total.
        let h1 = Hk::from_int(1);
        h1.add_valid_range(Marker::of(2), Marker::of(6));
        let ht1 = {
            let mut t = Ht::new();
            t.set(h1.clone());
            t
        };

        let h2 = Hk::from_int(2);
        h2.add_valid_range(Marker::of(4), Marker::of(8));
        let ht2 = {
            let mut t = Ht::new();
            t.set(h2.clone());
            t
        };

        let mut s = Summary::new();
        s.update(&ht1);
        s.update(&ht2);

        assert_eq!(s.hash_at_marker_point(Marker::of(0)), Digest::ZERO);
        assert_eq!(s.hash_at_marker_point(Marker::of(3)), h1.digest());
        assert_eq!(
            s.hash_at_marker_point(Marker::of(5)),
            Digest::reduce(h1.digest(), h2.digest())
        );
        assert_eq!(s.hash_at_marker_point(Marker::of(7)), h2.digest());
        assert_eq!(s.hash_at_marker_point(Marker::of(8)), Digest::ZERO);

        let merged = s.finish();
        assert_eq!(merged.hash_at_marker_point(Marker::of(5)), Digest::reduce(h1.digest(), h2.digest()));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn update_many_matches_sequential_update() {
        let tables = vec![table_of(&[1, 2]), table_of(&[3, 4]), table_of(&[5])];
        let mut parallel = Summary::new();
        parallel.update_many(&tables);

        let mut sequential = Summary::new();
        for t in &tables {
            sequential.update(t);
        }
        assert_eq!(
            parallel.finish().view_hash(),
            sequential.finish().view_hash()
        );
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn update_many_composes_with_a_prior_update() {
        let seeded = table_of(&[100]);
        let tables = vec![table_of(&[1, 2]), table_of(&[3])];

        let mut combined = Summary::new();
        combined.update(&seeded);
        combined.update_many(&tables);

        let mut sequential = Summary::new();
        sequential.update(&seeded);
        for t in &tables {
            sequential.update(t);
        }
        assert_eq!(
            combined.finish().view_hash(),
            sequential.finish().view_hash()
        );
    }
}
