use hashreduce::hk::{Digest, Hk};
use hashreduce::mi::Mi;
use hashreduce::ht::Ht;
use hashreduce::Marker;
use proptest::prelude::*;

proptest! {
    #[test]
    fn reduce_is_commutative_and_associative(a in any::<i64>(), b in any::<i64>(), c in any::<i64>()) {
        let (da, db, dc) = (Digest::from_int(a), Digest::from_int(b), Digest::from_int(c));
        prop_assert_eq!(Digest::reduce(da, db), Digest::reduce(db, da));
        prop_assert_eq!(
            Digest::reduce(Digest::reduce(da, db), dc),
            Digest::reduce(da, Digest::reduce(db, dc))
        );
    }

    #[test]
    fn negate_always_inverts(v in any::<i64>()) {
        let d = Digest::from_int(v);
        prop_assert_eq!(Digest::reduce(d, Digest::negate(d)), Digest::ZERO);
    }

    #[test]
    fn rehash_never_moves_zero(v in any::<i64>()) {
        let d = Digest::from_int(v);
        if d == Digest::ZERO {
            prop_assert_eq!(Digest::rehash(d), Digest::ZERO);
        } else {
            prop_assert_ne!(Digest::rehash(d), d);
        }
    }

    #[test]
    fn mi_membership_matches_union_of_the_two_source_sets(
        starts_a in prop::collection::vec(-100i64..100, 0..8),
    ) {
        let mut a = Mi::new();
        for &s in &starts_a {
            a.add_range(Marker::of(s), Marker::of(s + 3));
        }
        let b = a.complement();
        let u = Mi::union(&a, &b);
        for x in -110..110 {
            prop_assert!(u.is_valid(Marker::of(x)));
        }
    }

    #[test]
    fn table_contains_every_inserted_key_regardless_of_insertion_order(
        mut values in prop::collection::vec(-500i64..500, 0..64),
    ) {
        values.sort_unstable();
        values.dedup();
        let mut t = Ht::new();
        for &v in &values {
            t.set(Hk::from_int(v));
        }
        prop_assert_eq!(t.size(), values.len());
        for &v in &values {
            prop_assert!(t.contains(&Hk::from_int(v)));
        }
    }

    #[test]
    fn set_ops_are_pointwise_consistent_at_sampled_markers(
        a_items in prop::collection::vec((-20i64..20, -40i64..40, 1i64..15), 0..16),
        b_items in prop::collection::vec((-20i64..20, -40i64..40, 1i64..15), 0..16),
        sample_points in prop::collection::vec(-50i64..50, 1..24),
    ) {
        fn build(items: &[(i64, i64, i64)]) -> Ht {
            let mut by_value: std::collections::BTreeMap<i64, Hk> = std::collections::BTreeMap::new();
            for &(v, start, len) in items {
                let key = by_value.entry(v).or_insert_with(|| Hk::from_int(v));
                key.add_valid_range(Marker::of(start), Marker::of(start + len));
            }
            let mut t = Ht::new();
            for (_, k) in by_value {
                t.set(k);
            }
            t
        }

        let a = build(&a_items);
        let b = build(&b_items);

        let union = hashreduce::ht::union(&a, &b);
        let intersection = hashreduce::ht::intersection(&a, &b);
        let difference = hashreduce::ht::difference(&a, &b);

        let values: std::collections::BTreeSet<i64> = a_items
            .iter()
            .chain(b_items.iter())
            .map(|&(v, _, _)| v)
            .collect();

        for v in values {
            let key = Hk::from_int(v);
            for &m in &sample_points {
                let marker = Marker::of(m);
                let av = a.contains_at(&key, marker);
                let bv = b.contains_at(&key, marker);
                prop_assert_eq!(union.contains_at(&key, marker), av || bv);
                prop_assert_eq!(intersection.contains_at(&key, marker), av && bv);
                prop_assert_eq!(difference.contains_at(&key, marker), av && !bv);
            }
        }
    }
}
