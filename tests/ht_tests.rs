use hashreduce::hk::Hk;
use hashreduce::ht::{self, check_consistent, Ht, Summary};
use hashreduce::Marker;

#[test]
fn sixteen_digit_values_round_trip_through_the_trie() {
    let mut t = Ht::new();
    let keys: Vec<Hk> = (0..16).map(Hk::from_int).collect();
    for k in &keys {
        t.set(k.clone());
    }
    assert_eq!(t.size(), 16);
    for k in &keys {
        assert!(t.view(k).is_some());
    }
    assert!(check_consistent(&t).is_ok());
}

#[test]
fn single_range_hash_at_marker_point_matches_the_key_inside_and_zero_outside() {
    let mut t = Ht::new();
    let k = Hk::from_int(1);
    k.add_valid_range(Marker::of(100), Marker::of(200));
    t.set(k.clone());

    assert_eq!(t.hash_at_marker_point(Marker::of(150)), k.digest());
    assert_eq!(
        t.hash_at_marker_point(Marker::of(250)),
        hashreduce::hk::Digest::ZERO
    );
}

#[test]
fn two_overlapping_keys_summarize_to_their_reduce() {
    let mut t = Ht::new();
    let a = Hk::from_int(10);
    a.add_valid_range(Marker::of(0), Marker::of(50));
    let b = Hk::from_int(20);
    b.add_valid_range(Marker::of(25), Marker::of(75));
    t.set(a.clone());
    t.set(b.clone());

    let expected = Hk::reduce(&a, &b);
    assert_eq!(t.hash_at_marker_point(Marker::of(30)), expected.digest());
}

#[test]
fn random_tables_satisfy_set_op_consistency_and_sizes() {
    let mut left = Ht::new();
    let mut right = Ht::new();
    for i in 0..200 {
        left.set(Hk::from_int(i));
    }
    for i in 100..300 {
        right.set(Hk::from_int(i));
    }

    let u = ht::union(&left, &right);
    let i = ht::intersection(&left, &right);
    let d = ht::difference(&left, &right);

    assert_eq!(u.size(), 300);
    assert_eq!(i.size(), 100);
    assert_eq!(d.size(), 100);
    assert!(check_consistent(&u).is_ok());
    assert!(check_consistent(&i).is_ok());
    assert!(check_consistent(&d).is_ok());
}

#[test]
fn table_summary_matches_manual_reduce_fold() {
    let mut t = Ht::new();
    let keys: Vec<Hk> = (0..30).map(Hk::from_int).collect();
    for k in &keys {
        t.set(k.clone());
    }

    let mut summary = Summary::new();
    summary.update(&t);

    let manual = keys
        .iter()
        .fold(hashreduce::hk::Digest::ZERO, |acc, k| {
            hashreduce::hk::Digest::reduce(acc, k.digest())
        });
    assert_eq!(summary.finish().view_hash(), manual);
}

#[test]
fn popping_every_key_collapses_the_trie_back_to_empty() {
    let mut t = Ht::new();
    let keys: Vec<Hk> = (0..1000).map(Hk::from_int).collect();
    for k in &keys {
        t.set(k.clone());
    }
    for k in &keys {
        assert!(t.pop(k).is_some());
    }
    assert!(t.is_empty());
    assert!(check_consistent(&t).is_ok());
}
