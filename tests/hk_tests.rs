use hashreduce::hk::{Digest, Hk};
use hashreduce::Marker;

#[test]
fn int_and_unsigned_int_factories_never_collide() {
    for v in -50i64..50 {
        assert_ne!(Hk::from_int(v), Hk::from_unsigned_int(v as u64));
    }
}

#[test]
fn reduce_is_associative_over_a_run_of_keys() {
    let keys: Vec<Hk> = (0..20).map(Hk::from_int).collect();
    let left_fold = keys
        .iter()
        .fold(Hk::from_int(0).digest(), |acc, k| Digest::reduce(acc, k.digest()));
    let right_fold = keys
        .iter()
        .rev()
        .fold(Hk::from_int(0).digest(), |acc, k| Digest::reduce(acc, k.digest()));
    assert_eq!(left_fold, right_fold);
}

#[test]
fn marker_metadata_is_independent_per_handle_but_shared_per_clone() {
    let original = Hk::from_int(3);
    let clone = original.clone();
    original.add_valid_range(Marker::of(0), Marker::of(5));
    // clone() shares the same Rc-backed storage, so metadata is visible
    // through either handle.
    assert!(clone.is_marked());

    let independent = Hk::from_int(3);
    assert!(!independent.is_marked());
}

#[test]
fn hex_round_trip_preserves_digest() {
    let a = Hk::from_bytes(b"round trip me");
    let hex = a.digest().to_hex();
    let b = Hk::from_hex(&hex);
    assert_eq!(a, b);
}

#[test]
fn refcount_and_lock_count_are_tracked_independently_of_digest_equality() {
    let a = Hk::from_int(9);
    let b = Hk::from_int(9);
    assert_eq!(a, b);
    assert_eq!(a.ref_count(), 1);
    assert_eq!(b.ref_count(), 1);
}
