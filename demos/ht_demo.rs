//! Builds a table, queries `HashAtMarkerPoint`, and runs a set operation
//! against a second table.
//!
//! `cargo run --example ht_demo`

use hashreduce::hk::Hk;
use hashreduce::ht::{self, Ht};
use hashreduce::Marker;

fn main() {
    env_logger::init();

    let mut left = Ht::new();
    for i in 0..16 {
        let k = Hk::from_int(i);
        k.add_valid_range(Marker::of(i), Marker::of(i + 8));
        left.set(k);
    }
    println!("left table:  {} keys", left.size());

    let mut right = Ht::new();
    for i in 8..24 {
        let k = Hk::from_int(i);
        k.add_valid_range(Marker::of(i), Marker::of(i + 8));
        right.set(k);
    }
    println!("right table: {} keys", right.size());

    let at = Marker::of(10);
    println!(
        "left hash at marker {:?}: {}",
        at,
        left.hash_at_marker_point(at)
    );

    let merged = ht::union(&left, &right);
    println!("union:        {} keys", merged.size());
    let shared = ht::intersection(&left, &right);
    println!("intersection: {} keys", shared.size());
    let only_left = ht::difference(&left, &right);
    println!("left minus right: {} keys", only_left.size());

    ht::check_consistent(&merged).expect("freshly built table stays internally consistent");
    println!("consistency check passed");
}
