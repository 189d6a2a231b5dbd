//! Builds a marker-interval set and walks its set algebra.
//!
//! `cargo run --example mi_demo`

use hashreduce::mi::{Mi, Mii};
use hashreduce::Marker;

fn main() {
    env_logger::init();

    let mut a = Mi::new();
    a.add_range(Marker::of(0), Marker::of(10));
    a.add_range(Marker::of(20), Marker::of(30));
    println!("a has {} ranges", a.range_count());

    let mut b = Mi::new();
    b.add_range(Marker::of(5), Marker::of(25));
    println!("b has {} ranges", b.range_count());

    let u = Mi::union(&a, &b);
    let i = Mi::intersection(&a, &b);
    let d = Mi::difference(&a, &b);

    println!("union:        {} range(s)", u.range_count());
    println!("intersection: {} range(s)", i.range_count());
    println!("difference:   {} range(s)", d.range_count());

    print!("union ranges: ");
    for r in Mii::new(Some(&u)) {
        print!("[{:?}, {:?}) ", r.start, r.end);
    }
    println!();

    print!("complement of a: ");
    for r in Mii::new(Some(&a.complement())) {
        print!("[{:?}, {:?}) ", r.start, r.end);
    }
    println!();
}
