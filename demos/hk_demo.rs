//! Runs the HK algebra over a handful of integers and prints the results.
//!
//! `cargo run --example hk_demo`

use hashreduce::hk::{Digest, Hk};
use hashreduce::Marker;

fn main() {
    env_logger::init();

    let a = Hk::from_int(1);
    let b = Hk::from_int(2);
    println!("a      = {}", a.digest());
    println!("b      = {}", b.digest());

    let sum = Hk::reduce(&a, &b);
    println!("a + b  = {} (commutative: {})", sum.digest(), sum == Hk::reduce(&b, &a));

    let neg = Hk::negate(&a);
    println!("-a     = {}", neg.digest());
    println!("a + -a = {}", Hk::reduce(&a, &neg).digest());
    assert_eq!(Hk::reduce(&a, &neg).digest(), Digest::ZERO);

    let combined_ab = Hk::combine(&a, &b);
    let combined_ba = Hk::combine(&b, &a);
    println!("combine(a,b) = {}", combined_ab.digest());
    println!("combine(b,a) = {}", combined_ba.digest());
    assert_ne!(combined_ab, combined_ba, "combine is order-sensitive");

    a.add_valid_range(Marker::of(0), Marker::of(100));
    println!("a valid at 50?  {}", a.marker_point_is_valid(Marker::of(50)));
    println!("a valid at 200? {}", a.marker_point_is_valid(Marker::of(200)));
}
