//! hashreduce — incremental, set-like hashing of labeled graphs over
//! linear marker coordinates.
//!
//! Three coupled subsystems:
//! - [`hk`]: a 128-bit hash-key algebra over a fixed prime modulus, with
//!   optional marker-interval metadata and reference counting.
//! - [`mi`]: marker-interval sets -- sorted, disjoint, half-open ranges
//!   over the marker axis, with set algebra and ordered iterators.
//! - [`ht`]: a 32-ary hash trie table of keys, with per-node
//!   marker-summary skip lists and whole-table set algebra.
//!
//! [`ffi`] exposes a flat C ABI over all three for embedding this library
//! from another language.

#![deny(rust_2018_idioms, unused_must_use)]

pub mod error;
pub mod ffi;
pub mod hk;
pub mod ht;
pub mod mi;

pub use error::{HrError, HrResult};
pub use hk::Hk;
pub use ht::Ht;
pub use mi::{Marker, Mi};
