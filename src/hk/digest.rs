//! The 128-bit digest and its modular arithmetic.
//!
//! A digest is conceptually four 32-bit big-endian limbs `(a, b, c, d)` with
//! value `a*2^96 + b*2^64 + c*2^32 + d`. Rust has a native 128-bit integer,
//! so we store the value directly as a `u128` and derive the limb view on
//! demand -- the limb layout is an external-interface concern (`ExtractHash`,
//! `FillFromComponents`), not a storage requirement.
//!
//! All arithmetic is modulo the fixed prime `P = 2^128 - PRIME_OFFSET`.
//! `PRIME_OFFSET` is the largest value such that `2^128 - PRIME_OFFSET` is
//! prime; 159 is that value (mirrored by `Hk_GetPrimeOffset` in `ffi`).
//!
//! Every hashing entry point (`from_int`, `from_unsigned_int`, `from_bytes`,
//! `combine`) derives its BLAKE3 hasher from a distinct context string via
//! `Hasher::new_derive_key`, so the four operations can never share a hash
//! preimage space even on identical input bytes.

use std::fmt;

/// `δ` such that `P = 2^128 - δ` is prime.
pub const PRIME_OFFSET: u128 = 159;

/// The modulus of the additive digest group.
pub const P: u128 = u128::MAX - PRIME_OFFSET + 1;

/// A 128-bit content digest, always kept canonical (`< P`).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest(u128);

impl Digest {
    /// The additive identity.
    pub const ZERO: Digest = Digest(0);

    /// Wrap a raw `u128`, reducing it into `[0, P)` if necessary.
    #[inline]
    pub fn from_u128(raw: u128) -> Digest {
        Digest(if raw >= P { raw % P } else { raw })
    }

    /// The canonical `u128` representation.
    #[inline]
    pub const fn as_u128(self) -> u128 {
        self.0
    }

    /// Build a digest directly from four big-endian 32-bit limbs, reducing
    /// modulo `P`. This is the inverse of [`Digest::limb`].
    #[inline]
    pub fn from_limbs(a: u32, b: u32, c: u32, d: u32) -> Digest {
        let raw = ((a as u128) << 96) | ((b as u128) << 64) | ((c as u128) << 32) | (d as u128);
        Digest::from_u128(raw)
    }

    /// Read big-endian limb `index` (0 = most significant, 3 = least).
    /// Out-of-range indices are clamped to the last limb, per §7's rule
    /// that malformed arguments to read accessors are normalised rather
    /// than treated as caller bugs.
    #[inline]
    pub fn limb(self, index: usize) -> u32 {
        let index = index.min(3);
        let shift = (3 - index) * 32;
        (self.0 >> shift) as u32
    }

    /// Parse an exact 32-hex-digit string into a digest. Anything else is a
    /// caller bug and panics; see [`Digest::try_from_hex`] for a
    /// non-panicking variant.
    pub fn from_hex(s: &str) -> Digest {
        Digest::try_from_hex(s).expect("Hk::from_hex requires exactly 32 hex digits")
    }

    /// Parse an exact 32-hex-digit string into a digest, returning
    /// `HrError::InvalidArgument` rather than panicking on malformed
    /// input -- this is one of the handful of genuinely fallible entry
    /// points in the crate (see SPEC_FULL.md §7).
    pub fn try_from_hex(s: &str) -> crate::error::HrResult<Digest> {
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(crate::error::HrError::InvalidArgument(
                "expected exactly 32 hex digits",
            ));
        }
        let raw = u128::from_str_radix(s, 16).expect("validated hex digits");
        Ok(Digest::from_u128(raw))
    }

    /// Lowercase 32-character hex representation, big-endian limb order.
    /// Mirrors `Hk_ExtractHash`'s caller-buffer contract, minus the buffer.
    pub fn to_hex(self) -> String {
        format!("{:032x}", self.0)
    }

    // Domain-separation contexts, one per digest-producing operation --
    // fed to BLAKE3's key-derivation mode (`Hasher::new_derive_key`)
    // rather than prefixed as a raw tag byte, so distinct operations can
    // never share a hash preimage space.
    const DS_COMBINE: &'static str = "hashreduce:v1:digest:combine";
    const DS_FROM_INT: &'static str = "hashreduce:v1:digest:from_int";
    const DS_FROM_UNSIGNED_INT: &'static str = "hashreduce:v1:digest:from_unsigned_int";
    const DS_FROM_BYTES: &'static str = "hashreduce:v1:digest:from_bytes";

    /// `a + b mod P`. Commutative and associative.
    #[inline]
    pub fn reduce(a: Digest, b: Digest) -> Digest {
        let (sum, carry) = a.0.overflowing_add(b.0);
        let mut r = if carry {
            // true_sum = 2^128 + sum; 2^128 ≡ PRIME_OFFSET (mod P) since
            // P = 2^128 - PRIME_OFFSET.
            sum.wrapping_add(PRIME_OFFSET)
        } else {
            sum
        };
        while r >= P {
            r -= P;
        }
        Digest(r)
    }

    /// In-place `acc := acc + x`.
    #[inline]
    pub fn reduce_update(acc: &mut Digest, x: Digest) {
        *acc = Digest::reduce(*acc, x);
    }

    /// `P - a mod P`, i.e. the additive inverse. `negate(0) == 0`.
    #[inline]
    pub fn negate(a: Digest) -> Digest {
        if a.0 == 0 {
            Digest::ZERO
        } else {
            Digest(P - a.0)
        }
    }

    /// A deterministic, non-identity permutation of the digest.
    /// `rehash(ZERO) == ZERO`; otherwise unrelated to the input beyond that.
    ///
    /// Not a cryptographic permutation (SPEC_FULL.md §9 leaves this
    /// unspecified beyond the zero-fixed-point rule) -- a two-lane
    /// SplitMix64-style avalanche over the high/low 64-bit halves, which is
    /// cheap, branch-free, and satisfies the stated contract.
    pub fn rehash(a: Digest) -> Digest {
        if a.0 == 0 {
            return Digest::ZERO;
        }
        let hi = (a.0 >> 64) as u64;
        let lo = a.0 as u64;
        let mixed = ((splitmix64(hi ^ 0x9E37_79B9_7F4A_7C15) as u128) << 64)
            | splitmix64(lo ^ 0xBF58_476D_1CE4_E5B9) as u128;
        Digest::from_u128(mixed)
    }

    /// A non-commutative mixer: `combine(a, b) != combine(b, a)` in general,
    /// because the operand order enters the hash preimage directly (the same
    /// principle as a Merkle `parent(left, right)` combinator, where
    /// swapping children changes the digest).
    pub fn combine(a: Digest, b: Digest) -> Digest {
        hash_in_context(Digest::DS_COMBINE, &[a.to_hex().as_bytes(), b.to_hex().as_bytes()])
    }

    /// Digest from a signed integer. Domain-tagged so that `from_int(v)`
    /// and `from_unsigned_int(v)` disagree for every `v` (see SPEC_FULL.md
    /// §4.1's resolution of the open digest-function question).
    pub fn from_int(v: i64) -> Digest {
        hash_in_context(Digest::DS_FROM_INT, &[&(v as u64).to_be_bytes()])
    }

    /// Digest from an unsigned integer, distinct domain tag from `from_int`.
    pub fn from_unsigned_int(v: u64) -> Digest {
        hash_in_context(Digest::DS_FROM_UNSIGNED_INT, &[&v.to_be_bytes()])
    }

    /// Digest from an arbitrary byte string.
    pub fn from_bytes(data: &[u8]) -> Digest {
        hash_in_context(Digest::DS_FROM_BYTES, &[data])
    }
}

/// Hash `parts` (concatenated) under a BLAKE3 key-derivation context,
/// truncating the 256-bit output to our 128-bit digest space.
fn hash_in_context(context: &str, parts: &[&[u8]]) -> Digest {
    let mut hasher = blake3::Hasher::new_derive_key(context);
    for p in parts {
        hasher.update(p);
    }
    let out = hasher.finalize();
    let raw = u128::from_be_bytes(out.as_bytes()[0..16].try_into().unwrap());
    Digest::from_u128(raw)
}

/// One SplitMix64 step: a fast, well-studied 64-bit avalanche mixer.
#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
