//! Marker-range interval sets (`Mi`): sorted, disjoint, non-adjacent
//! half-open ranges over the marker axis `[-inf, +inf) ∩ ℤ`.

mod iter;

pub use iter::{Mii, Miri};

/// A coordinate on the marker axis, extended with the two sentinel
/// infinities. Derives its total order from declaration order, which is
/// exactly the order we need: `NegInf < Finite(_) < PosInf`, and two
/// `Finite` values compare by their inner `i64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Marker {
    NegInf,
    Finite(i64),
    PosInf,
}

impl Marker {
    /// Shorthand for a finite marker.
    #[inline]
    pub const fn of(v: i64) -> Marker {
        Marker::Finite(v)
    }
}

/// A half-open marker range `[start, end)`. Constructing one with
/// `start >= end` is a `BadRange` (silently unrepresentable); use
/// [`Range::new`] to get `None` in that case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    pub start: Marker,
    pub end: Marker,
}

impl Range {
    /// Construct a range, returning `None` for an empty/malformed range
    /// (`start >= end`) rather than panicking -- ranges are a "read" shape
    /// as far as §7 is concerned, not an operation that can be misused.
    #[inline]
    pub fn new(start: Marker, end: Marker) -> Option<Range> {
        if start < end {
            Some(Range { start, end })
        } else {
            None
        }
    }

    #[inline]
    fn touches_or_overlaps(&self, other: &Range) -> bool {
        !(self.end < other.start || other.end < self.start)
    }
}

/// A marker interval set: sorted, pairwise-disjoint, non-adjacent ranges.
/// The empty set and the universe `[-inf, +inf)` are both representable.
/// A NULL/absent `Mi` (`Option<&Mi>` at call sites) is semantically the
/// universal set -- see [`Mii::new`] and [`Hk::effective_ranges`](crate::hk::Hk).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mi {
    ranges: Vec<Range>,
}

impl Mi {
    /// The empty interval set.
    pub fn new() -> Mi {
        Mi { ranges: Vec::new() }
    }

    /// A set containing one range `[start, end)`; empty if `start >= end`.
    pub fn with_range(start: Marker, end: Marker) -> Mi {
        let mut m = Mi::new();
        m.add_range(start, end);
        m
    }

    /// The universe `[-inf, +inf)`.
    pub fn universe() -> Mi {
        Mi::with_range(Marker::NegInf, Marker::PosInf)
    }

    /// Merge `[start, end)` into the set, coalescing any range that
    /// touches or overlaps it. A malformed range (`start >= end`) is a
    /// silent no-op.
    pub fn add_range(&mut self, start: Marker, end: Marker) {
        let Some(Range {
            start: mut new_start,
            end: mut new_end,
        }) = Range::new(start, end)
        else {
            return;
        };
        let mut kept = Vec::with_capacity(self.ranges.len() + 1);
        for r in self.ranges.drain(..) {
            if r.touches_or_overlaps(&Range {
                start: new_start,
                end: new_end,
            }) {
                if r.start < new_start {
                    new_start = r.start;
                }
                if r.end > new_end {
                    new_end = r.end;
                }
            } else {
                kept.push(r);
            }
        }
        kept.push(Range {
            start: new_start,
            end: new_end,
        });
        kept.sort_by_key(|r| r.start);
        self.ranges = kept;
    }

    /// Number of disjoint ranges in the canonical representation.
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    /// Iterate the ranges in increasing order.
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// `true` iff `m` falls inside some contained range. O(log n).
    pub fn is_valid(&self, m: Marker) -> bool {
        let idx = self.ranges.partition_point(|r| r.start <= m);
        idx > 0 && self.ranges[idx - 1].end > m
    }

    /// `true` iff the set is non-empty.
    pub fn valid_anywhere(&self) -> bool {
        !self.ranges.is_empty()
    }

    fn from_sorted_ranges(mut ranges: Vec<Range>) -> Mi {
        ranges.sort_by_key(|r| r.start);
        let mut out: Vec<Range> = Vec::with_capacity(ranges.len());
        for r in ranges {
            match out.last_mut() {
                Some(last) if last.touches_or_overlaps(&r) => {
                    if r.end > last.end {
                        last.end = r.end;
                    }
                }
                _ => out.push(r),
            }
        }
        Mi { ranges: out }
    }

    /// Union of two interval sets.
    pub fn union(a: &Mi, b: &Mi) -> Mi {
        let mut combined = a.ranges.clone();
        combined.extend_from_slice(&b.ranges);
        Mi::from_sorted_ranges(combined)
    }

    /// Intersection of two interval sets.
    pub fn intersection(a: &Mi, b: &Mi) -> Mi {
        let mut out = Vec::new();
        let (mut i, mut j) = (0usize, 0usize);
        while i < a.ranges.len() && j < b.ranges.len() {
            let ra = a.ranges[i];
            let rb = b.ranges[j];
            let lo = ra.start.max(rb.start);
            let hi = ra.end.min(rb.end);
            if lo < hi {
                out.push(Range { start: lo, end: hi });
            }
            if ra.end < rb.end {
                i += 1;
            } else {
                j += 1;
            }
        }
        Mi::from_sorted_ranges(out)
    }

    /// Complement within `[-inf, +inf)`.
    pub fn complement(&self) -> Mi {
        let mut out = Vec::new();
        let mut cursor = Marker::NegInf;
        for r in &self.ranges {
            if cursor < r.start {
                out.push(Range {
                    start: cursor,
                    end: r.start,
                });
            }
            cursor = r.end;
        }
        if cursor < Marker::PosInf {
            out.push(Range {
                start: cursor,
                end: Marker::PosInf,
            });
        }
        Mi { ranges: out }
    }

    /// `a \ b`.
    pub fn difference(a: &Mi, b: &Mi) -> Mi {
        Mi::intersection(a, &b.complement())
    }

    /// `(a \ b) ∪ (b \ a)`.
    pub fn symmetric_difference(a: &Mi, b: &Mi) -> Mi {
        Mi::union(&Mi::difference(a, b), &Mi::difference(b, a))
    }
}
