//! `_Ht_debug_HashTableConsistent`: a debug-only consistency checker that
//! recomputes every inner node's marker-summary skip list from scratch
//! and compares it against the cached value, catching a propagation bug
//! (a cache left stale by an insert/remove path) before it produces a
//! wrong `HashAtMarkerPoint` answer.

use super::msl::Msl;
use super::{Ht, Node};
use crate::error::{HrError, HrResult};

/// `Ok(())` if every cached marker-summary skip list matches a freshly
/// recomputed one; `Err` naming the mismatch otherwise.
pub fn check_consistent(ht: &Ht) -> HrResult<()> {
    walk(&ht.root)?;
    Ok(())
}

fn walk(node: &Node) -> HrResult<Option<Msl>> {
    match node {
        Node::Empty => Ok(None),
        Node::Leaf(hk) => Ok(Some(Msl::leaf(hk))),
        Node::Inner(inner) => {
            let mut parts = Vec::with_capacity(inner.children.len());
            for c in inner.children.iter() {
                if let Some(m) = walk(c)? {
                    parts.push(m);
                }
            }
            let refs: Vec<&Msl> = parts.iter().collect();
            let fresh = Msl::merge(&refs);
            if fresh != inner.msl {
                #[cfg(feature = "log")]
                log::warn!("marker-summary skip list mismatch during consistency check");
                return Err(HrError::IntegrityViolation(
                    "marker-summary skip list out of sync with its children",
                ));
            }
            Ok(Some(fresh))
        }
    }
}
