//! The pseudo-vertex graph: nodes addressed by a key that totally
//! orders them along the original ring, with optional reroute links that
//! let the tracer jump across a self-crossing onto the other branch.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use geo_types::Coord;

/// A finite, non-negative scalar offset with a total order. Pseudo-vertex
/// offsets are always squared distances, so NaN never arises in practice;
/// this wrapper just gives us `Ord` without pulling in a crate for it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Offset(f64);

impl Eq for Offset {}

impl PartialOrd for Offset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Offset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
    }
}

/// `(segment_index, partner_segment_index, offset_along_segment, reroute)`.
///
/// Ordered lexicographically by `(segment asc, offset asc, partner desc,
/// reroute before non-reroute)`. The last two tie-breaks matter only when
/// two pseudo-vertices sit at the exact same point on the same segment
/// (i.e. at a crossing): `partner desc` makes the ordering deterministic
/// when more than one crossing lands at the same offset, and `reroute
/// before non-reroute` is what makes the tracer take the jump onto the
/// other branch instead of walking straight through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PseudoVertexKey {
    pub segment: usize,
    pub partner_segment: usize,
    offset: Offset,
    pub reroute: bool,
}

impl PseudoVertexKey {
    pub fn new(segment: usize, partner_segment: usize, offset: f64, reroute: bool) -> Self {
        PseudoVertexKey {
            segment,
            partner_segment,
            offset: Offset(offset),
            reroute,
        }
    }
}

impl PartialOrd for PseudoVertexKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PseudoVertexKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segment
            .cmp(&other.segment)
            .then_with(|| self.offset.cmp(&other.offset))
            .then_with(|| other.partner_segment.cmp(&self.partner_segment))
            .then_with(|| other.reroute.cmp(&self.reroute))
    }
}

/// A node in the self-intersection graph: a point, plus an optional link to
/// the pseudo-vertex this one reroutes onto.
#[derive(Debug, Clone, Copy)]
pub struct PseudoVertex {
    pub point: Coord<f64>,
    pub link: Option<PseudoVertexKey>,
}

/// Built once per input ring by [`crate::algorithm::self_intersections`],
/// walked (and drained of start keys) by [`crate::algorithm::trace`], then
/// discarded.
#[derive(Debug, Default)]
pub struct PseudoVertexGraph {
    pub vertices: BTreeMap<PseudoVertexKey, PseudoVertex>,
    pub start_keys: BTreeSet<PseudoVertexKey>,
}

impl PseudoVertexGraph {
    pub fn new() -> Self {
        PseudoVertexGraph::default()
    }

    pub fn insert(&mut self, key: PseudoVertexKey, vertex: PseudoVertex) {
        self.vertices.insert(key, vertex);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reroute_sorts_before_non_reroute_at_same_offset() {
        let reroute = PseudoVertexKey::new(1, 2, 0.5, true);
        let straight = PseudoVertexKey::new(1, 2, 0.5, false);
        assert!(reroute < straight);
    }

    #[test]
    fn partner_segment_sorts_descending() {
        let partner_high = PseudoVertexKey::new(1, 5, 0.5, false);
        let partner_low = PseudoVertexKey::new(1, 2, 0.5, false);
        assert!(partner_high < partner_low);
    }

    #[test]
    fn segment_index_dominates_ordering() {
        let earlier_segment = PseudoVertexKey::new(1, 99, 100.0, false);
        let later_segment = PseudoVertexKey::new(2, 0, 0.0, false);
        assert!(earlier_segment < later_segment);
    }
}
