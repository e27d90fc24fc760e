//! Polygon assembler: the recursive hole repair and the two public
//! entry points, [`correct`] and [`correct_odd_even`].

use geo_types::{LineString, MultiPolygon, Polygon};
use log::warn;

use super::fill::{push_merge, EvenOdd, FillStrategy, NonZeroWinding};
use super::self_intersections::find_self_intersections;
use super::sanitize::sanitize_ring;
use super::trace::trace_rings;
use crate::config::{Order, RepairConfig};
use crate::primitives;

/// Types that `correct`/`correct_odd_even` know how to repair.
///
/// Implemented for [`Polygon`] and [`MultiPolygon`]; both produce a
/// [`MultiPolygon`], since repairing a single (possibly self-intersecting,
/// multiply-wound) polygon can legitimately split it into several.
pub trait Repairable {
    fn repair<S: FillStrategy>(&self, config: &RepairConfig) -> MultiPolygon<f64>;
}

impl Repairable for Polygon<f64> {
    fn repair<S: FillStrategy>(&self, config: &RepairConfig) -> MultiPolygon<f64> {
        repair_polygon::<S>(self, config)
    }
}

impl Repairable for MultiPolygon<f64> {
    fn repair<S: FillStrategy>(&self, config: &RepairConfig) -> MultiPolygon<f64> {
        let mut acc = MultiPolygon::new(Vec::new());
        for poly in &self.0 {
            let repaired = repair_polygon::<S>(poly, config);
            acc = push_merge(acc, &repaired);
        }
        acc
    }
}

/// Repair `input` into a valid [`MultiPolygon`] under the non-zero-winding
/// fill rule, writing the result into `out`.
pub fn correct<R: Repairable>(input: &R, out: &mut MultiPolygon<f64>, config: &RepairConfig) {
    *out = input.repair::<NonZeroWinding>(config);
}

/// As [`correct`], but under the even-odd fill rule.
pub fn correct_odd_even<R: Repairable>(input: &R, out: &mut MultiPolygon<f64>, config: &RepairConfig) {
    *out = input.repair::<EvenOdd>(config);
}

/// Sanitize, find self-intersections, trace, and fill a single ring, in the
/// given `order`. This is the unit every exterior and hole ring is run
/// through.
fn repair_ring<S: FillStrategy>(
    ring: &LineString<f64>,
    order: Order,
    config: &RepairConfig,
) -> MultiPolygon<f64> {
    let sanitized = sanitize_ring(ring, order);
    if sanitized.0.is_empty() {
        return MultiPolygon::new(Vec::new());
    }
    let graph = find_self_intersections(&sanitized);
    let sub_rings = trace_rings(graph, &sanitized, config.spike_threshold);
    S::combine(sub_rings)
}

/// Repair one polygon's exterior and its holes.
///
/// Each hole is repaired independently, "as if it were itself a polygon
/// outer" (same `order`, not its opposite — a hole's own repair yields a
/// plain filled region, not yet a cut). A hole region that doesn't actually
/// touch the shell is promoted to a peer polygon rather than silently
/// dropped: it isn't cutting anything, so the original implementation's
/// conservative stance is to keep the input's area rather than lose it.
/// Holes that do overlap or nest inside the shell (or each other — OGC
/// forbids nested holes, but malformed input can supply them) are combined
/// first via [`combine_holes_by_nesting`], which peels them outermost-first
/// so a hole nested inside another hole correctly reappears as a filled
/// island, then subtracted from the shell in one step.
fn repair_polygon<S: FillStrategy>(poly: &Polygon<f64>, config: &RepairConfig) -> MultiPolygon<f64> {
    let shell = repair_ring::<S>(poly.exterior(), config.order, config);

    if poly.interiors().is_empty() {
        return shell;
    }

    let hole_regions: Vec<MultiPolygon<f64>> = poly
        .interiors()
        .iter()
        .map(|hole| repair_ring::<S>(hole, config.order, config))
        .filter(|region| !region.0.is_empty())
        .collect();

    let mut result = shell;
    let mut overlapping = Vec::new();
    for region in hole_regions {
        if primitives::intersects(&result, &region) {
            overlapping.push(region);
        } else {
            result = push_merge(result, &region);
        }
    }

    if !overlapping.is_empty() {
        let combined_holes = combine_holes_by_nesting(overlapping, 1, config);
        result = S::subtract(&result, &combined_holes);
    }

    result
}

/// Peel `holes` outermost-first (by area). Holes actually nested inside the
/// current outermost one (`covered_by`) are symmetric-differenced against it,
/// so a hole nested inside another hole reappears as filled area instead of
/// staying cut twice over. Holes that merely overlap the outermost one
/// without being contained in it are siblings, not nested — those are
/// unioned in instead, so their overlap stays cut rather than spuriously
/// reappearing as a filled island.
///
/// `depth` counts nesting levels (not sibling fan-out, which can't recurse
/// forever on its own since the hole list strictly shrinks each call); past
/// `config.max_hole_depth` the remaining, deepest-nested holes are dropped
/// (logged) rather than combined, since only malformed input nests holes
/// this deep.
fn combine_holes_by_nesting(
    mut holes: Vec<MultiPolygon<f64>>,
    depth: usize,
    config: &RepairConfig,
) -> MultiPolygon<f64> {
    if holes.is_empty() {
        return MultiPolygon::new(Vec::new());
    }
    if depth > config.max_hole_depth {
        warn!(
            "hole nesting exceeded max_hole_depth ({}); dropping {} nested hole(s)",
            config.max_hole_depth,
            holes.len()
        );
        return MultiPolygon::new(Vec::new());
    }

    holes.sort_by(|a, b| {
        primitives::area(b)
            .partial_cmp(&primitives::area(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let outermost = holes.remove(0);

    let mut nested = Vec::new();
    let mut siblings = Vec::new();
    for hole in holes {
        if primitives::covered_by(&hole, &outermost) {
            nested.push(hole);
        } else {
            siblings.push(hole);
        }
    }

    let mut result = if nested.is_empty() {
        outermost
    } else {
        let inner = combine_holes_by_nesting(nested, depth + 1, config);
        primitives::symmetric_difference(&outermost, &inner)
    };

    if !siblings.is_empty() {
        let rest = combine_holes_by_nesting(siblings, depth, config);
        result = primitives::union(&result, &rest);
    }

    result
}
