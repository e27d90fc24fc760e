//! Filling-rule resolver: turns the tracer's simple sub-rings into a
//! single filled region under a chosen winding rule.

use std::cmp::Ordering;

use geo_types::{LineString, MultiPolygon, Polygon};
use log::trace;

use crate::primitives::{self, signed_area};

/// A rule for combining a ring's simple sub-rings into one filled region.
///
/// Implementations receive every sub-ring the tracer produced for a single
/// input ring, each still carrying its own winding direction (the sign of
/// its signed area), and must decide which ones add to the filled region and
/// which ones cut out of it.
pub trait FillStrategy {
    fn combine(rings: Vec<LineString<f64>>) -> MultiPolygon<f64>;

    /// How an already-filled outer region has its already-filled holes
    /// removed from it. Non-zero winding treats a hole as a true geometric
    /// cut (`difference`); even-odd treats every boundary crossing as a
    /// parity flip (`symmetric_difference`), which matters when a hole
    /// turns out to sit partly or wholly outside the outer it was meant to
    /// cut.
    fn subtract(outer: &MultiPolygon<f64>, holes: &MultiPolygon<f64>) -> MultiPolygon<f64>;
}

/// Non-zero winding rule: a point is inside the result iff the signed sum of
/// the windings of the sub-rings enclosing it is non-zero. Each sub-ring's
/// own sign plus the sign of every sub-ring that covers it gives its score;
/// rings with a non-zero score are unioned into the filled group, rings that
/// cancel to zero into the cancelled group, and the cancelled group is
/// subtracted from the filled one.
pub struct NonZeroWinding;

impl FillStrategy for NonZeroWinding {
    fn combine(rings: Vec<LineString<f64>>) -> MultiPolygon<f64> {
        if rings.is_empty() {
            return MultiPolygon::new(Vec::new());
        }

        let mut rings = rings;
        rings.sort_by(|a, b| {
            area_desc(signed_area(a).abs(), signed_area(b).abs())
        });

        // A ring's own winding sign contributes to its score; each ring that
        // contains it adds its sign on top. A ring nested two deep (hole
        // inside hole) cancels back to a non-zero score and resurfaces as a
        // filled island, which a plain per-ring sign partition would miss.
        let signs: Vec<f64> = rings.iter().map(|r| if signed_area(r) >= 0.0 { 1.0 } else { -1.0 }).collect();
        let regions: Vec<MultiPolygon<f64>> = rings
            .iter()
            .map(|ring| {
                let mut ring = ring.clone();
                if signed_area(&ring) < 0.0 {
                    ring.0.reverse();
                }
                primitives::singleton(ring)
            })
            .collect();

        let mut scores = signs.clone();
        for j in 0..regions.len() {
            for i in 0..j {
                if primitives::covered_by(&regions[j], &regions[i]) {
                    scores[j] += signs[i];
                }
            }
        }

        let mut outers = Vec::new();
        let mut inners = Vec::new();
        for (region, score) in regions.into_iter().zip(scores) {
            if score != 0.0 {
                outers.push(region);
            } else {
                inners.push(region);
            }
        }
        trace!(
            "non-zero winding: {} outer, {} inner sub-ring(s)",
            outers.len(),
            inners.len()
        );

        let outer = accumulate(outers);
        let inner = accumulate(inners);
        if inner.0.is_empty() {
            outer
        } else {
            primitives::difference(&outer, &inner)
        }
    }

    fn subtract(outer: &MultiPolygon<f64>, holes: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        primitives::difference(outer, holes)
    }
}

/// Even-odd rule: a point is inside the result iff it is enclosed by an odd
/// number of sub-rings, regardless of winding direction. Implemented as a
/// tree-shaped (halving) reduction over symmetric difference, which is
/// associative and commutative, so the pairing order doesn't affect the
/// result, only its cost.
pub struct EvenOdd;

impl FillStrategy for EvenOdd {
    fn combine(rings: Vec<LineString<f64>>) -> MultiPolygon<f64> {
        if rings.is_empty() {
            return MultiPolygon::new(Vec::new());
        }

        let mut rings = rings;
        // Smallest first: the halving reduction pairs neighbors, so this
        // keeps each round's symmetric differences roughly similar in size.
        rings.sort_by(|a, b| area_asc(signed_area(a).abs(), signed_area(b).abs()));

        let layer: Vec<MultiPolygon<f64>> = rings
            .into_iter()
            .map(|mut ring| {
                if signed_area(&ring) < 0.0 {
                    ring.0.reverse();
                }
                primitives::singleton(ring)
            })
            .collect();

        tree_reduce(layer)
    }

    fn subtract(outer: &MultiPolygon<f64>, holes: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        primitives::symmetric_difference(outer, holes)
    }
}

fn area_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn area_asc(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Iterative pairwise union with disjoint-union suppression: if unioning the
/// running accumulation with the next piece produces more than one polygon,
/// the two are kept apart (appended side by side) rather than accepted as a
/// single fragmented multi-polygon. This mirrors the original engine's
/// conservative merge behavior and is deliberate, not a missed optimization.
fn accumulate(pieces: Vec<MultiPolygon<f64>>) -> MultiPolygon<f64> {
    let mut acc = MultiPolygon::new(Vec::new());
    for piece in pieces {
        acc = push_merge(acc, &piece);
    }
    acc
}

/// Same disjoint-union-suppressing merge [`accumulate`] folds with, exposed
/// for [`super::assemble`] to stitch a `MultiPolygon`'s already-repaired
/// member polygons back together.
///
/// Merges at polygon granularity, one new member at a time, rather than
/// unioning the two multi-polygons as a whole: unioning whole-accumulator
/// against whole-`next` conflates every existing member's relationship to
/// `next` into a single pass/fail, so one member that's disjoint from
/// `next` is enough to make the combined union produce more than one
/// polygon and block a *different* member that genuinely overlaps `next`
/// from ever being merged.
pub(crate) fn push_merge(acc: MultiPolygon<f64>, next: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    let mut polys = acc.0;
    for new_poly in &next.0 {
        push_polygon(&mut polys, new_poly.clone());
    }
    MultiPolygon::new(polys)
}

/// Append `new_poly` to `polys`, merging it in turn with each earlier
/// member it intersects, provided that pair's union reduces to exactly one
/// polygon; a member whose union with `new_poly` would still be two
/// polygons is left alone and `new_poly` carries on to the next one.
fn push_polygon(polys: &mut Vec<Polygon<f64>>, mut new_poly: Polygon<f64>) {
    let mut i = 0;
    while i < polys.len() {
        let pair = MultiPolygon::new(vec![polys[i].clone()]);
        let candidate = MultiPolygon::new(vec![new_poly.clone()]);
        if primitives::intersects(&pair, &candidate) {
            let merged = primitives::union(&pair, &candidate);
            if merged.0.len() == 1 {
                new_poly = merged.0.into_iter().next().expect("checked len == 1 above");
                polys.remove(i);
                continue;
            }
        }
        i += 1;
    }
    polys.push(new_poly);
}

/// Halve `layer` by symmetric-differencing neighboring pairs until one
/// multi-polygon remains.
fn tree_reduce(mut layer: Vec<MultiPolygon<f64>>) -> MultiPolygon<f64> {
    while layer.len() > 1 {
        let mut next = Vec::with_capacity(layer.len().div_ceil(2));
        let mut iter = layer.into_iter();
        while let Some(a) = iter.next() {
            match iter.next() {
                Some(b) => next.push(primitives::symmetric_difference(&a, &b)),
                None => next.push(a),
            }
        }
        layer = next;
    }
    layer.into_iter().next().unwrap_or_else(|| MultiPolygon::new(Vec::new()))
}
