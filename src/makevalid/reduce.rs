//! Segment reduction: collapse same-origin same-slope segments and drop
//! exact duplicates, leaving one canonical segment per carrier.

use std::collections::HashMap;

use tracing::debug;

use crate::geometry::Line;
use crate::math::cmp::{point_cmp, point_eq, point_less};
use crate::math::slope;

/// Bit-exact grouping key for segments sharing a start point and a slope.
/// Undefined (vertical) slopes group separately from every defined slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CarrierKey {
    start_x: u64,
    start_y: u64,
    slope: u64,
    slope_defined: bool,
}

/// Normalizes, deduplicates and collapses an arrangement of segments.
///
/// Every segment is reoriented so its canonically smaller endpoint comes
/// first. Segments sharing that start point and a slope are collapsed to
/// the longest of the group, and exact duplicates are dropped. The result
/// is sorted by (start, end) under the canonical point order.
#[must_use]
pub fn reduce(segments: &[Line]) -> Vec<Line> {
    let mut kept = keep_longest_per_carrier(segments);
    unique(&mut kept);
    debug!(
        input = segments.len(),
        output = kept.len(),
        "reduced arrangement"
    );
    kept
}

/// Of all segments leaving one point along one carrier line, only the
/// longest survives. First-seen order of the groups is preserved.
fn keep_longest_per_carrier(segments: &[Line]) -> Vec<Line> {
    let mut kept: Vec<Line> = Vec::with_capacity(segments.len());
    let mut by_carrier: HashMap<CarrierKey, usize> = HashMap::with_capacity(segments.len());

    for seg in segments {
        let (start, end) = if point_less(seg.end, seg.start) {
            (seg.end, seg.start)
        } else {
            (seg.start, seg.end)
        };
        let canonical = Line::new(start, end);
        let (m, _, defined) = slope(start, end);
        let key = CarrierKey {
            start_x: start.x.to_bits(),
            start_y: start.y.to_bits(),
            slope: if defined { m.to_bits() } else { 0 },
            slope_defined: defined,
        };

        match by_carrier.get(&key) {
            None => {
                by_carrier.insert(key, kept.len());
                kept.push(canonical);
            }
            Some(&idx) => {
                if canonical.length2() > kept[idx].length2() {
                    kept[idx] = canonical;
                }
            }
        }
    }
    kept
}

/// Sorts by (start, end) and drops adjacent tolerance-equal duplicates.
fn unique(segments: &mut Vec<Line>) {
    segments.sort_by(|a, b| point_cmp(a.start, b.start).then_with(|| point_cmp(a.end, b.end)));
    segments.dedup_by(|a, b| point_eq(a.start, b.start) && point_eq(a.end, b.end));
}
