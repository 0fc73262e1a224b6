//! Sweep-line intersection detection over a set of segments.
//!
//! Endpoint events are processed left to right under the canonical point
//! order, maintaining an unordered set of the segments whose x-range
//! covers the sweep position. Each newly active segment is tested against
//! every active segment with an overlapping y-interval, so every meeting
//! point of two segments (proper crossings, endpoint touches and the
//! endpoints of collinear overlaps) is reported exactly once per
//! unordered pair.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::trace;

use crate::error::{Result, SweepError};
use crate::geometry::{Extent, Line};
use crate::math::cmp::{point_cmp, point_eq, point_less};
use crate::math::intersect::{segment_intersection, SegmentIntersection};
use crate::math::Point2;

/// Error type an intersection callback may fail with.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Cooperative cancellation signal, checked once per sweep event.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; the sweep aborts at its next event.
    pub fn cancel(&self) {
        self.0.store(true, std::sync::atomic::Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(std::sync::atomic::Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy)]
struct Event {
    segment: usize,
    point: Point2,
    is_left: bool,
}

/// Endpoint event queue over a set of segments.
pub struct EventQueue {
    segments: Vec<Line>,
    events: Vec<Event>,
}

impl EventQueue {
    #[must_use]
    pub fn new(segments: Vec<Line>) -> Self {
        let mut events = Vec::with_capacity(segments.len() * 2);
        for (i, seg) in segments.iter().enumerate() {
            let (left, right) = if point_less(seg.end, seg.start) {
                (seg.end, seg.start)
            } else {
                (seg.start, seg.end)
            };
            events.push(Event {
                segment: i,
                point: left,
                is_left: true,
            });
            events.push(Event {
                segment: i,
                point: right,
                is_left: false,
            });
        }
        // Entry events precede exit events at the same point so a touch
        // between an entering and a leaving segment is still observed.
        events.sort_by(|a, b| {
            point_cmp(a.point, b.point).then_with(|| b.is_left.cmp(&a.is_left))
        });
        Self { segments, events }
    }

    #[must_use]
    pub fn segments(&self) -> &[Line] {
        &self.segments
    }

    /// Sweeps the segments, reporting every point at which two segments
    /// meet, once per unordered pair (a collinear overlap reports both
    /// of its endpoints). The callback receives the indexes of the two
    /// segments and the meeting point.
    ///
    /// # Errors
    ///
    /// [`SweepError::Cancelled`] when the token fires between events;
    /// [`SweepError::Callback`] when the callback fails, aborting the
    /// sweep immediately.
    pub fn find_intersects<F>(&self, cancel: &CancelToken, mut report: F) -> Result<()>
    where
        F: FnMut(usize, usize, Point2) -> std::result::Result<(), CallbackError>,
    {
        let mut active: Vec<usize> = Vec::new();

        for ev in &self.events {
            if cancel.is_cancelled() {
                return Err(SweepError::Cancelled.into());
            }

            if !ev.is_left {
                if let Some(pos) = active.iter().position(|&i| i == ev.segment) {
                    active.remove(pos);
                }
                continue;
            }

            let seg = self.segments[ev.segment];
            let (seg_min_y, seg_max_y) = y_interval(&seg);

            for &other in &active {
                let o = self.segments[other];
                let (o_min_y, o_max_y) = y_interval(&o);
                if o_min_y > seg_max_y || o_max_y < seg_min_y {
                    continue;
                }
                match segment_intersection(seg.start, seg.end, o.start, o.end) {
                    SegmentIntersection::None => {}
                    SegmentIntersection::Point(pt) => {
                        trace!(src = ev.segment, dst = other, x = pt.x, y = pt.y, "intersection");
                        report(ev.segment, other, pt).map_err(SweepError::Callback)?;
                    }
                    SegmentIntersection::Overlap(a, b) => {
                        trace!(src = ev.segment, dst = other, "collinear overlap");
                        report(ev.segment, other, a).map_err(SweepError::Callback)?;
                        report(ev.segment, other, b).map_err(SweepError::Callback)?;
                    }
                }
            }

            active.push(ev.segment);
        }
        Ok(())
    }
}

fn y_interval(seg: &Line) -> (f64, f64) {
    if seg.start.y <= seg.end.y {
        (seg.start.y, seg.end.y)
    } else {
        (seg.end.y, seg.start.y)
    }
}

/// Splits every segment at its reported intersection points, producing a
/// planar arrangement: no two returned segments have intersecting
/// interiors. Sub-segments not fully contained by a concrete `clipbox`
/// are discarded.
///
/// # Errors
///
/// Propagates sweep cancellation.
pub fn split_segments(
    cancel: &CancelToken,
    clipbox: &Extent,
    segments: &[Line],
) -> Result<Vec<Line>> {
    let queue = EventQueue::new(segments.to_vec());
    let mut cuts: Vec<Vec<Point2>> = vec![Vec::new(); segments.len()];

    queue.find_intersects(cancel, |src, dst, pt| {
        if !is_endpoint(&segments[src], pt) {
            cuts[src].push(pt);
        }
        if !is_endpoint(&segments[dst], pt) {
            cuts[dst].push(pt);
        }
        Ok(())
    })?;

    let mut split = Vec::with_capacity(segments.len());
    for (i, seg) in segments.iter().enumerate() {
        let (left, right) = if point_less(seg.end, seg.start) {
            (seg.end, seg.start)
        } else {
            (seg.start, seg.end)
        };
        cuts[i].sort_by(|a, b| point_cmp(*a, *b));

        let mut prev = left;
        for &cut in &cuts[i] {
            // Adjacent tolerance-equal cuts collapse into one.
            if point_eq(prev, cut) {
                continue;
            }
            push_contained(&mut split, clipbox, prev, cut);
            prev = cut;
        }
        if !point_eq(prev, right) {
            push_contained(&mut split, clipbox, prev, right);
        }
    }
    Ok(split)
}

fn push_contained(out: &mut Vec<Line>, clipbox: &Extent, a: Point2, b: Point2) {
    let line = Line::new(a, b);
    if clipbox.contains_line(&line) {
        out.push(line);
    }
}

fn is_endpoint(seg: &Line, pt: Point2) -> bool {
    point_eq(pt, seg.start) || point_eq(pt, seg.end)
}
