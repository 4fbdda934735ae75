//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Per-strip classification, trimming, span construction and perpendicular
//! range folding (spec.md §4.4 steps 5–8).

use crate::geometry::Position;
use crate::sweep::rings::{Ring, Segment};

/// Tag of a scalar against an ordered interval (spec.md §3, "Range relation").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointTag {
    Smaller,
    InRange,
    Larger,
}

fn classify(value: f64, lo: f64, hi: f64) -> EndpointTag {
    if value < lo {
        EndpointTag::Smaller
    } else if value > hi {
        EndpointTag::Larger
    } else {
        EndpointTag::InRange
    }
}

/// A tile-aligned scan line's defining interval on the sweep (dim1) axis.
#[derive(Debug, Clone, Copy)]
pub struct Strip {
    pub lo: f64,
    pub hi: f64,
    /// Axis index the strip's own interval is measured on: 1 (north) when
    /// sweeping horizontally (`isWide`), 0 (east) when sweeping vertically.
    pub dim1_axis: usize,
}

impl Strip {
    fn dim2_axis(&self) -> usize {
        1 - self.dim1_axis
    }

    fn interpolate(&self, p0: Position, p1: Position, boundary: f64) -> Position {
        let d1_0 = p0.on_axis(self.dim1_axis);
        let d1_1 = p1.on_axis(self.dim1_axis);
        let d2_0 = p0.on_axis(self.dim2_axis());
        let d2_1 = p1.on_axis(self.dim2_axis());
        let denom = d1_1 - d1_0;
        let t = if denom.abs() < f64::EPSILON {
            0.0
        } else {
            (boundary - d1_0) / denom
        };
        let d2 = d2_0 + t * (d2_1 - d2_0);
        if self.dim1_axis == 0 {
            Position::from_axes(boundary, d2)
        } else {
            Position::from_axes(d2, boundary)
        }
    }

    /// Trim `seg` to this strip's interval. Returns `None` when the segment
    /// lies entirely outside the strip on one side, or trims to a single
    /// point. Otherwise returns the trimmed segment plus the *original*
    /// (pre-trim) endpoint tags, needed later for crossing classification.
    fn trim(&self, seg: Segment) -> Option<TrimmedSegment> {
        let tag0 = classify(seg.start.on_axis(self.dim1_axis), self.lo, self.hi);
        let tag1 = classify(seg.end.on_axis(self.dim1_axis), self.lo, self.hi);
        if tag0 != EndpointTag::InRange && tag0 == tag1 {
            return None;
        }
        let start = if tag0 == EndpointTag::InRange {
            seg.start
        } else {
            let boundary = if tag0 == EndpointTag::Smaller { self.lo } else { self.hi };
            self.interpolate(seg.start, seg.end, boundary)
        };
        let end = if tag1 == EndpointTag::InRange {
            seg.end
        } else {
            let boundary = if tag1 == EndpointTag::Smaller { self.lo } else { self.hi };
            self.interpolate(seg.start, seg.end, boundary)
        };
        if start == end {
            return None;
        }
        Some(TrimmedSegment { start, end, tag0, tag1 })
    }
}

#[derive(Debug, Clone, Copy)]
struct TrimmedSegment {
    start: Position,
    end: Position,
    tag0: EndpointTag,
    tag1: EndpointTag,
}

/// A maximal run of trimmed, strip-touching segments.
#[derive(Debug, Clone)]
pub struct Span {
    pub is_crossing: bool,
    pub start_tag: EndpointTag,
    pub end_tag: EndpointTag,
    /// The dim2 coordinate of every point along the span, in traversal order.
    pub dim2_values: Vec<f64>,
}

impl Span {
    fn from_segments(segments: &[TrimmedSegment], dim2_axis: usize) -> Self {
        let mut dim2_values = Vec::with_capacity(segments.len() + 1);
        dim2_values.push(segments[0].start.on_axis(dim2_axis));
        for s in segments {
            dim2_values.push(s.end.on_axis(dim2_axis));
        }
        let start_tag = segments[0].tag0;
        let end_tag = segments[segments.len() - 1].tag1;
        let is_crossing = matches!(
            (start_tag, end_tag),
            (EndpointTag::Smaller, EndpointTag::Larger) | (EndpointTag::Larger, EndpointTag::Smaller)
        );
        Span {
            is_crossing,
            start_tag,
            end_tag,
            dim2_values,
        }
    }

    pub fn dim2_start(&self) -> f64 {
        self.dim2_values[0]
    }

    pub fn dim2_end(&self) -> f64 {
        *self.dim2_values.last().unwrap()
    }

    pub fn dim2_min_max(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in &self.dim2_values {
            min = min.min(v);
            max = max.max(v);
        }
        (min, max)
    }
}

/// Build the spans for one ring within one strip (spec.md §4.4 step 7).
pub fn spans_in_strip(ring: &Ring, strip: &Strip) -> Vec<Span> {
    let dim2_axis = strip.dim2_axis();
    let trimmed: Vec<TrimmedSegment> = ring.segments.iter().filter_map(|s| strip.trim(*s)).collect();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut spans: Vec<Vec<TrimmedSegment>> = Vec::new();
    let mut current: Vec<TrimmedSegment> = Vec::new();
    for seg in trimmed {
        let ends_span = seg.tag1 != EndpointTag::InRange;
        current.push(seg);
        if ends_span {
            spans.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        if ring.closed {
            if let Some(first) = spans.first_mut() {
                let mut combined = current;
                combined.extend(std::mem::take(first));
                *first = combined;
            } else {
                spans.push(current);
            }
        } else {
            spans.push(current);
        }
    }

    spans
        .into_iter()
        .map(|segs| Span::from_segments(&segs, dim2_axis))
        .collect()
}

/// Merge overlapping/touching `[start, end]` ranges (spec.md §4.4 step 8,
/// final bullet).
pub fn merge_ranges(mut ranges: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    if ranges.is_empty() {
        return ranges;
    }
    ranges.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    let mut merged = Vec::with_capacity(ranges.len());
    let mut current = ranges[0];
    for &(start, end) in &ranges[1..] {
        if start <= current.1 {
            current.1 = current.1.max(end);
        } else {
            merged.push(current);
            current = (start, end);
        }
    }
    merged.push(current);
    merged
}

/// A ring's non-crossing spans, which contribute their dim2 extent directly
/// (spec.md §4.4 step 8, polygon case). Only the outer ring fills this way --
/// a hole's non-crossing spans carry no area of their own, only the crossing
/// spans handled by `fold_crossing_spans` below.
pub fn non_crossing_ring_ranges(spans: &[Span], is_outer_ring: bool) -> Vec<(f64, f64)> {
    if !is_outer_ring {
        return Vec::new();
    }
    spans.iter().filter(|s| !s.is_crossing).map(Span::dim2_min_max).collect()
}

/// Fold a polygon's crossing spans, pooled across *every* ring of the strip,
/// into perpendicular coverage ranges via the even-odd fill rule (spec.md
/// §4.4 step 8). Holes must not be folded independently and then unioned:
/// their crossing spans join the outer ring's in one combined sort before
/// consecutive crossings are paired, so a hole's boundary correctly splits
/// the outer ring's range instead of being absorbed as a subset of it.
pub fn fold_crossing_spans(spans: &[&Span]) -> Vec<(f64, f64)> {
    let mut crossing: Vec<&Span> = spans.to_vec();
    crossing.sort_by(|a, b| crossing_sort_key(a).partial_cmp(&crossing_sort_key(b)).unwrap());

    let mut ranges = Vec::new();
    for pair in crossing.chunks(2) {
        if let [a, b] = pair {
            let s = crossing_sort_key(a);
            let e = crossing_sort_key(b);
            ranges.push((s.min(e), s.max(e)));
        } else {
            log::warn!("odd number of crossing spans in strip; dropping unmatched span");
        }
    }
    ranges
}

fn crossing_sort_key(span: &Span) -> f64 {
    if span.start_tag == EndpointTag::Smaller {
        span.dim2_start()
    } else if span.end_tag == EndpointTag::Smaller {
        span.dim2_end()
    } else if span.start_tag == EndpointTag::Larger {
        span.dim2_start()
    } else {
        span.dim2_end()
    }
}

/// Fold a line string's trimmed segments into perpendicular ranges
/// (spec.md §4.4 step 8, line-string case): every in-strip segment
/// contributes its own range directly, no span/crossing logic involved.
pub fn line_string_ranges(ring: &Ring, strip: &Strip) -> Vec<(f64, f64)> {
    let dim2_axis = strip.dim2_axis();
    ring.segments
        .iter()
        .filter_map(|s| strip.trim(*s))
        .map(|s| {
            let a = s.start.on_axis(dim2_axis);
            let b = s.end.on_axis(dim2_axis);
            (a.min(b), a.max(b))
        })
        .collect()
}
