//! Turns a brush stroke (or tap) plus the current word list into a
//! contiguous selected range with draggable start/end handles.

use lasso_config::selection::SelectionConfig;
use lasso_types::events::SelectionHandle;
use lasso_types::geometry::{Point, Rect};

use crate::words::SelectableWord;

/// Inclusive word-index range, invariant `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    pub fn single(index: usize) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    /// Span between two endpoints in either order.
    pub fn span(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

}

/// What a finalized gesture resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// Words were hit; the range covers [min hit, max hit] contiguously.
    Words(SelectionRange),
    /// No words were hit; the raw stroke is preserved for image fallback.
    Path(Vec<Point>),
    /// Degenerate gesture, nothing to act on.
    Empty,
}

pub struct SelectionEngine {
    brush_tolerance: f32,
    tap_slop: f32,
    words: Vec<SelectableWord>,
    stroke: Vec<Point>,
    range: Option<SelectionRange>,
    fallback_path: Option<Vec<Point>>,
}

impl SelectionEngine {
    pub fn new(config: &SelectionConfig) -> Self {
        Self {
            brush_tolerance: config.brush_tolerance_px,
            tap_slop: config.tap_slop_px,
            words: Vec::new(),
            stroke: Vec::new(),
            range: None,
            fallback_path: None,
        }
    }

    /// Replace the word list with one derived from a newer snapshot. A range
    /// that no longer fits the new list is cleared rather than left dangling.
    pub fn set_words(&mut self, words: Vec<SelectableWord>) {
        if let Some(range) = self.range
            && range.end >= words.len()
        {
            self.range = None;
        }
        self.words = words;
    }

    pub fn words(&self) -> &[SelectableWord] {
        &self.words
    }

    pub fn range(&self) -> Option<SelectionRange> {
        self.range
    }

    pub fn fallback_path(&self) -> Option<&[Point]> {
        self.fallback_path.as_deref()
    }

    /// Extend the live stroke. Cheap; called per input sample.
    pub fn on_stroke(&mut self, points: &[Point]) {
        self.stroke.extend_from_slice(points);
    }

    /// A tap selects exactly the word containing the point, or nothing.
    pub fn on_tap(&mut self, point: Point) -> SelectionOutcome {
        self.stroke.clear();
        self.fallback_path = None;
        match self.words.iter().find(|w| w.screen_rect.contains(point)) {
            Some(word) => {
                let range = SelectionRange::single(word.global_index);
                self.range = Some(range);
                SelectionOutcome::Words(range)
            }
            None => {
                self.range = None;
                SelectionOutcome::Empty
            }
        }
    }

    /// Finalize the live stroke into a selection. Near-zero-length strokes
    /// degrade to a tap at their first point.
    pub fn on_stroke_end(&mut self) -> SelectionOutcome {
        let stroke = std::mem::take(&mut self.stroke);
        let Some(&first) = stroke.first() else {
            return SelectionOutcome::Empty;
        };
        if path_length(&stroke) <= self.tap_slop {
            return self.on_tap(first);
        }

        let hits: Vec<usize> = self
            .words
            .iter()
            .filter(|w| stroke_hits_rect(&stroke, &w.screen_rect, self.brush_tolerance))
            .map(|w| w.global_index)
            .collect();

        match (hits.first(), hits.last()) {
            (Some(&min), Some(&max)) => {
                // Contiguous span, including words the brush skipped over.
                let range = SelectionRange::span(min, max);
                self.range = Some(range);
                self.fallback_path = None;
                SelectionOutcome::Words(range)
            }
            _ => {
                self.range = None;
                self.fallback_path = Some(stroke.clone());
                SelectionOutcome::Path(stroke)
            }
        }
    }

    /// Retarget one endpoint to the word whose screen center is nearest the
    /// drag point, then swap-normalize so `start <= end`. The other endpoint
    /// stays fixed unless no selection existed yet.
    pub fn drag_handle(&mut self, handle: SelectionHandle, point: Point) -> Option<SelectionRange> {
        let target = self.nearest_word_index(point)?;
        let range = match self.range {
            Some(range) => match handle {
                SelectionHandle::Start => SelectionRange::span(target, range.end),
                SelectionHandle::End => SelectionRange::span(range.start, target),
            },
            None => SelectionRange::single(target),
        };
        self.range = Some(range);
        Some(range)
    }

    /// Selected words joined with single spaces, in index order.
    pub fn selected_text(&self) -> Option<String> {
        let range = self.range?;
        let words = self.words.get(range.start..=range.end)?;
        Some(
            words
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    /// Drop all gesture and recognition state. Used on cancellation and
    /// overlay dismissal.
    pub fn clear(&mut self) {
        self.words.clear();
        self.stroke.clear();
        self.range = None;
        self.fallback_path = None;
    }

    fn nearest_word_index(&self, point: Point) -> Option<usize> {
        // Strictly-less keeps the first word on exact distance ties.
        let mut best: Option<(usize, f32)> = None;
        for word in &self.words {
            let distance = word.screen_rect.center().distance_to(point);
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((word.global_index, distance));
            }
        }
        best.map(|(index, _)| index)
    }
}

fn path_length(points: &[Point]) -> f32 {
    points
        .windows(2)
        .map(|pair| pair[0].distance_to(pair[1]))
        .sum()
}

/// A rect is hit when it lies within `tolerance` of the stroke polyline,
/// i.e. it intersects the stroke thickened by the brush tolerance.
fn stroke_hits_rect(stroke: &[Point], rect: &Rect, tolerance: f32) -> bool {
    let Some(bounds) = Rect::bounding(stroke) else {
        return false;
    };
    // Bounding-box reject first; most words are nowhere near the stroke.
    let reach = Rect::new(
        rect.x - tolerance,
        rect.y - tolerance,
        rect.width + 2.0 * tolerance,
        rect.height + 2.0 * tolerance,
    );
    if !bounds.intersects(&reach) {
        return false;
    }
    if stroke.len() == 1 {
        return point_rect_distance(stroke[0], rect) <= tolerance;
    }
    stroke
        .windows(2)
        .any(|seg| segment_rect_distance(seg[0], seg[1], rect) <= tolerance)
}

fn point_rect_distance(p: Point, rect: &Rect) -> f32 {
    let dx = (rect.x - p.x).max(p.x - rect.max_x()).max(0.0);
    let dy = (rect.y - p.y).max(p.y - rect.max_y()).max(0.0);
    (dx * dx + dy * dy).sqrt()
}

fn segment_rect_distance(a: Point, b: Point, rect: &Rect) -> f32 {
    if rect.contains(a) || rect.contains(b) {
        return 0.0;
    }
    let corners = [
        Point::new(rect.x, rect.y),
        Point::new(rect.max_x(), rect.y),
        Point::new(rect.max_x(), rect.max_y()),
        Point::new(rect.x, rect.max_y()),
    ];
    let mut min = f32::INFINITY;
    for i in 0..4 {
        let e1 = corners[i];
        let e2 = corners[(i + 1) % 4];
        if segments_intersect(a, b, e1, e2) {
            return 0.0;
        }
        min = min.min(segment_segment_distance(a, b, e1, e2));
    }
    min
}

fn segment_segment_distance(p1: Point, p2: Point, p3: Point, p4: Point) -> f32 {
    if segments_intersect(p1, p2, p3, p4) {
        return 0.0;
    }
    point_segment_distance(p1, p3, p4)
        .min(point_segment_distance(p2, p3, p4))
        .min(point_segment_distance(p3, p1, p2))
        .min(point_segment_distance(p4, p1, p2))
}

fn point_segment_distance(p: Point, a: Point, b: Point) -> f32 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq <= f32::EPSILON {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + t * abx, a.y + t * aby))
}

fn segments_intersect(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    let d1 = cross(p3, p4, p1);
    let d2 = cross(p3, p4, p2);
    let d3 = cross(p1, p2, p3);
    let d4 = cross(p1, p2, p4);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    (d1 == 0.0 && on_segment(p3, p4, p1))
        || (d2 == 0.0 && on_segment(p3, p4, p2))
        || (d3 == 0.0 && on_segment(p1, p2, p3))
        || (d4 == 0.0 && on_segment(p1, p2, p4))
}

fn cross(a: Point, b: Point, c: Point) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}
