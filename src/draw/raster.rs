//! Chunky-brush rasterization.
//!
//! Pure functions that turn points and a brush radius into pixel blocks on a
//! [`Canvas`]. Every brush stamp is built from 2x2 blocks, which gives strokes
//! their enlarged-pixel look. Nothing here keeps state or fails. Walks are
//! confined to [`WalkBounds`] around the canvas, and whatever still falls off
//! the canvas is clipped by the canvas itself.

use super::surface::{CANVAS_HEIGHT, CANVAS_WIDTH, Canvas};
use crate::util::Rect;

/// Edge length of one brush "pixel" in surface pixels.
pub const BRUSH_PIXEL_SIZE: i32 = 2;

/// How far past each canvas edge strokes and outlines are still walked.
///
/// Wider than the largest brush stamp, so nothing visible is lost.
pub const WALK_MARGIN: i32 = 2 * CANVAS_WIDTH;

/// Inclusive area rasterization walks over: the canvas grown by [`WALK_MARGIN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Default for WalkBounds {
    fn default() -> Self {
        Self::around(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

impl WalkBounds {
    /// Bounds around a `width` x `height` canvas.
    pub fn around(width: i32, height: i32) -> Self {
        Self {
            min_x: -WALK_MARGIN,
            min_y: -WALK_MARGIN,
            max_x: width.saturating_add(WALK_MARGIN),
            max_y: height.saturating_add(WALK_MARGIN),
        }
    }

    /// Bounds around `canvas`.
    pub fn of<C: Canvas + ?Sized>(canvas: &C) -> Self {
        Self::around(canvas.width(), canvas.height())
    }

    pub fn contains(&self, (x, y): (i32, i32)) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    /// Moves `point` onto the nearest position inside the bounds.
    pub fn clamp(&self, (x, y): (i32, i32)) -> (i32, i32) {
        (
            x.clamp(self.min_x, self.max_x),
            y.clamp(self.min_y, self.max_y),
        )
    }

    /// Cuts the segment `from -> to` down to the part inside the bounds
    /// (Liang-Barsky). Endpoints already inside are returned unchanged.
    ///
    /// Returns `None` when the segment misses the bounds entirely.
    pub fn clip_segment(
        &self,
        from: (i32, i32),
        to: (i32, i32),
    ) -> Option<((i32, i32), (i32, i32))> {
        if self.contains(from) && self.contains(to) {
            return Some((from, to));
        }

        let (x0, y0) = (f64::from(from.0), f64::from(from.1));
        let dx = f64::from(to.0) - x0;
        let dy = f64::from(to.1) - y0;
        let edges = [
            (-dx, x0 - f64::from(self.min_x)),
            (dx, f64::from(self.max_x) - x0),
            (-dy, y0 - f64::from(self.min_y)),
            (dy, f64::from(self.max_y) - y0),
        ];

        let (mut enter, mut exit) = (0.0_f64, 1.0_f64);
        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                enter = enter.max(t);
            } else {
                exit = exit.min(t);
            }
            if enter > exit {
                return None;
            }
        }

        let at = |t: f64| {
            self.clamp((
                (x0 + t * dx).round() as i32,
                (y0 + t * dy).round() as i32,
            ))
        };
        Some((at(enter), at(exit)))
    }
}

/// Stamps a filled disk of `radius` brush pixels centred on `(x, y)`.
///
/// Each offset `(i, j)` with `i² + j² <= radius²` becomes a
/// [`BRUSH_PIXEL_SIZE`] block at `(x + i * size, y + j * size)`.
pub fn stamp_brush<C: Canvas + ?Sized>(canvas: &mut C, x: i32, y: i32, radius: u32) {
    let r = radius as i32;
    let r_sq = r * r;
    for i in -r..=r {
        for j in -r..=r {
            if i * i + j * j <= r_sq {
                canvas.fill_block(
                    x.saturating_add(i * BRUSH_PIXEL_SIZE),
                    y.saturating_add(j * BRUSH_PIXEL_SIZE),
                    BRUSH_PIXEL_SIZE,
                    BRUSH_PIXEL_SIZE,
                );
            }
        }
    }
}

/// Integer lattice walk between two points (Bresenham).
///
/// Yields the start point first and the end point last. Consecutive points
/// differ by at most one unit on each axis. The error terms are kept in
/// `i64`, so any pair of `i32` endpoints is walked without overflow.
#[derive(Debug, Clone)]
pub struct LinePoints {
    x: i64,
    y: i64,
    x1: i64,
    y1: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

/// Returns the lattice points from `(x0, y0)` to `(x1, y1)` inclusive.
pub fn line_points(x0: i32, y0: i32, x1: i32, y1: i32) -> LinePoints {
    let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    LinePoints {
        x: x0,
        y: y0,
        x1,
        y1,
        dx,
        dy,
        sx: if x0 < x1 { 1 } else { -1 },
        sy: if y0 < y1 { 1 } else { -1 },
        err: dx - dy,
        done: false,
    }
}

impl Iterator for LinePoints {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        // Every visited coordinate lies between two i32 endpoints.
        let point = (self.x as i32, self.y as i32);
        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
            return Some(point);
        }

        let e2 = self.err * 2;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(point)
    }
}

/// Draws (or erases) a continuous stroke from `from` to `to`.
///
/// Every lattice point on the way is either brush-stamped or, when `erase` is
/// set, cleared as a `2 * radius` square centred on it. Only the part of the
/// segment inside [`WalkBounds::of`] the canvas is walked.
pub fn interpolate_stroke<C: Canvas + ?Sized>(
    canvas: &mut C,
    from: (i32, i32),
    to: (i32, i32),
    radius: u32,
    erase: bool,
) {
    let Some((from, to)) = WalkBounds::of(canvas).clip_segment(from, to) else {
        return;
    };
    let r = radius as i32;
    for (x, y) in line_points(from.0, from.1, to.0, to.1) {
        if erase {
            canvas.clear_region(x - r, y - r, r * 2, r * 2);
        } else {
            stamp_brush(canvas, x, y, radius);
        }
    }
}

/// Perimeter lattice points of the rectangle spanned by two corners.
///
/// Corners are first clamped into `bounds`; an edge outside them is moved
/// onto the border, where it stays off the canvas. Top and bottom edges come
/// first, then left and right; corners appear twice.
pub fn rectangle_outline_points(
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    bounds: WalkBounds,
) -> Vec<(i32, i32)> {
    let (x0, y0) = bounds.clamp((x0, y0));
    let (x1, y1) = bounds.clamp((x1, y1));
    let rect = Rect::from_corners(x0, y0, x1, y1);
    let mut points = Vec::with_capacity((rect.width as usize + rect.height as usize) * 2);
    for x in rect.x..=rect.right() {
        points.push((x, rect.y));
        points.push((x, rect.bottom()));
    }
    for y in rect.y..=rect.bottom() {
        points.push((rect.x, y));
        points.push((rect.right(), y));
    }
    points
}

/// Brush-stamps the outline of the rectangle spanned by two corners.
pub fn stroke_rectangle_outline<C: Canvas + ?Sized>(
    canvas: &mut C,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    radius: u32,
) {
    let bounds = WalkBounds::of(canvas);
    for (x, y) in rectangle_outline_points(x0, y0, x1, y1, bounds) {
        stamp_brush(canvas, x, y, radius);
    }
}

/// Lattice points within one pixel of the circle through `edge` around
/// `(cx, cy)`, restricted to `bounds`.
///
/// Only columns inside `bounds` are scanned, and per column only the rows
/// near the ring, so the cost does not grow with the ring's size.
pub fn circle_outline_points(
    cx: i32,
    cy: i32,
    edge: (i32, i32),
    bounds: WalkBounds,
) -> Vec<(i32, i32)> {
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    let dx = (i64::from(edge.0) - cx) as f64;
    let dy = (i64::from(edge.1) - cy) as f64;
    let ring = dx.hypot(dy);
    let reach = ring.ceil() as i64 + 1;
    let inner_sq = (ring - 1.0).max(0.0).powi(2);
    let outer_sq = (ring + 1.0).powi(2);

    let on_ring = |i: f64, j: f64| {
        let distance = (i * i + j * j).sqrt();
        distance >= ring - 1.0 && distance <= ring + 1.0
    };

    // Offsets from the centre that stay inside the bounds.
    let i_range = (-reach).max(i64::from(bounds.min_x) - cx)
        ..=reach.min(i64::from(bounds.max_x) - cx);
    let (j_low, j_high) = (i64::from(bounds.min_y) - cy, i64::from(bounds.max_y) - cy);

    let mut points = Vec::new();
    for i in i_range {
        let fi = i as f64;
        let fi_sq = fi * fi;
        // Absolute error in the squares grows with their magnitude; widen the
        // row window accordingly and let `on_ring` decide.
        let slack = (outer_sq + fi_sq) * 1e-12 + 1.0;
        let outer_rows = outer_sq - fi_sq + slack;
        if outer_rows < 0.0 {
            continue;
        }
        let rows_max = outer_rows.sqrt().ceil() as i64;
        let rows_min = (inner_sq - fi_sq - slack).max(0.0).sqrt().floor() as i64;

        let below = rows_min.max(1).max(-j_high)..=rows_max.min(-j_low);
        let above = rows_min.max(j_low)..=rows_max.min(j_high);
        for j in below.rev().map(|a| -a).chain(above) {
            if on_ring(fi, j as f64) {
                points.push(((cx + i) as i32, (cy + j) as i32));
            }
        }
    }
    points
}

/// Brush-stamps a one-pixel-thick ring centred on `(cx, cy)` passing through `edge`.
pub fn stroke_circle_outline<C: Canvas + ?Sized>(
    canvas: &mut C,
    cx: i32,
    cy: i32,
    edge: (i32, i32),
    radius: u32,
) {
    let bounds = WalkBounds::of(canvas);
    for (x, y) in circle_outline_points(cx, cy, edge, bounds) {
        stamp_brush(canvas, x, y, radius);
    }
}

/// Draws the thin, un-interpolated segment used by the line tool.
pub fn stroke_line_segment<C: Canvas + ?Sized>(canvas: &mut C, x0: i32, y0: i32, x1: i32, y1: i32) {
    canvas.stroke_segment(x0, y0, x1, y1);
}

/// Draws committed text with its baseline at `(x, y)`.
pub fn draw_text<C: Canvas + ?Sized>(canvas: &mut C, x: i32, y: i32, text: &str) {
    canvas.fill_text(x, y, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RasterSurface;
    use std::collections::HashSet;

    #[derive(Debug, PartialEq, Eq)]
    enum Op {
        Fill(i32, i32, i32, i32),
        Clear(i32, i32, i32, i32),
        Segment(i32, i32, i32, i32),
        Text(i32, i32, String),
    }

    #[derive(Default)]
    struct RecordingCanvas {
        ops: Vec<Op>,
    }

    impl Canvas for RecordingCanvas {
        fn width(&self) -> i32 {
            576
        }
        fn height(&self) -> i32 {
            576
        }
        fn fill_block(&mut self, x: i32, y: i32, width: i32, height: i32) {
            self.ops.push(Op::Fill(x, y, width, height));
        }
        fn clear_region(&mut self, x: i32, y: i32, width: i32, height: i32) {
            self.ops.push(Op::Clear(x, y, width, height));
        }
        fn stroke_segment(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
            self.ops.push(Op::Segment(x0, y0, x1, y1));
        }
        fn fill_text(&mut self, x: i32, y: i32, text: &str) {
            self.ops.push(Op::Text(x, y, text.to_string()));
        }
    }

    #[test]
    fn line_points_are_contiguous_and_hit_both_endpoints() {
        let ends = [
            (0, 0),
            (7, 3),
            (-5, 12),
            (13, -13),
            (0, 9),
            (-8, 0),
            (1, 1),
            (-3, -11),
        ];
        for &start in &ends {
            for &end in &ends {
                let points: Vec<_> = line_points(start.0, start.1, end.0, end.1).collect();
                assert_eq!(points.first(), Some(&start), "{start:?} -> {end:?}");
                assert_eq!(points.last(), Some(&end), "{start:?} -> {end:?}");
                for pair in points.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    assert!(
                        (a.0 - b.0).abs() <= 1 && (a.1 - b.1).abs() <= 1 && a != b,
                        "gap between {a:?} and {b:?} on {start:?} -> {end:?}"
                    );
                }
                let expected_len = (end.0 - start.0).abs().max((end.1 - start.1).abs()) + 1;
                assert_eq!(points.len() as i32, expected_len);
            }
        }
    }

    #[test]
    fn zero_length_line_yields_single_point() {
        let points: Vec<_> = line_points(4, 4, 4, 4).collect();
        assert_eq!(points, vec![(4, 4)]);
    }

    #[test]
    fn stamp_brush_fills_disk_of_blocks() {
        let mut canvas = RecordingCanvas::default();
        stamp_brush(&mut canvas, 10, 10, 3);

        // Lattice points inside a radius-3 disk.
        assert_eq!(canvas.ops.len(), 29);
        assert!(canvas.ops.contains(&Op::Fill(10, 10, 2, 2)));
        assert!(canvas.ops.contains(&Op::Fill(16, 10, 2, 2)));
        assert!(canvas.ops.contains(&Op::Fill(10, 4, 2, 2)));
        assert!(!canvas.ops.contains(&Op::Fill(16, 16, 2, 2)));
    }

    #[test]
    fn radius_zero_stamp_is_single_block() {
        let mut canvas = RecordingCanvas::default();
        stamp_brush(&mut canvas, 3, 4, 0);
        assert_eq!(canvas.ops, vec![Op::Fill(3, 4, 2, 2)]);
    }

    #[test]
    fn erase_stroke_clears_squares_without_stamping() {
        let mut canvas = RecordingCanvas::default();
        interpolate_stroke(&mut canvas, (10, 10), (12, 10), 3, true);

        assert_eq!(
            canvas.ops,
            vec![
                Op::Clear(7, 7, 6, 6),
                Op::Clear(8, 7, 6, 6),
                Op::Clear(9, 7, 6, 6),
            ]
        );
    }

    #[test]
    fn draw_stroke_stamps_every_lattice_point() {
        let mut canvas = RecordingCanvas::default();
        interpolate_stroke(&mut canvas, (0, 0), (3, 1), 0, false);

        let fills: Vec<_> = canvas
            .ops
            .iter()
            .map(|op| match op {
                Op::Fill(x, y, _, _) => (*x, *y),
                other => panic!("unexpected op {other:?}"),
            })
            .collect();
        assert_eq!(fills, line_points(0, 0, 3, 1).collect::<Vec<_>>());
    }

    #[test]
    fn rectangle_outline_covers_perimeter_only() {
        let points: HashSet<_> = rectangle_outline_points(5, 5, 20, 15, WalkBounds::default())
            .into_iter()
            .collect();

        for x in 5..=20 {
            assert!(points.contains(&(x, 5)));
            assert!(points.contains(&(x, 15)));
        }
        for y in 5..=15 {
            assert!(points.contains(&(5, y)));
            assert!(points.contains(&(20, y)));
        }
        for &(x, y) in &points {
            assert!(x == 5 || x == 20 || y == 5 || y == 15, "interior point {x},{y}");
        }
        assert_eq!(points.len(), 2 * 16 + 2 * 9);
    }

    #[test]
    fn rectangle_outline_ignores_drag_direction() {
        let forward: HashSet<_> = rectangle_outline_points(5, 5, 20, 15, WalkBounds::default())
            .into_iter()
            .collect();
        let backward: HashSet<_> = rectangle_outline_points(20, 15, 5, 5, WalkBounds::default())
            .into_iter()
            .collect();
        assert_eq!(forward, backward);
    }

    #[test]
    fn circle_outline_points_lie_on_ring() {
        let points = circle_outline_points(100, 100, (110, 100), WalkBounds::default());
        assert!(!points.is_empty());
        for &(x, y) in &points {
            let d = (((x - 100).pow(2) + (y - 100).pow(2)) as f64).sqrt();
            assert!((9.0..=11.0).contains(&d), "{x},{y} at distance {d}");
        }
        assert!(points.contains(&(110, 100)));
        assert!(points.contains(&(100, 90)));
        assert!(!points.contains(&(100, 100)));
    }

    #[test]
    fn degenerate_circle_stamps_around_centre() {
        let points = circle_outline_points(50, 50, (50, 50), WalkBounds::default());
        assert!(points.contains(&(50, 50)));
        assert!(points.contains(&(51, 50)));
        assert!(!points.contains(&(52, 50)));
    }

    #[test]
    fn line_points_walk_far_endpoints_without_overflow() {
        let mut points = line_points(i32::MIN, 0, i32::MAX, 1);
        assert_eq!(points.next(), Some((i32::MIN, 0)));
        assert_eq!(points.next(), Some((i32::MIN + 1, 0)));

        let tail: Vec<_> = line_points(i32::MAX - 2, i32::MIN, i32::MAX, i32::MIN + 2).collect();
        assert_eq!(
            tail,
            vec![
                (i32::MAX - 2, i32::MIN),
                (i32::MAX - 1, i32::MIN + 1),
                (i32::MAX, i32::MIN + 2)
            ]
        );
    }

    #[test]
    fn clip_segment_keeps_inner_segments_and_drops_misses() {
        let bounds = WalkBounds::default();
        assert_eq!(
            bounds.clip_segment((3, 4), (500, 90)),
            Some(((3, 4), (500, 90)))
        );
        assert_eq!(
            bounds.clip_segment((i32::MIN, 10), (i32::MAX, 10)),
            Some(((-WALK_MARGIN, 10), (576 + WALK_MARGIN, 10)))
        );
        assert_eq!(bounds.clip_segment((i32::MIN, 10), (i32::MIN, 10)), None);
        assert_eq!(bounds.clip_segment((-5000, -5000), (5000, -4000)), None);
    }

    #[test]
    fn strokes_with_extreme_coordinates_are_clipped() {
        let mut surface = RasterSurface::printer_canvas().expect("surface");
        interpolate_stroke(&mut surface, (i32::MIN, 0), (i32::MAX, 0), 1, false);
        assert!(surface.is_painted(0, 0));
        assert!(surface.is_painted(300, 0));
        assert!(surface.is_painted(575, 1));
        assert!(!surface.is_painted(300, 10));

        let mut canvas = RecordingCanvas::default();
        interpolate_stroke(&mut canvas, (i32::MIN, 0), (i32::MAX, 0), 1, true);
        assert!(!canvas.ops.is_empty());
        assert!(canvas.ops.iter().all(|op| matches!(
            op,
            Op::Clear(x, -1, 2, 2) if (-WALK_MARGIN - 1..=576 + WALK_MARGIN).contains(x)
        )));

        // Ring far larger than the canvas, missing it entirely.
        let mut canvas = RecordingCanvas::default();
        stroke_circle_outline(&mut canvas, i32::MIN, 0, (i32::MAX, 0), 1);
        assert!(canvas.ops.is_empty());

        // Ring whose arc crosses the canvas as a near-vertical line at x = 0.
        let mut surface = RasterSurface::printer_canvas().expect("surface");
        stroke_circle_outline(&mut surface, i32::MIN, 0, (0, 0), 1);
        assert!(surface.is_painted(0, 0));
        assert!(surface.is_painted(0, 400));
        assert!(!surface.is_painted(20, 400));

        let mut surface = RasterSurface::printer_canvas().expect("surface");
        stroke_rectangle_outline(&mut surface, i32::MIN, 100, i32::MAX, i32::MAX, 1);
        assert!(surface.is_painted(0, 100));
        assert!(surface.is_painted(575, 100));
        assert!(!surface.is_painted(300, 300));
    }

    #[test]
    fn line_segment_and_text_delegate_to_canvas() {
        let mut canvas = RecordingCanvas::default();
        stroke_line_segment(&mut canvas, 1, 2, 30, 40);
        draw_text(&mut canvas, 7, 60, "hi");
        assert_eq!(
            canvas.ops,
            vec![Op::Segment(1, 2, 30, 40), Op::Text(7, 60, "hi".to_string())]
        );
    }

    #[test]
    fn rectangle_outline_leaves_interior_blank_on_surface() {
        let mut surface = RasterSurface::printer_canvas().expect("surface");
        stroke_rectangle_outline(&mut surface, 100, 100, 200, 180, 3);

        assert!(surface.is_painted(100, 100));
        assert!(surface.is_painted(150, 180));
        assert!(surface.is_painted(200, 140));
        assert!(!surface.is_painted(150, 140));
    }

    #[test]
    fn circle_outline_leaves_centre_blank_on_surface() {
        let mut surface = RasterSurface::printer_canvas().expect("surface");
        stroke_circle_outline(&mut surface, 300, 300, (300, 360), 1);

        assert!(surface.is_painted(300, 360));
        assert!(surface.is_painted(240, 300));
        assert!(!surface.is_painted(300, 300));
    }
}
