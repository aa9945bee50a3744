//! Orthogonal edge routing.
//!
//! Edge paths are restricted to horizontal/vertical segments (Manhattan
//! style): a stub out of each anchor side and a mid-line between the
//! stubs. Degenerate configurations get explicit branches — aligned
//! anchors still route through a visible detour, and backward targets
//! detour outward around the node bodies before turning back. Corners may
//! be rounded with a small fixed-radius quadratic join for polish; the
//! join's endpoints always lie on the two axis-aligned segments, so
//! rounding never introduces a diagonal segment.
//!
//! Paths carry no cached state: every position change recomputes from the
//! new coordinates.

use egui::{Pos2, Vec2};

/// Stub length out of an anchor before the first turn.
const STUB: f32 = 20.0;
/// Jog depth used when both anchors share a row/column.
const DETOUR: f32 = 14.0;
/// Clearance used when a backward route must clear the node bodies.
const BACKWARD_CLEARANCE: f32 = 48.0;
/// Segments per rounded corner.
const CORNER_SEGMENTS: usize = 4;

/// Which side of a node an anchor leaves from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Outward unit direction.
    pub fn direction(self) -> Vec2 {
        match self {
            Side::Left => Vec2::new(-1.0, 0.0),
            Side::Right => Vec2::new(1.0, 0.0),
            Side::Top => Vec2::new(0.0, -1.0),
            Side::Bottom => Vec2::new(0.0, 1.0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }
}

/// Route an axis-aligned polyline from `source` to `target`.
///
/// Every consecutive point pair shares an x or a y coordinate. The
/// polyline starts exactly at `source` and ends exactly at `target`.
pub fn route(source: Pos2, source_side: Side, target: Pos2, target_side: Side) -> Vec<Pos2> {
    let p1 = source + source_side.direction() * STUB;
    let p2 = target + target_side.direction() * STUB;

    let mut points = vec![source];
    match (source_side.is_horizontal(), target_side.is_horizontal()) {
        (true, true) => route_horizontal(source, source_side, target, &mut points),
        (false, false) => route_vertical(source, source_side, target, &mut points),
        (true, false) => {
            // Horizontal launch into a vertical landing: corner where the
            // stub row meets the landing column.
            points.push(p1);
            points.push(Pos2::new(p2.x, p1.y));
            points.push(p2);
        }
        (false, true) => {
            points.push(p1);
            points.push(Pos2::new(p1.x, p2.y));
            points.push(p2);
        }
    }
    points.push(target);
    dedup_collinear(points)
}

/// Both anchors on left/right sides: mid-line in x.
fn route_horizontal(source: Pos2, source_side: Side, target: Pos2, points: &mut Vec<Pos2>) {
    // Normalize so the source heads in +x; mirror for a Left launch.
    let sign = if source_side == Side::Right { 1.0 } else { -1.0 };
    let out_x = source.x + sign * STUB;
    let back_x = target.x - sign * STUB;
    let forward = sign * (back_x - out_x) >= 0.0;

    if forward {
        if (source.y - target.y).abs() < f32::EPSILON {
            // Same row: jog through a vertical detour instead of
            // degenerating to a bare horizontal run.
            let jog_y = source.y + DETOUR;
            points.push(Pos2::new(out_x, source.y));
            points.push(Pos2::new(out_x, jog_y));
            points.push(Pos2::new(back_x, jog_y));
            points.push(Pos2::new(back_x, target.y));
        } else {
            let mid_x = (out_x + back_x) * 0.5;
            points.push(Pos2::new(mid_x, source.y));
            points.push(Pos2::new(mid_x, target.y));
        }
    } else {
        // Backward (or same-column) target: detour outward past the
        // source stub, around the node extents, back into the target stub.
        let mid_y = if (target.y - source.y).abs() >= 2.0 * BACKWARD_CLEARANCE {
            (source.y + target.y) * 0.5
        } else {
            source.y.max(target.y) + BACKWARD_CLEARANCE
        };
        points.push(Pos2::new(out_x, source.y));
        points.push(Pos2::new(out_x, mid_y));
        points.push(Pos2::new(back_x, mid_y));
        points.push(Pos2::new(back_x, target.y));
    }
}

/// Both anchors on top/bottom sides: mid-line in y (transpose of the
/// horizontal case).
fn route_vertical(source: Pos2, source_side: Side, target: Pos2, points: &mut Vec<Pos2>) {
    let sign = if source_side == Side::Bottom { 1.0 } else { -1.0 };
    let out_y = source.y + sign * STUB;
    let back_y = target.y - sign * STUB;
    let forward = sign * (back_y - out_y) >= 0.0;

    if forward {
        if (source.x - target.x).abs() < f32::EPSILON {
            let jog_x = source.x + DETOUR;
            points.push(Pos2::new(source.x, out_y));
            points.push(Pos2::new(jog_x, out_y));
            points.push(Pos2::new(jog_x, back_y));
            points.push(Pos2::new(target.x, back_y));
        } else {
            let mid_y = (out_y + back_y) * 0.5;
            points.push(Pos2::new(source.x, mid_y));
            points.push(Pos2::new(target.x, mid_y));
        }
    } else {
        let mid_x = if (target.x - source.x).abs() >= 2.0 * BACKWARD_CLEARANCE {
            (source.x + target.x) * 0.5
        } else {
            source.x.max(target.x) + BACKWARD_CLEARANCE
        };
        points.push(Pos2::new(source.x, out_y));
        points.push(Pos2::new(mid_x, out_y));
        points.push(Pos2::new(mid_x, back_y));
        points.push(Pos2::new(target.x, back_y));
    }
}

/// Live preview while dragging a not-yet-committed connection: the same
/// mid-line scheme from the originating handle to the exact pointer
/// position, recomputed every frame.
pub fn preview(origin: Pos2, origin_side: Side, pointer: Pos2) -> Vec<Pos2> {
    route(origin, origin_side, pointer, origin_side.opposite())
}

/// Round the corners of an axis-aligned polyline with small quadratic
/// joins. Each join enters and leaves along the original segments, so the
/// result still moves along a single axis before and after every curve.
pub fn rounded(points: &[Pos2], radius: f32) -> Vec<Pos2> {
    if points.len() < 3 || radius < 1.0 {
        return points.to_vec();
    }

    let mut result = Vec::with_capacity(points.len() * CORNER_SEGMENTS);
    result.push(points[0]);

    for i in 1..points.len() - 1 {
        let prev = points[i - 1];
        let curr = points[i];
        let next = points[i + 1];

        let dist_in = (curr - prev).length();
        let dist_out = (next - curr).length();
        let max_radius = (dist_in.min(dist_out) * 0.5).min(radius);
        if max_radius < 1.0 {
            result.push(curr);
            continue;
        }

        let dir_in = (curr - prev) / dist_in;
        let dir_out = (next - curr) / dist_out;
        let arc_start = curr - dir_in * max_radius;
        let arc_end = curr + dir_out * max_radius;

        result.push(arc_start);
        for j in 1..CORNER_SEGMENTS {
            let t = j as f32 / CORNER_SEGMENTS as f32;
            result.push(quadratic_bezier(arc_start, curr, arc_end, t));
        }
        result.push(arc_end);
    }

    if let Some(last) = points.last() {
        result.push(*last);
    }
    result
}

fn quadratic_bezier(p0: Pos2, p1: Pos2, p2: Pos2, t: f32) -> Pos2 {
    let mt = 1.0 - t;
    Pos2::new(
        mt * mt * p0.x + 2.0 * mt * t * p1.x + t * t * p2.x,
        mt * mt * p0.y + 2.0 * mt * t * p1.y + t * t * p2.y,
    )
}

/// Whether every consecutive pair of points shares an x or a y.
pub fn is_orthogonal(points: &[Pos2]) -> bool {
    points.windows(2).all(|w| {
        (w[0].x - w[1].x).abs() < 1e-3 || (w[0].y - w[1].y).abs() < 1e-3
    })
}

/// Drop zero-length segments and merge runs along the same axis.
fn dedup_collinear(points: Vec<Pos2>) -> Vec<Pos2> {
    let mut out: Vec<Pos2> = Vec::with_capacity(points.len());
    for p in points {
        if let Some(last) = out.last() {
            if (last.x - p.x).abs() < f32::EPSILON && (last.y - p.y).abs() < f32::EPSILON {
                continue;
            }
            if out.len() >= 2 {
                let a = out[out.len() - 2];
                let b = *last;
                let same_x = (a.x - b.x).abs() < f32::EPSILON && (b.x - p.x).abs() < f32::EPSILON;
                let same_y = (a.y - b.y).abs() < f32::EPSILON && (b.y - p.y).abs() < f32::EPSILON;
                if same_x || same_y {
                    out.pop();
                }
            }
        }
        out.push(p);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn has_vertical_segment(points: &[Pos2]) -> bool {
        points
            .windows(2)
            .any(|w| (w[0].x - w[1].x).abs() < 1e-3 && (w[0].y - w[1].y).abs() > 1e-3)
    }

    #[test]
    fn test_forward_route_is_simple_midline() {
        let path = route(
            Pos2::new(0.0, 0.0),
            Side::Right,
            Pos2::new(200.0, 100.0),
            Side::Left,
        );
        assert!(is_orthogonal(&path));
        assert_eq!(path.first(), Some(&Pos2::new(0.0, 0.0)));
        assert_eq!(path.last(), Some(&Pos2::new(200.0, 100.0)));
        // Mid-line: one vertical segment at the midpoint between the stubs.
        assert_eq!(path.len(), 4);
        assert!((path[1].x - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_same_row_inserts_vertical_detour() {
        let path = route(
            Pos2::new(0.0, 50.0),
            Side::Right,
            Pos2::new(300.0, 50.0),
            Side::Left,
        );
        assert!(is_orthogonal(&path));
        // Never a bare horizontal run.
        assert!(has_vertical_segment(&path));
        assert_eq!(path.first(), Some(&Pos2::new(0.0, 50.0)));
        assert_eq!(path.last(), Some(&Pos2::new(300.0, 50.0)));
    }

    #[test]
    fn test_backward_target_detours_outward() {
        let source = Pos2::new(300.0, 40.0);
        let target = Pos2::new(0.0, 60.0);
        let path = route(source, Side::Right, target, Side::Left);
        assert!(is_orthogonal(&path));
        // The route leaves past the source stub before turning back, and
        // enters from beyond the target stub.
        let max_x = path.iter().map(|p| p.x).fold(f32::MIN, f32::max);
        let min_x = path.iter().map(|p| p.x).fold(f32::MAX, f32::min);
        assert!(max_x >= source.x + 19.0);
        assert!(min_x <= target.x - 19.0);
        // Close rows clear the node bodies instead of cutting between them.
        let max_y = path.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        assert!(max_y > source.y.max(target.y));
    }

    #[test]
    fn test_same_column_backward_detours() {
        let path = route(
            Pos2::new(100.0, 0.0),
            Side::Right,
            Pos2::new(100.0, 0.0),
            Side::Left,
        );
        assert!(is_orthogonal(&path));
        assert!(path.len() >= 4);
    }

    #[test]
    fn test_vertical_sides_route() {
        let path = route(
            Pos2::new(50.0, 100.0),
            Side::Bottom,
            Pos2::new(250.0, 300.0),
            Side::Top,
        );
        assert!(is_orthogonal(&path));
        assert_eq!(path.first(), Some(&Pos2::new(50.0, 100.0)));
        assert_eq!(path.last(), Some(&Pos2::new(250.0, 300.0)));
    }

    #[test]
    fn test_mixed_sides_route() {
        // Output on the right into a top-center unified input.
        let path = route(
            Pos2::new(0.0, 0.0),
            Side::Right,
            Pos2::new(200.0, 150.0),
            Side::Top,
        );
        assert!(is_orthogonal(&path));
        assert_eq!(path.last(), Some(&Pos2::new(200.0, 150.0)));
    }

    #[test]
    fn test_preview_follows_pointer() {
        let origin = Pos2::new(10.0, 10.0);
        for pointer in [
            Pos2::new(300.0, 200.0),
            Pos2::new(-100.0, 10.0),
            Pos2::new(10.0, -50.0),
        ] {
            let path = preview(origin, Side::Right, pointer);
            assert!(is_orthogonal(&path));
            assert_eq!(path.first(), Some(&origin));
            assert_eq!(path.last(), Some(&pointer));
        }
    }

    #[test]
    fn test_rounded_preserves_endpoints() {
        let path = route(
            Pos2::new(0.0, 0.0),
            Side::Right,
            Pos2::new(200.0, 100.0),
            Side::Left,
        );
        let smooth = rounded(&path, 6.0);
        assert_eq!(smooth.first(), path.first());
        assert_eq!(smooth.last(), path.last());
        assert!(smooth.len() > path.len());
    }

    #[test]
    fn test_rounded_corner_endpoints_stay_on_axis() {
        let path = vec![
            Pos2::new(0.0, 0.0),
            Pos2::new(100.0, 0.0),
            Pos2::new(100.0, 80.0),
        ];
        let smooth = rounded(&path, 8.0);
        // The join enters along the horizontal segment and leaves along
        // the vertical one.
        assert!((smooth[1].y - 0.0).abs() < 1e-3);
        assert!((smooth[smooth.len() - 2].x - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_tiny_radius_is_identity() {
        let path = route(
            Pos2::new(0.0, 0.0),
            Side::Right,
            Pos2::new(200.0, 100.0),
            Side::Left,
        );
        assert_eq!(rounded(&path, 0.5), path);
    }

    proptest! {
        #[test]
        fn prop_routes_are_orthogonal(
            sx in -2000.0f32..2000.0,
            sy in -2000.0f32..2000.0,
            tx in -2000.0f32..2000.0,
            ty in -2000.0f32..2000.0,
        ) {
            let path = route(
                Pos2::new(sx, sy),
                Side::Right,
                Pos2::new(tx, ty),
                Side::Left,
            );
            prop_assert!(is_orthogonal(&path));
            prop_assert_eq!(*path.first().unwrap(), Pos2::new(sx, sy));
            prop_assert_eq!(*path.last().unwrap(), Pos2::new(tx, ty));
        }

        #[test]
        fn prop_vertical_routes_are_orthogonal(
            sx in -2000.0f32..2000.0,
            sy in -2000.0f32..2000.0,
            tx in -2000.0f32..2000.0,
            ty in -2000.0f32..2000.0,
        ) {
            let path = route(
                Pos2::new(sx, sy),
                Side::Bottom,
                Pos2::new(tx, ty),
                Side::Top,
            );
            prop_assert!(is_orthogonal(&path));
        }
    }
}
