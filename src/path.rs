//! Path interpolation: mapping a scalar progress value onto a walk path's
//! geometry, and advancing that progress over time.

use crate::model::{GridPosition, InteractionPoint, WalkPath};

/// Reference duration to traverse a full path at speed 1.0.
const BASE_TRAVERSAL_MS: f64 = 8000.0;
/// Progress offset used to sample the instantaneous travel direction.
const DIRECTION_EPSILON: f64 = 0.001;

/// Euclidean distance between two grid positions.
pub fn segment_length(a: &GridPosition, b: &GridPosition) -> f64 {
    let dx = b.grid_x - a.grid_x;
    let dy = b.grid_y - a.grid_y;
    (dx * dx + dy * dy).sqrt()
}

/// Total length of a walk path: the sum of its segment lengths.
/// A single-waypoint path has length zero.
pub fn total_length(path: &WalkPath) -> f64 {
    path.waypoints
        .windows(2)
        .map(|w| segment_length(&w[0], &w[1]))
        .sum()
}

/// Interpolate a position along the path at `progress` in [0, 1].
///
/// Progress maps proportionally onto cumulative segment length, so apparent
/// speed stays constant regardless of segment length variance. Degenerate
/// paths (empty, single waypoint, zero length) resolve to a fixed point.
pub fn position_at(path: &WalkPath, progress: f64) -> GridPosition {
    let wps = &path.waypoints;
    match wps.len() {
        0 => return GridPosition::new(0.0, 0.0),
        1 => return wps[0],
        _ => {}
    }

    let total = total_length(path);
    if total == 0.0 {
        return wps[0];
    }

    let target = progress.clamp(0.0, 1.0) * total;
    let mut accumulated = 0.0;
    for w in wps.windows(2) {
        let seg = segment_length(&w[0], &w[1]);
        if accumulated + seg >= target {
            let t = if seg > 0.0 {
                (target - accumulated) / seg
            } else {
                0.0
            };
            return GridPosition::new(
                w[0].grid_x + (w[1].grid_x - w[0].grid_x) * t,
                w[0].grid_y + (w[1].grid_y - w[0].grid_y) * t,
            );
        }
        accumulated += seg;
    }
    wps[wps.len() - 1]
}

/// Advance `progress` along the path by `delta_ms` at the given speed
/// multiplier and direction (+1 forward, -1 reverse).
///
/// Looping paths wrap progress across [0, 1]; non-looping paths bounce,
/// clamping to the boundary and flipping direction. Zero-length paths are
/// left untouched.
pub fn advance(
    progress: f64,
    speed: f64,
    delta_ms: f64,
    path: &WalkPath,
    direction: i8,
) -> (f64, i8) {
    if total_length(path) == 0.0 {
        return (progress, direction);
    }

    let delta = speed * delta_ms / BASE_TRAVERSAL_MS * f64::from(direction);
    let mut next = progress + delta;
    let mut next_direction = direction;

    if path.loop_path {
        if next > 1.0 {
            next -= 1.0;
        }
        if next < 0.0 {
            next += 1.0;
        }
    } else if next >= 1.0 {
        next = 1.0;
        next_direction = -1;
    } else if next <= 0.0 {
        next = 0.0;
        next_direction = 1;
    }

    (next, next_direction)
}

/// Whether a figure at `progress` travelling in `direction` is moving
/// leftward in screen space. Samples the path slightly further along the
/// travel direction and compares the isometric screen-x axis
/// (`grid_x - grid_y`); used to mirror the figure sprite.
pub fn is_moving_left(path: &WalkPath, progress: f64, direction: i8) -> bool {
    let here = position_at(path, progress);
    let ahead = position_at(
        path,
        (progress + DIRECTION_EPSILON * f64::from(direction)).clamp(0.0, 1.0),
    );
    let dx = (ahead.grid_x - ahead.grid_y) - (here.grid_x - here.grid_y);
    dx < 0.0
}

/// First interaction point within `threshold` grid units of the given
/// position, or `None`. Matches follow the path's interaction-point list
/// order rather than distance, which fixes the pause sequencing when two
/// points overlap.
pub fn nearby_interaction_point<'a>(
    path: &'a WalkPath,
    grid_x: f64,
    grid_y: f64,
    threshold: f64,
) -> Option<&'a InteractionPoint> {
    path.interaction_points.iter().find(|ip| {
        let dx = ip.position.grid_x - grid_x;
        let dy = ip.position.grid_y - grid_y;
        (dx * dx + dy * dy).sqrt() < threshold
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InteractionKind;

    fn path(waypoints: &[(f64, f64)], loop_path: bool) -> WalkPath {
        WalkPath {
            id: "test".into(),
            waypoints: waypoints
                .iter()
                .map(|&(x, y)| GridPosition::new(x, y))
                .collect(),
            loop_path,
            interaction_points: Vec::new(),
        }
    }

    #[test]
    fn length_is_sum_of_segments() {
        let p = path(&[(0.0, 0.0), (3.0, 4.0)], false);
        assert_eq!(total_length(&p), 5.0);
        let p = path(&[(0.0, 0.0), (1.0, 0.0), (1.0, 2.0)], false);
        assert_eq!(total_length(&p), 3.0);
    }

    #[test]
    fn single_waypoint_path_is_a_fixed_point() {
        let p = path(&[(2.0, -1.0)], false);
        assert_eq!(total_length(&p), 0.0);
        assert_eq!(position_at(&p, 0.0), GridPosition::new(2.0, -1.0));
        assert_eq!(position_at(&p, 0.7), GridPosition::new(2.0, -1.0));
        let (progress, direction) = advance(0.3, 1.0, 16.0, &p, 1);
        assert_eq!(progress, 0.3);
        assert_eq!(direction, 1);
    }

    #[test]
    fn interpolation_hits_endpoints() {
        // 3-4-5 segments keep the arithmetic exact.
        let p = path(&[(0.0, 0.0), (3.0, 4.0), (6.0, 0.0)], false);
        assert_eq!(position_at(&p, 0.0), GridPosition::new(0.0, 0.0));
        assert_eq!(position_at(&p, 1.0), GridPosition::new(6.0, 0.0));
        // Out-of-range progress clamps.
        assert_eq!(position_at(&p, -0.5), GridPosition::new(0.0, 0.0));
        assert_eq!(position_at(&p, 1.5), GridPosition::new(6.0, 0.0));
    }

    #[test]
    fn interpolation_is_proportional_to_arc_length() {
        // Two segments of lengths 1 and 2: halfway along the path lies
        // half a unit into the second segment.
        let p = path(&[(0.0, 0.0), (1.0, 0.0), (3.0, 0.0)], false);
        let mid = position_at(&p, 0.5);
        assert!((mid.grid_x - 1.5).abs() < 1e-12);
        assert_eq!(mid.grid_y, 0.0);
    }

    #[test]
    fn bounce_keeps_progress_in_bounds_and_flips_direction() {
        let p = path(&[(0.0, 0.0), (1.0, 0.0)], false);
        let mut progress = 0.9;
        let mut direction = 1_i8;
        let mut flips = 0;
        for _ in 0..2000 {
            let before = direction;
            (progress, direction) = advance(progress, 1.3, 50.0, &p, direction);
            assert!((0.0..=1.0).contains(&progress));
            if direction != before {
                flips += 1;
                assert!(progress == 0.0 || progress == 1.0);
            }
        }
        assert!(flips > 0);
    }

    #[test]
    fn loop_wraps_without_position_discontinuity() {
        let p = path(
            &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)],
            true,
        );
        let (wrapped, direction) = advance(0.999, 1.0, 100.0, &p, 1);
        assert!(wrapped < 0.5, "expected wrap, got {wrapped}");
        assert_eq!(direction, 1);
        // The closed path makes the interpolated position continuous
        // across the wrap point.
        let before = position_at(&p, 0.999);
        let after = position_at(&p, wrapped);
        assert!(segment_length(&before, &after) < 0.1);

        let (back, direction) = advance(0.001, 1.0, 100.0, &p, -1);
        assert!(back > 0.5, "expected reverse wrap, got {back}");
        assert_eq!(direction, -1);
    }

    #[test]
    fn leftward_motion_follows_screen_x() {
        // grid_x increasing means screen-x (grid_x - grid_y) increasing.
        let p = path(&[(0.0, 0.0), (2.0, 0.0)], false);
        assert!(!is_moving_left(&p, 0.5, 1));
        assert!(is_moving_left(&p, 0.5, -1));
        // grid_y increasing means screen-x decreasing.
        let p = path(&[(0.0, 0.0), (0.0, 2.0)], false);
        assert!(is_moving_left(&p, 0.5, 1));
    }

    #[test]
    fn interaction_match_prefers_list_order_over_distance() {
        let mut p = path(&[(0.0, 0.0), (1.0, 0.0)], false);
        p.interaction_points = vec![
            InteractionPoint {
                position: GridPosition::new(0.2, 0.0),
                kind: InteractionKind::Bench,
                building_id: None,
                duration_ms: 5000.0,
            },
            InteractionPoint {
                position: GridPosition::new(0.0, 0.0),
                kind: InteractionKind::Pause,
                building_id: None,
                duration_ms: 1500.0,
            },
        ];
        // Both are within threshold of the origin; the nearer one is
        // second in the list and must lose.
        let hit = nearby_interaction_point(&p, 0.0, 0.0, 0.3).expect("within threshold");
        assert_eq!(hit.kind, InteractionKind::Bench);
        assert!(nearby_interaction_point(&p, 5.0, 5.0, 0.3).is_none());
    }
}
