//! Grid-to-screen projection for the isometric scene.
//!
//! Standard 2:1 isometric projection:
//!   x = (grid_x - grid_y) * (TILE_WIDTH / 2)
//!   y = (grid_x + grid_y) * (TILE_HEIGHT / 2)
//! `to_grid` is the exact algebraic inverse.

use crate::model::{BuildingConfig, GridPosition, ScreenPosition};

/// Horizontal span of one grid cell in screen pixels.
pub const TILE_WIDTH: f64 = 120.0;
/// Vertical span of one grid cell (half the width for 2:1 isometric).
pub const TILE_HEIGHT: f64 = 60.0;

pub fn to_screen(grid_x: f64, grid_y: f64) -> ScreenPosition {
    ScreenPosition {
        x: (grid_x - grid_y) * (TILE_WIDTH / 2.0),
        y: (grid_x + grid_y) * (TILE_HEIGHT / 2.0),
    }
}

pub fn to_grid(x: f64, y: f64) -> GridPosition {
    GridPosition {
        grid_x: (x / (TILE_WIDTH / 2.0) + y / (TILE_HEIGHT / 2.0)) / 2.0,
        grid_y: (y / (TILE_HEIGHT / 2.0) - x / (TILE_WIDTH / 2.0)) / 2.0,
    }
}

/// Screen-space center of a building, used as the zoom-transition target.
pub fn building_center(config: &BuildingConfig) -> ScreenPosition {
    to_screen(config.position.grid_x, config.position.grid_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn projects_known_points() {
        assert_eq!(to_screen(0.0, 0.0), ScreenPosition { x: 0.0, y: 0.0 });
        assert_eq!(to_screen(1.0, 0.0), ScreenPosition { x: 60.0, y: 30.0 });
        assert_eq!(
            to_screen(0.0, -6.0),
            ScreenPosition { x: 360.0, y: -180.0 }
        );
    }

    #[test]
    fn round_trips_within_epsilon() {
        let samples = [
            (0.0, 0.0),
            (1.0, 0.0),
            (-5.0, -2.0),
            (3.25, -1.75),
            (0.001, 123.456),
            (-999.5, 42.0),
        ];
        for (gx, gy) in samples {
            let s = to_screen(gx, gy);
            let g = to_grid(s.x, s.y);
            assert!((g.grid_x - gx).abs() < EPS, "grid_x for ({gx}, {gy})");
            assert!((g.grid_y - gy).abs() < EPS, "grid_y for ({gx}, {gy})");
        }
    }

    #[test]
    fn inverse_maps_screen_axes_back() {
        let g = to_grid(60.0, 30.0);
        assert!((g.grid_x - 1.0).abs() < EPS);
        assert!(g.grid_y.abs() < EPS);
    }
}
