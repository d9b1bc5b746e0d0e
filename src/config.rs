//! Static scene configuration: buildings, walk paths, the pedestrian
//! roster, and decorative environment elements.
//!
//! Everything here is loaded once for the process lifetime and injected
//! read-only into the simulation and rendering layers.

use std::sync::LazyLock;

use crate::iso;
use crate::model::{
    BuildingConfig, EnvironmentElement, EnvironmentKind, FigureConfig, GridPosition,
    InteractionKind, InteractionPoint, WalkPath,
};

/// The four interactive buildings, one per site section.
pub static BUILDINGS: LazyLock<Vec<BuildingConfig>> = LazyLock::new(|| {
    vec![
        BuildingConfig {
            id: "town-center".into(),
            name: "Town Center".into(),
            route: "/about".into(),
            position: GridPosition::new(0.0, 0.0),
            accent_color: "#D4A574".into(),
            accent_color_hover: "#D99A5B".into(),
            aria_label: "Town Center – Navigate to About".into(),
            z_index: 10,
        },
        BuildingConfig {
            id: "newspaper".into(),
            name: "Newspaper".into(),
            route: "/blog".into(),
            position: GridPosition::new(-5.0, -2.0),
            accent_color: "#C4956A".into(),
            accent_color_hover: "#CF8A55".into(),
            aria_label: "Newspaper – Navigate to Blog".into(),
            z_index: 20,
        },
        BuildingConfig {
            id: "art-gallery".into(),
            name: "Art Gallery".into(),
            route: "/photography".into(),
            position: GridPosition::new(5.0, -2.0),
            accent_color: "#6BA3A0".into(),
            accent_color_hover: "#579E9A".into(),
            aria_label: "Art Gallery – Navigate to Photography".into(),
            z_index: 20,
        },
        BuildingConfig {
            id: "post-office".into(),
            name: "Post Office".into(),
            route: "/contact".into(),
            position: GridPosition::new(0.0, -6.0),
            accent_color: "#B07070".into(),
            accent_color_hover: "#B85C5C".into(),
            aria_label: "Post Office – Navigate to Contact".into(),
            z_index: 30,
        },
    ]
});

fn entrance(grid_x: f64, grid_y: f64, building_id: &str, duration_ms: f64) -> InteractionPoint {
    InteractionPoint {
        position: GridPosition::new(grid_x, grid_y),
        kind: InteractionKind::BuildingEntrance,
        building_id: Some(building_id.into()),
        duration_ms,
    }
}

fn bench(grid_x: f64, grid_y: f64, duration_ms: f64) -> InteractionPoint {
    InteractionPoint {
        position: GridPosition::new(grid_x, grid_y),
        kind: InteractionKind::Bench,
        building_id: None,
        duration_ms,
    }
}

fn pause(grid_x: f64, grid_y: f64, duration_ms: f64) -> InteractionPoint {
    InteractionPoint {
        position: GridPosition::new(grid_x, grid_y),
        kind: InteractionKind::Pause,
        building_id: None,
        duration_ms,
    }
}

/// Named walkable routes. Figures pause at the interaction points along
/// each one: benches to sit on, building entrances to step into.
pub static WALK_PATHS: LazyLock<Vec<WalkPath>> = LazyLock::new(|| {
    let wp = |pts: &[(f64, f64)]| -> Vec<GridPosition> {
        pts.iter().map(|&(x, y)| GridPosition::new(x, y)).collect()
    };
    vec![
        // Newspaper across the square to the Art Gallery.
        WalkPath {
            id: "main-street".into(),
            waypoints: wp(&[
                (-3.0, -2.0),
                (-2.0, -1.2),
                (-1.0, -0.5),
                (0.0, 0.0),
                (1.0, -0.5),
                (2.0, -1.2),
                (3.0, -2.0),
            ]),
            loop_path: false,
            interaction_points: vec![
                entrance(-3.0, -2.0, "newspaper", 3000.0),
                bench(-1.5, -1.0, 5000.0),
                entrance(0.0, 0.0, "town-center", 3000.0),
                bench(1.5, -1.0, 5000.0),
                entrance(3.0, -2.0, "art-gallery", 3000.0),
            ],
        },
        // Straight run from the Town Center up to the Post Office.
        WalkPath {
            id: "north-avenue".into(),
            waypoints: wp(&[
                (0.0, 0.0),
                (0.0, -1.0),
                (0.0, -2.0),
                (0.0, -3.0),
                (0.0, -4.0),
            ]),
            loop_path: false,
            interaction_points: vec![
                entrance(0.0, 0.0, "town-center", 3000.0),
                bench(0.0, -2.5, 4000.0),
                entrance(0.0, -4.0, "post-office", 3000.0),
            ],
        },
        // Closed circuit around the whole square.
        WalkPath {
            id: "park-loop".into(),
            waypoints: wp(&[
                (0.0, 0.0),
                (-1.0, -0.5),
                (-2.0, -1.2),
                (-3.0, -2.0),
                (-2.0, -3.0),
                (0.0, -4.0),
                (2.0, -3.0),
                (3.0, -2.0),
                (2.0, -1.2),
                (1.0, -0.5),
                (0.0, 0.0),
            ]),
            loop_path: true,
            interaction_points: vec![
                entrance(-3.0, -2.0, "newspaper", 2000.0),
                entrance(0.0, -4.0, "post-office", 2000.0),
                entrance(3.0, -2.0, "art-gallery", 2000.0),
                pause(-1.5, -1.0, 1500.0),
            ],
        },
        // Back row connecting the three outlying buildings.
        WalkPath {
            id: "side-street".into(),
            waypoints: wp(&[
                (-3.0, -2.0),
                (-2.0, -3.0),
                (0.0, -4.0),
                (2.0, -3.0),
                (3.0, -2.0),
            ]),
            loop_path: false,
            interaction_points: vec![
                entrance(-3.0, -2.0, "newspaper", 2500.0),
                entrance(0.0, -4.0, "post-office", 2500.0),
                entrance(3.0, -2.0, "art-gallery", 2500.0),
            ],
        },
    ]
});

/// Full pedestrian roster. The responsive figure count takes a prefix, so
/// the ordering spreads consecutive figures across different paths.
pub static FIGURES: LazyLock<Vec<FigureConfig>> = LazyLock::new(|| {
    let fig = |n: u32, path_id: &str, speed: f64, start_offset: f64| FigureConfig {
        id: format!("figure-{n}"),
        path_id: path_id.into(),
        speed,
        start_offset,
    };
    vec![
        fig(1, "main-street", 1.0, 0.0),
        fig(2, "park-loop", 0.8, 0.25),
        fig(3, "north-avenue", 1.2, 0.1),
        fig(4, "side-street", 0.9, 0.5),
        fig(5, "park-loop", 1.1, 0.6),
        fig(6, "main-street", 0.7, 0.7),
        fig(7, "north-avenue", 1.3, 0.4),
        fig(8, "side-street", 0.85, 0.15),
        fig(9, "park-loop", 0.95, 0.45),
        fig(10, "main-street", 1.15, 0.35),
        fig(11, "north-avenue", 0.75, 0.8),
        fig(12, "side-street", 1.05, 0.9),
        fig(13, "park-loop", 0.9, 0.12),
    ]
});

/// Decorative trees, benches and lamp posts lining the streets.
pub static ENVIRONMENT: LazyLock<Vec<EnvironmentElement>> = LazyLock::new(|| {
    let elem = |id: &str, kind: EnvironmentKind, x: f64, y: f64, z_index: i32| {
        EnvironmentElement {
            id: id.into(),
            kind,
            position: GridPosition::new(x, y),
            z_index,
        }
    };
    use EnvironmentKind::{Bench, LampPost, Tree};
    vec![
        elem("tree-1", Tree, -1.5, -0.5, 5),
        elem("tree-2", Tree, -3.0, -1.2, 5),
        elem("tree-3", Tree, 1.5, -0.5, 5),
        elem("tree-4", Tree, 3.0, -1.2, 5),
        elem("tree-5", Tree, 0.6, -2.5, 5),
        elem("tree-6", Tree, -0.6, -4.0, 5),
        elem("bench-1", Bench, -2.2, -1.0, 4),
        elem("bench-2", Bench, 2.2, -1.0, 4),
        elem("bench-3", Bench, 0.0, -3.2, 4),
        elem("lamp-1", LampPost, -4.0, -1.8, 6),
        elem("lamp-2", LampPost, 4.0, -1.8, 6),
        elem("lamp-3", LampPost, 0.0, -1.8, 6),
        elem("tree-7", Tree, -3.0, -4.0, 5),
        elem("tree-8", Tree, 3.0, -4.0, 5),
        elem("lamp-4", LampPost, -1.0, -5.5, 6),
    ]
});

/// Street ribbons drawn between connected buildings, beneath everything.
pub static STREETS: LazyLock<Vec<(GridPosition, GridPosition)>> = LazyLock::new(|| {
    let center = GridPosition::new(0.0, 0.0);
    let newspaper = GridPosition::new(-5.0, -2.0);
    let gallery = GridPosition::new(5.0, -2.0);
    let post_office = GridPosition::new(0.0, -6.0);
    vec![
        (center, newspaper),
        (center, gallery),
        (center, post_office),
        (newspaper, post_office),
        (gallery, post_office),
    ]
});

pub fn building_by_id(id: &str) -> Option<&'static BuildingConfig> {
    BUILDINGS.iter().find(|b| b.id == id)
}

pub fn building_by_route(route: &str) -> Option<&'static BuildingConfig> {
    BUILDINGS.iter().find(|b| b.route == route)
}

/// Pedestrian count for a window width: desktop 12, tablet 7, mobile 4.
/// The count is fixed for the lifetime of one scene mount; a breakpoint
/// change reinitializes the whole crowd.
pub fn figure_count_for_width(width: f64) -> usize {
    if width >= 1280.0 {
        12
    } else if width >= 768.0 {
        7
    } else {
        4
    }
}

/// Axis-aligned screen-space bounds of the scene contents plus a margin
/// for building footprints. Drives pan clamping and the view box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl SceneBounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Pixel margin around the outermost anchors so building massing and
/// labels stay inside the nominal bounds.
const BOUNDS_MARGIN: f64 = 200.0;

pub static SCENE_BOUNDS: LazyLock<SceneBounds> = LazyLock::new(|| {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let anchors = BUILDINGS
        .iter()
        .map(|b| b.position)
        .chain(ENVIRONMENT.iter().map(|e| e.position));
    for pos in anchors {
        let s = iso::to_screen(pos.grid_x, pos.grid_y);
        min_x = min_x.min(s.x);
        min_y = min_y.min(s.y);
        max_x = max_x.max(s.x);
        max_y = max_y.max(s.y);
    }
    SceneBounds {
        min_x: min_x - BOUNDS_MARGIN,
        min_y: min_y - BOUNDS_MARGIN,
        max_x: max_x + BOUNDS_MARGIN,
        max_y: max_y + BOUNDS_MARGIN,
    }
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registries_are_consistent() {
        assert_eq!(BUILDINGS.len(), 4);
        assert_eq!(WALK_PATHS.len(), 4);
        assert_eq!(FIGURES.len(), 13);

        let building_ids: HashSet<&str> = BUILDINGS.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(building_ids.len(), BUILDINGS.len());

        let path_ids: HashSet<&str> = WALK_PATHS.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(path_ids.len(), WALK_PATHS.len());

        for figure in FIGURES.iter() {
            assert!(
                path_ids.contains(figure.path_id.as_str()),
                "{} references unknown path {}",
                figure.id,
                figure.path_id
            );
            assert!((0.0..=1.0).contains(&figure.start_offset));
            assert!(figure.speed > 0.0);
        }

        for path in WALK_PATHS.iter() {
            assert!(!path.waypoints.is_empty());
            for ip in &path.interaction_points {
                if let Some(id) = &ip.building_id {
                    assert!(
                        building_ids.contains(id.as_str()),
                        "{} references unknown building {id}",
                        path.id
                    );
                }
                assert!(ip.duration_ms > 0.0);
            }
        }
    }

    #[test]
    fn park_loop_is_closed() {
        let loop_path = WALK_PATHS.iter().find(|p| p.id == "park-loop").unwrap();
        assert!(loop_path.loop_path);
        assert_eq!(
            loop_path.waypoints.first(),
            loop_path.waypoints.last(),
            "looping path must close on its start for a seamless wrap"
        );
    }

    #[test]
    fn figure_count_breakpoints() {
        assert_eq!(figure_count_for_width(1920.0), 12);
        assert_eq!(figure_count_for_width(1280.0), 12);
        assert_eq!(figure_count_for_width(1024.0), 7);
        assert_eq!(figure_count_for_width(768.0), 7);
        assert_eq!(figure_count_for_width(480.0), 4);
        assert_eq!(figure_count_for_width(320.0), 4);
    }

    #[test]
    fn scene_bounds_cover_all_buildings() {
        let b = *SCENE_BOUNDS;
        for building in BUILDINGS.iter() {
            let s = crate::iso::building_center(building);
            assert!(s.x > b.min_x && s.x < b.max_x);
            assert!(s.y > b.min_y && s.y < b.max_y);
        }
        assert!(b.width() > 0.0 && b.height() > 0.0);
    }

    #[test]
    fn building_config_serializes_with_route() {
        let json = serde_json::to_value(&BUILDINGS[3]).unwrap();
        assert_eq!(json["id"], "post-office");
        assert_eq!(json["route"], "/contact");
        assert_eq!(json["position"]["grid_y"], -6.0);
    }

    #[test]
    fn lookup_by_id_and_route() {
        assert_eq!(building_by_id("art-gallery").unwrap().route, "/photography");
        assert_eq!(building_by_route("/blog").unwrap().id, "newspaper");
        assert!(building_by_id("cinema").is_none());
    }
}
