//! Pedestrian crowd simulation.
//!
//! Each figure is a small state machine (walking / sitting / idle /
//! entering-building) advanced by `Crowd::tick` with elapsed wall-clock
//! milliseconds. The tick mutates an arena of figure records in place and
//! `snapshot` produces the immutable, depth-sorted list the renderer
//! consumes, so no state aliases across the frame boundary.

use std::collections::HashMap;

use crate::model::{Behavior, FigureConfig, IdleVariant, WalkPath};
use crate::path;

/// Upper bound on one frame's elapsed time. Background-tab throttling can
/// produce multi-second deltas; anything above this is treated as a single
/// clamped step so figures never teleport.
pub const MAX_FRAME_DELTA_MS: f64 = 100.0;
/// One full gait cycle (both legs) while walking.
const GAIT_CYCLE_MS: f64 = 600.0;
/// Period of the idle-pose rotation while sitting or idling.
const IDLE_CYCLE_MS: f64 = 1500.0;
/// Grid-unit radius within which an interaction point captures a figure.
const INTERACTION_THRESHOLD: f64 = 0.3;
/// Extra cooldown beyond the pause itself, so a figure walks clear of the
/// point before it can trigger again.
const COOLDOWN_GRACE_MS: f64 = 2000.0;

/// Mutable state of one pedestrian figure.
#[derive(Clone, Debug)]
struct Figure {
    id: String,
    path_id: String,
    progress: f64,
    speed: f64,
    direction: i8,
    behavior: Behavior,
    walk_phase: f64,
    facing_left: bool,
    grid_x: f64,
    grid_y: f64,
    pause_remaining: f64,
    idle_variant: IdleVariant,
    idle_timer: f64,
    /// Remaining cooldown before interaction points on a path may capture
    /// this figure again, keyed by path id.
    cooldowns: HashMap<String, f64>,
}

/// Render-ready view of one figure for a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FigureSnapshot {
    pub id: String,
    pub grid_x: f64,
    pub grid_y: f64,
    pub behavior: Behavior,
    pub walk_phase: f64,
    pub facing_left: bool,
}

/// Arena of pedestrian figures, created at scene mount and replaced
/// wholesale when the responsive figure count changes.
#[derive(Debug, Default)]
pub struct Crowd {
    figures: Vec<Figure>,
}

impl Crowd {
    /// Build a crowd from figure configs. `gait_seed` supplies the initial
    /// walk phase per figure (the scene passes `js_sys::Math::random` to
    /// desynchronize gaits; tests pass a constant).
    pub fn new(
        configs: &[FigureConfig],
        paths: &[WalkPath],
        mut gait_seed: impl FnMut() -> f64,
    ) -> Self {
        let figures = configs
            .iter()
            .map(|config| {
                let progress = config.start_offset.clamp(0.0, 1.0);
                let mut figure = Figure {
                    id: config.id.clone(),
                    path_id: config.path_id.clone(),
                    progress,
                    speed: config.speed,
                    direction: 1,
                    behavior: Behavior::Walking,
                    walk_phase: gait_seed().rem_euclid(1.0),
                    facing_left: false,
                    grid_x: 0.0,
                    grid_y: 0.0,
                    pause_remaining: 0.0,
                    idle_variant: IdleVariant::Standing,
                    idle_timer: 0.0,
                    cooldowns: HashMap::new(),
                };
                if let Some(path) = path_by_id(paths, &figure.path_id) {
                    let pos = path::position_at(path, progress);
                    figure.grid_x = pos.grid_x;
                    figure.grid_y = pos.grid_y;
                    figure.facing_left = path::is_moving_left(path, progress, 1);
                }
                figure
            })
            .collect();
        Self { figures }
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    /// Advance every figure by `delta_ms` of wall-clock time. A figure
    /// whose path id resolves to nothing is skipped for the frame.
    pub fn tick(&mut self, delta_ms: f64, paths: &[WalkPath]) {
        let delta = delta_ms.clamp(0.0, MAX_FRAME_DELTA_MS);
        if delta == 0.0 {
            return;
        }
        for figure in &mut self.figures {
            let Some(path) = path_by_id(paths, &figure.path_id) else {
                continue;
            };
            figure.update(delta, path);
        }
    }

    /// Immutable per-frame view, sorted by `grid_y` ascending so figures
    /// lower on the screen draw on top.
    pub fn snapshot(&self) -> Vec<FigureSnapshot> {
        let mut frame: Vec<FigureSnapshot> = self
            .figures
            .iter()
            .map(|f| FigureSnapshot {
                id: f.id.clone(),
                grid_x: f.grid_x,
                grid_y: f.grid_y,
                behavior: f.behavior,
                walk_phase: f.walk_phase,
                facing_left: f.facing_left,
            })
            .collect();
        frame.sort_by(|a, b| a.grid_y.total_cmp(&b.grid_y));
        frame
    }
}

fn path_by_id<'a>(paths: &'a [WalkPath], id: &str) -> Option<&'a WalkPath> {
    paths.iter().find(|p| p.id == id)
}

impl Figure {
    fn update(&mut self, delta: f64, path: &WalkPath) {
        match self.behavior {
            Behavior::Walking => self.update_walking(delta, path),
            Behavior::Sitting | Behavior::Idle | Behavior::EnteringBuilding => {
                self.update_paused(delta);
            }
        }
    }

    fn update_walking(&mut self, delta: f64, path: &WalkPath) {
        (self.progress, self.direction) =
            path::advance(self.progress, self.speed, delta, path, self.direction);
        let pos = path::position_at(path, self.progress);
        self.grid_x = pos.grid_x;
        self.grid_y = pos.grid_y;
        self.facing_left = path::is_moving_left(path, self.progress, self.direction);
        self.walk_phase = (self.walk_phase + delta / GAIT_CYCLE_MS).fract();

        let cooldown = self.cooldowns.entry(path.id.clone()).or_insert(0.0);
        if *cooldown > 0.0 {
            *cooldown -= delta;
            return;
        }
        let Some(point) = path::nearby_interaction_point(
            path,
            self.grid_x,
            self.grid_y,
            INTERACTION_THRESHOLD,
        ) else {
            return;
        };
        *cooldown = point.duration_ms + COOLDOWN_GRACE_MS;
        self.pause_remaining = point.duration_ms;
        self.behavior = match point.kind {
            crate::model::InteractionKind::Bench => Behavior::Sitting,
            crate::model::InteractionKind::BuildingEntrance => Behavior::EnteringBuilding,
            crate::model::InteractionKind::Pause => {
                self.idle_variant = IdleVariant::Standing;
                self.idle_timer = 0.0;
                Behavior::Idle
            }
        };
    }

    /// Position stays frozen at the interaction point while paused.
    /// Entering-building resumes walking directly, modeling the exit.
    fn update_paused(&mut self, delta: f64) {
        self.pause_remaining -= delta;
        if self.pause_remaining <= 0.0 {
            self.behavior = Behavior::Walking;
            self.pause_remaining = 0.0;
            return;
        }
        if matches!(self.behavior, Behavior::Sitting | Behavior::Idle) {
            self.idle_timer += delta;
            if self.idle_timer >= IDLE_CYCLE_MS {
                self.idle_timer = 0.0;
                self.idle_variant = self.idle_variant.next();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GridPosition, InteractionKind, InteractionPoint};

    fn straight_path(id: &str, points: Vec<InteractionPoint>) -> WalkPath {
        WalkPath {
            id: id.into(),
            waypoints: vec![GridPosition::new(0.0, 0.0), GridPosition::new(10.0, 0.0)],
            loop_path: false,
            interaction_points: points,
        }
    }

    fn figure_on(path_id: &str, start_offset: f64, speed: f64) -> Vec<FigureConfig> {
        vec![FigureConfig {
            id: "walker".into(),
            path_id: path_id.into(),
            speed,
            start_offset,
        }]
    }

    fn bench_at(x: f64, duration_ms: f64) -> InteractionPoint {
        InteractionPoint {
            position: GridPosition::new(x, 0.0),
            kind: InteractionKind::Bench,
            building_id: None,
            duration_ms,
        }
    }

    #[test]
    fn bench_pause_sits_then_resumes() {
        let paths = vec![straight_path("street", vec![bench_at(0.0, 5000.0)])];
        let mut crowd = Crowd::new(&figure_on("street", 0.0, 1.0), &paths, || 0.0);

        crowd.tick(16.0, &paths);
        let f = &crowd.figures[0];
        assert_eq!(f.behavior, Behavior::Sitting);
        assert_eq!(f.pause_remaining, 5000.0);
        let frozen = (f.grid_x, f.grid_y);

        // Ride out the pause at a coarse frame granularity.
        let mut elapsed = 0.0;
        while elapsed < 5000.0 {
            crowd.tick(100.0, &paths);
            elapsed += 100.0;
        }
        let f = &crowd.figures[0];
        assert_eq!(f.behavior, Behavior::Walking);
        assert!(f.pause_remaining <= 0.0 + f64::EPSILON);
        assert_eq!((f.grid_x, f.grid_y), frozen, "position frozen while seated");
    }

    #[test]
    fn cooldown_blocks_immediate_recapture() {
        let paths = vec![straight_path("street", vec![bench_at(0.0, 1000.0)])];
        let mut crowd = Crowd::new(&figure_on("street", 0.0, 1.0), &paths, || 0.0);

        crowd.tick(16.0, &paths);
        assert_eq!(crowd.figures[0].behavior, Behavior::Sitting);
        // Pause (1000ms) ends well before the cooldown (3000ms) does, and
        // the figure is still within the threshold when it stands up.
        for _ in 0..11 {
            crowd.tick(100.0, &paths);
        }
        assert_eq!(crowd.figures[0].behavior, Behavior::Walking);
        crowd.tick(16.0, &paths);
        assert_eq!(
            crowd.figures[0].behavior,
            Behavior::Walking,
            "cooldown must keep the bench from re-triggering"
        );
    }

    #[test]
    fn entrance_and_pause_map_to_their_behaviors() {
        let entrance = InteractionPoint {
            position: GridPosition::new(0.0, 0.0),
            kind: InteractionKind::BuildingEntrance,
            building_id: Some("town-center".into()),
            duration_ms: 3000.0,
        };
        let paths = vec![straight_path("a", vec![entrance])];
        let mut crowd = Crowd::new(&figure_on("a", 0.0, 1.0), &paths, || 0.0);
        crowd.tick(16.0, &paths);
        assert_eq!(crowd.figures[0].behavior, Behavior::EnteringBuilding);

        let pause = InteractionPoint {
            position: GridPosition::new(0.0, 0.0),
            kind: InteractionKind::Pause,
            building_id: None,
            duration_ms: 1500.0,
        };
        let paths = vec![straight_path("b", vec![pause])];
        let mut crowd = Crowd::new(&figure_on("b", 0.0, 1.0), &paths, || 0.0);
        crowd.tick(16.0, &paths);
        assert_eq!(crowd.figures[0].behavior, Behavior::Idle);
    }

    #[test]
    fn idle_variant_rotates_every_cycle() {
        let pause = InteractionPoint {
            position: GridPosition::new(0.0, 0.0),
            kind: InteractionKind::Pause,
            building_id: None,
            duration_ms: 6000.0,
        };
        let paths = vec![straight_path("street", vec![pause])];
        let mut crowd = Crowd::new(&figure_on("street", 0.0, 1.0), &paths, || 0.0);
        crowd.tick(16.0, &paths);
        assert_eq!(crowd.figures[0].idle_variant, IdleVariant::Standing);

        for _ in 0..15 {
            crowd.tick(100.0, &paths);
        }
        assert_eq!(crowd.figures[0].idle_variant, IdleVariant::LookingLeft);
        for _ in 0..15 {
            crowd.tick(100.0, &paths);
        }
        assert_eq!(crowd.figures[0].idle_variant, IdleVariant::LookingRight);
        for _ in 0..15 {
            crowd.tick(100.0, &paths);
        }
        assert_eq!(crowd.figures[0].idle_variant, IdleVariant::Standing);
    }

    #[test]
    fn snapshot_sorts_by_depth() {
        let paths = vec![
            WalkPath {
                id: "p".into(),
                waypoints: vec![GridPosition::new(0.0, 3.0)],
                loop_path: false,
                interaction_points: Vec::new(),
            },
            WalkPath {
                id: "q".into(),
                waypoints: vec![GridPosition::new(0.0, -2.0)],
                loop_path: false,
                interaction_points: Vec::new(),
            },
            WalkPath {
                id: "r".into(),
                waypoints: vec![GridPosition::new(0.0, 0.0)],
                loop_path: false,
                interaction_points: Vec::new(),
            },
        ];
        let configs: Vec<FigureConfig> = [("a", "p"), ("b", "q"), ("c", "r")]
            .iter()
            .map(|(id, path_id)| FigureConfig {
                id: (*id).into(),
                path_id: (*path_id).into(),
                speed: 1.0,
                start_offset: 0.0,
            })
            .collect();
        let crowd = Crowd::new(&configs, &paths, || 0.0);
        let depths: Vec<f64> = crowd.snapshot().iter().map(|f| f.grid_y).collect();
        assert_eq!(depths, vec![-2.0, 0.0, 3.0]);
    }

    #[test]
    fn unknown_path_is_skipped_not_fatal() {
        let paths = vec![straight_path("real", Vec::new())];
        let configs = vec![
            FigureConfig {
                id: "ghost".into(),
                path_id: "missing".into(),
                speed: 1.0,
                start_offset: 0.5,
            },
            FigureConfig {
                id: "walker".into(),
                path_id: "real".into(),
                speed: 1.0,
                start_offset: 0.0,
            },
        ];
        let mut crowd = Crowd::new(&configs, &paths, || 0.0);
        crowd.tick(50.0, &paths);
        assert_eq!(crowd.figures[0].progress, 0.5, "ghost left untouched");
        assert!(crowd.figures[1].progress > 0.0);
        assert_eq!(crowd.snapshot().len(), 2);
    }

    #[test]
    fn oversized_frame_delta_is_clamped() {
        let paths = vec![straight_path("street", Vec::new())];
        let mut crowd = Crowd::new(&figure_on("street", 0.0, 1.0), &paths, || 0.0);
        crowd.tick(5000.0, &paths);
        // One clamped step: 100ms of an 8000ms traversal.
        let expected = MAX_FRAME_DELTA_MS / 8000.0;
        assert!((crowd.figures[0].progress - expected).abs() < 1e-12);
    }

    #[test]
    fn walk_phase_stays_cyclic_and_desynchronized() {
        let paths = vec![straight_path("street", Vec::new())];
        let configs = vec![
            FigureConfig {
                id: "a".into(),
                path_id: "street".into(),
                speed: 1.0,
                start_offset: 0.0,
            },
            FigureConfig {
                id: "b".into(),
                path_id: "street".into(),
                speed: 1.0,
                start_offset: 0.0,
            },
        ];
        let mut seeds = [0.2, 0.9].into_iter();
        let mut crowd = Crowd::new(&configs, &paths, move || seeds.next().unwrap());
        for _ in 0..50 {
            crowd.tick(90.0, &paths);
        }
        for f in &crowd.figures {
            assert!((0.0..1.0).contains(&f.walk_phase));
        }
        assert_ne!(crowd.figures[0].walk_phase, crowd.figures[1].walk_phase);
    }
}
