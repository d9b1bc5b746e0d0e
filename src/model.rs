//! Core data models for the townsquare scene.
//! Static configuration types live here; the registries that hold them are
//! in `config`, and the per-frame runtime state in `sim` and `state`.

use serde::{Deserialize, Serialize};

/// Position on the abstract isometric grid, decoupled from pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridPosition {
    pub grid_x: f64,
    pub grid_y: f64,
}

impl GridPosition {
    pub const fn new(grid_x: f64, grid_y: f64) -> Self {
        Self { grid_x, grid_y }
    }
}

/// Pixel-space coordinate derived from a `GridPosition` via the projection.
/// Never stored independently of its grid source.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
}

/// Behavior of a pedestrian figure. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Behavior {
    Walking,
    Sitting,
    Idle,
    EnteringBuilding,
}

/// Sub-pose cycled while a figure is sitting or idling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdleVariant {
    Standing,
    LookingLeft,
    LookingRight,
}

impl IdleVariant {
    /// Next pose in the `standing -> looking-left -> looking-right` cycle.
    pub fn next(self) -> Self {
        match self {
            IdleVariant::Standing => IdleVariant::LookingLeft,
            IdleVariant::LookingLeft => IdleVariant::LookingRight,
            IdleVariant::LookingRight => IdleVariant::Standing,
        }
    }
}

/// What a figure does when it reaches an interaction point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionKind {
    Bench,
    BuildingEntrance,
    Pause,
}

/// A location on a walk path where a figure pauses and changes behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionPoint {
    pub position: GridPosition,
    pub kind: InteractionKind,
    /// Associated building, for `BuildingEntrance` points.
    pub building_id: Option<String>,
    /// How long the figure pauses here, in milliseconds.
    pub duration_ms: f64,
}

/// A predefined route that pedestrian figures follow through the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalkPath {
    pub id: String,
    /// Ordered waypoints defining the geometry. A single waypoint is a
    /// fixed point; progress wraps when `loop_path` is set and bounces at
    /// the endpoints otherwise.
    pub waypoints: Vec<GridPosition>,
    pub loop_path: bool,
    pub interaction_points: Vec<InteractionPoint>,
}

/// Interactive building that navigates to a site section when activated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildingConfig {
    pub id: String,
    /// Display name shown on the plaque.
    pub name: String,
    /// Route identifier consumed by the navigation layer (e.g. "/blog").
    pub route: String,
    pub position: GridPosition,
    pub accent_color: String,
    pub accent_color_hover: String,
    pub aria_label: String,
    /// Rendering order for isometric depth sorting.
    pub z_index: i32,
}

/// Initial assignment for one pedestrian figure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    pub id: String,
    pub path_id: String,
    /// Movement speed multiplier (1.0 = base speed).
    pub speed: f64,
    /// Starting progress along the path, in [0, 1].
    pub start_offset: f64,
}

/// Kind of decorative, non-interactive scene element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnvironmentKind {
    Tree,
    Bench,
    LampPost,
}

/// A decorative element placed along the streets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentElement {
    pub id: String,
    pub kind: EnvironmentKind,
    pub position: GridPosition,
    pub z_index: i32,
}
