//! Navigation state: current page plus the zoom-transition state machine.
//!
//! The transition phase is a tagged union (`Idle | ZoomingIn | ZoomingOut`)
//! so illegal re-entry is rejected structurally rather than by ad hoc
//! flags. Completion signals are one-shot: a `completed` guard swallows
//! duplicate or late `transitionend` events. While a transition is in
//! flight the viewport controller is disabled, making the scene transform
//! single-writer.

use std::rc::Rc;

use yew::Reducible;

use crate::config;
use crate::iso;
use crate::model::ScreenPosition;

/// Scale factor at the end of a zoom-in.
const ZOOM_SCALE: f64 = 5.0;

/// Site pages. `Home` hosts the townsquare scene; the rest are the
/// section pages the buildings navigate to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    Blog,
    Photography,
    Contact,
}

impl Page {
    pub fn from_route(route: &str) -> Option<Self> {
        match route {
            "/" => Some(Page::Home),
            "/about" => Some(Page::About),
            "/blog" => Some(Page::Blog),
            "/photography" => Some(Page::Photography),
            "/contact" => Some(Page::Contact),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ZoomingIn,
    /// `started` flips once the revealed scene has had a frame to paint at
    /// the zoomed-in transform, arming the animation back to identity.
    ZoomingOut { started: bool },
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavState {
    pub page: Page,
    pub phase: Phase,
    /// Screen-space focal point of the active (or last) transition.
    pub target: ScreenPosition,
    /// Scene removed from the visible layout, but kept mounted so the
    /// zoom-out resumes from its last state.
    pub scene_hidden: bool,
    pub viewport_enabled: bool,
    /// Building of the current zoom-in/zoom-out cycle.
    pub last_building: Option<String>,
    completed: bool,
}

#[derive(Clone, Debug)]
pub enum NavAction {
    /// Building clicked or keyboard-activated.
    ActivateBuilding { id: String, reduced_motion: bool },
    /// The scene transform's `transitionend` fired.
    TransitionEnded,
    /// A frame has painted since the zoom-out reveal; start animating.
    ZoomOutStarted,
    /// Back control on a section page.
    Back { reduced_motion: bool },
    ReducedMotionChanged(bool),
}

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavState {
    pub fn new() -> Self {
        Self {
            page: Page::Home,
            phase: Phase::Idle,
            target: ScreenPosition { x: 0.0, y: 0.0 },
            scene_hidden: false,
            viewport_enabled: true,
            last_building: None,
            completed: false,
        }
    }

    pub fn transition_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// CSS transform for the scene container. Zoomed whenever the scene is
    /// at (or headed to) a building focal point; identity otherwise.
    pub fn scene_transform(&self) -> String {
        let zoomed = match self.phase {
            Phase::ZoomingIn => true,
            Phase::ZoomingOut { started } => !started,
            Phase::Idle => self.scene_hidden,
        };
        if zoomed {
            format!(
                "scale({ZOOM_SCALE}) translate({:.1}px, {:.1}px)",
                -self.target.x, -self.target.y
            )
        } else {
            "scale(1) translate(0px, 0px)".to_string()
        }
    }

    fn page_for_building(id: &str) -> Option<Page> {
        config::building_by_id(id).and_then(|b| Page::from_route(&b.route))
    }
}

impl Reducible for NavState {
    type Action = NavAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use NavAction::*;
        let mut new = (*self).clone();
        match action {
            ActivateBuilding { id, reduced_motion } => {
                // Only one transition at a time; re-entrant clicks are
                // dropped. Unknown ids degrade to a no-op.
                if new.phase != Phase::Idle || new.page != Page::Home {
                    return self;
                }
                let Some(building) = config::building_by_id(&id) else {
                    return self;
                };
                let Some(page) = Page::from_route(&building.route) else {
                    return self;
                };
                new.target = iso::building_center(building);
                new.last_building = Some(id);
                if reduced_motion {
                    // Skip the animation entirely: navigate and hide the
                    // scene synchronously, transition never activates.
                    new.page = page;
                    new.scene_hidden = true;
                } else {
                    new.phase = Phase::ZoomingIn;
                    new.completed = false;
                    new.viewport_enabled = false;
                }
            }
            TransitionEnded => match new.phase {
                Phase::ZoomingIn if !new.completed => {
                    new.completed = true;
                    new.phase = Phase::Idle;
                    new.scene_hidden = true;
                    if let Some(page) = new
                        .last_building
                        .as_deref()
                        .and_then(Self::page_for_building)
                    {
                        new.page = page;
                    }
                }
                Phase::ZoomingOut { started: true } if !new.completed => {
                    new.completed = true;
                    new.phase = Phase::Idle;
                    new.viewport_enabled = true;
                    new.last_building = None;
                }
                // Idle, un-started zoom-out, or an already-consumed
                // completion: stray signal, ignore.
                _ => return self,
            },
            ZoomOutStarted => match new.phase {
                Phase::ZoomingOut { started: false } => {
                    new.phase = Phase::ZoomingOut { started: true };
                }
                _ => return self,
            },
            Back { reduced_motion } => {
                if new.page == Page::Home || new.phase != Phase::Idle {
                    return self;
                }
                new.page = Page::Home;
                new.scene_hidden = false;
                if reduced_motion || new.last_building.is_none() {
                    new.last_building = None;
                    new.viewport_enabled = true;
                } else {
                    // Recompute the focal point so the zoom-out mirrors
                    // the zoom-in, then reveal at the zoomed transform;
                    // the animation is armed on the next painted frame.
                    if let Some(building) = new
                        .last_building
                        .as_deref()
                        .and_then(config::building_by_id)
                    {
                        new.target = iso::building_center(building);
                    }
                    new.phase = Phase::ZoomingOut { started: false };
                    new.completed = false;
                    new.viewport_enabled = false;
                }
            }
            ReducedMotionChanged(reduced) => {
                // Mid-flight preference change snaps the transition to its
                // end state instead of stranding the scene mid-zoom.
                if !reduced {
                    return self;
                }
                match new.phase {
                    Phase::ZoomingIn => {
                        new.completed = true;
                        new.phase = Phase::Idle;
                        new.scene_hidden = true;
                        if let Some(page) = new
                            .last_building
                            .as_deref()
                            .and_then(Self::page_for_building)
                        {
                            new.page = page;
                        }
                    }
                    Phase::ZoomingOut { .. } => {
                        new.completed = true;
                        new.phase = Phase::Idle;
                        new.viewport_enabled = true;
                        new.last_building = None;
                    }
                    Phase::Idle => return self,
                }
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatch(state: NavState, action: NavAction) -> NavState {
        (*Rc::new(state).reduce(action)).clone()
    }

    fn activate(state: NavState, id: &str, reduced_motion: bool) -> NavState {
        dispatch(
            state,
            NavAction::ActivateBuilding {
                id: id.into(),
                reduced_motion,
            },
        )
    }

    #[test]
    fn building_click_zooms_then_navigates() {
        let state = activate(NavState::new(), "post-office", false);
        assert_eq!(state.phase, Phase::ZoomingIn);
        assert_eq!(state.target, ScreenPosition { x: 360.0, y: -180.0 });
        assert!(!state.viewport_enabled);
        assert!(!state.scene_hidden);
        assert_eq!(state.page, Page::Home);

        let state = dispatch(state, NavAction::TransitionEnded);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.page, Page::Contact);
        assert!(state.scene_hidden);
        assert_eq!(state.last_building.as_deref(), Some("post-office"));
    }

    #[test]
    fn duplicate_completion_signals_are_ignored() {
        let state = activate(NavState::new(), "newspaper", false);
        let done = dispatch(state, NavAction::TransitionEnded);
        let again = dispatch(done.clone(), NavAction::TransitionEnded);
        assert_eq!(done, again);
    }

    #[test]
    fn reduced_motion_navigates_synchronously() {
        let state = activate(NavState::new(), "post-office", true);
        assert_eq!(state.phase, Phase::Idle);
        assert!(!state.transition_active());
        assert_eq!(state.page, Page::Contact);
        assert!(state.scene_hidden);
        assert!(state.viewport_enabled, "transition never took the viewport");
    }

    #[test]
    fn reentrant_activation_is_rejected() {
        let state = activate(NavState::new(), "town-center", false);
        let during = activate(state.clone(), "art-gallery", false);
        assert_eq!(state, during);
    }

    #[test]
    fn unknown_building_is_a_no_op() {
        let state = activate(NavState::new(), "cinema", false);
        assert_eq!(state, NavState::new());
    }

    #[test]
    fn back_replays_the_zoom_in_reverse() {
        let state = activate(NavState::new(), "art-gallery", false);
        let state = dispatch(state, NavAction::TransitionEnded);
        assert_eq!(state.page, Page::Photography);

        let state = dispatch(state, NavAction::Back { reduced_motion: false });
        assert_eq!(state.page, Page::Home);
        assert_eq!(state.phase, Phase::ZoomingOut { started: false });
        assert!(!state.scene_hidden, "scene revealed at the zoomed transform");
        assert!(state.scene_transform().starts_with("scale(5)"));

        // A stray transitionend before the animation is armed must not
        // complete the zoom-out.
        let premature = dispatch(state.clone(), NavAction::TransitionEnded);
        assert_eq!(state, premature);

        let state = dispatch(state, NavAction::ZoomOutStarted);
        assert_eq!(state.phase, Phase::ZoomingOut { started: true });
        assert_eq!(state.scene_transform(), "scale(1) translate(0px, 0px)");

        let state = dispatch(state, NavAction::TransitionEnded);
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.viewport_enabled);
        assert!(state.last_building.is_none());
    }

    #[test]
    fn back_with_reduced_motion_returns_instantly() {
        let state = activate(NavState::new(), "newspaper", true);
        let state = dispatch(state, NavAction::Back { reduced_motion: true });
        assert_eq!(state.page, Page::Home);
        assert_eq!(state.phase, Phase::Idle);
        assert!(!state.scene_hidden);
        assert!(state.viewport_enabled);
        assert!(state.last_building.is_none());
    }

    #[test]
    fn reduced_motion_toggle_snaps_zoom_in_to_its_end() {
        let state = activate(NavState::new(), "town-center", false);
        let state = dispatch(state, NavAction::ReducedMotionChanged(true));
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.page, Page::About);
        assert!(state.scene_hidden);
    }

    #[test]
    fn scene_stays_zoomed_while_hidden() {
        let state = activate(NavState::new(), "post-office", false);
        let zoomed = state.scene_transform();
        let state = dispatch(state, NavAction::TransitionEnded);
        assert!(state.scene_hidden);
        assert_eq!(state.scene_transform(), zoomed);
    }
}
