use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use crate::state::nav::{NavAction, NavState, Page, Phase};
use crate::util;

use super::scene::TownsquareScene;
use super::sections::SectionPage;
use super::zoom_transition::ZoomTransition;

/// Root component: owns the navigation reducer and the live
/// `prefers-reduced-motion` subscription, and wires the scene, the zoom
/// transition wrapper, and the section pages together.
#[function_component(App)]
pub fn app() -> Html {
    let nav = use_reducer(NavState::new);
    let reduced_motion = use_state(util::prefers_reduced_motion);

    // Track the OS-level preference while the page is open.
    {
        let reduced_motion = reduced_motion.clone();
        use_effect_with((), move |_| {
            let mql = web_sys::window()
                .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
                .flatten();
            let change_cb = Closure::wrap(Box::new(move |e: web_sys::MediaQueryListEvent| {
                reduced_motion.set(e.matches());
            }) as Box<dyn FnMut(_)>);
            if let Some(m) = &mql {
                let _ = m
                    .add_event_listener_with_callback("change", change_cb.as_ref().unchecked_ref());
            }
            move || {
                if let Some(m) = &mql {
                    let _ = m.remove_event_listener_with_callback(
                        "change",
                        change_cb.as_ref().unchecked_ref(),
                    );
                }
                drop(change_cb);
            }
        });
    }

    // Preference flips mid-transition snap the transition to its end.
    {
        let nav = nav.clone();
        use_effect_with(*reduced_motion, move |reduced| {
            nav.dispatch(NavAction::ReducedMotionChanged(*reduced));
            || ()
        });
    }

    // After a zoom-out reveal, let one frame paint at the zoomed-in
    // transform before arming the animation back to identity.
    {
        let nav = nav.clone();
        let pending = matches!(nav.phase, Phase::ZoomingOut { started: false });
        use_effect_with(pending, move |pending| {
            if *pending {
                if let Some(window) = web_sys::window() {
                    let arm = Closure::once_into_js(move || {
                        nav.dispatch(NavAction::ZoomOutStarted);
                    });
                    let _ = window.request_animation_frame(arm.unchecked_ref());
                }
            }
            || ()
        });
    }

    let on_building_activate = {
        let nav = nav.clone();
        let reduced = *reduced_motion;
        Callback::from(move |id: String| {
            util::clog(&format!("navigate: building {id}"));
            nav.dispatch(NavAction::ActivateBuilding {
                id,
                reduced_motion: reduced,
            });
        })
    };
    let on_transition_end = {
        let nav = nav.clone();
        Callback::from(move |()| nav.dispatch(NavAction::TransitionEnded))
    };
    let on_back = {
        let nav = nav.clone();
        let reduced = *reduced_motion;
        Callback::from(move |()| {
            nav.dispatch(NavAction::Back {
                reduced_motion: reduced,
            })
        })
    };

    let simulate = nav.page == Page::Home && !nav.scene_hidden && !nav.transition_active();

    html! {
        <div
            id="app"
            style="position:fixed; inset:0; overflow:hidden; background:#FAF6EF; color:#3a3a3a; font-family:Georgia, 'Times New Roman', serif;"
        >
            <ZoomTransition
                transform={nav.scene_transform()}
                animated={!*reduced_motion && nav.transition_active()}
                hidden={nav.scene_hidden}
                on_transition_end={on_transition_end}
            >
                <TownsquareScene
                    on_building_activate={on_building_activate}
                    viewport_enabled={nav.viewport_enabled}
                    simulate={simulate}
                    reduced_motion={*reduced_motion}
                />
            </ZoomTransition>
            { if nav.page != Page::Home {
                html! { <SectionPage page={nav.page} on_back={on_back} /> }
            } else {
                html! {}
            } }
        </div>
    }
}
