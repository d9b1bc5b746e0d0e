use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, TouchEvent, WheelEvent};
use yew::prelude::*;

use crate::config;
use crate::model::BuildingConfig;
use crate::sim::{Crowd, FigureSnapshot};
use crate::state::{TouchState, Viewport, view_box_for};
use crate::util;

use super::building::Building;
use super::environment::EnvironmentLayer;
use super::figure::StickFigure;

/// Duration of the eased programmatic reset (skipped under reduced motion).
const RESET_ANIM_MS: f64 = 250.0;

#[derive(Properties, PartialEq, Clone)]
pub struct TownsquareSceneProps {
    /// Emits the activated building's id.
    pub on_building_activate: Callback<String>,
    /// Cooperative lock: the navigation transition disables the viewport
    /// while it drives the scene transform.
    pub viewport_enabled: bool,
    /// Run the pedestrian loop. Off while hidden, navigating, or on a
    /// section page.
    pub simulate: bool,
    pub reduced_motion: bool,
}

fn window_size() -> (f64, f64) {
    let win = web_sys::window();
    let w = win
        .as_ref()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(1280.0);
    let h = win
        .as_ref()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    (w, h)
}

/// SVG host for the townsquare: streets, decorations, pedestrians, and
/// the four buildings, wrapped in the user-pannable zoom group.
///
/// The pedestrian clock runs on `requestAnimationFrame` and is cancelled
/// outright (not merely skipped) whenever the scene stops simulating or
/// the tab is hidden; the time baseline resets on resume so there is no
/// catch-up jump.
#[function_component(TownsquareScene)]
pub fn townsquare_scene(props: &TownsquareSceneProps) -> Html {
    let svg_ref = use_node_ref();
    let viewport = use_mut_ref(Viewport::default);
    let touch = use_mut_ref(TouchState::default);
    let crowd = use_mut_ref(Crowd::default);
    let sim_active = use_mut_ref(|| false);
    let sync_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let anim_closure = use_mut_ref(|| None::<Closure<dyn FnMut()>>);
    let anim_raf_id = use_mut_ref(|| None::<i32>);
    let transform_attr = use_state(|| Viewport::default().transform_attr());
    let view_box = use_state(|| {
        let (w, h) = window_size();
        view_box_for(w, h)
    });
    let snapshot = use_state(Vec::<FigureSnapshot>::new);
    let figure_count = use_state(|| config::figure_count_for_width(window_size().0));
    let is_touch = use_state(util::is_touch_device);

    // Keep the cooperative enable flag in sync with the transition.
    {
        let viewport = viewport.clone();
        use_effect_with(props.viewport_enabled, move |enabled| {
            viewport.borrow_mut().set_enabled(*enabled);
            || ()
        });
    }

    // Listener + animation-frame plumbing, registered once per mount.
    {
        let svg_ref = svg_ref.clone();
        let viewport_setup = viewport.clone();
        let touch_setup = touch.clone();
        let crowd_setup = crowd.clone();
        let sim_active_setup = sim_active.clone();
        let sync_ref_setup = sync_ref.clone();
        let anim_raf_cleanup = anim_raf_id.clone();
        let transform_setup = transform_attr.clone();
        let view_box_setup = view_box.clone();
        let snapshot_setup = snapshot.clone();
        let figure_count_setup = figure_count.clone();
        let intercept_pinch = *is_touch;

        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let document = window.document().expect("should have a document on window");
            let svg: Element = svg_ref
                .cast::<Element>()
                .expect("svg_ref not attached to the scene svg");

            // Client pixels -> scene (viewBox) coordinates.
            let to_scene: Rc<dyn Fn(f64, f64) -> (f64, f64)> = {
                let svg = svg.clone();
                Rc::new(move |client_x: f64, client_y: f64| {
                    let rect = svg.get_bounding_client_rect();
                    let (w, h) = window_size();
                    let vb = view_box_for(w, h);
                    vb.client_to_scene(
                        rect.width(),
                        rect.height(),
                        client_x - rect.left(),
                        client_y - rect.top(),
                    )
                })
            };

            // Pedestrian frame loop. The closure reschedules itself while
            // the simulation stays active.
            let raf_id: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));
            let last_tick: Rc<RefCell<f64>> = Rc::new(RefCell::new(0.0));
            let raf_closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                Rc::new(RefCell::new(None));
            {
                let raf_id_frame = raf_id.clone();
                let last_tick_frame = last_tick.clone();
                let raf_closure_frame = raf_closure.clone();
                let crowd_frame = crowd_setup.clone();
                let snapshot_frame = snapshot_setup.clone();
                let sim_active_frame = sim_active_setup.clone();
                let window_frame = window.clone();
                let document_frame = document.clone();
                *raf_closure.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    *raf_id_frame.borrow_mut() = None;
                    let now = util::now_ms();
                    let delta = now - *last_tick_frame.borrow();
                    *last_tick_frame.borrow_mut() = now;
                    {
                        let mut crowd = crowd_frame.borrow_mut();
                        crowd.tick(delta, &config::WALK_PATHS);
                        snapshot_frame.set(crowd.snapshot());
                    }
                    if *sim_active_frame.borrow() && !document_frame.hidden() {
                        if let Ok(id) = window_frame.request_animation_frame(
                            raf_closure_frame
                                .borrow()
                                .as_ref()
                                .unwrap()
                                .as_ref()
                                .unchecked_ref(),
                        ) {
                            *raf_id_frame.borrow_mut() = Some(id);
                        }
                    }
                }) as Box<dyn FnMut()>));
            }

            // Start or stop the loop to match the current flags. Resets
            // the clock baseline on start so a hidden interval never
            // becomes one giant delta.
            let sync_loop: Rc<dyn Fn()> = {
                let raf_id = raf_id.clone();
                let last_tick = last_tick.clone();
                let raf_closure = raf_closure.clone();
                let sim_active = sim_active_setup.clone();
                let window_sync = window.clone();
                let document_sync = document.clone();
                Rc::new(move || {
                    let should_run = *sim_active.borrow() && !document_sync.hidden();
                    let running = raf_id.borrow().is_some();
                    if should_run && !running {
                        *last_tick.borrow_mut() = util::now_ms();
                        if let Ok(id) = window_sync.request_animation_frame(
                            raf_closure
                                .borrow()
                                .as_ref()
                                .unwrap()
                                .as_ref()
                                .unchecked_ref(),
                        ) {
                            *raf_id.borrow_mut() = Some(id);
                        }
                    } else if !should_run {
                        if let Some(id) = raf_id.borrow_mut().take() {
                            let _ = window_sync.cancel_animation_frame(id);
                        }
                    }
                })
            };
            *sync_ref_setup.borrow_mut() = Some(sync_loop.clone());

            let visibility_cb = {
                let sync_loop = sync_loop.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    sync_loop();
                }) as Box<dyn FnMut(_)>)
            };
            document
                .add_event_listener_with_callback(
                    "visibilitychange",
                    visibility_cb.as_ref().unchecked_ref(),
                )
                .ok();

            // Wheel: anchored zoom at the cursor.
            let wheel_cb = {
                let viewport = viewport_setup.clone();
                let transform = transform_setup.clone();
                let to_scene = to_scene.clone();
                Closure::wrap(Box::new(move |e: WheelEvent| {
                    e.prevent_default();
                    let mut vp = viewport.borrow_mut();
                    if !vp.enabled {
                        return;
                    }
                    let (ax, ay) = to_scene(e.client_x() as f64, e.client_y() as f64);
                    vp.wheel_zoom(e.delta_y(), ax, ay);
                    transform.set(vp.transform_attr());
                }) as Box<dyn FnMut(_)>)
            };
            svg.add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .ok();

            // Left-drag pans the square.
            let mousedown_cb = {
                let viewport = viewport_setup.clone();
                let to_scene = to_scene.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    if e.button() != 0 {
                        return;
                    }
                    let (x, y) = to_scene(e.client_x() as f64, e.client_y() as f64);
                    viewport.borrow_mut().begin_pan(x, y);
                }) as Box<dyn FnMut(_)>)
            };
            svg.add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())
                .ok();

            let mousemove_cb = {
                let viewport = viewport_setup.clone();
                let transform = transform_setup.clone();
                let to_scene = to_scene.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    let mut vp = viewport.borrow_mut();
                    if !vp.panning {
                        return;
                    }
                    let (x, y) = to_scene(e.client_x() as f64, e.client_y() as f64);
                    vp.pan_to(x, y);
                    transform.set(vp.transform_attr());
                }) as Box<dyn FnMut(_)>)
            };
            svg.add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
                .ok();

            let mouseup_cb = {
                let viewport = viewport_setup.clone();
                Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
                    viewport.borrow_mut().end_pan();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .ok();

            // Touch: one finger pans, two fingers pinch-zoom. Pinch is
            // only intercepted on touch-capable devices so native browser
            // zoom keeps working elsewhere.
            let touch_start_cb = {
                let viewport = viewport_setup.clone();
                let touch = touch_setup.clone();
                let to_scene = to_scene.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let touches = e.touches();
                    let mut vp = viewport.borrow_mut();
                    if !vp.enabled {
                        return;
                    }
                    if touches.length() == 1 {
                        if let Some(t0) = touches.item(0) {
                            let (x, y) = to_scene(t0.client_x() as f64, t0.client_y() as f64);
                            let mut ts = touch.borrow_mut();
                            ts.single_active = true;
                            ts.pinch = false;
                            vp.begin_pan(x, y);
                        }
                    } else if touches.length() >= 2 && intercept_pinch {
                        if let (Some(t0), Some(t1)) = (touches.item(0), touches.item(1)) {
                            let (x0, y0) = to_scene(t0.client_x() as f64, t0.client_y() as f64);
                            let (x1, y1) = to_scene(t1.client_x() as f64, t1.client_y() as f64);
                            let dist =
                                ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt().max(1e-6);
                            let (mid_x, mid_y) = ((x0 + x1) * 0.5, (y0 + y1) * 0.5);
                            let (world_x, world_y) = vp.to_world(mid_x, mid_y);
                            let mut ts = touch.borrow_mut();
                            ts.pinch = true;
                            ts.single_active = false;
                            ts.start_dist = dist;
                            ts.start_scale = vp.scale;
                            ts.world_x = world_x;
                            ts.world_y = world_y;
                            vp.end_pan();
                        }
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            svg.add_event_listener_with_callback(
                "touchstart",
                touch_start_cb.as_ref().unchecked_ref(),
            )
            .ok();

            let touch_move_cb = {
                let viewport = viewport_setup.clone();
                let touch = touch_setup.clone();
                let transform = transform_setup.clone();
                let to_scene = to_scene.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let touches = e.touches();
                    let mut vp = viewport.borrow_mut();
                    if !vp.enabled {
                        return;
                    }
                    if touches.length() == 1 {
                        if touch.borrow().single_active {
                            if let Some(t0) = touches.item(0) {
                                let (x, y) =
                                    to_scene(t0.client_x() as f64, t0.client_y() as f64);
                                vp.pan_to(x, y);
                                transform.set(vp.transform_attr());
                            }
                        }
                    } else if touches.length() >= 2 && touch.borrow().pinch {
                        if let (Some(t0), Some(t1)) = (touches.item(0), touches.item(1)) {
                            let (x0, y0) = to_scene(t0.client_x() as f64, t0.client_y() as f64);
                            let (x1, y1) = to_scene(t1.client_x() as f64, t1.client_y() as f64);
                            let dist =
                                ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt().max(1e-6);
                            let (mid_x, mid_y) = ((x0 + x1) * 0.5, (y0 + y1) * 0.5);
                            let ts = touch.borrow();
                            vp.apply_pinch(
                                ts.start_scale,
                                dist / ts.start_dist,
                                mid_x,
                                mid_y,
                                ts.world_x,
                                ts.world_y,
                            );
                            drop(ts);
                            transform.set(vp.transform_attr());
                        }
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            svg.add_event_listener_with_callback(
                "touchmove",
                touch_move_cb.as_ref().unchecked_ref(),
            )
            .ok();

            let touch_end_cb = {
                let viewport = viewport_setup.clone();
                let touch = touch_setup.clone();
                let to_scene = to_scene.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let remaining = e.touches().length();
                    if remaining == 0 {
                        touch.borrow_mut().reset();
                        viewport.borrow_mut().end_pan();
                    } else if remaining == 1 {
                        let mut ts = touch.borrow_mut();
                        ts.pinch = false;
                        ts.single_active = true;
                        drop(ts);
                        if let Some(t0) = e.touches().item(0) {
                            let (x, y) = to_scene(t0.client_x() as f64, t0.client_y() as f64);
                            viewport.borrow_mut().begin_pan(x, y);
                        }
                    }
                }) as Box<dyn FnMut(_)>)
            };
            svg.add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();
            svg.add_event_listener_with_callback(
                "touchcancel",
                touch_end_cb.as_ref().unchecked_ref(),
            )
            .ok();

            // Window resize reflows the view box and the crowd size.
            let resize_cb = {
                let view_box = view_box_setup.clone();
                let figure_count = figure_count_setup.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    let (w, h) = window_size();
                    view_box.set(view_box_for(w, h));
                    figure_count.set(config::figure_count_for_width(w));
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();

            let window_cleanup = window.clone();
            let document_cleanup = document.clone();
            move || {
                let _ = svg
                    .remove_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref());
                let _ = svg.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = svg.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = svg.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = svg.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = svg.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = svg.remove_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = window_cleanup.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = window_cleanup.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                let _ = document_cleanup.remove_event_listener_with_callback(
                    "visibilitychange",
                    visibility_cb.as_ref().unchecked_ref(),
                );
                if let Some(id) = raf_id.borrow_mut().take() {
                    let _ = window_cleanup.cancel_animation_frame(id);
                }
                if let Some(id) = anim_raf_cleanup.borrow_mut().take() {
                    let _ = window_cleanup.cancel_animation_frame(id);
                }
                let _keep_alive = (
                    &wheel_cb,
                    &mousedown_cb,
                    &mousemove_cb,
                    &mouseup_cb,
                    &touch_start_cb,
                    &touch_move_cb,
                    &touch_end_cb,
                    &resize_cb,
                    &visibility_cb,
                );
            }
        });
    }

    // Simulation gate: cancel the frame loop when the scene stops being
    // simulated or reduced motion turns on; restart cleanly otherwise.
    {
        let sim_active = sim_active.clone();
        let sync_ref = sync_ref.clone();
        use_effect_with(
            (props.simulate, props.reduced_motion),
            move |(simulate, reduced)| {
                *sim_active.borrow_mut() = *simulate && !*reduced;
                if let Some(sync) = &*sync_ref.borrow() {
                    sync();
                }
                || ()
            },
        );
    }

    // (Re)build the crowd whenever the responsive figure count changes.
    // The count is fixed between breakpoint changes; a change replaces the
    // whole actor set rather than mutating it in place.
    {
        let crowd = crowd.clone();
        let snapshot = snapshot.clone();
        use_effect_with(*figure_count, move |count| {
            let configs = &config::FIGURES[..(*count).min(config::FIGURES.len())];
            let next = Crowd::new(configs, &config::WALK_PATHS, js_sys::Math::random);
            util::clog(&format!("townsquare: {} pedestrians", next.len()));
            snapshot.set(next.snapshot());
            *crowd.borrow_mut() = next;
            || ()
        });
    }

    // Camera overlay callbacks: step zoom about the view center, and an
    // eased reset (instant under reduced motion).
    let zoom_step = |factor: f64| {
        let viewport = viewport.clone();
        let transform_attr = transform_attr.clone();
        Callback::from(move |_: MouseEvent| {
            let (w, h) = window_size();
            let vb = view_box_for(w, h);
            let (cx, cy) = (vb.min_x + vb.width / 2.0, vb.min_y + vb.height / 2.0);
            let mut vp = viewport.borrow_mut();
            vp.zoom_about(factor, cx, cy);
            transform_attr.set(vp.transform_attr());
        })
    };
    let reset_view = {
        let viewport = viewport.clone();
        let transform_attr = transform_attr.clone();
        let anim_closure = anim_closure.clone();
        let anim_raf_id = anim_raf_id.clone();
        let reduced = props.reduced_motion;
        Callback::from(move |_: MouseEvent| {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(id) = anim_raf_id.borrow_mut().take() {
                let _ = window.cancel_animation_frame(id);
            }
            let (from_scale, from_x, from_y) = {
                let vp = viewport.borrow();
                if !vp.enabled {
                    return;
                }
                (vp.scale, vp.translate_x, vp.translate_y)
            };
            if reduced {
                let mut vp = viewport.borrow_mut();
                vp.reset();
                transform_attr.set(vp.transform_attr());
                return;
            }
            let start = util::now_ms();
            let viewport_anim = viewport.clone();
            let transform_anim = transform_attr.clone();
            let anim_raf_inner = anim_raf_id.clone();
            let anim_closure_inner = anim_closure.clone();
            let window_anim = window.clone();
            *anim_closure.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                let t = ((util::now_ms() - start) / RESET_ANIM_MS).clamp(0.0, 1.0);
                let ease = 1.0 - (1.0 - t).powi(3);
                {
                    let mut vp = viewport_anim.borrow_mut();
                    vp.scale = from_scale + (1.0 - from_scale) * ease;
                    vp.translate_x = from_x * (1.0 - ease);
                    vp.translate_y = from_y * (1.0 - ease);
                    transform_anim.set(vp.transform_attr());
                }
                if t < 1.0 {
                    if let Ok(id) = window_anim.request_animation_frame(
                        anim_closure_inner
                            .borrow()
                            .as_ref()
                            .unwrap()
                            .as_ref()
                            .unchecked_ref(),
                    ) {
                        *anim_raf_inner.borrow_mut() = Some(id);
                    }
                } else {
                    *anim_raf_inner.borrow_mut() = None;
                }
            }) as Box<dyn FnMut()>));
            if let Ok(id) = window.request_animation_frame(
                anim_closure
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            ) {
                *anim_raf_id.borrow_mut() = Some(id);
            }
        })
    };

    let mut sorted_buildings: Vec<&'static BuildingConfig> = config::BUILDINGS.iter().collect();
    sorted_buildings.sort_by_key(|b| b.z_index);

    html! {
        <div class="townsquare-scene" style="position:absolute; inset:0;">
            <svg
                ref={svg_ref}
                viewBox={view_box.attr()}
                role="navigation"
                aria-label="Website sections"
                xmlns="http://www.w3.org/2000/svg"
                style="display:block; width:100%; height:100%; touch-action:none; user-select:none;"
            >
                <g class="zoom-group" transform={(*transform_attr).clone()}>
                    <EnvironmentLayer />
                    <g class="stick-figures" aria-hidden="true">
                        { for snapshot.iter().map(|f| html! {
                            <StickFigure
                                key={f.id.clone()}
                                grid_x={f.grid_x}
                                grid_y={f.grid_y}
                                behavior={f.behavior}
                                walk_phase={f.walk_phase}
                                facing_left={f.facing_left}
                            />
                        }) }
                    </g>
                    { for sorted_buildings.iter().map(|config| html! {
                        <Building
                            key={config.id.clone()}
                            config={(*config).clone()}
                            on_activate={props.on_building_activate.clone()}
                            enlarged_hit={*is_touch}
                        />
                    }) }
                </g>
            </svg>
            <div style="position:absolute; left:12px; bottom:12px; background:rgba(250,246,239,0.9); border:1.5px solid #4a4a4a; border-radius:8px; padding:8px; display:flex; gap:6px; align-items:center;">
                <button onclick={zoom_step(0.8)} aria-label="Zoom out">{"-"}</button>
                <button onclick={zoom_step(1.25)} aria-label="Zoom in">{"+"}</button>
                <button onclick={reset_view} aria-label="Reset view">{"Reset"}</button>
            </div>
        </div>
    }
}
