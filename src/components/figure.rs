use std::f64::consts::TAU;

use yew::prelude::*;

use crate::iso;
use crate::model::Behavior;

#[derive(Properties, PartialEq, Clone)]
pub struct StickFigureProps {
    pub grid_x: f64,
    pub grid_y: f64,
    pub behavior: Behavior,
    /// Gait cycle phase in [0, 1); drives the limb swing.
    pub walk_phase: f64,
    pub facing_left: bool,
}

/// One pedestrian, drawn as a line-art stick figure at its projected
/// screen position. Mirrored horizontally when walking leftward.
#[function_component(StickFigure)]
pub fn stick_figure(props: &StickFigureProps) -> Html {
    let pos = iso::to_screen(props.grid_x, props.grid_y);
    let flip = if props.facing_left { -1.0 } else { 1.0 };
    let transform = format!("translate({:.2} {:.2}) scale({flip} 1)", pos.x, pos.y);

    let stroke = "#4a4a4a";
    let body = match props.behavior {
        Behavior::Walking => {
            let swing = (props.walk_phase * TAU).sin();
            let leg = 5.0 * swing;
            let arm = 4.0 * swing;
            html! {
                <>
                    <line x1="0" y1="-21" x2="0" y2="-6" stroke={stroke} stroke-width="2" />
                    <line x1="0" y1="-6" x2={fmt(leg)} y2="8" stroke={stroke} stroke-width="2" />
                    <line x1="0" y1="-6" x2={fmt(-leg)} y2="8" stroke={stroke} stroke-width="2" />
                    <line x1="0" y1="-17" x2={fmt(-arm)} y2="-8" stroke={stroke} stroke-width="1.6" />
                    <line x1="0" y1="-17" x2={fmt(arm)} y2="-8" stroke={stroke} stroke-width="1.6" />
                </>
            }
        }
        Behavior::Sitting => html! {
            // Seated: torso upright, legs folded forward at the knee.
            <>
                <line x1="0" y1="-19" x2="0" y2="-4" stroke={stroke} stroke-width="2" />
                <polyline points="0,-4 6,-3 6,6" fill="none" stroke={stroke} stroke-width="2" />
                <line x1="0" y1="-15" x2="5" y2="-8" stroke={stroke} stroke-width="1.6" />
            </>
        },
        Behavior::Idle => html! {
            <>
                <line x1="0" y1="-21" x2="0" y2="-6" stroke={stroke} stroke-width="2" />
                <line x1="0" y1="-6" x2="-3" y2="8" stroke={stroke} stroke-width="2" />
                <line x1="0" y1="-6" x2="3" y2="8" stroke={stroke} stroke-width="2" />
                <line x1="0" y1="-17" x2="-3" y2="-7" stroke={stroke} stroke-width="1.6" />
                <line x1="0" y1="-17" x2="3" y2="-7" stroke={stroke} stroke-width="1.6" />
            </>
        },
        Behavior::EnteringBuilding => html! {
            // Mid-doorway: same standing pose, fading into the entrance.
            <g opacity="0.45">
                <line x1="0" y1="-21" x2="0" y2="-6" stroke={stroke} stroke-width="2" />
                <line x1="0" y1="-6" x2="-3" y2="8" stroke={stroke} stroke-width="2" />
                <line x1="0" y1="-6" x2="3" y2="8" stroke={stroke} stroke-width="2" />
            </g>
        },
    };

    html! {
        <g class="stick-figure" transform={transform}>
            <circle cx="0" cy="-26" r="5" fill="none" stroke={stroke} stroke-width="2" />
            { body }
        </g>
    }
}

fn fmt(v: f64) -> String {
    format!("{v:.2}")
}
