use yew::prelude::*;

use crate::config;
use crate::iso;
use crate::model::{EnvironmentElement, EnvironmentKind, GridPosition};

/// Street ribbons plus the decorative elements (trees, benches, lamp
/// posts), depth-sorted. Rendered beneath the figures and buildings.
#[function_component(EnvironmentLayer)]
pub fn environment_layer() -> Html {
    let mut elements: Vec<&'static EnvironmentElement> = config::ENVIRONMENT.iter().collect();
    elements.sort_by_key(|e| e.z_index);

    html! {
        <g class="environment" aria-hidden="true">
            { for config::STREETS.iter().enumerate().map(|(i, (from, to))| street(i, from, to)) }
            { for elements.iter().map(|e| element(e)) }
        </g>
    }
}

fn street(index: usize, from: &GridPosition, to: &GridPosition) -> Html {
    let a = iso::to_screen(from.grid_x, from.grid_y);
    let b = iso::to_screen(to.grid_x, to.grid_y);
    html! {
        <g key={format!("street-{index}")}>
            <line
                x1={format!("{:.1}", a.x)} y1={format!("{:.1}", a.y)}
                x2={format!("{:.1}", b.x)} y2={format!("{:.1}", b.y)}
                stroke="#E7DCC8" stroke-width="34" stroke-linecap="round"
            />
            <line
                x1={format!("{:.1}", a.x)} y1={format!("{:.1}", a.y)}
                x2={format!("{:.1}", b.x)} y2={format!("{:.1}", b.y)}
                stroke="#DCCFB6" stroke-width="2" stroke-dasharray="10 14"
            />
        </g>
    }
}

fn element(elem: &EnvironmentElement) -> Html {
    let pos = iso::to_screen(elem.position.grid_x, elem.position.grid_y);
    let transform = format!("translate({:.1} {:.1})", pos.x, pos.y);
    let shape = match elem.kind {
        EnvironmentKind::Tree => html! {
            <>
                <line x1="0" y1="0" x2="0" y2="-18" stroke="#8B6F47" stroke-width="3" />
                <circle cx="0" cy="-28" r="14" fill="#A8C29B" stroke="#4a4a4a" stroke-width="1.5" />
                <circle cx="0" cy="-40" r="9" fill="#B5CCA8" stroke="#4a4a4a" stroke-width="1.5" />
            </>
        },
        EnvironmentKind::Bench => html! {
            <>
                <rect x="-13" y="-9" width="26" height="4" fill="#8B6F47" stroke="#4a4a4a" stroke-width="1.2" />
                <line x1="-10" y1="-5" x2="-10" y2="2" stroke="#4a4a4a" stroke-width="1.5" />
                <line x1="10" y1="-5" x2="10" y2="2" stroke="#4a4a4a" stroke-width="1.5" />
            </>
        },
        EnvironmentKind::LampPost => html! {
            <>
                <line x1="0" y1="0" x2="0" y2="-34" stroke="#4a4a4a" stroke-width="2.5" />
                <circle cx="0" cy="-38" r="4.5" fill="#F2D98C" stroke="#4a4a4a" stroke-width="1.5" />
            </>
        },
    };
    html! {
        <g key={elem.id.clone()} class={format!("environment__{:?}", elem.kind).to_lowercase()} transform={transform}>
            { shape }
        </g>
    }
}
