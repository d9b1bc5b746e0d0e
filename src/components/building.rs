use yew::prelude::*;

use crate::iso;
use crate::model::BuildingConfig;

#[derive(Properties, PartialEq, Clone)]
pub struct BuildingProps {
    pub config: BuildingConfig,
    /// Emits the building id on click or keyboard activation.
    pub on_activate: Callback<String>,
    /// Attach an oversized invisible hit region (touch devices).
    pub enlarged_hit: bool,
}

/// An interactive building: isometric massing with the section's accent
/// color, a name plaque, and full keyboard/pointer activation.
#[function_component(Building)]
pub fn building(props: &BuildingProps) -> Html {
    let hovered = use_state(|| false);
    let config = &props.config;
    let pos = iso::building_center(config);

    let onclick = {
        let cb = props.on_activate.clone();
        let id = config.id.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            cb.emit(id.clone());
        })
    };
    let onkeydown = {
        let cb = props.on_activate.clone();
        let id = config.id.clone();
        Callback::from(move |e: KeyboardEvent| {
            let key = e.key();
            if key == "Enter" || key == " " {
                e.prevent_default();
                cb.emit(id.clone());
            }
        })
    };
    let enter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let leave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };
    let focus = {
        let hovered = hovered.clone();
        Callback::from(move |_: FocusEvent| hovered.set(true))
    };
    let blur = {
        let hovered = hovered.clone();
        Callback::from(move |_: FocusEvent| hovered.set(false))
    };

    let accent = if *hovered {
        config.accent_color_hover.clone()
    } else {
        config.accent_color.clone()
    };

    html! {
        <g
            class="building"
            transform={format!("translate({:.1} {:.1})", pos.x, pos.y)}
            role="button"
            tabindex="0"
            aria-label={config.aria_label.clone()}
            style="cursor:pointer; outline:none;"
            onclick={onclick}
            onkeydown={onkeydown}
            onmouseenter={enter}
            onmouseleave={leave}
            onfocus={focus}
            onblur={blur}
        >
            { if props.enlarged_hit {
                html! { <circle cx="0" cy="-30" r="95" fill="transparent" pointer-events="all" /> }
            } else {
                html! {}
            } }
            // Massing: roof face in the accent color over two neutral walls.
            <polygon points="-55,-56 0,-29 0,27 -55,1" fill="#EFE7D8" stroke="#4a4a4a" stroke-width="2" />
            <polygon points="0,-29 55,-56 55,1 0,27" fill="#E2D8C6" stroke="#4a4a4a" stroke-width="2" />
            <polygon points="0,-83 55,-56 0,-29 -55,-56" fill={accent.clone()} stroke="#4a4a4a" stroke-width="2" />
            // Door on the right wall.
            <polygon points="18,-18 34,-26 34,0 18,8" fill="#FAF6EF" stroke="#4a4a4a" stroke-width="1.5" />
            <text
                x="0" y="48"
                text-anchor="middle"
                font-size="16"
                fill="#3a3a3a"
                style="user-select:none; pointer-events:none;"
            >
                { config.name.clone() }
            </text>
        </g>
    }
}
