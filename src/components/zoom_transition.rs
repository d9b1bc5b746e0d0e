use wasm_bindgen::JsValue;
use yew::prelude::*;

/// Wraps the scene container and applies the navigation zoom transform.
///
/// The `transitionend` handler only fires the completion callback for
/// `transform` transitions on the container itself, so property animations
/// from the subtree can never complete a navigation early. Duplicate
/// signals are additionally absorbed by the nav reducer's one-shot guard.
#[derive(Properties, PartialEq, Clone)]
pub struct ZoomTransitionProps {
    /// CSS transform for the scene container.
    pub transform: String,
    /// Animate transform changes. Off under reduced motion and outside
    /// active transitions.
    pub animated: bool,
    /// Remove the scene from the visible layout without unmounting it.
    pub hidden: bool,
    pub on_transition_end: Callback<()>,
    pub children: Children,
}

#[function_component(ZoomTransition)]
pub fn zoom_transition(props: &ZoomTransitionProps) -> Html {
    let container = use_node_ref();

    let ontransitionend = {
        let cb = props.on_transition_end.clone();
        let container = container.clone();
        Callback::from(move |e: TransitionEvent| {
            let on_container = container
                .get()
                .zip(e.target())
                .map(|(node, target)| {
                    let node: &JsValue = node.as_ref();
                    let target: &JsValue = target.as_ref();
                    node == target
                })
                .unwrap_or(false);
            if on_container && e.property_name() == "transform" {
                cb.emit(());
            }
        })
    };

    let style = format!(
        "position:absolute; inset:0; transform-origin:50% 50%; {} transform:{};{}",
        if props.animated {
            "transition: transform 800ms ease-in-out;"
        } else {
            "transition: none;"
        },
        props.transform,
        if props.hidden { " display:none;" } else { "" },
    );

    html! {
        <div ref={container} class="zoom-container" style={style} ontransitionend={ontransitionend}>
            { props.children.clone() }
        </div>
    }
}
