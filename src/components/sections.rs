use yew::prelude::*;

use crate::state::nav::Page;

#[derive(Properties, PartialEq, Clone)]
pub struct SectionPageProps {
    pub page: Page,
    pub on_back: Callback<()>,
}

/// A content page behind one of the buildings. Thin by design: a heading,
/// a short body, and the control that zooms back out to the townsquare.
#[function_component(SectionPage)]
pub fn section_page(props: &SectionPageProps) -> Html {
    let (title, body) = match props.page {
        Page::About => (
            "About",
            "The town center of this site: who I am, what I work on, and \
             why this corner of the web looks like a village square.",
        ),
        Page::Blog => (
            "Blog",
            "Dispatches from the newspaper stand. Notes on software, side \
             projects, and whatever else makes the presses run.",
        ),
        Page::Photography => (
            "Photography",
            "The gallery wing. A rotating selection of photos from travels \
             and walks, printed large and hung with care.",
        ),
        Page::Contact => (
            "Contact",
            "The post office counter. Send a letter: collaborations, \
             questions, or a simple hello are all welcome.",
        ),
        Page::Home => ("", ""),
    };

    let onclick = {
        let cb = props.on_back.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <main class="section-page" style="position:absolute; inset:0; overflow:auto; background:#FAF6EF; padding:48px 24px;">
            <button
                onclick={onclick}
                aria-label={format!("Back to the townsquare from {title}")}
                style="position:absolute; top:16px; left:16px; background:none; border:1.5px solid #4a4a4a; border-radius:8px; padding:6px 14px; font-size:14px; color:#3a3a3a; cursor:pointer;"
            >
                { "\u{2190} Townsquare" }
            </button>
            <div style="max-width:640px; margin:48px auto 0;">
                <h1 style="font-size:32px; margin:0 0 16px 0;">{ title }</h1>
                <p style="font-size:17px; line-height:1.6; margin:0;">{ body }</p>
            </div>
        </main>
    }
}
