mod components;
mod config;
mod iso;
mod model;
mod path;
mod sim;
mod state;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
