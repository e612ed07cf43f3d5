use yew::prelude::*;

mod api;
mod certificate;
mod channel;
mod config;
mod home;
mod styles;

use crate::home::Home;

#[function_component(App)]
fn app() -> Html {
    html! {
        <div class="min-h-screen bg-gradient-to-br from-yellow-300 via-orange-200 to-red-200">
            <Home />
        </div>
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
