use dioxus::prelude::*;

use ui::views::Shell;
use ui::AuthProvider;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_hook(|| tracing::info!("starting polecheck"));

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::POLECHECK_CSS }

        AuthProvider {
            Shell {}
        }
    }
}
