use dioxus::prelude::*;

use crate::auth::{SignInForm, SignUpForm};

/// Shown while nobody is signed in.
#[component]
pub fn SignInView() -> Element {
    rsx! {
        div {
            class: "sign-in-view",
            h2 { "Please Sign In" }
            div {
                class: "auth-cards",
                div {
                    class: "auth-card",
                    h3 { "Sign Up" }
                    SignUpForm {}
                }
                div {
                    class: "auth-card",
                    h3 { "Log In" }
                    SignInForm {}
                }
            }
        }
    }
}
