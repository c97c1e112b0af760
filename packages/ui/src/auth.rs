//! Authentication context, hooks and forms for the UI.
//!
//! [`AuthProvider`] owns the [`Sessions`] store and mirrors its state into a
//! signal. It subscribes to provider notifications before the first fetch and
//! cancels the listener when it unmounts, which drops the subscription.
//! Children are not rendered until the first fetch has finished.
//!
//! The forms never write the auth signal themselves: a successful call is
//! followed by a notification, and the listener applies it.

use api::{SessionState, Sessions};
use dioxus::prelude::*;

use crate::icons::{FaRightFromBracket, FaRightToBracket, FaUserPlus};
use crate::Icon;

pub type AuthState = SessionState;

const SIGN_UP_SUCCESS: &str = "Signup successful! You can now log in.";

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The session store, for components that call the provider.
pub fn use_sessions() -> Sessions {
    use_context::<Sessions>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let sessions = use_context_provider(api::connect);
    let mut auth_state = use_signal(AuthState::default);
    use_context_provider(|| auth_state);

    let listener = use_hook(|| {
        let sessions = sessions.clone();
        let subscription = sessions.subscribe();
        spawn(async move {
            sessions
                .listen(subscription, move |state| auth_state.set(state))
                .await;
            tracing::warn!("auth notifications ended");
        })
    });
    use_drop(move || listener.cancel());

    // Periodic session check (every 30s) so an expired session is refreshed
    // or dropped
    let checker = sessions.clone();
    use_effect(move || {
        let sessions = checker.clone();
        spawn(async move {
            loop {
                #[cfg(target_arch = "wasm32")]
                gloo_timers::future::sleep(std::time::Duration::from_secs(30)).await;
                #[cfg(not(target_arch = "wasm32"))]
                tokio::time::sleep(std::time::Duration::from_secs(30)).await;

                // Don't check while initial load is still in progress
                if auth_state.peek().loading {
                    continue;
                }
                sessions.check_session().await;
            }
        });
    });

    let _ = use_resource(move || {
        let sessions = sessions.clone();
        async move {
            auth_state.set(sessions.load().await);
        }
    });

    if auth_state.read().loading {
        return rsx! {
            div { class: "auth-loading", "Loading..." }
        };
    }

    rsx! {
        {children}
    }
}

#[component]
pub fn SignUpForm() -> Element {
    let sessions = use_sessions();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut message = use_signal(|| Option::<&'static str>::None);
    let mut loading = use_signal(|| false);

    let handle_sign_up = move |evt: FormEvent| {
        evt.prevent_default();
        let sessions = sessions.clone();
        spawn(async move {
            loading.set(true);
            error.set(None);
            message.set(None);
            match sessions.sign_up(email().trim(), &password()).await {
                Ok(_) => {
                    message.set(Some(SIGN_UP_SUCCESS));
                    email.set(String::new());
                    password.set(String::new());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    rsx! {
        form {
            class: "auth-form",
            onsubmit: handle_sign_up,
            label { r#for: "signup-email", "Email" }
            input {
                id: "signup-email",
                r#type: "email",
                required: true,
                placeholder: "your@email.com",
                disabled: loading(),
                value: email(),
                oninput: move |evt: FormEvent| email.set(evt.value()),
            }
            label { r#for: "signup-password", "Password" }
            input {
                id: "signup-password",
                r#type: "password",
                required: true,
                placeholder: "••••••••",
                disabled: loading(),
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }
            button {
                r#type: "submit",
                class: "btn-primary",
                disabled: loading(),
                Icon { icon: FaUserPlus, width: 14, height: 14 }
                if loading() { " Signing up..." } else { " Sign Up" }
            }
            if let Some(err) = error() {
                p { class: "form-error", "{err}" }
            }
            if let Some(msg) = message() {
                p { class: "form-success", "{msg}" }
            }
        }
    }
}

#[component]
pub fn SignInForm() -> Element {
    let sessions = use_sessions();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_sign_in = move |evt: FormEvent| {
        evt.prevent_default();
        let sessions = sessions.clone();
        spawn(async move {
            loading.set(true);
            error.set(None);
            if let Err(e) = sessions.sign_in(email().trim(), &password()).await {
                error.set(Some(e.to_string()));
            }
            loading.set(false);
        });
    };

    rsx! {
        form {
            class: "auth-form",
            onsubmit: handle_sign_in,
            label { r#for: "login-email", "Email" }
            input {
                id: "login-email",
                r#type: "email",
                required: true,
                placeholder: "your@email.com",
                disabled: loading(),
                value: email(),
                oninput: move |evt: FormEvent| email.set(evt.value()),
            }
            label { r#for: "login-password", "Password" }
            input {
                id: "login-password",
                r#type: "password",
                required: true,
                placeholder: "••••••••",
                disabled: loading(),
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }
            button {
                r#type: "submit",
                class: "btn-primary",
                disabled: loading(),
                Icon { icon: FaRightToBracket, width: 14, height: 14 }
                if loading() { " Logging in..." } else { " Log In" }
            }
            if let Some(err) = error() {
                p { class: "form-error", "{err}" }
            }
        }
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log Out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let sessions = use_sessions();
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let onclick = move |_| {
        let sessions = sessions.clone();
        async move {
            loading.set(true);
            error.set(None);
            if let Err(e) = sessions.sign_out().await {
                error.set(Some(e.to_string()));
            }
            loading.set(false);
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: loading(),
            onclick: onclick,
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            if loading() { " Logging out..." } else { " {label}" }
        }
        if let Some(err) = error() {
            p { class: "form-error", "{err}" }
        }
    }
}
