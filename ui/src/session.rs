//! Session context and hooks.
//!
//! [`SessionProvider`] owns the shared [`ApiClient`] and a
//! [`SessionState`] signal with the cached current user. The provider
//! only loads data; what to do about an expired session is decided by
//! the page that hit it (inline message on the auth pages, redirect
//! everywhere else).

use api::{ApiClient, CurrentUser};
use dioxus::prelude::*;

/// Cached authentication state for the whole app.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<CurrentUser>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// Get the current session state signal.
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// Get the shared API client.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

/// Provider component that owns the API client and the session state.
/// Wrap the app with this component.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let client = use_context_provider(ApiClient::from_env);
    let mut state = use_context_provider(|| Signal::new(SessionState::default()));

    // Fetch the current user on mount when a credential is present.
    let _ = use_resource(move || {
        let client = client.clone();
        async move {
            if !client.has_token() {
                state.set(SessionState {
                    user: None,
                    loading: false,
                });
                return;
            }
            match client.current_user().await {
                Ok(user) => state.set(SessionState {
                    user: Some(user),
                    loading: false,
                }),
                Err(err) => {
                    tracing::debug!("failed to load current user: {err}");
                    state.set(SessionState {
                        user: None,
                        loading: false,
                    });
                }
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Button that drops the credential and returns to the landing page.
#[component]
pub fn LogoutButton(#[props(default = "Выйти".to_string())] label: String) -> Element {
    let client = use_api();

    rsx! {
        button {
            class: "btn-secondary",
            onclick: move |_| {
                client.logout();
                redirect("/");
            },
            "{label}"
        }
    }
}

/// Full-page browser navigation. The four pages are separate documents,
/// so navigation between them is a real redirect, not a client-side route.
pub fn redirect(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("redirect to {path} skipped outside the browser");
    }
}

/// Browser confirmation dialog. Returns `false` outside the browser, so
/// destructive actions never run without an explicit confirmation.
pub fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .map(|w| w.confirm_with_message(message).unwrap_or(false))
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("confirm dialog unavailable, rejecting: {message}");
        false
    }
}
