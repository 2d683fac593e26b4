//! Login page with username/password form.
//!
//! A failed login (including a 401) is shown inline here instead of
//! bouncing through a redirect, so the user sees why it failed.

use dioxus::prelude::*;
use ui::{redirect, use_api, use_session};

#[component]
pub fn Login() -> Element {
    let client = use_api();
    let session = use_session();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already logged in — straight to the profile.
    if !session().loading && session().user.is_some() {
        redirect("/profile");
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);

            let user = username().trim().to_string();
            let pass = password();
            if user.is_empty() || pass.is_empty() {
                error.set(Some("Введите имя пользователя и пароль".to_string()));
                return;
            }

            loading.set(true);
            match client.login(&user, &pass).await {
                Ok(()) => redirect("/profile"),
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",

            h1 { class: "auth-title", "Вход" }
            p { class: "auth-subtitle", "Войдите, чтобы управлять портфолио" }

            form {
                class: "auth-form",
                onsubmit: handle_login,

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }

                input {
                    r#type: "text",
                    placeholder: "Имя пользователя",
                    value: username(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Пароль",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    class: "btn-primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Вход..." } else { "Войти" }
                }
            }

            p {
                class: "auth-switch",
                "Нет аккаунта? "
                a { href: "/register", "Зарегистрироваться" }
            }
        }
    }
}
