//! Registration page.

use dioxus::prelude::*;
use ui::{redirect, use_api};

#[component]
pub fn Register() -> Element {
    let client = use_api();
    let mut email = use_signal(String::new);
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut full_name = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);

            let mail = email().trim().to_string();
            let user = username().trim().to_string();
            let pass = password();

            if mail.is_empty() || !mail.contains('@') {
                error.set(Some("Введите корректный email".to_string()));
                return;
            }
            if user.is_empty() {
                error.set(Some("Введите имя пользователя".to_string()));
                return;
            }
            if pass.chars().count() < 6 {
                error.set(Some(
                    "Пароль должен содержать минимум 6 символов".to_string(),
                ));
                return;
            }

            let name = full_name().trim().to_string();
            let name = if name.is_empty() { None } else { Some(name) };

            loading.set(true);
            match client.register(&mail, &user, &pass, name).await {
                Ok(_) => redirect("/login"),
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

            h1 { class: "auth-title", "Регистрация" }
            p { class: "auth-subtitle", "Создайте аккаунт для своего портфолио" }

            form {
                class: "auth-form",
                onsubmit: handle_register,

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    r#type: "text",
                    placeholder: "Имя пользователя",
                    value: username(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Пароль (минимум 6 символов)",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                input {
                    r#type: "text",
                    placeholder: "Полное имя (необязательно)",
                    value: full_name(),
                    oninput: move |evt: FormEvent| full_name.set(evt.value()),
                }

                button {
                    class: "btn-primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Создание аккаунта..." } else { "Зарегистрироваться" }
                }
            }

            p {
                class: "auth-switch",
                "Уже есть аккаунт? "
                a { href: "/login", "Войти" }
            }
        }
    }
}
