//! Landing page.

use dioxus::prelude::*;
use ui::use_session;

#[component]
pub fn Home() -> Element {
    let session = use_session();
    let logged_in = session().user.is_some();

    rsx! {
        div {
            class: "landing",

            h1 { class: "landing-title", "Моё портфолио" }
            p {
                class: "landing-subtitle",
                "Личный кабинет с профилем и проектами"
            }

            div {
                class: "landing-actions",
                if logged_in {
                    a { class: "btn-primary", href: "/profile", "Личный кабинет" }
                } else {
                    a { class: "btn-primary", href: "/login", "Войти" }
                    a { class: "btn-secondary", href: "/register", "Регистрация" }
                }
            }
        }
    }
}
