//! Profile page: dashboard summary, profile/password forms, and
//! portfolio management (create, edit, delete, image upload).
//!
//! All portfolio state lives in two signals (`user`, `items`) replaced
//! wholesale on every reload; after any mutation the full list is
//! re-fetched so the counters are always recomputed from fresh data.

use api::{ApiClient, CurrentUser, PortfolioItem, ProfileUpdate};
use dioxus::prelude::*;
use ui::format::{format_date_ru, normalize_optional};
use ui::{
    confirm, item_view, portfolio_stats, redirect, use_api, use_messages, ItemCard,
    ItemSubmission, LogoutButton, MessageBanner, Messages, ModalOverlay, PortfolioForm,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Dashboard,
    Profile,
    Security,
    Portfolio,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Profile, Tab::Security, Tab::Portfolio];

    fn label(self) -> &'static str {
        match self {
            Tab::Dashboard => "Обзор",
            Tab::Profile => "Профиль",
            Tab::Security => "Безопасность",
            Tab::Portfolio => "Портфолио",
        }
    }
}

/// The editable profile-form fields as a bundle of copyable signals, so
/// the loader and the submit handler share one fill/serialize path.
#[derive(Clone, Copy)]
struct ProfileFields {
    email: Signal<String>,
    username: Signal<String>,
    full_name: Signal<String>,
    telegram: Signal<String>,
    phone: Signal<String>,
    is_public: Signal<bool>,
    show_email: Signal<bool>,
}

impl ProfileFields {
    fn fill(mut self, user: &CurrentUser) {
        self.email.set(user.email.clone());
        self.username.set(user.username.clone());
        self.full_name.set(user.full_name.clone().unwrap_or_default());
        self.telegram.set(user.telegram.clone().unwrap_or_default());
        self.phone.set(user.phone.clone().unwrap_or_default());
        self.is_public.set(user.is_profile_public);
        self.show_email.set(user.show_email_in_profile);
    }

    /// Full replace: cleared optional fields go out as explicit nulls.
    fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            email: self.email.cloned(),
            username: self.username.cloned(),
            full_name: normalize_optional(&self.full_name.cloned()),
            telegram: normalize_optional(&self.telegram.cloned()),
            phone: normalize_optional(&self.phone.cloned()),
            is_profile_public: self.is_public.cloned(),
            show_email_in_profile: self.show_email.cloned(),
        }
    }
}

async fn reload_items(
    client: &ApiClient,
    mut items: Signal<Vec<PortfolioItem>>,
    mut messages: Messages,
) {
    match client.list_portfolio().await {
        Ok(list) => items.set(list),
        Err(err) => messages.error(format!("Ошибка при загрузке портфолио: {err}")),
    }
}

#[component]
pub fn Profile() -> Element {
    let client = use_api();
    let mut messages = use_messages();

    let mut user = use_signal(|| Option::<CurrentUser>::None);
    let mut items = use_signal(Vec::<PortfolioItem>::new);
    let mut active_tab = use_signal(|| Tab::Dashboard);
    let mut editing = use_signal(|| Option::<PortfolioItem>::None);

    let fields = ProfileFields {
        email: use_signal(String::new),
        username: use_signal(String::new),
        full_name: use_signal(String::new),
        telegram: use_signal(String::new),
        phone: use_signal(String::new),
        is_public: use_signal(|| false),
        show_email: use_signal(|| true),
    };

    let mut new_password = use_signal(String::new);
    let mut saving_profile = use_signal(|| false);
    let mut saving_password = use_signal(|| false);
    let mut creating = use_signal(|| false);
    let mut updating = use_signal(|| false);
    // Remounts the create form after a successful submit to clear it.
    let mut form_epoch = use_signal(|| 0u32);

    // Initial load: current user plus the portfolio list.
    let _loader = use_resource({
        let client = client.clone();
        move || {
            let client = client.clone();
            async move {
                if !client.has_token() {
                    redirect("/login");
                    return;
                }
                match client.current_user().await {
                    Ok(u) => {
                        fields.fill(&u);
                        user.set(Some(u));
                    }
                    Err(err) if err.is_unauthorized() => {
                        redirect("/login");
                        return;
                    }
                    Err(err) => {
                        messages.error(format!(
                            "Ошибка при загрузке данных пользователя: {err}"
                        ));
                    }
                }
                reload_items(&client, items, messages).await;
            }
        }
    });

    let handle_profile_save = {
        let client = client.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let client = client.clone();
            spawn(async move {
                saving_profile.set(true);
                match client.update_profile(&fields.to_update()).await {
                    Ok(_) => {
                        messages.success("Профиль успешно обновлен");
                        // Reload so server-computed fields show up.
                        match client.current_user().await {
                            Ok(u) => {
                                fields.fill(&u);
                                user.set(Some(u));
                            }
                            Err(err) => {
                                tracing::debug!("reload after profile update failed: {err}")
                            }
                        }
                    }
                    Err(err) if err.is_unauthorized() => redirect("/login"),
                    Err(err) => messages.error(err.to_string()),
                }
                saving_profile.set(false);
            });
        }
    };

    let handle_password_save = {
        let client = client.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let password = new_password();
            if password.chars().count() < 6 {
                messages.error("Пароль должен содержать минимум 6 символов");
                return;
            }
            let client = client.clone();
            spawn(async move {
                saving_password.set(true);
                match client.change_password(&password).await {
                    Ok(_) => {
                        messages.success("Пароль успешно изменен");
                        new_password.set(String::new());
                    }
                    Err(err) if err.is_unauthorized() => redirect("/login"),
                    Err(err) => messages.error(err.to_string()),
                }
                saving_password.set(false);
            });
        }
    };

    let handle_create = {
        let client = client.clone();
        move |submission: ItemSubmission| {
            let client = client.clone();
            spawn(async move {
                creating.set(true);
                let image_url = match &submission.image {
                    Some(img) => {
                        match client
                            .upload_image(&img.file_name, img.mime, img.bytes.clone())
                            .await
                        {
                            Ok(url) => Some(url),
                            Err(err) => {
                                messages.error(err.to_string());
                                creating.set(false);
                                return;
                            }
                        }
                    }
                    None => None,
                };
                match client.create_item(&submission.into_payload(image_url)).await {
                    Ok(_) => {
                        messages.success("Проект успешно добавлен");
                        let epoch = *form_epoch.peek();
                        form_epoch.set(epoch.wrapping_add(1));
                        reload_items(&client, items, messages).await;
                    }
                    Err(err) if err.is_unauthorized() => redirect("/login"),
                    Err(err) => messages.error(err.to_string()),
                }
                creating.set(false);
            });
        }
    };

    let handle_edit_save = {
        let client = client.clone();
        move |submission: ItemSubmission| {
            let Some(item) = editing() else {
                return;
            };
            let client = client.clone();
            spawn(async move {
                updating.set(true);
                // A new file replaces the image; otherwise the existing
                // URL is preserved.
                let image_url = match &submission.image {
                    Some(img) => {
                        match client
                            .upload_image(&img.file_name, img.mime, img.bytes.clone())
                            .await
                        {
                            Ok(url) => Some(url),
                            Err(err) => {
                                messages.error(err.to_string());
                                updating.set(false);
                                return;
                            }
                        }
                    }
                    None => item.image_url.clone(),
                };
                match client
                    .update_item(item.id, &submission.into_payload(image_url))
                    .await
                {
                    Ok(_) => {
                        messages.success("Проект успешно обновлен");
                        editing.set(None);
                        reload_items(&client, items, messages).await;
                    }
                    Err(err) if err.is_unauthorized() => redirect("/login"),
                    Err(err) => messages.error(err.to_string()),
                }
                updating.set(false);
            });
        }
    };

    let open_edit = use_callback(move |id: i64| {
        let found = items.peek().iter().find(|item| item.id == id).cloned();
        if let Some(item) = found {
            editing.set(Some(item));
        }
    });

    let request_delete = use_callback({
        let client = client.clone();
        move |id: i64| {
            if !confirm("Вы уверены, что хотите удалить этот проект?") {
                return;
            }
            let client = client.clone();
            spawn(async move {
                match client.delete_item(id).await {
                    Ok(()) => {
                        messages.success("Проект успешно удален");
                        reload_items(&client, items, messages).await;
                    }
                    Err(err) if err.is_unauthorized() => redirect("/login"),
                    Err(err) => messages.error(err.to_string()),
                }
            });
        }
    });

    // No credential — the loader already kicked off the redirect; render
    // nothing in the meantime.
    if !client.has_token() {
        return rsx! {};
    }

    // Signals are Copy; plain bindings keep the form handlers short.
    let ProfileFields {
        mut email,
        mut username,
        mut full_name,
        mut telegram,
        mut phone,
        mut is_public,
        mut show_email,
    } = fields;

    let origin = client.origin().to_string();
    let (total, visible) = portfolio_stats(&items());
    let greeting = user()
        .map(|u| u.full_name.unwrap_or(u.username))
        .unwrap_or_else(|| "Пользователь".to_string());

    rsx! {
        div {
            class: "profile-page",

            header {
                class: "profile-header",
                h1 { "Личный кабинет" }
                div {
                    class: "profile-header-actions",
                    span { class: "profile-greeting", "{greeting}" }
                    LogoutButton {}
                }
            }

            MessageBanner {}

            div {
                class: "tab-bar",
                for tab in Tab::ALL {
                    button {
                        key: "{tab.label()}",
                        class: if active_tab() == tab { "tab-button active" } else { "tab-button" },
                        onclick: move |_| active_tab.set(tab),
                        "{tab.label()}"
                    }
                }
            }

            div {
                class: "tab-content active",

                if active_tab() == Tab::Dashboard {
                    div {
                        class: "dashboard",
                        if let Some(u) = user() {
                            div {
                                class: "dashboard-grid",
                                div {
                                    class: "dashboard-field",
                                    span { class: "dashboard-label", "Email" }
                                    span { "{u.email}" }
                                }
                                div {
                                    class: "dashboard-field",
                                    span { class: "dashboard-label", "Имя пользователя" }
                                    span { "{u.username}" }
                                }
                                div {
                                    class: "dashboard-field",
                                    span { class: "dashboard-label", "Полное имя" }
                                    span { {u.full_name.clone().unwrap_or_else(|| "Не указано".to_string())} }
                                }
                                div {
                                    class: "dashboard-field",
                                    span { class: "dashboard-label", "Статус" }
                                    if u.is_active {
                                        span { class: "status-active", "Активен" }
                                    } else {
                                        span { class: "status-inactive", "Неактивен" }
                                    }
                                }
                                div {
                                    class: "dashboard-field",
                                    span { class: "dashboard-label", "На сайте с" }
                                    span {
                                        {
                                            u.created_at
                                                .as_deref()
                                                .and_then(format_date_ru)
                                                .unwrap_or_else(|| "—".to_string())
                                        }
                                    }
                                }
                            }
                        }
                        div {
                            class: "dashboard-stats",
                            div {
                                class: "stat-card",
                                span { class: "stat-value", "{total}" }
                                span { class: "stat-label", "Всего проектов" }
                            }
                            div {
                                class: "stat-card",
                                span { class: "stat-value", "{visible}" }
                                span { class: "stat-label", "Видимых проектов" }
                            }
                        }
                    }
                }

                if active_tab() == Tab::Profile {
                    form {
                        class: "profile-form",
                        onsubmit: handle_profile_save,

                        div {
                            class: "form-field",
                            label { "Email" }
                            input {
                                r#type: "email",
                                value: email(),
                                oninput: move |evt: FormEvent| email.set(evt.value()),
                            }
                        }
                        div {
                            class: "form-field",
                            label { "Имя пользователя" }
                            input {
                                r#type: "text",
                                value: username(),
                                oninput: move |evt: FormEvent| username.set(evt.value()),
                            }
                        }
                        div {
                            class: "form-field",
                            label { "Полное имя" }
                            input {
                                r#type: "text",
                                value: full_name(),
                                oninput: move |evt: FormEvent| full_name.set(evt.value()),
                            }
                        }
                        div {
                            class: "form-field",
                            label { "Telegram" }
                            input {
                                r#type: "text",
                                placeholder: "@username",
                                value: telegram(),
                                oninput: move |evt: FormEvent| telegram.set(evt.value()),
                            }
                        }
                        div {
                            class: "form-field",
                            label { "Телефон" }
                            input {
                                r#type: "tel",
                                value: phone(),
                                oninput: move |evt: FormEvent| phone.set(evt.value()),
                            }
                        }
                        label {
                            class: "form-checkbox",
                            input {
                                r#type: "checkbox",
                                checked: is_public(),
                                onchange: move |evt: FormEvent| is_public.set(evt.checked()),
                            }
                            "Публичный профиль"
                        }
                        label {
                            class: "form-checkbox",
                            input {
                                r#type: "checkbox",
                                checked: show_email(),
                                onchange: move |evt: FormEvent| show_email.set(evt.checked()),
                            }
                            "Показывать email в профиле"
                        }
                        button {
                            class: "btn-primary",
                            r#type: "submit",
                            disabled: saving_profile(),
                            if saving_profile() { "Сохранение..." } else { "Сохранить" }
                        }
                    }
                }

                if active_tab() == Tab::Security {
                    form {
                        class: "password-form",
                        onsubmit: handle_password_save,

                        div {
                            class: "form-field",
                            label { "Новый пароль" }
                            input {
                                r#type: "password",
                                placeholder: "Минимум 6 символов",
                                value: new_password(),
                                oninput: move |evt: FormEvent| new_password.set(evt.value()),
                            }
                        }
                        button {
                            class: "btn-primary",
                            r#type: "submit",
                            disabled: saving_password(),
                            if saving_password() { "Сохранение..." } else { "Изменить пароль" }
                        }
                    }
                }

                if active_tab() == Tab::Portfolio {
                    div {
                        class: "portfolio-tab",

                        section {
                            class: "portfolio-create",
                            h3 { "Добавить проект" }
                            PortfolioForm {
                                key: "{form_epoch()}",
                                origin: origin.clone(),
                                submit_label: "Добавить проект",
                                submitting: creating(),
                                on_submit: handle_create,
                            }
                        }

                        section {
                            class: "portfolio-list",
                            h3 { "Мои проекты" }
                            if items().is_empty() {
                                div {
                                    class: "empty-state",
                                    div { class: "empty-state-icon", "📁" }
                                    p { "Портфолио пусто. Добавьте свой первый проект!" }
                                }
                            } else {
                                for item in items() {
                                    ItemCard {
                                        key: "{item.id}",
                                        view: item_view(&item, &origin),
                                        on_edit: open_edit,
                                        on_delete: request_delete,
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if let Some(item) = editing() {
                ModalOverlay {
                    on_close: move |_| editing.set(None),
                    div {
                        class: "modal-body",
                        h3 { "Редактировать проект" }
                        PortfolioForm {
                            initial: Some(item.clone()),
                            origin: origin.clone(),
                            submit_label: "Сохранить изменения",
                            submitting: updating(),
                            on_submit: handle_edit_save,
                        }
                    }
                }
            }
        }
    }
}
