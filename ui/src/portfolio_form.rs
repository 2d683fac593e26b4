//! Shared create/edit form for portfolio items.
//!
//! Both forms validate the same way: a trimmed title is required (the
//! submission is rejected locally, no network call), optional fields are
//! trimmed and nulled when empty, and an attached image is checked
//! against the size/type guards before it is even previewed.

use api::{ItemPayload, PortfolioItem};
use dioxus::prelude::*;

use crate::format::{normalize_optional, resolve_image_url};
use crate::message::use_messages;
use crate::upload::{check_image, preview_data_url, SelectedImage};

pub const TITLE_REQUIRED: &str = "Название проекта обязательно для заполнения";

/// What the form hands to its parent on submit. The image file is kept
/// separate from the JSON fields: the parent uploads it first (when one
/// was chosen) and embeds the returned URL into the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSubmission {
    pub title: String,
    pub description: Option<String>,
    pub project_url: Option<String>,
    pub technologies: Option<String>,
    pub is_visible: bool,
    pub image: Option<SelectedImage>,
}

impl ItemSubmission {
    /// JSON payload for create/update, with the image URL decided by the
    /// caller (freshly uploaded, preserved from the item, or absent).
    pub fn into_payload(self, image_url: Option<String>) -> ItemPayload {
        ItemPayload {
            title: self.title,
            description: self.description,
            image_url,
            project_url: self.project_url,
            technologies: self.technologies,
            is_visible: self.is_visible,
        }
    }
}

/// Validate and shape the form fields. Fails locally when the trimmed
/// title is empty.
pub fn build_submission(
    title: &str,
    description: &str,
    project_url: &str,
    technologies: &str,
    is_visible: bool,
    image: Option<SelectedImage>,
) -> Result<ItemSubmission, &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TITLE_REQUIRED);
    }
    Ok(ItemSubmission {
        title: title.to_string(),
        description: normalize_optional(description),
        project_url: normalize_optional(project_url),
        technologies: normalize_optional(technologies),
        is_visible,
        image,
    })
}

/// The form itself. In edit mode (`initial` set) the fields are seeded
/// from the item and the current image stays attached unless a new file
/// is chosen.
#[component]
pub fn PortfolioForm(
    initial: Option<PortfolioItem>,
    origin: String,
    submit_label: String,
    submitting: bool,
    on_submit: EventHandler<ItemSubmission>,
) -> Element {
    let seed = initial.clone();
    let (title0, description0, project_url0, technologies0, visible0) = match &seed {
        Some(item) => (
            item.title.clone(),
            item.description.clone().unwrap_or_default(),
            item.project_url.clone().unwrap_or_default(),
            item.technologies.clone().unwrap_or_default(),
            item.is_visible,
        ),
        None => (String::new(), String::new(), String::new(), String::new(), true),
    };

    let mut title = use_signal(move || title0);
    let mut description = use_signal(move || description0);
    let mut project_url = use_signal(move || project_url0);
    let mut technologies = use_signal(move || technologies0);
    let mut is_visible = use_signal(move || visible0);
    let mut image = use_signal(|| Option::<SelectedImage>::None);
    // Bumped to remount the file input when a rejected file must be cleared.
    let mut file_epoch = use_signal(|| 0u32);
    let mut messages = use_messages();

    let current_image = initial
        .as_ref()
        .and_then(|item| item.image_url.as_deref())
        .map(|url| resolve_image_url(url, &origin));

    let handle_file = move |evt: FormEvent| {
        let Some(files) = evt.files() else {
            image.set(None);
            return;
        };
        spawn(async move {
            let Some(name) = files.files().into_iter().next() else {
                image.set(None);
                return;
            };
            let size = files.file_size(&name).await.unwrap_or(0);
            let mime = match check_image(&name, size) {
                Ok(mime) => mime,
                Err(msg) => {
                    messages.error(msg);
                    image.set(None);
                    let epoch = *file_epoch.peek();
                    file_epoch.set(epoch.wrapping_add(1));
                    return;
                }
            };
            match files.read_file(&name).await {
                Some(bytes) => {
                    let preview = preview_data_url(mime, &bytes);
                    image.set(Some(SelectedImage {
                        file_name: name,
                        mime,
                        bytes,
                        preview,
                    }));
                }
                None => {
                    messages.error("Не удалось прочитать файл");
                    image.set(None);
                }
            }
        });
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        match build_submission(
            &title(),
            &description(),
            &project_url(),
            &technologies(),
            is_visible(),
            image(),
        ) {
            Ok(submission) => on_submit.call(submission),
            Err(msg) => messages.error(msg),
        }
    };

    rsx! {
        form {
            class: "portfolio-form",
            onsubmit: handle_submit,

            div {
                class: "form-field",
                label { "Название проекта *" }
                input {
                    r#type: "text",
                    placeholder: "Мой проект",
                    value: title(),
                    oninput: move |evt: FormEvent| title.set(evt.value()),
                }
            }

            div {
                class: "form-field",
                label { "Описание" }
                textarea {
                    rows: 4,
                    placeholder: "Коротко о проекте",
                    value: description(),
                    oninput: move |evt: FormEvent| description.set(evt.value()),
                }
            }

            div {
                class: "form-field",
                label { "Ссылка на проект" }
                input {
                    r#type: "url",
                    placeholder: "https://...",
                    value: project_url(),
                    oninput: move |evt: FormEvent| project_url.set(evt.value()),
                }
            }

            div {
                class: "form-field",
                label { "Технологии" }
                input {
                    r#type: "text",
                    placeholder: "Rust, Dioxus, PostgreSQL",
                    value: technologies(),
                    oninput: move |evt: FormEvent| technologies.set(evt.value()),
                }
            }

            div {
                class: "form-field",
                label { "Изображение" }
                input {
                    key: "{file_epoch()}",
                    r#type: "file",
                    accept: "image/jpeg,image/png,image/gif,image/webp",
                    onchange: handle_file,
                }
            }

            if let Some(selected) = image() {
                div {
                    class: "image-preview",
                    img { src: "{selected.preview}", alt: "Предпросмотр" }
                }
            } else if let Some(src) = &current_image {
                div {
                    class: "image-preview image-preview-current",
                    p { class: "form-help", "Текущее изображение:" }
                    img { src: "{src}", alt: "Текущее изображение" }
                }
            }

            label {
                class: "form-checkbox",
                input {
                    r#type: "checkbox",
                    checked: is_visible(),
                    onchange: move |evt: FormEvent| is_visible.set(evt.checked()),
                }
                "Показывать в профиле"
            }

            button {
                class: "btn-primary",
                r#type: "submit",
                disabled: submitting,
                if submitting { "Сохранение..." } else { "{submit_label}" }
            }
        }
    }
}
