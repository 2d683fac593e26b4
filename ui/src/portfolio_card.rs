//! Portfolio card rendering, split into a pure view-model and a renderer
//! so the data shaping can be tested without a browser.

use api::PortfolioItem;
use dioxus::prelude::*;

use crate::format::{multiline_html, resolve_image_url};

/// Display-ready projection of a [`PortfolioItem`].
#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub id: i64,
    pub title: String,
    /// Escaped description with line breaks as `<br>`, ready for raw
    /// HTML insertion.
    pub description_html: Option<String>,
    pub technologies: Option<String>,
    pub project_url: Option<String>,
    pub image_src: Option<String>,
    pub is_visible: bool,
}

/// Shape one item for rendering: escape the description and absolutize
/// the image URL against the backend origin.
pub fn item_view(item: &PortfolioItem, origin: &str) -> ItemView {
    ItemView {
        id: item.id,
        title: item.title.clone(),
        description_html: item.description.as_deref().map(multiline_html),
        technologies: item.technologies.clone(),
        project_url: item.project_url.clone(),
        image_src: item
            .image_url
            .as_deref()
            .map(|url| resolve_image_url(url, origin)),
        is_visible: item.is_visible,
    }
}

/// Total and visible counters shown on the dashboard, always recomputed
/// from the full list.
pub fn portfolio_stats(items: &[PortfolioItem]) -> (usize, usize) {
    let visible = items.iter().filter(|item| item.is_visible).count();
    (items.len(), visible)
}

/// One portfolio card with edit/delete actions.
#[component]
pub fn ItemCard(
    view: ItemView,
    on_edit: EventHandler<i64>,
    on_delete: EventHandler<i64>,
) -> Element {
    let id = view.id;

    rsx! {
        div {
            class: "portfolio-card",

            div {
                class: "portfolio-card-header",
                div {
                    h4 { class: "portfolio-card-title", "{view.title}" }
                    if view.is_visible {
                        span { class: "badge badge-visible", "● Видимый" }
                    } else {
                        span { class: "badge badge-hidden", "● Скрытый" }
                    }
                }
                div {
                    class: "portfolio-card-actions",
                    button {
                        class: "btn-secondary",
                        onclick: move |_| on_edit.call(id),
                        "Редактировать"
                    }
                    button {
                        class: "btn-danger",
                        onclick: move |_| on_delete.call(id),
                        "Удалить"
                    }
                }
            }

            if let Some(html) = &view.description_html {
                p {
                    class: "portfolio-card-description",
                    dangerous_inner_html: "{html}",
                }
            }

            if let Some(tech) = &view.technologies {
                p {
                    class: "portfolio-card-tech",
                    strong { "Технологии: " }
                    "{tech}"
                }
            }

            div {
                class: "portfolio-card-links",
                if let Some(url) = &view.project_url {
                    a { href: "{url}", target: "_blank", "🔗 Открыть проект" }
                }
                if let Some(src) = &view.image_src {
                    img {
                        class: "portfolio-card-image",
                        src: "{src}",
                        alt: "{view.title}",
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, visible: bool) -> PortfolioItem {
        PortfolioItem {
            id,
            title: format!("Проект {id}"),
            description: None,
            image_url: None,
            project_url: None,
            technologies: None,
            is_visible: visible,
        }
    }

    #[test]
    fn test_item_view_escapes_description_markup() {
        let mut raw = item(1, true);
        raw.description = Some("<script>alert(1)</script>\nстрока".to_string());

        let view = item_view(&raw, "http://localhost:8000");
        let html = view.description_html.unwrap();
        assert_eq!(html, "&lt;script&gt;alert(1)&lt;/script&gt;<br>строка");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_item_view_absolutizes_relative_image() {
        let mut raw = item(2, true);
        raw.image_url = Some("/uploads/2.png".to_string());
        let view = item_view(&raw, "http://localhost:8000");
        assert_eq!(
            view.image_src.as_deref(),
            Some("http://localhost:8000/uploads/2.png")
        );

        raw.image_url = Some("https://cdn.example.com/2.png".to_string());
        let view = item_view(&raw, "http://localhost:8000");
        assert_eq!(
            view.image_src.as_deref(),
            Some("https://cdn.example.com/2.png")
        );
    }

    #[test]
    fn test_portfolio_stats_counts_visible() {
        let items = [item(1, true), item(2, false), item(3, true)];
        assert_eq!(portfolio_stats(&items), (3, 2));
        assert_eq!(portfolio_stats(&[]), (0, 0));
    }
}
