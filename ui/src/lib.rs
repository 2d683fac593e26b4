//! This crate contains all shared UI for the workspace: the session
//! provider, the transient message banner, the portfolio card and form
//! components, and the pure helpers they render with.

pub mod format;
pub mod upload;

mod session;
pub use session::{confirm, redirect, use_api, use_session, LogoutButton, SessionProvider, SessionState};

mod message;
pub use message::{use_messages, MessageBanner, MessageKind, MessageProvider, Messages};

mod modal;
pub use modal::ModalOverlay;

mod portfolio_card;
pub use portfolio_card::{item_view, portfolio_stats, ItemCard, ItemView};

mod portfolio_form;
pub use portfolio_form::{build_submission, ItemSubmission, PortfolioForm, TITLE_REQUIRED};
