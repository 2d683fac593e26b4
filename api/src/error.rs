//! Error taxonomy for backend calls.
//!
//! `Display` strings are the user-facing messages shown in the UI banner,
//! so they are written in the product language (Russian). Local form
//! validation failures never construct an [`ApiError`] — they are handled
//! entirely in the view layer and never reach the network.

use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend host could not be reached at all.
    #[error("Не удалось подключиться к серверу. Убедитесь, что backend запущен")]
    Network,

    /// HTTP 401. The stored token has already been cleared when this is
    /// returned; the caller decides between an inline message and a
    /// redirect to the login page.
    #[error("{0}")]
    Unauthorized(String),

    /// Any other non-2xx response, message taken from the backend JSON
    /// body when available.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Login succeeded at the HTTP level but the response carried no
    /// access token.
    #[error("Сервер не вернул токен доступа. Попробуйте еще раз.")]
    NoToken,

    /// A 2xx response body that was expected to be JSON failed to decode.
    #[error("Сервер вернул некорректный ответ")]
    Decode(#[from] serde_json::Error),

    /// The image upload request could not be constructed.
    #[error("Ошибка при загрузке изображения")]
    Upload,
}

impl ApiError {
    /// True for the 401 case, which the profile page turns into a redirect.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}
