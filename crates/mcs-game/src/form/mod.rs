//! Forms: UI windows sent to the client that answer asynchronously.
//!
//! A form is encoded to the JSON schema the client renders and keeps the
//! callback that receives the decoded answer.

mod custom;
mod element;
mod menu;
mod modal;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::entity::Controllable;

pub use custom::CustomForm;
pub use element::{Element, ElementValue};
pub use menu::{Button, MenuForm};
pub use modal::ModalForm;

/// Callback invoked with the decoded response and the submitting entity.
pub type SubmitFn<T> = Box<dyn Fn(T, &Arc<dyn Controllable>) + Send + Sync>;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("response is not valid UTF-8")]
    InvalidUtf8,

    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected {expected} values, got {got}")]
    ElementCount { expected: usize, got: usize },

    #[error("invalid value for element {index}: {reason}")]
    InvalidValue { index: usize, reason: String },

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// The closed set of form kinds.
pub enum Form {
    Custom(CustomForm),
    Menu(MenuForm),
    Modal(ModalForm),
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, title) = match self {
            Self::Custom(form) => ("custom", &form.title),
            Self::Menu(form) => ("menu", &form.title),
            Self::Modal(form) => ("modal", &form.title),
        };
        f.debug_struct("Form")
            .field("kind", &kind)
            .field("title", title)
            .finish()
    }
}

impl Form {
    /// JSON text sent in a form request.
    pub fn to_json(&self) -> String {
        let value = match self {
            Self::Custom(form) => form.to_json(),
            Self::Menu(form) => form.to_json(),
            Self::Modal(form) => form.to_json(),
        };
        value.to_string()
    }

    /// Decode `data` according to this form's schema and hand the result to
    /// its submit callback. The callback does not run if decoding fails.
    pub fn submit(&self, data: &[u8], submitter: &Arc<dyn Controllable>) -> Result<(), FormError> {
        let text = std::str::from_utf8(data).map_err(|_| FormError::InvalidUtf8)?;
        let value: Value = serde_json::from_str(text)?;
        match self {
            Self::Custom(form) => form.submit(&value, submitter),
            Self::Menu(form) => form.submit(&value, submitter),
            Self::Modal(form) => form.submit(&value, submitter),
        }
    }
}

impl From<CustomForm> for Form {
    fn from(form: CustomForm) -> Self {
        Self::Custom(form)
    }
}

impl From<MenuForm> for Form {
    fn from(form: MenuForm) -> Self {
        Self::Menu(form)
    }
}

impl From<ModalForm> for Form {
    fn from(form: ModalForm) -> Self {
        Self::Modal(form)
    }
}
