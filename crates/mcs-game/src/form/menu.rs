use std::sync::Arc;

use serde_json::{json, Value};

use super::{FormError, SubmitFn};
use crate::entity::Controllable;

/// A clickable button of a [`MenuForm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub text: String,
    /// Texture path, or an `http(s)` URL. Empty for no image.
    pub image: String,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: String::new(),
        }
    }

    pub fn with_image(text: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: image.into(),
        }
    }

    fn to_json(&self) -> Value {
        let mut v = json!({ "text": self.text });
        if !self.image.is_empty() {
            let kind = if self.image.starts_with("http:") || self.image.starts_with("https:") {
                "url"
            } else {
                "path"
            };
            v["image"] = json!({ "type": kind, "data": self.image });
        }
        v
    }
}

/// A body of text followed by a list of buttons.
pub struct MenuForm {
    pub title: String,
    pub body: String,
    pub buttons: Vec<Button>,
    on_submit: Option<SubmitFn<usize>>,
}

impl MenuForm {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            buttons: Vec::new(),
            on_submit: None,
        }
    }

    pub fn button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn on_submit(
        mut self,
        f: impl Fn(usize, &Arc<dyn Controllable>) + Send + Sync + 'static,
    ) -> Self {
        self.on_submit = Some(Box::new(f));
        self
    }

    pub(super) fn to_json(&self) -> Value {
        json!({
            "type": "form",
            "title": self.title,
            "content": self.body,
            "buttons": self.buttons.iter().map(Button::to_json).collect::<Vec<_>>(),
        })
    }

    /// The client answers with the index of the pressed button.
    pub(super) fn submit(&self, value: &Value, submitter: &Arc<dyn Controllable>) -> Result<(), FormError> {
        let index = value
            .as_u64()
            .and_then(|i| usize::try_from(i).ok())
            .filter(|i| *i < self.buttons.len())
            .ok_or_else(|| FormError::UnexpectedResponse(value.to_string()))?;
        if let Some(f) = &self.on_submit {
            f(index, submitter);
        }
        Ok(())
    }
}
