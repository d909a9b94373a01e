use std::sync::Arc;

use serde_json::{json, Value};

use super::{FormError, SubmitFn};
use crate::entity::Controllable;

/// A yes/no question with exactly two buttons.
pub struct ModalForm {
    pub title: String,
    pub body: String,
    pub yes: String,
    pub no: String,
    on_submit: Option<SubmitFn<bool>>,
}

impl ModalForm {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        yes: impl Into<String>,
        no: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            yes: yes.into(),
            no: no.into(),
            on_submit: None,
        }
    }

    pub fn on_submit(
        mut self,
        f: impl Fn(bool, &Arc<dyn Controllable>) + Send + Sync + 'static,
    ) -> Self {
        self.on_submit = Some(Box::new(f));
        self
    }

    pub(super) fn to_json(&self) -> Value {
        json!({
            "type": "modal",
            "title": self.title,
            "content": self.body,
            "button1": self.yes,
            "button2": self.no,
        })
    }

    /// `true` for the first button, `false` for the second.
    pub(super) fn submit(&self, value: &Value, submitter: &Arc<dyn Controllable>) -> Result<(), FormError> {
        let answer = value
            .as_bool()
            .ok_or_else(|| FormError::UnexpectedResponse(value.to_string()))?;
        if let Some(f) = &self.on_submit {
            f(answer, submitter);
        }
        Ok(())
    }
}
