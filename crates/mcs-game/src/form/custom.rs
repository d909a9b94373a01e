use std::sync::Arc;

use serde_json::{json, Value};

use super::{Element, ElementValue, FormError, SubmitFn};
use crate::entity::Controllable;

/// A form of free-standing input elements.
pub struct CustomForm {
    pub title: String,
    pub elements: Vec<Element>,
    on_submit: Option<SubmitFn<Vec<ElementValue>>>,
}

impl CustomForm {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: Vec::new(),
            on_submit: None,
        }
    }

    pub fn element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn on_submit(
        mut self,
        f: impl Fn(Vec<ElementValue>, &Arc<dyn Controllable>) + Send + Sync + 'static,
    ) -> Self {
        self.on_submit = Some(Box::new(f));
        self
    }

    pub(super) fn to_json(&self) -> Value {
        json!({
            "type": "custom_form",
            "title": self.title,
            "content": self.elements.iter().map(Element::to_json).collect::<Vec<_>>(),
        })
    }

    /// The client answers with a JSON array, one value per element.
    pub(super) fn submit(&self, value: &Value, submitter: &Arc<dyn Controllable>) -> Result<(), FormError> {
        let values = value
            .as_array()
            .ok_or_else(|| FormError::UnexpectedResponse(value.to_string()))?;
        if values.len() != self.elements.len() {
            return Err(FormError::ElementCount {
                expected: self.elements.len(),
                got: values.len(),
            });
        }
        let parsed = self
            .elements
            .iter()
            .zip(values)
            .enumerate()
            .map(|(i, (element, v))| element.parse_value(i, v))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(f) = &self.on_submit {
            f(parsed, submitter);
        }
        Ok(())
    }
}
