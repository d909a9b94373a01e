//! Elements of a custom form and the values the client answers with.

use serde_json::{json, Value};

use super::FormError;

/// A single element of a custom form.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Toggle {
        text: String,
        default: bool,
    },
    Input {
        text: String,
        default: String,
        placeholder: String,
    },
    Label {
        text: String,
    },
    Slider {
        text: String,
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    },
    Dropdown {
        text: String,
        options: Vec<String>,
        default: usize,
    },
    StepSlider {
        text: String,
        options: Vec<String>,
        default: usize,
    },
}

/// The submitted value of one [`Element`].
#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue {
    Toggle(bool),
    Input(String),
    Label,
    Slider(f64),
    Dropdown(usize),
    StepSlider(usize),
}

impl Element {
    pub fn toggle(text: impl Into<String>, default: bool) -> Self {
        Self::Toggle {
            text: text.into(),
            default,
        }
    }

    pub fn input(text: impl Into<String>, default: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self::Input {
            text: text.into(),
            default: default.into(),
            placeholder: placeholder.into(),
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::Label { text: text.into() }
    }

    pub fn slider(text: impl Into<String>, min: f64, max: f64, step: f64, default: f64) -> Self {
        Self::Slider {
            text: text.into(),
            min,
            max,
            step,
            default,
        }
    }

    pub fn dropdown(text: impl Into<String>, options: Vec<String>, default: usize) -> Self {
        Self::Dropdown {
            text: text.into(),
            options,
            default,
        }
    }

    pub fn step_slider(text: impl Into<String>, options: Vec<String>, default: usize) -> Self {
        Self::StepSlider {
            text: text.into(),
            options,
            default,
        }
    }

    /// JSON object for this element inside a `custom_form`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Toggle { text, default } => json!({
                "type": "toggle",
                "text": text,
                "default": default,
            }),
            Self::Input {
                text,
                default,
                placeholder,
            } => json!({
                "type": "input",
                "text": text,
                "default": default,
                "placeholder": placeholder,
            }),
            Self::Label { text } => json!({
                "type": "label",
                "text": text,
            }),
            Self::Slider {
                text,
                min,
                max,
                step,
                default,
            } => json!({
                "type": "slider",
                "text": text,
                "min": min,
                "max": max,
                "step": step,
                "default": default,
            }),
            Self::Dropdown {
                text,
                options,
                default,
            } => json!({
                "type": "dropdown",
                "text": text,
                "default": default,
                "options": options,
            }),
            Self::StepSlider {
                text,
                options,
                default,
            } => json!({
                "type": "step_slider",
                "text": text,
                "default": default,
                "steps": options,
            }),
        }
    }

    /// Check a submitted JSON value against this element.
    pub fn parse_value(&self, index: usize, value: &Value) -> Result<ElementValue, FormError> {
        let invalid = |reason: &str| FormError::InvalidValue {
            index,
            reason: reason.to_string(),
        };
        match self {
            Self::Toggle { .. } => value
                .as_bool()
                .map(ElementValue::Toggle)
                .ok_or_else(|| invalid("expected bool")),
            Self::Input { .. } => value
                .as_str()
                .map(|s| ElementValue::Input(s.to_string()))
                .ok_or_else(|| invalid("expected string")),
            Self::Label { .. } => match value {
                Value::Null => Ok(ElementValue::Label),
                _ => Err(invalid("expected null")),
            },
            Self::Slider { min, max, .. } => {
                let v = value.as_f64().ok_or_else(|| invalid("expected number"))?;
                if v < *min || v > *max {
                    return Err(invalid("slider value out of range"));
                }
                Ok(ElementValue::Slider(v))
            }
            Self::Dropdown { options, .. } => {
                option_index(value, options.len())
                    .map(ElementValue::Dropdown)
                    .ok_or_else(|| invalid("option index out of range"))
            }
            Self::StepSlider { options, .. } => {
                option_index(value, options.len())
                    .map(ElementValue::StepSlider)
                    .ok_or_else(|| invalid("step index out of range"))
            }
        }
    }
}

fn option_index(value: &Value, len: usize) -> Option<usize> {
    value
        .as_u64()
        .and_then(|i| usize::try_from(i).ok())
        .filter(|i| *i < len)
}
