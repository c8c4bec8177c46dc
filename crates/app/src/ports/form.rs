//! Form ports: the host form framework's field binding and validators.

use kwhboard_domain::error::ValidationError;

/// A single input bound to a form control.
pub trait FormField {
    /// Current raw text of the control.
    fn value(&self) -> String;

    /// Overwrite the control's text.
    fn set_value(&mut self, value: &str);
}

/// A range-checking validator supplied by the host form.
pub trait Validator: Send + Sync {
    /// Check `value` against `min..=max`, returning the parsed number.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming `label` when the value is not
    /// acceptable.
    fn validate(
        &self,
        value: &str,
        min: i64,
        max: i64,
        label: &'static str,
    ) -> Result<i64, ValidationError>;
}

/// In-memory [`FormField`], for hosts without a real form control.
#[derive(Debug, Default)]
pub struct TextField {
    value: String,
}

impl TextField {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl FormField for TextField {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        value.clone_into(&mut self.value);
    }
}
