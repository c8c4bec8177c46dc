//! Validator registry keyed by [`ValidatorKind`].
//!
//! The host form hands its validators to the parameter form as a registry;
//! [`Validators::default`] comes with the built-in [`IntegerValidator`].

use std::collections::HashMap;

use kwhboard_domain::error::ValidationError;
use kwhboard_domain::params::ValidatorKind;

use crate::ports::Validator;

/// Accepts base-10 integers (surrounding whitespace ignored) within range.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerValidator;

impl Validator for IntegerValidator {
    fn validate(
        &self,
        value: &str,
        min: i64,
        max: i64,
        label: &'static str,
    ) -> Result<i64, ValidationError> {
        let parsed: i64 = value
            .trim()
            .parse()
            .map_err(|_| ValidationError::NotAnInteger {
                label,
                value: value.to_string(),
            })?;
        if !(min..=max).contains(&parsed) {
            return Err(ValidationError::OutOfRange {
                label,
                value: parsed,
                min,
                max,
            });
        }
        Ok(parsed)
    }
}

/// Validators available to a form, one per kind.
pub struct Validators {
    by_kind: HashMap<ValidatorKind, Box<dyn Validator>>,
}

impl Validators {
    /// A registry with no validators at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            by_kind: HashMap::new(),
        }
    }

    /// Register (or replace) the validator for `kind`.
    #[must_use]
    pub fn with(mut self, kind: ValidatorKind, validator: impl Validator + 'static) -> Self {
        self.by_kind.insert(kind, Box::new(validator));
        self
    }

    /// Look up the validator for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingValidator`] if none is registered.
    pub fn get(&self, kind: ValidatorKind) -> Result<&dyn Validator, ValidationError> {
        self.by_kind
            .get(&kind)
            .map(|validator| &**validator)
            .ok_or(ValidationError::MissingValidator(kind))
    }
}

impl Default for Validators {
    fn default() -> Self {
        Self::empty().with(ValidatorKind::Integer, IntegerValidator)
    }
}

impl std::fmt::Debug for Validators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.by_kind.keys()).finish()
    }
}
