//! Parameter form: binds the hardware poll interval (`Mode1`) to a form field.

use kwhboard_domain::error::{KwhBoardError, ValidationError};
use kwhboard_domain::params::{
    POLL_INTERVAL_DEFAULT, POLL_INTERVAL_LABEL, POLL_INTERVAL_MAX, POLL_INTERVAL_MIN, ParamRecord,
    RawParams, ValidatorKind,
};

use crate::ports::FormField;
use crate::validators::Validators;

/// Check `data.Mode1` with the registry's integer validator.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the value is not an integer in
/// `10..=3600`, or when no integer validator is registered.
pub fn validate(data: &RawParams, validators: &Validators) -> Result<ParamRecord, ValidationError> {
    let value = validators.get(ValidatorKind::Integer)?.validate(
        &data.mode1,
        POLL_INTERVAL_MIN,
        POLL_INTERVAL_MAX,
        POLL_INTERVAL_LABEL,
    )?;
    let mode1 = u32::try_from(value).map_err(|_| ValidationError::OutOfRange {
        label: POLL_INTERVAL_LABEL,
        value,
        min: POLL_INTERVAL_MIN,
        max: POLL_INTERVAL_MAX,
    })?;
    Ok(ParamRecord { mode1 })
}

/// Hardware parameter form over a single bound field.
#[derive(Debug)]
pub struct ParamForm<F> {
    field: F,
}

impl<F: FormField> ParamForm<F> {
    /// Bind the form to `field`.
    pub fn new(field: F) -> Self {
        Self { field }
    }

    /// Write `data.Mode1` into the field, defaulting to 30 seconds when unset.
    ///
    /// `data` itself is left untouched.
    pub fn init(&mut self, data: &RawParams) {
        if data.is_unset() {
            self.field.set_value(&POLL_INTERVAL_DEFAULT.to_string());
        } else {
            self.field.set_value(&data.mode1);
        }
    }

    /// Read the field into a fresh record and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`KwhBoardError::Validation`] when the field holds an invalid
    /// value; the field is left as is for the user to correct.
    #[tracing::instrument(skip(self, validators))]
    pub fn read(&self, validators: &Validators) -> Result<ParamRecord, KwhBoardError> {
        let data = RawParams::new(self.field.value());
        validate(&data, validators).map_err(|err| {
            tracing::debug!(error = %err, "poll interval rejected");
            KwhBoardError::from(err)
        })
    }

    /// The bound field.
    pub fn field(&self) -> &F {
        &self.field
    }
}
