//! Local validation of a server form before it is submitted.
//!
//! A failing form never reaches the network. The failure names the field
//! and its tab so the caller can reveal it.

use thiserror::Error;

use crate::app::form::{FIELD_ORDER, FormTab, ServerForm};

/// Why a field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    Missing,
    NotAllowed,
    NotANumber,
    OutOfRange,
}

/// The first invalid field of a form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for '{field}' on the {} tab ({reason:?})", .tab.title())]
pub struct ValidationFailure {
    pub field: &'static str,
    pub tab: FormTab,
    pub reason: ValidationReason,
}

/// Check every visible field in serialization order.
pub fn validate(form: &ServerForm) -> Result<(), ValidationFailure> {
    for desc in FIELD_ORDER.iter() {
        let Some(field) = form.field(desc.param) else {
            continue;
        };
        if field.hidden {
            continue;
        }
        let fail = |reason| ValidationFailure {
            field: desc.param,
            tab: desc.tab,
            reason,
        };

        let value = field.value.as_deref().map(str::trim).unwrap_or_default();
        if value.is_empty() {
            if field.required {
                return Err(fail(ValidationReason::Missing));
            }
            continue;
        }

        if !field.choices.is_empty() && !field.choices.iter().any(|c| c == value) {
            return Err(fail(ValidationReason::NotAllowed));
        }

        if desc.is_input {
            let number: f64 = value
                .parse()
                .map_err(|_| fail(ValidationReason::NotANumber))?;
            if !number.is_finite() {
                return Err(fail(ValidationReason::NotANumber));
            }
            let below = field.min.is_some_and(|min| number < min);
            let above = field.max.is_some_and(|max| number > max);
            if below || above {
                return Err(fail(ValidationReason::OutOfRange));
            }
        }
    }
    Ok(())
}
