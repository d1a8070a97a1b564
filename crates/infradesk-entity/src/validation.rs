//! Turning `validator` reports into console errors.

use validator::{Validate, ValidationErrors};

use infradesk_core::AppError;
use infradesk_core::result::AppResult;

/// Run the `Validate` rules on `value`, mapping a failure to a
/// `Validation` error that carries every field message.
pub fn check<T: Validate>(value: &T) -> AppResult<()> {
    value
        .validate()
        .map_err(|errors| AppError::validation(describe(&errors)))
}

/// Field messages, ordered by field name and joined with `"; "`.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
