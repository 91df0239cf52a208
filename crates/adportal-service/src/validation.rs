//! Turns `validator` output into a `Validation` error listing every field.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use adportal_core::error::AppError;

/// Records a password that is shorter than the configured minimum.
pub(crate) fn check_password(
    errors: &mut ValidationErrors,
    field: &'static str,
    password: &str,
    min_length: usize,
) {
    if password.chars().count() < min_length {
        errors.add(
            field,
            ValidationError::new("length").with_message(Cow::Owned(format!(
                "must be at least {min_length} characters"
            ))),
        );
    }
}

/// `Ok` when nothing failed, otherwise one `field: message` line per failure
/// sorted by field.
pub(crate) fn into_result(errors: ValidationErrors) -> Result<(), AppError> {
    if errors.is_empty() {
        return Ok(());
    }

    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let details = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            let label = camel_case(&field);
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("is invalid ({})", e.code));
                format!("{label}: {message}")
            })
        })
        .collect();

    Err(AppError::validation_failed(details))
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
