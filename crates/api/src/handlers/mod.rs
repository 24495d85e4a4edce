pub mod gallery;
pub mod products;
pub mod upload;

use lookbook_core::error::CoreError;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Run `validator` derive checks on a request body, flattening field
/// errors into one `VALIDATION_ERROR` message.
pub fn validate_body<T: Validate>(body: &T) -> AppResult<()> {
    body.validate().map_err(|errors| {
        let mut parts: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let detail: Vec<String> = errs
                    .iter()
                    .filter_map(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .collect();
                if detail.is_empty() {
                    format!("{field} is invalid")
                } else {
                    detail.join(", ")
                }
            })
            .collect();
        parts.sort();
        AppError::Core(CoreError::Validation(parts.join("; ")))
    })
}
