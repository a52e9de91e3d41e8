use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::AppError;

/// Json extractor that also runs `validator` rules. Malformed bodies are a
/// 400, rule violations a 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(violation_summary(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::bad_request("Missing 'Content-Type: application/json' header")
        }
        JsonRejection::JsonDataError(err) => {
            let detail = err.body_text();
            if let Some(field) = missing_field(&detail) {
                AppError::bad_request(format!("{field} is required"))
            } else if detail.contains("invalid type") {
                AppError::bad_request("Invalid field type in request")
            } else {
                AppError::bad_request("Invalid request body")
            }
        }
        _ => AppError::bad_request("Invalid request body"),
    }
}

/// Pulls the field name out of serde's `missing field \`x\`` detail.
fn missing_field(detail: &str) -> Option<&str> {
    detail.split("missing field `").nth(1)?.split('`').next()
}

/// One line joining every rule violation, sorted so the output is stable.
fn violation_summary(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
