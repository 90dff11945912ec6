//! Remote `submit contact form` call

use std::future::Future;

use serde::Deserialize;
use thiserror::Error;

use crate::submission::ContactSubmission;

/// Failure of the remote call
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The endpoint answered with a structured error
    #[error("remote error {code}: {message}")]
    Remote { code: String, message: String },

    /// The request never produced a usable answer
    #[error("transport failed: {0}")]
    Transport(String),
}

impl SubmitError {
    /// Message meant for the visitor, if the endpoint supplied one
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Remote { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

/// The remote procedure receiving contact submissions
pub trait ContactEndpoint {
    fn submit(
        &self,
        submission: &ContactSubmission,
    ) -> impl Future<Output = Result<(), SubmitError>>;
}

#[derive(Deserialize)]
struct ResponseBody {
    #[serde(default)]
    ok: Option<bool>,
    #[serde(default)]
    error: Option<RemoteErrorBody>,
}

#[derive(Deserialize)]
struct RemoteErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Interpret an HTTP answer of the endpoint
///
/// Success is a 2xx status with an empty body or `{"ok": true}`. A body of
/// the form `{"error": {"code", "message"}}` is a structured error at any
/// status; anything else is a transport error.
pub fn interpret_response(status: u16, body: &str) -> Result<(), SubmitError> {
    let success = (200..300).contains(&status);
    if body.trim().is_empty() {
        return if success {
            Ok(())
        } else {
            Err(SubmitError::Transport(format!("HTTP {status}")))
        };
    }

    let parsed: ResponseBody = serde_json::from_str(body)
        .map_err(|err| SubmitError::Transport(format!("HTTP {status}: unreadable body: {err}")))?;

    if let Some(error) = parsed.error {
        return Err(SubmitError::Remote {
            code: error.code,
            message: error.message,
        });
    }
    match (success, parsed.ok) {
        (true, Some(true) | None) => Ok(()),
        (true, Some(false)) => Err(SubmitError::Remote {
            code: "rejected".to_string(),
            message: String::new(),
        }),
        (false, _) => Err(SubmitError::Transport(format!("HTTP {status}"))),
    }
}
