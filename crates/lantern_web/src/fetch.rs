//! `fetch`-backed contact endpoint

use lantern_forms::{interpret_response, ContactEndpoint, ContactSubmission, SubmitError};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::js_error;

/// POSTs the submission as JSON to a fixed URL
pub struct FetchContactEndpoint {
    url: String,
}

impl FetchContactEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    async fn post(&self, body: &str) -> Result<(u16, String), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let headers = Headers::new()?;
        headers.set("Content-Type", "application/json")?;
        headers.set("Accept", "application/json")?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(body));
        let request = Request::new_with_str_and_init(&self.url, &init)?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await?
            .dyn_into()?;
        let text = JsFuture::from(response.text()?)
            .await?
            .as_string()
            .unwrap_or_default();
        Ok((response.status(), text))
    }
}

impl ContactEndpoint for FetchContactEndpoint {
    async fn submit(&self, submission: &ContactSubmission) -> Result<(), SubmitError> {
        let body = serde_json::to_string(submission)
            .map_err(|err| SubmitError::Transport(err.to_string()))?;
        let (status, text) = self
            .post(&body)
            .await
            .map_err(|err| SubmitError::Transport(js_error(&err)))?;
        debug!("contact endpoint answered HTTP {}", status);
        interpret_response(status, &text)
    }
}
