//! Contact form controller
//!
//! Reads the form, validates it, performs the remote call and reports the
//! outcome in the status element. Whatever happens, the submit button ends
//! up enabled with its original label so the visitor can retry.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lantern_core::{
    ContactConfig, Document, Element, ElementRef, EventKind, HostError, Subscription, TaskSpawner,
};
use tracing::{debug, error, info};

use crate::endpoint::{ContactEndpoint, SubmitError};
use crate::submission::{ContactSubmission, Field, FieldError};

const INVALID_CLASS: &str = "is-invalid";
const SUCCESS_CLASS: &str = "alert-success";
const FAILURE_CLASS: &str = "alert-danger";
const HIDDEN_CLASS: &str = "d-none";

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    /// Validation failed; no remote call was made
    Invalid(Vec<FieldError>),
    Failed(SubmitError),
    /// A submission was already in flight
    Busy,
}

/// Drives one contact form
pub struct ContactFormController<E> {
    config: ContactConfig,
    form: ElementRef,
    button: ElementRef,
    status: Option<ElementRef>,
    endpoint: E,
    in_flight: Cell<bool>,
    listener: RefCell<Option<Subscription>>,
}

impl<E: ContactEndpoint + 'static> ContactFormController<E> {
    /// Locate the form and its submit button
    pub fn new(
        document: &dyn Document,
        config: ContactConfig,
        endpoint: E,
    ) -> Result<Rc<Self>, HostError> {
        let form = document
            .query(&config.form_selector)
            .ok_or_else(|| HostError::MissingElement(config.form_selector.clone()))?;
        let button = document
            .query(&config.submit_selector)
            .ok_or_else(|| HostError::MissingElement(config.submit_selector.clone()))?;
        let status = document.query(&config.status_selector);
        if status.is_none() {
            debug!(selector = %config.status_selector, "contact form has no status element");
        }

        Ok(Rc::new(Self {
            config,
            form,
            button,
            status,
            endpoint,
            in_flight: Cell::new(false),
            listener: RefCell::new(None),
        }))
    }

    /// Handle the form's submit event by spawning [`Self::submit`]
    pub fn bind(self: &Rc<Self>, spawner: Rc<dyn TaskSpawner>) -> Result<(), HostError> {
        let controller = Rc::downgrade(self);
        let handler = Rc::new(move || {
            let Some(controller) = controller.upgrade() else {
                return;
            };
            spawner.spawn_local(Box::pin(async move {
                controller.submit().await;
            }));
        });
        let subscription = self.form.listen(EventKind::Submit, handler)?;
        *self.listener.borrow_mut() = Some(subscription);
        Ok(())
    }

    fn field(&self, field: Field) -> Option<ElementRef> {
        self.form.query(&format!("[name=\"{}\"]", field.name()))
    }

    /// Current trimmed field values
    pub fn read(&self) -> ContactSubmission {
        let value = |field| {
            self.field(field)
                .and_then(|el| el.value())
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };
        ContactSubmission {
            name: value(Field::Name),
            email: value(Field::Email),
            subject: value(Field::Subject),
            message: value(Field::Message),
        }
    }

    /// Validate and send the form
    pub async fn submit(&self) -> SubmitOutcome {
        if self.in_flight.get() {
            debug!("contact form: submission already in flight");
            return SubmitOutcome::Busy;
        }

        let submission = self.read();
        let validation = submission.validate();
        self.mark_fields(validation.as_ref().err().map(Vec::as_slice).unwrap_or(&[]));
        if let Err(errors) = validation {
            debug!("contact form: {} invalid field(s)", errors.len());
            return SubmitOutcome::Invalid(errors);
        }

        self.in_flight.set(true);
        let label = self.button.text();
        self.button.set_disabled(true);
        self.button.set_text(&self.config.busy_label);
        if let Some(status) = &self.status {
            status.add_class(HIDDEN_CLASS);
        }

        let result = self.endpoint.submit(&submission).await;

        self.button.set_text(&label);
        self.button.set_disabled(false);
        self.in_flight.set(false);

        match result {
            Ok(()) => {
                info!("contact form submitted");
                self.show_status(&self.config.success_message, true);
                for field in Field::all() {
                    if let Some(el) = self.field(*field) {
                        el.set_value("");
                    }
                }
                SubmitOutcome::Sent
            }
            Err(err) => {
                error!("contact form submission failed: {}", err);
                let message = err
                    .user_message()
                    .unwrap_or(&self.config.failure_message)
                    .to_string();
                self.show_status(&message, false);
                SubmitOutcome::Failed(err)
            }
        }
    }

    fn mark_fields(&self, errors: &[FieldError]) {
        for field in Field::all() {
            if let Some(el) = self.field(*field) {
                let invalid = errors.iter().any(|e| e.field() == *field);
                el.toggle_class(INVALID_CLASS, invalid);
            }
        }
    }

    fn show_status(&self, message: &str, success: bool) {
        let Some(status) = &self.status else {
            return;
        };
        status.set_text(message);
        status.toggle_class(SUCCESS_CLASS, success);
        status.toggle_class(FAILURE_CLASS, !success);
        status.remove_class(HIDDEN_CLASS);
    }
}
