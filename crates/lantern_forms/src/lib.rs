//! Lantern Forms
//!
//! Contact form pipeline: read and validate the visitor's input, call the
//! `submit contact form` endpoint, and report the outcome on the page.
//!
//! The remote call sits behind [`ContactEndpoint`] so the pipeline runs the
//! same against `fetch` in the browser and against an in-process fake.

pub mod controller;
pub mod endpoint;
pub mod submission;

pub use controller::{ContactFormController, SubmitOutcome};
pub use endpoint::{interpret_response, ContactEndpoint, SubmitError};
pub use submission::{ContactSubmission, Field, FieldError};
