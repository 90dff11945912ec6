use thiserror::Error;

/// Errors locating the navbar elements
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("navbar {role} not found (selector {selector:?})")]
    MissingElement {
        role: &'static str,
        selector: String,
    },
}
