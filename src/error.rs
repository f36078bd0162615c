//! Error types for the template engine.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced to the caller of [`crate::Engine::render`].
///
/// Unresolved variables and unrenderable values are not listed here: both
/// are recovered while rendering and never abort a page.
#[derive(Debug, Error)]
pub enum Error {
    /// The raw template text could not be obtained.
    #[error("template source unavailable: {id}")]
    TemplateSourceUnavailable {
        /// Source identifier that was requested.
        id: String,
        #[source]
        source: std::io::Error,
    },
}
