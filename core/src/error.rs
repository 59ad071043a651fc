//! Error types for the declarative HTTP invoker.
//!
//! # Design
//! Every stage of the pipeline gets its own variant so callers can tell a
//! metadata problem (permanent, surfaces at first use) from a per-call
//! problem (bad argument, unparseable response, transport failure). Variants
//! carry the method name where one is known; compile-time variants carry the
//! offending template instead.

use thiserror::Error;

/// Opaque failure returned by a [`Requestor`](crate::Requestor)
/// implementation. Propagated unchanged, wrapped with the method name.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced by template compilation, argument binding, dispatch and
/// response mapping.
#[derive(Debug, Error)]
pub enum InvokerError {
    /// A `${key}` placeholder could not be resolved from the property source.
    #[error("configuration error in `{template}`: {reason}")]
    Configuration { template: String, reason: String },

    /// The registered metadata for a method is structurally invalid, or the
    /// method is not registered at all.
    #[error("invalid method metadata for `{method}`: {reason}")]
    Template { method: String, reason: String },

    /// A runtime argument cannot be bound to its compiled role. Raised
    /// before any request is dispatched.
    #[error("cannot bind arguments for `{method}`: {reason}")]
    ArgumentBinding { method: String, reason: String },

    /// The response body does not match the declared return shape.
    #[error("cannot map response of `{method}`: {reason}")]
    Deserialization { method: String, reason: String },

    /// The transport failed; the underlying error is preserved as-is.
    #[error("transport failed for `{method}`")]
    Transport {
        method: String,
        #[source]
        source: TransportError,
    },
}
