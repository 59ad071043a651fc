//! Declarative HTTP invoker core.
//!
//! # Overview
//! A service is declared as data — a URL prefix plus per-method verb, path
//! template, ordered parameter roles and return shape — and invoked through
//! a single dispatch entry point. The core compiles each method's metadata
//! once into an immutable invocation template, binds runtime arguments into
//! a concrete request, hands the request to a caller-supplied transport and
//! maps the raw response body onto the caller's declared (possibly generic)
//! return type.
//!
//! # Design
//! - The core performs no I/O. The [`Requestor`] trait is the transport
//!   seam; callers plug in whatever HTTP stack they use.
//! - `${key}` placeholders in prefixes and paths resolve from a
//!   [`PropertySource`] exactly once, at template-compile time.
//! - Templates are cached per method in a concurrent map with compile-once
//!   semantics; everything else lives and dies within a single call.
//! - Nothing is ever retried: metadata errors recur deterministically,
//!   argument errors fail before dispatch, transport and mapping errors are
//!   the call's final outcome.

pub mod bind;
pub mod config;
pub mod error;
pub mod http;
pub mod proxy;
pub mod response;
pub mod template;

pub use bind::bind_arguments;
pub use config::{resolve_placeholders, PropertySource};
pub use error::{InvokerError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use proxy::{Requestor, ServiceClient};
pub use response::map_response;
pub use template::{
    compile, InvocationTemplate, MethodSpec, ParamRole, ParamSpec, ReturnShape, ServiceSpec,
};
