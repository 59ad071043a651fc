//! The dispatcher: method name + arguments in, typed return value out.
//!
//! # Design
//! `ServiceClient` is the single entry point over a registered
//! [`ServiceSpec`]. Each call resolves the method's [`InvocationTemplate`]
//! from a concurrent cache (compiling it on first use, at most once per
//! method even under racing first calls — the dashmap entry guard blocks
//! other threads for the key while the winner compiles), binds the
//! arguments, hands the request to the caller-supplied [`Requestor`], and
//! maps the response onto the caller's declared type.
//!
//! The dispatcher never retries anything. Transport failures are wrapped
//! with the method name for diagnostics and otherwise propagated unchanged.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::bind::bind_arguments;
use crate::config::PropertySource;
use crate::error::{InvokerError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::response::map_response;
use crate::template::{compile, InvocationTemplate, ServiceSpec};

/// Transport contract. Implementations execute one request synchronously
/// and return the raw response, or fail with their own error which the
/// dispatcher propagates untouched.
///
/// Also implemented for plain closures, which is how tests mock the wire.
pub trait Requestor {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<F> Requestor for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError>,
{
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self(request)
    }
}

/// A client over one registered service. Cheap to share behind an `Arc`;
/// the template cache is the only mutable state and supports unbounded
/// concurrent reads.
pub struct ServiceClient<R> {
    spec: ServiceSpec,
    props: Box<dyn PropertySource + Send + Sync>,
    requestor: R,
    templates: DashMap<String, Arc<InvocationTemplate>>,
}

impl<R: Requestor> ServiceClient<R> {
    pub fn new(
        spec: ServiceSpec,
        props: impl PropertySource + Send + Sync + 'static,
        requestor: R,
    ) -> Self {
        Self {
            spec,
            props: Box::new(props),
            requestor,
            templates: DashMap::new(),
        }
    }

    /// Invoke a registered method with the given ordered arguments and map
    /// the response onto `T`.
    ///
    /// Metadata problems (unknown method, unresolved placeholder, invalid
    /// parameter combination) surface here on first use and will recur
    /// identically on every retry; argument problems fail before the
    /// transport is called.
    pub fn invoke<T: DeserializeOwned>(
        &self,
        method: &str,
        args: Vec<Value>,
    ) -> Result<T, InvokerError> {
        let template = self.template(method)?;
        let request = bind_arguments(&template, args)?;
        log::debug!("dispatching `{method}`: {} {}", request.method, request.url);
        let response = self
            .requestor
            .send(&request)
            .map_err(|source| InvokerError::Transport {
                method: method.to_string(),
                source,
            })?;
        map_response(method, template.returns, &response)
    }

    /// Cache hit, or compile under the per-key entry guard. Failed
    /// compilations are not cached; being pure functions of the metadata
    /// they fail identically on every subsequent call.
    fn template(&self, method: &str) -> Result<Arc<InvocationTemplate>, InvokerError> {
        if let Some(template) = self.templates.get(method) {
            return Ok(Arc::clone(&template));
        }
        match self.templates.entry(method.to_string()) {
            Entry::Occupied(occupied) => Ok(Arc::clone(occupied.get())),
            Entry::Vacant(vacant) => {
                let spec = self.spec.find(method).ok_or_else(|| InvokerError::Template {
                    method: method.to_string(),
                    reason: "method is not registered".to_string(),
                })?;
                let template = Arc::new(compile(&self.spec, spec, self.props.as_ref())?);
                vacant.insert(Arc::clone(&template));
                Ok(template)
            }
        }
    }
}
