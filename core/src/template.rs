//! Method registration metadata and the template compiler.
//!
//! # Design
//! A service is declared as data: a [`ServiceSpec`] carries the URL prefix
//! and one [`MethodSpec`] per method (verb, path, ordered parameter specs,
//! return shape). The compiler turns one method's metadata into an immutable
//! [`InvocationTemplate`]: placeholders resolved, prefix applied, every
//! parameter classified into its wire role. Compilation is a pure function
//! of the metadata, so recompiling always yields identical fields; the
//! dispatcher caches the result per method and never recompiles.

use crate::config::{resolve_placeholders, PropertySource};
use crate::error::InvokerError;
use crate::http::HttpMethod;

/// Declared shape of a method's return value, attached to the compiled
/// template so the response mapper knows how to read the body.
///
/// `Json` covers structured documents, including nested generic containers;
/// the concrete target type is supplied by the caller's type parameter at
/// dispatch. `Scalar` marks methods whose transports answer with bare
/// literals such as `true` or `31` rather than a JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnShape {
    /// No return value; the body is not parsed at all.
    Unit,
    /// A bare boolean, number or string literal.
    Scalar,
    /// A structured JSON document matching the caller's declared type.
    #[default]
    Json,
}

/// Declared role of one method parameter, in the order the method takes
/// them. Mirrors the annotation surface of the declared interface: an
/// explicit name binding, a headers or cookies binding, or no annotation at
/// all, in which case the declared type's structural shape decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamSpec {
    /// Explicitly bound to a request parameter name.
    Named(String),
    /// Unannotated. `collection` records whether the declared type is an
    /// array, collection or map; such arguments are sent wholesale as the
    /// request body.
    Auto { name: String, collection: bool },
    /// A string-to-string map of request headers.
    Headers,
    /// A string-to-string map of request cookies.
    Cookies,
}

impl ParamSpec {
    pub fn named(name: impl Into<String>) -> Self {
        ParamSpec::Named(name.into())
    }

    pub fn auto(name: impl Into<String>, collection: bool) -> Self {
        ParamSpec::Auto {
            name: name.into(),
            collection,
        }
    }
}

/// Compiled role of one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamRole {
    /// Substituted into a `{name}` path token if present, otherwise added
    /// to the query-or-body map under `name`.
    Query(String),
    /// Sent wholesale as the request body.
    Body,
    Headers,
    Cookies,
}

/// Registration metadata for one method of a declared service.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSpec {
    pub name: String,
    pub verb: HttpMethod,
    /// Path template; prefixed by the service prefix unless it resolves to
    /// an absolute URL. May contain `${key}` placeholders and `{name}`
    /// path tokens.
    pub path: String,
    pub params: Vec<ParamSpec>,
    pub returns: ReturnShape,
}

impl MethodSpec {
    /// A GET method returning a JSON document; the defaults of the declared
    /// interface surface.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verb: HttpMethod::Get,
            path: path.into(),
            params: Vec::new(),
            returns: ReturnShape::Json,
        }
    }

    pub fn verb(mut self, verb: HttpMethod) -> Self {
        self.verb = verb;
        self
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, returns: ReturnShape) -> Self {
        self.returns = returns;
        self
    }
}

/// Registration metadata for one declared service: the URL prefix applied
/// to relative paths, plus every method.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceSpec {
    /// URL prefix template, may contain `${key}` placeholders.
    pub prefix: String,
    pub methods: Vec<MethodSpec>,
}

impl ServiceSpec {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            methods: Vec::new(),
        }
    }

    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }

    pub fn find(&self, name: &str) -> Option<&MethodSpec> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Immutable description of how one method maps to an HTTP request.
/// Compiled once, cached by the dispatcher, read-only thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationTemplate {
    pub method: String,
    pub verb: HttpMethod,
    /// Resolved URL; no `${key}` placeholders remain, `{name}` path tokens
    /// are filled in per call by the argument binder.
    pub url: String,
    pub params: Vec<ParamRole>,
    pub returns: ReturnShape,
}

/// True if the string carries its own URL scheme (`http://`, `https://`,
/// ...), in which case the service prefix is not applied.
fn starts_with_scheme(s: &str) -> bool {
    match s.find("://") {
        Some(i) if i > 0 => {
            let scheme = &s[..i];
            scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

/// Compile one method's metadata into an [`InvocationTemplate`].
///
/// Placeholders in both prefix and path are resolved here, exactly once. A
/// path that resolves to an absolute URL is used verbatim; otherwise the
/// resolved prefix is prepended. Declaring more than one body-classified
/// parameter fails with [`InvokerError::Template`].
pub fn compile(
    service: &ServiceSpec,
    method: &MethodSpec,
    props: &dyn PropertySource,
) -> Result<InvocationTemplate, InvokerError> {
    let path = resolve_placeholders(&method.path, props)?;
    let url = if starts_with_scheme(&path) {
        path
    } else {
        let prefix = resolve_placeholders(&service.prefix, props)?;
        format!("{prefix}{path}")
    };

    let mut params = Vec::with_capacity(method.params.len());
    let mut body_params = 0usize;
    for spec in &method.params {
        let role = match spec {
            ParamSpec::Named(name) => ParamRole::Query(name.clone()),
            ParamSpec::Auto { collection: false, name } => ParamRole::Query(name.clone()),
            ParamSpec::Auto { collection: true, .. } => {
                body_params += 1;
                ParamRole::Body
            }
            ParamSpec::Headers => ParamRole::Headers,
            ParamSpec::Cookies => ParamRole::Cookies,
        };
        params.push(role);
    }
    if body_params > 1 {
        return Err(InvokerError::Template {
            method: method.name.clone(),
            reason: format!("{body_params} parameters are body-eligible, at most one is allowed"),
        });
    }

    log::debug!(
        "compiled template for `{}`: {} {}",
        method.name,
        method.verb,
        url
    );

    Ok(InvocationTemplate {
        method: method.name.clone(),
        verb: method.verb,
        url,
        params,
        returns: method.returns,
    })
}
