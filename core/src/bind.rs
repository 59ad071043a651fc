//! Argument binding: one invocation's runtime values into a concrete request.
//!
//! # Design
//! Binding takes the compiled [`InvocationTemplate`] and the ordered
//! argument list of one call and produces a single [`HttpRequest`]. It
//! either fully succeeds or fails before the transport sees anything; no
//! partially bound request ever escapes.
//!
//! A named argument whose name occurs as a `{name}` token in the URL is
//! substituted into the path (percent-encoded) and deliberately not
//! duplicated into the query-or-body map. A body-classified argument is the
//! entire payload and wins over any named parameters. On GET the assembled
//! map travels as query data; on every other verb it travels as a JSON
//! object body.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::InvokerError;
use crate::http::{HttpMethod, HttpRequest};
use crate::template::{InvocationTemplate, ParamRole};

/// Render a scalar argument for use inside a URL. Strings go in verbatim,
/// everything else uses its JSON rendering.
fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A headers- or cookies-bound argument must be a string-keyed,
/// string-valued object; anything else fails before dispatch.
fn as_string_map(
    method: &str,
    kind: &str,
    value: &Value,
) -> Result<HashMap<String, String>, InvokerError> {
    let object = value.as_object().ok_or_else(|| InvokerError::ArgumentBinding {
        method: method.to_string(),
        reason: format!("{kind} argument must be a string-to-string map, got {value}"),
    })?;
    let mut map = HashMap::with_capacity(object.len());
    for (key, entry) in object {
        let text = entry.as_str().ok_or_else(|| InvokerError::ArgumentBinding {
            method: method.to_string(),
            reason: format!("{kind} entry `{key}` must be a string, got {entry}"),
        })?;
        map.insert(key.clone(), text.to_string());
    }
    Ok(map)
}

/// Bind one call's arguments against a compiled template.
///
/// `args` must have the same arity and order as the template's parameter
/// list. Any leftover `{token}` in the URL after substitution means a path
/// parameter had no bound argument and fails the call.
pub fn bind_arguments(
    template: &InvocationTemplate,
    args: Vec<Value>,
) -> Result<HttpRequest, InvokerError> {
    if args.len() != template.params.len() {
        return Err(InvokerError::ArgumentBinding {
            method: template.method.clone(),
            reason: format!(
                "expected {} arguments, got {}",
                template.params.len(),
                args.len()
            ),
        });
    }

    let mut url = template.url.clone();
    let mut data = Map::new();
    let mut body: Option<Value> = None;
    let mut headers = HashMap::new();
    let mut cookies = HashMap::new();

    for (role, arg) in template.params.iter().zip(args) {
        match role {
            ParamRole::Query(name) => {
                let token = format!("{{{name}}}");
                if url.contains(&token) {
                    let encoded = urlencoding::encode(&render_scalar(&arg)).into_owned();
                    url = url.replace(&token, &encoded);
                } else {
                    data.insert(name.clone(), arg);
                }
            }
            ParamRole::Body => body = Some(arg),
            ParamRole::Headers => {
                headers = as_string_map(&template.method, "headers", &arg)?;
            }
            ParamRole::Cookies => {
                cookies = as_string_map(&template.method, "cookies", &arg)?;
            }
        }
    }

    if let Some(start) = url.find('{') {
        let token: String = url[start..]
            .chars()
            .take_while(|c| *c != '}')
            .skip(1)
            .collect();
        return Err(InvokerError::ArgumentBinding {
            method: template.method.clone(),
            reason: format!("path parameter `{token}` has no bound argument"),
        });
    }

    // A body argument is always the whole payload. Without one, non-GET
    // verbs carry the named-parameter map as a JSON object body.
    if body.is_none() && template.verb != HttpMethod::Get && !data.is_empty() {
        body = Some(Value::Object(std::mem::take(&mut data)));
    }

    Ok(HttpRequest {
        method: template.verb,
        url,
        data,
        body,
        headers,
        cookies,
    })
}
