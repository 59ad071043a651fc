//! Placeholder resolution for URL templates.
//!
//! Prefixes and paths may reference configuration values as `${key}` tokens,
//! e.g. `${api.city.host}/city`. Resolution happens exactly once, when a
//! method's template is compiled, never per call.

use crate::error::InvokerError;

/// Read-only key-value source for `${key}` placeholders. Consulted only at
/// template-compile time.
pub trait PropertySource {
    fn get(&self, key: &str) -> Option<String>;
}

impl PropertySource for std::collections::HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        std::collections::HashMap::get(self, key).cloned()
    }
}

/// Replace every `${key}` in `template` with the source's value for `key`.
///
/// Idempotent on strings without placeholders. A missing key or an
/// unterminated `${` fails with [`InvokerError::Configuration`].
pub fn resolve_placeholders(
    template: &str,
    props: &dyn PropertySource,
) -> Result<String, InvokerError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find('}').ok_or_else(|| InvokerError::Configuration {
            template: template.to_string(),
            reason: "unterminated `${` placeholder".to_string(),
        })?;
        let key = &after[..end];
        let value = props.get(key).ok_or_else(|| InvokerError::Configuration {
            template: template.to_string(),
            reason: format!("no value for placeholder `{key}`"),
        })?;
        out.push_str(&value);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
