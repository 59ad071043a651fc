//! Response mapping: raw body bytes into the declared return type.
//!
//! # Design
//! The compiled template carries a [`ReturnShape`] telling the mapper how to
//! read the body; the concrete target type is the caller's type parameter,
//! so nested generic containers (`ResultBean<City>` and the like)
//! deserialize through serde without any runtime type inspection.
//!
//! Scalar-shaped methods get special treatment because transports commonly
//! answer them with bare literals — `true`, `31`, or raw unquoted text —
//! which are not always valid JSON documents.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::InvokerError;
use crate::http::HttpResponse;
use crate::template::ReturnShape;

/// Parse a bare literal body: boolean, then integer, then float, falling
/// back to the raw text itself.
fn parse_scalar(text: &str) -> Value {
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => {
            if let Ok(n) = text.parse::<i64>() {
                Value::from(n)
            } else if let Ok(n) = text.parse::<u64>() {
                Value::from(n)
            } else if let Ok(n) = text.parse::<f64>() {
                Value::from(n)
            } else {
                Value::String(text.to_string())
            }
        }
    }
}

/// Map a raw response onto the method's declared return type.
///
/// `Unit` never parses the body. `Scalar` interprets a bare literal.
/// `Json` requires the body to be a document structurally matching `T`.
pub fn map_response<T: DeserializeOwned>(
    method: &str,
    shape: ReturnShape,
    response: &HttpResponse,
) -> Result<T, InvokerError> {
    let fail = |reason: String| InvokerError::Deserialization {
        method: method.to_string(),
        reason,
    };
    match shape {
        ReturnShape::Unit => serde_json::from_value(Value::Null).map_err(|e| fail(e.to_string())),
        ReturnShape::Scalar => {
            let value = parse_scalar(response.text().trim());
            serde_json::from_value(value).map_err(|e| fail(e.to_string()))
        }
        ReturnShape::Json => {
            serde_json::from_str(&response.text()).map_err(|e| fail(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct City {
        id: i64,
        name: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct ResultBean<T> {
        code: i32,
        data: T,
    }

    #[test]
    fn unit_shape_ignores_the_body() {
        let resp = HttpResponse::ok("anything, even garbage");
        let _: () = map_response("m", ReturnShape::Unit, &resp).unwrap();
    }

    #[test]
    fn scalar_shape_parses_bare_booleans() {
        let resp = HttpResponse::ok("true");
        let value: bool = map_response("m", ReturnShape::Scalar, &resp).unwrap();
        assert!(value);

        let resp = HttpResponse::ok("false");
        let value: bool = map_response("m", ReturnShape::Scalar, &resp).unwrap();
        assert!(!value);
    }

    #[test]
    fn scalar_shape_parses_bare_numbers() {
        let resp = HttpResponse::ok("31");
        let value: i64 = map_response("m", ReturnShape::Scalar, &resp).unwrap();
        assert_eq!(value, 31);

        let resp = HttpResponse::ok("3.5");
        let value: f64 = map_response("m", ReturnShape::Scalar, &resp).unwrap();
        assert_eq!(value, 3.5);
    }

    #[test]
    fn scalar_shape_falls_back_to_raw_text() {
        let resp = HttpResponse::ok("东莞");
        let value: String = map_response("m", ReturnShape::Scalar, &resp).unwrap();
        assert_eq!(value, "东莞");
    }

    #[test]
    fn scalar_shape_trims_surrounding_whitespace() {
        let resp = HttpResponse::ok(" true\n");
        let value: bool = map_response("m", ReturnShape::Scalar, &resp).unwrap();
        assert!(value);
    }

    #[test]
    fn json_shape_deserializes_a_document() {
        let resp = HttpResponse::ok(r#"{"id":31,"name":"东莞"}"#);
        let city: City = map_response("m", ReturnShape::Json, &resp).unwrap();
        assert_eq!(
            city,
            City {
                id: 31,
                name: "东莞".to_string()
            }
        );
    }

    #[test]
    fn json_shape_deserializes_nested_generics() {
        let resp = HttpResponse::ok(r#"{"code":0,"data":{"id":1,"name":"北京"}}"#);
        let bean: ResultBean<City> = map_response("m", ReturnShape::Json, &resp).unwrap();
        assert_eq!(bean.code, 0);
        assert_eq!(bean.data.name, "北京");
    }

    #[test]
    fn json_shape_deserializes_collections() {
        let resp = HttpResponse::ok(r#"[{"id":1,"name":"北京"},{"id":2,"name":"上海"}]"#);
        let cities: Vec<City> = map_response("m", ReturnShape::Json, &resp).unwrap();
        assert_eq!(cities.len(), 2);
    }

    #[test]
    fn structural_mismatch_is_a_deserialization_error() {
        let resp = HttpResponse::ok("not json at all");
        let err = map_response::<City>("getCity", ReturnShape::Json, &resp).unwrap_err();
        match err {
            InvokerError::Deserialization { method, .. } => assert_eq!(method, "getCity"),
            other => panic!("expected Deserialization, got {other:?}"),
        }
    }

    #[test]
    fn scalar_type_mismatch_is_a_deserialization_error() {
        let resp = HttpResponse::ok("definitely-not-a-bool");
        let err = map_response::<bool>("m", ReturnShape::Scalar, &resp).unwrap_err();
        assert!(matches!(err, InvokerError::Deserialization { .. }));
    }
}
