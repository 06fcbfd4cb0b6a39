//! # Create-Order Response Classification
//!
//! The remote store does not reliably echo the identifier of the order it
//! just created. The body may be a bare number, an object with the id under
//! one of several field names, an array whose first element carries the id,
//! or nothing usable at all. This module turns that mess into a tagged
//! union and extracts an identifier where one exists.
//!
//! ## Recovery Chain Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │               Identifier Recovery (steps 1-3 live here)                 │
//! │                                                                         │
//! │  Step 1: classify(body)      → NumericId / ObjectWithId /              │
//! │                                ArrayOfObjectsWithId / Unparseable      │
//! │  Step 2: id_from_raw_text    → bare integer body, or first digit run   │
//! │  Step 3: id_from_location    → trailing path segment of a Location     │
//! │                                 header                                  │
//! │                                                                         │
//! │  Step 4 (polling the pending listing) lives in the orchestrator.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::Value;

use crate::backend::CreateOrderResponse;

/// Field names under which backends have been observed to return the order id.
const ID_FIELD_NAMES: &[&str] = &["id", "orderId", "order_id", "orderID"];

/// Wrapper fields that may hold the real payload one level down.
const WRAPPER_FIELD_NAMES: &[&str] = &["data", "result", "order"];

// =============================================================================
// Tagged Union
// =============================================================================

/// Classified shape of a create-order response body.
///
/// Each shape-bearing variant carries the id extracted from that shape, or
/// None when the shape was present but held no usable id (an object with no
/// recognized id field still classifies as `ObjectWithId`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOrderBody {
    /// The body was itself a bare integer.
    NumericId(i64),
    /// The body was a JSON object.
    ObjectWithId(Option<i64>),
    /// The body was a JSON array of objects.
    ArrayOfObjectsWithId(Option<i64>),
    /// Anything else: null, string, boolean, empty array, non-JSON.
    Unparseable,
}

impl CreateOrderBody {
    /// Classify a parsed JSON body.
    pub fn classify(body: &Value) -> Self {
        match body {
            Value::Number(n) => match positive(n.as_i64()) {
                Some(id) => CreateOrderBody::NumericId(id),
                None => CreateOrderBody::Unparseable,
            },
            Value::Object(_) => CreateOrderBody::ObjectWithId(id_from_object(body)),
            Value::Array(items) => {
                if items.iter().any(|item| item.is_object()) {
                    let id = items
                        .iter()
                        .filter(|item| item.is_object())
                        .find_map(id_from_object);
                    CreateOrderBody::ArrayOfObjectsWithId(id)
                } else {
                    CreateOrderBody::Unparseable
                }
            }
            _ => CreateOrderBody::Unparseable,
        }
    }

    /// The identifier this shape yielded, if any.
    pub fn order_id(&self) -> Option<i64> {
        match self {
            CreateOrderBody::NumericId(id) => Some(*id),
            CreateOrderBody::ObjectWithId(id) => *id,
            CreateOrderBody::ArrayOfObjectsWithId(id) => *id,
            CreateOrderBody::Unparseable => None,
        }
    }
}

// =============================================================================
// Extraction Helpers
// =============================================================================

/// Look up the id in an object, trying the known field names directly and
/// then one level down through known wrapper fields.
fn id_from_object(value: &Value) -> Option<i64> {
    let obj = value.as_object()?;

    for field in ID_FIELD_NAMES {
        if let Some(id) = obj.get(*field).and_then(id_from_value) {
            return Some(id);
        }
    }

    for wrapper in WRAPPER_FIELD_NAMES {
        if let Some(inner) = obj.get(*wrapper) {
            if inner.is_object() {
                if let Some(id) = id_from_object(inner) {
                    return Some(id);
                }
            } else if let Some(id) = id_from_value(inner) {
                return Some(id);
            }
        }
    }

    None
}

/// Coerce a leaf value to a positive integer id. Backends switch between
/// numeric and string ids, so both are accepted.
fn id_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => positive(n.as_i64()),
        Value::String(s) => positive(s.trim().parse::<i64>().ok()),
        _ => None,
    }
}

fn positive(candidate: Option<i64>) -> Option<i64> {
    candidate.filter(|id| *id > 0)
}

/// Step 2: accept the whole body if it is a bare integer, otherwise take the
/// first run of digits in the text.
///
/// Only reached after step 1 found nothing, so a digit run inside an error
/// payload is possible; zero is rejected to keep `{"code":0}` bodies out.
pub fn id_from_raw_text(text: &str) -> Option<i64> {
    let trimmed = text.trim().trim_matches('"');
    if let Some(id) = positive(trimmed.parse::<i64>().ok()) {
        return Some(id);
    }

    let mut digits = String::new();
    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
        } else if !digits.is_empty() {
            break;
        }
    }
    positive(digits.parse::<i64>().ok())
}

/// Step 3: pull the id out of a `Location`-style header, e.g.
/// `/api/orders/12345` or `https://store.example/orders/12345?ref=x`.
pub fn id_from_location(location: &str) -> Option<i64> {
    let path = location.split(['?', '#']).next().unwrap_or(location);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .and_then(|segment| positive(segment.parse::<i64>().ok()))
}

/// Run steps 1 through 3 of the recovery chain against one response.
///
/// Returns None when every in-response source is exhausted; the caller
/// falls back to polling the pending listing.
pub fn resolve_immediate(response: &CreateOrderResponse) -> Option<i64> {
    if let Some(body) = &response.body {
        if let Some(id) = CreateOrderBody::classify(body).order_id() {
            return Some(id);
        }
    }

    if let Some(id) = id_from_raw_text(&response.raw_text) {
        return Some(id);
    }

    response
        .location
        .as_deref()
        .and_then(id_from_location)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_bare_number() {
        let body = CreateOrderBody::classify(&json!(12345));
        assert_eq!(body, CreateOrderBody::NumericId(12345));
        assert_eq!(body.order_id(), Some(12345));
    }

    #[test]
    fn test_classify_object_with_plausible_names() {
        for field in ["id", "orderId", "order_id", "orderID"] {
            let body = CreateOrderBody::classify(&json!({ field: 77 }));
            assert_eq!(body.order_id(), Some(77), "field {field}");
        }
    }

    #[test]
    fn test_classify_object_with_string_id() {
        let body = CreateOrderBody::classify(&json!({"id": "4821"}));
        assert_eq!(body.order_id(), Some(4821));
    }

    #[test]
    fn test_classify_wrapped_object() {
        let body = CreateOrderBody::classify(&json!({"data": {"orderId": 910}}));
        assert_eq!(body, CreateOrderBody::ObjectWithId(Some(910)));

        // wrapper holding the id directly
        let body = CreateOrderBody::classify(&json!({"data": 911}));
        assert_eq!(body.order_id(), Some(911));
    }

    #[test]
    fn test_classify_object_without_id() {
        let body = CreateOrderBody::classify(&json!({"message": "created"}));
        assert_eq!(body, CreateOrderBody::ObjectWithId(None));
        assert_eq!(body.order_id(), None);
    }

    #[test]
    fn test_classify_array_of_objects() {
        let body = CreateOrderBody::classify(&json!([{"id": 31}, {"id": 32}]));
        assert_eq!(body, CreateOrderBody::ArrayOfObjectsWithId(Some(31)));

        // first element has no id, second does
        let body = CreateOrderBody::classify(&json!([{"note": "x"}, {"id": 9}]));
        assert_eq!(body.order_id(), Some(9));
    }

    #[test]
    fn test_classify_unparseable_shapes() {
        assert_eq!(
            CreateOrderBody::classify(&json!(null)),
            CreateOrderBody::Unparseable
        );
        assert_eq!(
            CreateOrderBody::classify(&json!(true)),
            CreateOrderBody::Unparseable
        );
        assert_eq!(
            CreateOrderBody::classify(&json!([1, 2, 3])),
            CreateOrderBody::Unparseable
        );
        // zero and negative are not valid ids
        assert_eq!(
            CreateOrderBody::classify(&json!(0)),
            CreateOrderBody::Unparseable
        );
        assert_eq!(
            CreateOrderBody::classify(&json!(-5)),
            CreateOrderBody::Unparseable
        );
    }

    #[test]
    fn test_raw_text_bare_integer() {
        assert_eq!(id_from_raw_text("  6001 \n"), Some(6001));
        assert_eq!(id_from_raw_text("\"6002\""), Some(6002));
    }

    #[test]
    fn test_raw_text_digit_run() {
        assert_eq!(id_from_raw_text("created order 7310 ok"), Some(7310));
        assert_eq!(id_from_raw_text("no identifier here"), None);
        assert_eq!(id_from_raw_text(""), None);
    }

    #[test]
    fn test_location_header_parsing() {
        assert_eq!(id_from_location("/api/orders/12345"), Some(12345));
        assert_eq!(id_from_location("/api/orders/12345/"), Some(12345));
        assert_eq!(
            id_from_location("https://store.example/orders/88?ref=pos"),
            Some(88)
        );
        assert_eq!(id_from_location("/api/orders/new"), None);
        assert_eq!(id_from_location(""), None);
    }

    #[test]
    fn test_resolve_immediate_prefers_body() {
        let response = CreateOrderResponse {
            body: Some(json!({"id": 100})),
            raw_text: "201".into(),
            location: Some("/orders/300".into()),
        };
        assert_eq!(resolve_immediate(&response), Some(100));
    }

    #[test]
    fn test_resolve_immediate_falls_through_to_location() {
        let response = CreateOrderResponse {
            body: Some(json!({"message": "ok"})),
            raw_text: "order accepted".into(),
            location: Some("/orders/300".into()),
        };
        assert_eq!(resolve_immediate(&response), Some(300));
    }

    #[test]
    fn test_resolve_immediate_exhausted() {
        let response = CreateOrderResponse {
            body: None,
            raw_text: String::new(),
            location: None,
        };
        assert_eq!(resolve_immediate(&response), None);
    }
}
