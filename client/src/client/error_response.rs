//! Classification of non-success responses into [`AccessManagerError`].
//!
//! The service reports failures with a structured JSON payload. Known
//! not-found codes become typed errors carrying the missing identifier; other
//! payloads, and bodies that are not payloads at all, become
//! [`AccessManagerError::UnexpectedResponse`] with a message naming the
//! request and the status.

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::dto::ErrorEnvelopeDto;
use crate::domain::ports::HttpMethod;
use crate::domain::{AccessManagerError, ElementKind, StructuredError};

/// Error code the service uses for a generic missing resource.
pub(crate) const NOT_FOUND_CODE: &str = "NotFoundException";

/// Attribute holding the identifier of a generic missing resource.
pub(crate) const RESOURCE_ID_ATTRIBUTE: &str = "ResourceId";

/// Decode a response body as the service's error payload.
///
/// Returns `None` for JSON `null` and for anything lacking a string `code`
/// and `message`, rather than a partially populated error.
pub(crate) fn deserialize_error_response(body: &Value) -> Option<StructuredError> {
    if body.is_null() {
        return None;
    }
    ErrorEnvelopeDto::deserialize(body)
        .ok()
        .map(ErrorEnvelopeDto::into_domain)
}

/// Parse raw body text into JSON, falling back to a JSON string holding the
/// raw text when it is not valid JSON. An absent body is `null`; an empty one
/// stays the empty string.
fn parse_body(body: Option<&str>) -> Value {
    body.map_or(Value::Null, |text| {
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
    })
}

/// Convert a non-success response into the matching error.
pub(crate) fn classify_non_success_response(
    method: HttpMethod,
    url: &Url,
    status: u16,
    body: Option<&str>,
) -> AccessManagerError {
    let parsed = parse_body(body);
    let Some(error_response) = deserialize_error_response(&parsed) else {
        return unstructured_error(method, url, status, &parsed, body);
    };

    if let Some(element_type) = ElementKind::from_not_found_code(&error_response.code) {
        return AccessManagerError::ElementNotFound {
            element_type,
            resource_id: attribute_or_empty(&error_response, element_type.resource_id_attribute()),
            message: error_response.message,
        };
    }

    if error_response.code == NOT_FOUND_CODE {
        return AccessManagerError::NotFound {
            resource_id: attribute_or_empty(&error_response, RESOURCE_ID_ATTRIBUTE),
            message: error_response.message,
        };
    }

    let message = format!(
        "{}, error code '{}', and error message '{}'.",
        base_message(method, url, status),
        error_response.code,
        error_response.message,
    );
    AccessManagerError::UnexpectedResponse {
        status,
        error_response: Some(error_response),
        message,
    }
}

/// Return whether a response is the service's generic not-found answer.
pub(crate) fn is_not_found_response(status: u16, body: Option<&str>) -> bool {
    status == 404
        && deserialize_error_response(&parse_body(body))
            .is_some_and(|error_response| error_response.code == NOT_FOUND_CODE)
}

/// Describe a body that is not an error payload.
///
/// JSON strings are unwrapped; any other JSON is quoted as received so the
/// service's own member order survives.
fn unstructured_error(
    method: HttpMethod,
    url: &Url,
    status: u16,
    parsed: &Value,
    raw: Option<&str>,
) -> AccessManagerError {
    let base = base_message(method, url, status);
    let message = match (parsed, raw) {
        (Value::Null, _) | (_, None) => format!("{base}."),
        (Value::String(text), _) => format!("{base}, and response body '{text}'."),
        (_, Some(text)) => format!("{base}, and response body '{text}'."),
    };
    AccessManagerError::UnexpectedResponse {
        status,
        error_response: None,
        message,
    }
}

fn base_message(method: HttpMethod, url: &Url, status: u16) -> String {
    format!(
        "Failed to call URL '{url}' with '{method}' method.  Received non-succces HTTP response status {status}"
    )
}

fn attribute_or_empty(error_response: &StructuredError, name: &str) -> String {
    error_response
        .attribute(name)
        .map(str::to_owned)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error classification.

    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    #[fixture]
    fn url() -> Url {
        Url::parse("http://127.0.0.1:5000/api/v1/users/user1").expect("valid test URL")
    }

    #[test]
    fn null_body_is_not_an_error_response() {
        assert_eq!(deserialize_error_response(&Value::Null), None);
    }

    #[rstest]
    #[case::missing_message(json!({ "code": "ArgumentException" }))]
    #[case::missing_code(json!({ "message": "Bad argument." }))]
    #[case::non_string_code(json!({ "code": 42, "message": "Bad argument." }))]
    #[case::string(json!("Error string"))]
    #[case::array(json!([{ "code": "A", "message": "B" }]))]
    fn incomplete_payloads_are_not_error_responses(#[case] body: Value) {
        assert_eq!(deserialize_error_response(&body), None);
    }

    #[test]
    fn complete_payload_decodes_every_field() {
        let decoded = deserialize_error_response(&json!({
            "code": "ArgumentException",
            "message": "Bad argument.",
            "target": "AddUser",
            "attributes": [{ "name": "ParameterName", "value": "user" }],
            "innerError": { "code": "InnerErrorCode", "message": "InnerErrorMessage" }
        }))
        .expect("payload should decode");

        let expected = StructuredError::new("ArgumentException", "Bad argument.")
            .with_target("AddUser")
            .with_attribute("ParameterName", "user")
            .with_inner_error(StructuredError::new("InnerErrorCode", "InnerErrorMessage"));
        assert_eq!(decoded, expected);
    }

    #[rstest]
    fn user_not_found_carries_the_missing_user(url: Url) {
        let body = json!({
            "code": "UserNotFoundException",
            "message": "User 'sdf' does not exist. (Parameter 'user')",
            "attributes": [{ "name": "User", "value": "sdf" }]
        })
        .to_string();

        let error = classify_non_success_response(HttpMethod::Get, &url, 404, Some(&body));
        match error {
            AccessManagerError::ElementNotFound {
                element_type,
                resource_id,
                message,
            } => {
                assert_eq!(element_type, ElementKind::User);
                assert_eq!(resource_id, "sdf");
                assert_eq!(message, "User 'sdf' does not exist. (Parameter 'user')");
            }
            other => panic!("expected ElementNotFound, got {other:?}"),
        }
    }

    #[rstest]
    #[case("GroupNotFoundException", "Group", ElementKind::Group, "abc")]
    #[case("EntityTypeNotFoundException", "EntityType", ElementKind::EntityType, "ClientAccount")]
    #[case("EntityNotFoundException", "Entity", ElementKind::Entity, "Company1")]
    fn element_codes_read_their_own_attribute(
        url: Url,
        #[case] code: &str,
        #[case] attribute: &str,
        #[case] expected_kind: ElementKind,
        #[case] expected_id: &str,
    ) {
        let body = json!({
            "code": code,
            "message": "missing",
            "attributes": [
                { "name": "ParameterName", "value": "ignored" },
                { "name": attribute, "value": expected_id }
            ]
        })
        .to_string();

        let error = classify_non_success_response(HttpMethod::Post, &url, 404, Some(&body));
        assert!(
            matches!(
                &error,
                AccessManagerError::ElementNotFound { element_type, resource_id, .. }
                    if *element_type == expected_kind && resource_id == expected_id
            ),
            "unexpected classification: {error:?}",
        );
    }

    #[rstest]
    fn wrapped_not_found_reads_resource_id(url: Url) {
        let body = json!({
            "error": {
                "code": "NotFoundException",
                "message": "Resource 'user1' not found.",
                "attributes": [{ "name": "ResourceId", "value": "user1" }]
            }
        })
        .to_string();

        let error = classify_non_success_response(HttpMethod::Get, &url, 404, Some(&body));
        assert!(
            matches!(
                &error,
                AccessManagerError::NotFound { resource_id, message }
                    if resource_id == "user1" && message == "Resource 'user1' not found."
            ),
            "unexpected classification: {error:?}",
        );
    }

    #[rstest]
    #[case::null_members(json!({
        "code": "UserNotFoundException",
        "message": "User 'sdf' does not exist.",
        "target": null,
        "attributes": null,
        "innerError": null
    }), "")]
    #[case::unknown_members(json!({
        "code": "UserNotFoundException",
        "message": "User 'sdf' does not exist.",
        "traceId": "00-4bf92f3577b34da6-01",
        "attributes": [{ "name": "User", "value": "sdf" }]
    }), "sdf")]
    #[case::non_string_attribute(json!({
        "code": "UserNotFoundException",
        "message": "User 'sdf' does not exist.",
        "attributes": [{ "name": "Count", "value": 3 }, ["User", "sdf"]]
    }), "sdf")]
    fn loose_envelopes_are_still_classified(
        url: Url,
        #[case] body: Value,
        #[case] expected_id: &str,
    ) {
        let error =
            classify_non_success_response(HttpMethod::Get, &url, 404, Some(&body.to_string()));
        assert!(
            matches!(
                &error,
                AccessManagerError::ElementNotFound { element_type: ElementKind::User, resource_id, message }
                    if resource_id == expected_id && message == "User 'sdf' does not exist."
            ),
            "unexpected classification: {error:?}",
        );
    }

    #[rstest]
    fn generic_not_found_survives_non_string_attributes(url: Url) {
        let body = json!({
            "code": "NotFoundException",
            "message": "Resource 'user1' not found.",
            "attributes": [
                { "name": "Count", "value": 3 },
                { "name": "ResourceId", "value": "user1" }
            ]
        })
        .to_string();
        let error = classify_non_success_response(HttpMethod::Get, &url, 404, Some(&body));
        assert!(
            matches!(&error, AccessManagerError::NotFound { resource_id, .. } if resource_id == "user1"),
            "unexpected classification: {error:?}",
        );
        assert!(is_not_found_response(404, Some(&body)));
    }

    #[rstest]
    fn missing_resource_attribute_yields_empty_identifier(url: Url) {
        let body = json!({ "code": "GroupNotFoundException", "message": "missing" }).to_string();
        let error = classify_non_success_response(HttpMethod::Delete, &url, 404, Some(&body));
        assert!(
            matches!(&error, AccessManagerError::ElementNotFound { resource_id, .. } if resource_id.is_empty()),
            "unexpected classification: {error:?}",
        );
    }

    #[rstest]
    fn other_structured_errors_embed_code_and_message(url: Url) {
        let body = json!({ "code": "ArgumentException", "message": "Bad argument." }).to_string();
        let error = classify_non_success_response(HttpMethod::Post, &url, 400, Some(&body));
        assert_eq!(
            error.to_string(),
            "Failed to call URL 'http://127.0.0.1:5000/api/v1/users/user1' with 'Post' method.  Received non-succces HTTP response status 400, error code 'ArgumentException', and error message 'Bad argument.'."
        );
        assert_eq!(
            error.error_response().map(|payload| payload.code.as_str()),
            Some("ArgumentException")
        );
    }

    #[rstest]
    #[case::plain_text(Some("Error string"), ", and response body 'Error string'.")]
    #[case::json_string(Some("\"Error string\""), ", and response body 'Error string'.")]
    #[case::empty(Some(""), ", and response body ''.")]
    #[case::blank(Some(" \r\n"), ", and response body ' \r\n'.")]
    #[case::json_null(Some("null"), ".")]
    #[case::absent(None, ".")]
    #[case::json_object(Some("{\"detail\":\"boom\"}"), ", and response body '{\"detail\":\"boom\"}'.")]
    #[case::member_order_kept(
        Some(r#"{"title":"One or more validation errors occurred.","status":400}"#),
        r#", and response body '{"title":"One or more validation errors occurred.","status":400}'."#
    )]
    #[case::problem_details(
        Some(r#"{"type":"https://tools.ietf.org/html/rfc9110#section-15.5.1","title":"Bad Request","status":400,"errors":{"user":["required"]}}"#),
        r#", and response body '{"type":"https://tools.ietf.org/html/rfc9110#section-15.5.1","title":"Bad Request","status":400,"errors":{"user":["required"]}}'."#
    )]
    #[case::number(Some("42"), ", and response body '42'.")]
    fn unstructured_bodies_fall_back_to_status_text(
        url: Url,
        #[case] body: Option<&str>,
        #[case] suffix: &str,
    ) {
        let error = classify_non_success_response(HttpMethod::Get, &url, 500, body);
        let expected = format!(
            "Failed to call URL 'http://127.0.0.1:5000/api/v1/users/user1' with 'Get' method.  Received non-succces HTTP response status 500{suffix}"
        );
        assert_eq!(error.to_string(), expected);
        assert!(error.error_response().is_none());
    }

    #[rstest]
    #[case::generic_not_found(404, r#"{"code":"NotFoundException","message":"m"}"#, true)]
    #[case::element_not_found(404, r#"{"code":"UserNotFoundException","message":"m"}"#, false)]
    #[case::wrong_status(400, r#"{"code":"NotFoundException","message":"m"}"#, false)]
    #[case::plain_404(404, "Not Found", false)]
    fn detects_generic_not_found_responses(
        #[case] status: u16,
        #[case] body: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(is_not_found_response(status, Some(body)), expected);
    }
}
