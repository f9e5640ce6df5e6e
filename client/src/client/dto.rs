//! Wire DTOs for AccessManager JSON payloads.
//!
//! Responses decode into these transport types first, then project onto the
//! raw strings the facades hand to their stringifiers.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{MAX_INNER_ERROR_DEPTH, NameValuePair, StructuredError};

/// `{user, group}` element of a user to group mapping query.
#[derive(Debug, Deserialize)]
pub(super) struct UserToGroupMappingDto {
    pub(super) user: String,
    pub(super) group: String,
}

/// `{fromGroup, toGroup}` element of a group to group mapping query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GroupToGroupMappingDto {
    pub(super) from_group: String,
    pub(super) to_group: String,
}

/// User or group mapped to an application component and access level.
///
/// The service names the principal field `user` or `group` depending on the
/// route; both decode into `principal`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ComponentMappingDto {
    #[serde(alias = "user", alias = "group")]
    pub(super) principal: String,
    pub(super) application_component: String,
    pub(super) access_level: String,
}

/// User or group mapped to an entity.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EntityMappingDto {
    #[serde(alias = "user", alias = "group")]
    pub(super) principal: String,
    pub(super) entity_type: String,
    pub(super) entity: String,
}

/// Error payload, either bare or wrapped in an `error` property.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ErrorEnvelopeDto {
    Bare(ErrorResponseDto),
    Wrapped { error: ErrorResponseDto },
}

/// Error payload body.
///
/// Only `code` and `message` are required. Optional members tolerate `null`
/// and unexpected shapes so a recognisable error is never discarded over
/// them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ErrorResponseDto {
    pub(super) code: String,
    pub(super) message: String,
    #[serde(default)]
    pub(super) target: Option<Value>,
    #[serde(default)]
    pub(super) attributes: Option<Value>,
    #[serde(default)]
    pub(super) inner_error: Option<Value>,
}

impl ErrorEnvelopeDto {
    pub(super) fn into_domain(self) -> StructuredError {
        let error = match self {
            Self::Bare(error) | Self::Wrapped { error } => error,
        };
        error.into_domain(MAX_INNER_ERROR_DEPTH)
    }
}

impl ErrorResponseDto {
    /// Convert to the domain error, keeping at most `depth` levels of cause.
    fn into_domain(self, depth: usize) -> StructuredError {
        let inner_error = self
            .inner_error
            .filter(|_| depth > 1)
            .and_then(|inner| Self::deserialize(&inner).ok())
            .map(|inner| Box::new(inner.into_domain(depth - 1)));
        StructuredError {
            code: self.code,
            message: self.message,
            target: self.target.and_then(|target| match target {
                Value::String(text) => Some(text),
                _ => None,
            }),
            attributes: match self.attributes {
                Some(Value::Array(entries)) => {
                    entries.iter().filter_map(attribute_from_value).collect()
                }
                _ => Vec::new(),
            },
            inner_error,
        }
    }
}

/// Read an attribute given as `{name, value}` or as a `[name, value]` tuple.
///
/// Entries without string name and value are skipped.
fn attribute_from_value(entry: &Value) -> Option<NameValuePair> {
    let (name, value) = match entry {
        Value::Object(members) => (members.get("name")?, members.get("value")?),
        Value::Array(items) => match items.as_slice() {
            [name, value] => (name, value),
            _ => return None,
        },
        _ => return None,
    };
    Some(NameValuePair::new(name.as_str()?, value.as_str()?))
}
