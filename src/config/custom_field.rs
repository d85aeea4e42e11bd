//! Custom field mapping.
//!
//! The `[customField]` section of the configuration file maps a short key
//! (e.g. `developer`) to a request field:
//!
//! ```ini
//! [customField]
//! developer.fieldname = customfield_10344
//! developer.fieldsubname = value
//! developer.type = additionalHash
//! ```
//!
//! A command argument `developer=alice` then becomes
//! `{"customfield_10344": {"value": "alice"}}` in the issue fields.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use super::ConfigError;

/// Configuration name of the only supported field kind.
pub const NESTED_OBJECT_KIND: &str = "additionalHash";

/// A JSON object holding request fields.
pub type FieldMap = Map<String, Value>;

/// How a custom field value is placed into the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// `{field_name: {sub_field_name: value}}`.
    NestedObject,
    /// A kind this version does not know how to build.
    Unknown(String),
}

impl FieldKind {
    fn from_config(value: &str) -> Self {
        if value == NESTED_OBJECT_KIND {
            FieldKind::NestedObject
        } else {
            FieldKind::Unknown(value.to_string())
        }
    }
}

/// Target of one custom field key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Name of the request field, e.g. `customfield_10344`.
    pub field_name: String,
    /// Name of the single key inside the nested object, e.g. `value`.
    pub sub_field_name: String,
    /// How the value is composed.
    pub kind: FieldKind,
}

/// Errors for custom field arguments given on the command line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CustomFieldError {
    /// The argument is not of the form `key=value`.
    #[error("ERROR parsing custom field: {0}! Syntax: 'key=value'")]
    Syntax(String),

    /// No mapping is configured for the key.
    #[error("Unable to find custom field definition for {0}!")]
    UnknownKey(String),

    /// The mapping names a field kind that cannot be built.
    #[error("Unknown type {kind} for custom field {key}!")]
    UnknownKind {
        /// The custom field key.
        key: String,
        /// The configured type.
        kind: String,
    },
}

/// Set `container[field_name] = {sub_field_name: value}`.
///
/// Does nothing when `value` is empty. Any previous value at `field_name`
/// is replaced, never merged.
pub fn compose_nested_field(
    container: &mut FieldMap,
    field_name: &str,
    sub_field_name: &str,
    value: &str,
) {
    if value.is_empty() {
        return;
    }
    let mut nested = Map::new();
    nested.insert(sub_field_name.to_string(), Value::String(value.to_string()));
    container.insert(field_name.to_string(), Value::Object(nested));
}

/// Split a `key=value` command argument.
pub fn parse_field_argument(argument: &str) -> Result<(&str, &str), CustomFieldError> {
    let parts: Vec<&str> = argument.split('=').collect();
    match parts.as_slice() {
        [key, value] => Ok((*key, *value)),
        _ => Err(CustomFieldError::Syntax(argument.to_string())),
    }
}

/// Split a `<key>.<attribute>` configuration key.
pub(crate) fn split_entry_key(entry_key: &str) -> Result<(&str, &str), ConfigError> {
    let parts: Vec<&str> = entry_key.split('.').collect();
    match parts.as_slice() {
        [key, attribute] if !key.is_empty() && !attribute.is_empty() => Ok((*key, *attribute)),
        _ => Err(ConfigError::Format(entry_key.to_string())),
    }
}

/// Read-only mapping from custom field keys to descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomFieldMapping {
    fields: BTreeMap<String, FieldDescriptor>,
}

impl CustomFieldMapping {
    /// Build the mapping from raw `[customField]` entries.
    ///
    /// Entry keys are case-insensitive: both the short key and the
    /// attribute are lowercased. Malformed keys and incomplete definitions
    /// are skipped with a warning.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut attributes: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

        for (entry_key, value) in entries {
            let entry_key = entry_key.as_ref();
            match split_entry_key(entry_key) {
                Ok((key, attribute)) => {
                    attributes
                        .entry(key.to_lowercase())
                        .or_default()
                        .insert(attribute.to_lowercase(), value.as_ref().to_string());
                }
                Err(e) => warn!("Skipping custom field entry: {}", e),
            }
        }

        let mut fields = BTreeMap::new();
        for (key, attrs) in attributes {
            let (Some(field_name), Some(sub_field_name), Some(kind)) = (
                attrs.get("fieldname"),
                attrs.get("fieldsubname"),
                attrs.get("type"),
            ) else {
                warn!(
                    "Skipping custom field '{}': fieldname, fieldsubname and type are required",
                    key
                );
                continue;
            };

            fields.insert(
                key,
                FieldDescriptor {
                    field_name: field_name.clone(),
                    sub_field_name: sub_field_name.clone(),
                    kind: FieldKind::from_config(kind),
                },
            );
        }

        Self { fields }
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.get(key)
    }

    /// Number of configured custom fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no custom fields are configured.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Place `value` into `container` according to the mapping for `key`.
    ///
    /// On error the container is left untouched.
    pub fn apply(
        &self,
        key: &str,
        value: &str,
        container: &mut FieldMap,
    ) -> Result<(), CustomFieldError> {
        let descriptor = self
            .fields
            .get(key)
            .ok_or_else(|| CustomFieldError::UnknownKey(key.to_string()))?;

        match &descriptor.kind {
            FieldKind::NestedObject => {
                compose_nested_field(
                    container,
                    &descriptor.field_name,
                    &descriptor.sub_field_name,
                    value,
                );
                Ok(())
            }
            FieldKind::Unknown(kind) => Err(CustomFieldError::UnknownKind {
                key: key.to_string(),
                kind: kind.clone(),
            }),
        }
    }
}
