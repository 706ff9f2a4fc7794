// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-document resource objects and response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A resource object: `{type, id, attributes, relationships?}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource type (e.g. "apps", "subscriptions").
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource identifier.
    pub id: String,
    /// Attribute map; values are raw JSON.
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// Relationship references, keyed by relationship name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Map<String, Value>>,
}

impl Resource {
    /// Create a resource with no relationships.
    pub fn new(kind: &str, id: &str, attributes: Map<String, Value>) -> Self {
        Self {
            kind: kind.to_string(),
            id: id.to_string(),
            attributes,
            relationships: None,
        }
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Look up a string attribute. `null` and non-string values read as absent.
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    /// Id of a to-one relationship (`relationships.{name}.data.id`).
    pub fn relationship_id(&self, name: &str) -> Option<&str> {
        self.relationships
            .as_ref()?
            .get(name)?
            .get("data")?
            .get("id")?
            .as_str()
    }

    /// Ids of a to-many relationship (`relationships.{name}.data[].id`).
    pub fn relationship_ids(&self, name: &str) -> Vec<&str> {
        let Some(data) = self
            .relationships
            .as_ref()
            .and_then(|rels| rels.get(name))
            .and_then(|rel| rel.get("data"))
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };
        data.iter()
            .filter_map(|entry| entry.get("id").and_then(Value::as_str))
            .collect()
    }

    /// Set a to-one relationship reference.
    pub fn set_relationship(&mut self, name: &str, kind: &str, id: &str) {
        self.relationships
            .get_or_insert_with(Map::new)
            .insert(name.to_string(), json!({"data": {"type": kind, "id": id}}));
    }

    /// Set a to-many relationship reference.
    pub fn set_relationship_many(&mut self, name: &str, kind: &str, ids: &[String]) {
        let refs: Vec<Value> = ids
            .iter()
            .map(|id| json!({"type": kind, "id": id}))
            .collect();
        self.relationships
            .get_or_insert_with(Map::new)
            .insert(name.to_string(), json!({ "data": refs }));
    }
}

/// Primary data of an envelope: a single resource or a list.
///
/// A `null` primary document (e.g. "no availability set yet") is modeled as
/// `Option<PrimaryData>::None` on the envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    /// A list of resources.
    Many(Vec<Resource>),
    /// A single resource.
    One(Box<Resource>),
}

/// Pagination and self links.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    /// Link to the current page.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub this: Option<String>,
    /// Absolute URL of the next page; absent on the final page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// URL of the previous page; absent on the first page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

/// A `{data, included?, links?, meta?}` response envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Primary data; serialized as `null` when absent.
    #[serde(default)]
    pub data: Option<PrimaryData>,
    /// Related resources requested via `include`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<Resource>>,
    /// Self/next/prev links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl Envelope {
    /// Flatten primary data into a list (empty for `null` data).
    pub fn into_resources(self) -> Vec<Resource> {
        match self.data {
            Some(PrimaryData::Many(list)) => list,
            Some(PrimaryData::One(one)) => vec![*one],
            None => Vec::new(),
        }
    }

    /// Extract a single primary resource, if the document carries one.
    pub fn into_single(self) -> Option<Resource> {
        match self.data {
            Some(PrimaryData::One(one)) => Some(*one),
            Some(PrimaryData::Many(mut list)) => {
                if list.len() == 1 {
                    list.pop()
                } else {
                    None
                }
            }
            None => None,
        }
    }

    /// The `links.next` URL, if present.
    pub fn next_link(&self) -> Option<&str> {
        self.links.as_ref()?.next.as_deref()
    }
}

/// Pointer to the part of a request an error refers to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorSource {
    /// JSON pointer into the request document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    /// Offending query parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

/// A single error in an error envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// HTTP status as a string, matching the wire format.
    pub status: String,
    /// Machine-readable error code (e.g. "NOT_FOUND").
    pub code: String,
    /// Short human-readable title.
    pub title: String,
    /// Detailed message.
    pub detail: String,
    /// Where in the request the error originated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
}

/// An `{errors: [...]}` envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// At least one error.
    pub errors: Vec<ErrorObject>,
}

impl ErrorEnvelope {
    /// The first error, which callers branch on.
    pub fn first(&self) -> Option<&ErrorObject> {
        self.errors.first()
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
