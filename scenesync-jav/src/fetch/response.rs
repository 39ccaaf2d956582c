//! Catalog API response types
//!
//! Only the fields the extractor reads are modeled. Every field is optional
//! and nulls are accepted; unknown fields are ignored.

use crate::types::RemoteId;
use serde::Deserialize;

/// Envelope: `{ "data": { ... } }`
#[derive(Debug, Deserialize)]
pub struct SceneEnvelope {
    pub data: RawScene,
}

/// The `data` object of a `/jav/{id}` response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawScene {
    #[serde(rename = "_id")]
    pub id: Option<RemoteId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub trailer: Option<String>,
    pub background: Option<RawBackground>,
    pub performers: Option<Vec<RawPerformer>>,
    pub site: Option<RawSite>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawBackground {
    pub full: Option<String>,
}

/// Performer credit; the person lives under `parent`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawPerformer {
    pub parent: Option<RawPerformerParent>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawPerformerParent {
    #[serde(rename = "_id")]
    pub id: Option<RemoteId>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub extras: Option<RawPerformerExtras>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawPerformerExtras {
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawSite {
    pub id: Option<RemoteId>,
    pub name: Option<String>,
}

impl RawScene {
    pub fn performers(&self) -> &[RawPerformer] {
        self.performers.as_deref().unwrap_or_default()
    }
}

impl RawPerformerParent {
    pub fn gender(&self) -> Option<&str> {
        self.extras.as_ref()?.gender.as_deref()
    }
}
