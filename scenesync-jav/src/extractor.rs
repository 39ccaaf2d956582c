//! Scene extraction
//!
//! Reduces a raw `/jav/` payload to the minimal stored record and feeds the
//! run's side tables:
//! - title `"CODE - words"` is split into title `CODE` and description `Words`
//! - only female performers with an id are kept, as `{parent: {_id}}`
//! - the site is reduced to `{id}`
//! - empty strings and collections are pruned when the record is serialized

use crate::context::RunContext;
use crate::fetch::response::{RawPerformerParent, RawScene};
use crate::types::{Performer, RequestItem, SceneRecord, Site};
use serde_json::{json, Value};

/// Separator between the code and the human title in catalog titles
const TITLE_SEPARATOR: &str = " - ";

/// Performer gender that is kept
const KEPT_GENDER: &str = "Female";

/// Split `"ABC-123 - A Sample Scene"` into `("ABC-123", "A Sample Scene")`
///
/// Without a separator the whole title is the code and there is no
/// description. An empty title yields neither.
pub fn split_title(full_title: &str) -> (Option<String>, Option<String>) {
    if full_title.is_empty() {
        return (None, None);
    }
    match full_title.split_once(TITLE_SEPARATOR) {
        Some((code, rest)) => (
            Some(code.trim().to_string()),
            Some(rest.trim().to_string()),
        ),
        None => (Some(full_title.to_string()), None),
    }
}

/// Upper-case the first character, leave the rest alone
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the stored record for `item` and register side entities in `ctx`
pub fn extract_scene(item: &RequestItem, raw: RawScene, ctx: &mut RunContext) -> SceneRecord {
    let mut performers = Vec::new();
    for parent in raw.performers().iter().filter_map(|p| kept_performer(p.parent.as_ref())) {
        let Some(id) = parent.id.clone() else {
            continue;
        };
        ctx.register_performer(Performer::new(
            id.clone(),
            parent.name.clone(),
            parent.image.clone(),
        ));
        performers.push(json!({ "parent": { "_id": id } }));
    }

    let (title, title_description) = match raw.title.as_deref() {
        Some(full) => split_title(full),
        None => (None, None),
    };
    let description = title_description
        .filter(|d| !d.is_empty())
        .or(raw.description)
        .map(|d| capitalize_first(&d));

    let background_full = raw.background.and_then(|b| b.full);
    let mut data = json!({
        "_id": raw.id,
        "title": title,
        "description": description,
        "date": raw.date,
        "trailer": raw.trailer,
        "background": { "full": background_full },
        "performers": performers,
    });

    if let Some(site) = raw.site {
        if let Some(id) = site.id.filter(|id| !id.is_blank()) {
            ctx.register_site(Site::new(id.clone(), site.name));
            if let Value::Object(map) = &mut data {
                map.insert("site".to_string(), json!({ "id": id }));
            }
        }
    }

    SceneRecord {
        key_field: item.key_field,
        raw_key: item.raw_key.clone(),
        data,
    }
}

/// Performer parent with a non-blank id and gender exactly "Female"
fn kept_performer(parent: Option<&RawPerformerParent>) -> Option<&RawPerformerParent> {
    let parent = parent?;
    let has_id = parent.id.as_ref().is_some_and(|id| !id.is_blank());
    (has_id && parent.gender() == Some(KEPT_GENDER)).then_some(parent)
}
