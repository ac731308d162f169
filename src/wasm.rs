//! JavaScript bindings.
//!
//! Inputs are plain objects: the requirement as `{ role: count }` and the
//! preference table as `{ agent: { positives?: [...], negatives?: [...] } }`.
//! Object key order is the agent placement order.

use crate::model::{validate_input, PreferenceTable, Requirement};
use crate::search::{SearchConfig, SearchRunner};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn parse(requirement: JsValue, preferences: JsValue) -> Result<(Requirement, PreferenceTable), JsValue> {
    let requirement: Requirement = serde_wasm_bindgen::from_value(requirement)?;
    let preferences: PreferenceTable = serde_wasm_bindgen::from_value(preferences)?;
    Ok((requirement, preferences))
}

/// Enumerates every complete assignment as `[{ assignment, score }]`.
#[wasm_bindgen(js_name = enumerateAssignments)]
pub fn enumerate_assignments(requirement: JsValue, preferences: JsValue) -> Result<JsValue, JsValue> {
    let (requirement, preferences) = parse(requirement, preferences)?;
    let result = SearchRunner::run(&requirement, &preferences, &SearchConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let leaves = result.into_complete();
    leaves
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(Into::into)
}

/// Checks input shape; throws a message describing the first problem.
#[wasm_bindgen(js_name = validateInput)]
pub fn validate(requirement: JsValue, preferences: JsValue, max_preferences: usize) -> Result<(), JsValue> {
    let (requirement, preferences) = parse(requirement, preferences)?;
    validate_input(&requirement, &preferences, max_preferences)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
