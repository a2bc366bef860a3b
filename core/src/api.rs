//! The response surface and command dispatch.
//!
//! Every request answers with the same envelope: `ok`, an error message
//! when `ok` is false, the fresh aggregate snapshot on success, and the
//! draw results for open_case. Errors are always recoverable — dispatch
//! never panics and never leaves a half-applied change behind.

use crate::command::CaseCommand;
use crate::draw::DrawResult;
use crate::error::CaseResult;
use crate::state::CaseState;
use crate::store::CaseStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<CaseState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<DrawResult>>,
}

impl ApiResponse {
    pub fn with_state(state: CaseState) -> Self {
        Self {
            ok: true,
            message: None,
            state: Some(state),
            results: None,
        }
    }

    pub fn with_results(results: Vec<DrawResult>, state: CaseState) -> Self {
        Self {
            ok: true,
            message: None,
            state: Some(state),
            results: Some(results),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
            state: None,
            results: None,
        }
    }
}

/// Route one command to the store and shape the outcome into the
/// response envelope.
pub fn dispatch(store: &mut CaseStore, command: CaseCommand) -> ApiResponse {
    match apply(store, command) {
        Ok(response) => response,
        Err(err) => ApiResponse::failure(err.to_string()),
    }
}

fn apply(store: &mut CaseStore, command: CaseCommand) -> CaseResult<ApiResponse> {
    match command {
        CaseCommand::GetState => {}
        CaseCommand::OpenCase { times } => {
            let results = store.open_case(times)?;
            return Ok(ApiResponse::with_results(results, store.state().clone()));
        }
        CaseCommand::AddRarity {
            name,
            min_roll,
            max_roll,
            color,
        } => store.add_rarity(name, min_roll, max_roll, color)?,
        CaseCommand::UpdateRarity { rarity_id, patch } => store.update_rarity(&rarity_id, patch)?,
        CaseCommand::DeleteRarity { rarity_id } => store.delete_rarity(&rarity_id)?,
        CaseCommand::AddItem {
            name,
            rarity_id,
            weight,
            image_path,
            description,
        } => store.add_item(name, rarity_id, weight, image_path, description)?,
        CaseCommand::UpdateItem { item_id, patch } => store.update_item(&item_id, patch)?,
        CaseCommand::DeleteItem { item_id } => store.delete_item(&item_id)?,
        CaseCommand::AdjustInventory { item_id, delta } => {
            store.adjust_inventory(&item_id, delta)?
        }
        CaseCommand::UpdateSettings { patch } => store.update_settings(patch)?,
        CaseCommand::ClearHistory => store.clear_history()?,
        CaseCommand::ResetStats => store.reset_stats()?,
    }
    Ok(ApiResponse::with_state(store.state().clone()))
}
