use crate::ipc::error::ok;
use crate::ipc::helpers::present_str;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_subjects(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({ "subjects": state.store.catalog().subjects() }),
    )
}

fn handle_chapters(state: &mut AppState, req: &Request) -> serde_json::Value {
    let subject = match present_str(req, "subject") {
        Ok(v) => v,
        Err(e) => return e,
    };
    // Unknown subjects have no chapters to offer.
    let chapters = state
        .store
        .catalog()
        .chapters(subject.trim())
        .map(|c| c.to_vec())
        .unwrap_or_default();
    ok(
        &req.id,
        json!({ "subject": subject.trim(), "chapters": chapters }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "catalog.subjects" => Some(handle_subjects(state, req)),
        "catalog.chapters" => Some(handle_chapters(state, req)),
        _ => None,
    }
}
