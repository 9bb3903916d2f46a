use crate::export::summary_line;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{class_summary_json, entries_json, present_str, required_str};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_classes_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let classes: Vec<serde_json::Value> = state
        .store
        .classes()
        .iter()
        .map(class_summary_json)
        .collect();
    ok(
        &req.id,
        json!({
            "classes": classes,
            "selectedClassId": state.store.selected_id(),
        }),
    )
}

fn handle_classes_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match present_str(req, "name") {
        Ok(v) => v,
        Err(e) => return e,
    };

    // A blank name is a no-op, not an error.
    let class_id = state.store.create_class(&name);
    ok(
        &req.id,
        json!({
            "applied": class_id.is_some(),
            "classId": class_id,
            "selectedClassId": state.store.selected_id(),
        }),
    )
}

fn handle_classes_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let class_id = match required_str(req, "classId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    state.store.select_class(&class_id);
    ok(
        &req.id,
        json!({
            "selectedClassId": state.store.selected_id(),
            "resolved": state.store.selected_class().is_some(),
        }),
    )
}

fn handle_classes_clear_selection(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.store.clear_selection();
    ok(&req.id, json!({ "selectedClassId": null }))
}

fn handle_classes_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let class_id = match required_str(req, "classId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let Some(plan) = state.store.class(&class_id) else {
        return err(&req.id, "not_found", "class not found", None);
    };
    ok(
        &req.id,
        json!({
            "class": {
                "id": plan.id(),
                "name": plan.name(),
                "summary": summary_line(plan.entries().len()),
                "entries": entries_json(plan),
            },
            "selected": state.store.selected_id() == Some(plan.id()),
        }),
    )
}

fn handle_classes_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let class_id = match required_str(req, "classId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let applied = state.store.remove_class(&class_id);
    ok(
        &req.id,
        json!({
            "applied": applied,
            "selectedClassId": state.store.selected_id(),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classes.list" => Some(handle_classes_list(state, req)),
        "classes.create" => Some(handle_classes_create(state, req)),
        "classes.select" => Some(handle_classes_select(state, req)),
        "classes.clearSelection" => Some(handle_classes_clear_selection(state, req)),
        "classes.open" => Some(handle_classes_open(state, req)),
        "classes.delete" => Some(handle_classes_delete(state, req)),
        _ => None,
    }
}
