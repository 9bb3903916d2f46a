use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{
    draft_json, entries_json, parse_opt_string, parse_opt_u32, parse_period, required_index,
    required_str,
};
use crate::ipc::types::{AppState, Request};
use crate::plan::{Period, PeriodScheme, WeeklyEntry};
use serde_json::json;

/// Reply shared by every entry mutation: whether it applied, the class's
/// entries afterwards and the draft.
fn entries_reply(state: &AppState, req: &Request, class_id: &str, applied: bool) -> serde_json::Value {
    let entries = state
        .store
        .class(class_id)
        .map(entries_json)
        .unwrap_or_default();
    ok(
        &req.id,
        json!({
            "applied": applied,
            "entries": entries,
            "draft": draft_json(state.store.draft()),
        }),
    )
}

fn handle_entries_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let class_id = match required_str(req, "classId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let Some(plan) = state.store.class(&class_id) else {
        return err(&req.id, "not_found", "class not found", None);
    };
    ok(&req.id, json!({ "entries": entries_json(plan) }))
}

fn handle_entries_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let class_id = match required_str(req, "classId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let Some(input) = req.params.get("entry").and_then(|v| v.as_object()) else {
        return err(&req.id, "bad_params", "missing entry", None);
    };
    let period = match parse_period(state.store.scheme(), input, "entry") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m, None),
    };
    let subject = match parse_opt_string(input.get("subject")) {
        Ok(v) => v.unwrap_or_default(),
        Err(m) => return err(&req.id, "bad_params", format!("entry.subject {}", m), None),
    };
    let chapter = match parse_opt_string(input.get("chapter")) {
        Ok(v) => v.unwrap_or_default(),
        Err(m) => return err(&req.id, "bad_params", format!("entry.chapter {}", m), None),
    };
    let details = match parse_opt_string(input.get("details")) {
        Ok(v) => v.unwrap_or_default(),
        Err(m) => return err(&req.id, "bad_params", format!("entry.details {}", m), None),
    };

    let applied = state
        .store
        .add_entry(&class_id, WeeklyEntry::new(period, subject, chapter, details));
    entries_reply(state, req, &class_id, applied)
}

fn handle_entries_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let class_id = match required_str(req, "classId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let index = match required_index(req, "index") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let applied = state.store.remove_entry(&class_id, index).is_some();
    entries_reply(state, req, &class_id, applied)
}

fn handle_draft_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "draft": draft_json(state.store.draft()) }))
}

fn handle_draft_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(patch) = req.params.get("patch").and_then(|v| v.as_object()) else {
        return err(&req.id, "bad_params", "missing patch", None);
    };
    let week = match parse_opt_u32(patch.get("week")) {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", format!("patch.week {}", m), None),
    };
    let month = match parse_opt_u32(patch.get("month")) {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", format!("patch.month {}", m), None),
    };
    let subject = match parse_opt_string(patch.get("subject")) {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", format!("patch.subject {}", m), None),
    };
    let chapter = match parse_opt_string(patch.get("chapter")) {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", format!("patch.chapter {}", m), None),
    };
    let details = match parse_opt_string(patch.get("details")) {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", format!("patch.details {}", m), None),
    };

    if week.is_some() || month.is_some() {
        let current = state.store.draft().period;
        let week = week.unwrap_or_else(|| current.week());
        let period = match state.store.scheme() {
            // Month has no meaning under the week-only scheme.
            PeriodScheme::Week => Period::Week { week },
            PeriodScheme::MonthWeek => Period::MonthWeek {
                month: month.or_else(|| current.month()).unwrap_or(1),
                week,
            },
        };
        state.store.set_draft_period(period);
    }
    // Subject before chapter: a new subject clears the chapter, and a chapter
    // sent in the same patch then applies to the new subject.
    if let Some(subject) = subject {
        state.store.set_draft_subject(&subject);
    }
    if let Some(chapter) = chapter {
        state.store.set_draft_chapter(&chapter);
    }
    if let Some(details) = details {
        state.store.set_draft_details(&details);
    }

    ok(&req.id, json!({ "draft": draft_json(state.store.draft()) }))
}

fn handle_draft_commit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let class_id = match required_str(req, "classId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let applied = state.store.commit_draft(&class_id);
    entries_reply(state, req, &class_id, applied)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "planner.entries.list" => Some(handle_entries_list(state, req)),
        "planner.entries.add" => Some(handle_entries_add(state, req)),
        "planner.entries.delete" => Some(handle_entries_delete(state, req)),
        "planner.draft.get" => Some(handle_draft_get(state, req)),
        "planner.draft.update" => Some(handle_draft_update(state, req)),
        "planner.draft.commit" => Some(handle_draft_commit(state, req)),
        _ => None,
    }
}
