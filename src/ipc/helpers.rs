use crate::ipc::error::err;
use crate::ipc::types::Request;
use crate::plan::{ClassPlan, EntryDraft, Period, PeriodScheme, WeeklyEntry};
use serde_json::{json, Map, Value as JsonValue};

/// Non-empty, trimmed string param.
pub fn required_str(req: &Request, key: &str) -> Result<String, JsonValue> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

/// String param that must be present but may be blank; blank values are
/// left for the store to ignore.
pub fn present_str(req: &Request, key: &str) -> Result<String, JsonValue> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

pub fn parse_opt_string(v: Option<&JsonValue>) -> Result<Option<String>, &'static str> {
    match v {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or("must be string or null"),
    }
}

pub fn parse_opt_u32(v: Option<&JsonValue>) -> Result<Option<u32>, &'static str> {
    match v {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or("must be a non-negative integer"),
    }
}

pub fn required_index(req: &Request, key: &str) -> Result<usize, JsonValue> {
    match req.params.get(key) {
        None => Err(err(&req.id, "bad_params", format!("missing {}", key), None)),
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                err(
                    &req.id,
                    "bad_params",
                    format!("{} must be a non-negative integer", key),
                    Some(json!({ key: v })),
                )
            }),
    }
}

/// Reads `week` (and `month` for the month/week scheme) from an entry object.
/// Range checks are left to the store.
pub fn parse_period(
    scheme: PeriodScheme,
    obj: &Map<String, JsonValue>,
    prefix: &str,
) -> Result<Period, String> {
    let week = parse_opt_u32(obj.get("week"))
        .map_err(|m| format!("{}.week {}", prefix, m))?
        .ok_or_else(|| format!("{}.week is required", prefix))?;
    match scheme {
        PeriodScheme::Week => Ok(Period::Week { week }),
        PeriodScheme::MonthWeek => {
            let month = parse_opt_u32(obj.get("month"))
                .map_err(|m| format!("{}.month {}", prefix, m))?
                .ok_or_else(|| format!("{}.month is required", prefix))?;
            Ok(Period::MonthWeek { month, week })
        }
    }
}

fn period_json(period: Period) -> JsonValue {
    match period.month() {
        Some(month) => json!({ "month": month, "week": period.week() }),
        None => json!({ "week": period.week() }),
    }
}

pub fn entry_json(index: usize, entry: &WeeklyEntry) -> JsonValue {
    json!({
        "index": index,
        "period": period_json(entry.period),
        "label": entry.period.label(),
        "subject": entry.subject,
        "chapter": entry.chapter,
        "details": entry.details,
    })
}

pub fn entries_json(plan: &ClassPlan) -> Vec<JsonValue> {
    plan.entries()
        .iter()
        .enumerate()
        .map(|(i, e)| entry_json(i, e))
        .collect()
}

pub fn draft_json(draft: &EntryDraft) -> JsonValue {
    json!({
        "period": period_json(draft.period),
        "label": draft.period.label(),
        "subject": draft.subject,
        "chapter": draft.chapter,
        "details": draft.details,
    })
}

pub fn class_summary_json(plan: &ClassPlan) -> JsonValue {
    json!({
        "id": plan.id(),
        "name": plan.name(),
        "entryCount": plan.entries().len(),
    })
}
