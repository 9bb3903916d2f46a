use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "periodScheme": state.config.period_scheme.as_str(),
            "exportStyle": state.config.export_style.as_str(),
            "catalog": state.config.catalog_label(),
        }),
    )
}

fn handle_setup_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let cfg = &state.config;
    ok(
        &req.id,
        json!({
            "periodScheme": cfg.period_scheme.as_str(),
            "exportStyle": cfg.export_style.as_str(),
            "catalog": cfg.catalog_label(),
            "autoPrint": cfg.auto_print,
            "subjectCount": state.store.catalog().subjects().len(),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "setup.get" => Some(handle_setup_get(state, req)),
        _ => None,
    }
}
