use crate::export::{export_selected, PrintDocument};
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::parse_opt_string;
use crate::ipc::types::{AppState, Request};
use anyhow::Context;
use serde_json::json;
use std::path::{Path, PathBuf};

fn write_document(doc: &PrintDocument, out_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create directory {}", parent.to_string_lossy())
            })?;
        }
    }
    std::fs::write(out_path, doc.html.as_bytes())
        .with_context(|| format!("failed to write {}", out_path.to_string_lossy()))?;
    Ok(())
}

fn handle_print_document(state: &mut AppState, req: &Request) -> serde_json::Value {
    let out_path = match parse_opt_string(req.params.get("outPath")) {
        Ok(v) => v
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from),
        Err(m) => return err(&req.id, "bad_params", format!("outPath {}", m), None),
    };

    let options = state.config.export_options();
    let Some(doc) = export_selected(&state.store, &options) else {
        tracing::debug!("export skipped: no class selected");
        return ok(&req.id, json!({ "exported": false }));
    };

    if let Some(ref p) = out_path {
        if let Err(e) = write_document(&doc, p) {
            return err(
                &req.id,
                "write_failed",
                format!("{e:#}"),
                Some(json!({ "outPath": p.to_string_lossy() })),
            );
        }
        tracing::info!(out_path = %p.to_string_lossy(), rows = doc.rows.len(), "print document written");
    }

    ok(
        &req.id,
        json!({
            "exported": true,
            "title": doc.title,
            "summary": doc.summary,
            "rowCount": doc.rows.len(),
            "rows": doc.rows,
            "html": doc.html,
            "style": options.style.as_str(),
            "generatedAt": chrono::Local::now().to_rfc3339(),
            "outPath": out_path.as_ref().map(|p| p.to_string_lossy().to_string()),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "export.printDocument" => Some(handle_print_document(state, req)),
        _ => None,
    }
}
