mod test_support;

use serde_json::json;
use test_support::{
    class_id_of, entry_labels, request_err, request_ok, spawn_sidecar, spawn_sidecar_with_env,
};

#[test]
fn entries_are_sorted_by_week_with_stable_ties() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let class_id = class_id_of(&request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "classes.create",
        json!({ "name": "Sorted" }),
    ));

    let mut last = serde_json::Value::Null;
    for (i, (week, chapter)) in [(3, "행렬"), (1, "다항식"), (3, "다항식"), (2, "경우의 수")]
        .iter()
        .enumerate()
    {
        last = request_ok(
            &mut stdin,
            &mut reader,
            &format!("a{}", i),
            "planner.entries.add",
            json!({
                "classId": class_id,
                "entry": { "week": week, "subject": "공통수학1", "chapter": chapter }
            }),
        );
        assert_eq!(last.get("applied").and_then(|v| v.as_bool()), Some(true));
    }
    assert_eq!(entry_labels(&last), vec!["1주차", "2주차", "3주차", "3주차"]);
    let entries = last.get("entries").and_then(|v| v.as_array()).cloned().unwrap_or_default();
    assert_eq!(entries[2].get("chapter").and_then(|v| v.as_str()), Some("행렬"));
    assert_eq!(entries[3].get("chapter").and_then(|v| v.as_str()), Some("다항식"));
    assert_eq!(entries[3].get("index").and_then(|v| v.as_u64()), Some(3));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn add_entry_gates_leave_class_unchanged() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let a = class_id_of(&request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "classes.create",
        json!({ "name": "A" }),
    ));
    let b = class_id_of(&request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "classes.create",
        json!({ "name": "B" }),
    ));

    let rejected = [
        // a is not the selected class.
        json!({ "classId": a, "entry": { "week": 1, "subject": "기하", "chapter": "평면벡터" } }),
        json!({ "classId": b, "entry": { "week": 1, "subject": "", "chapter": "평면벡터" } }),
        json!({ "classId": b, "entry": { "week": 1, "subject": "기하", "chapter": "" } }),
        json!({ "classId": b, "entry": { "week": 1, "subject": "기하" } }),
        json!({ "classId": b, "entry": { "week": 1, "subject": "기하", "chapter": "미분법" } }),
        json!({ "classId": b, "entry": { "week": 0, "subject": "기하", "chapter": "평면벡터" } }),
    ];
    for (i, params) in rejected.into_iter().enumerate() {
        let resp = request_ok(
            &mut stdin,
            &mut reader,
            &format!("r{}", i),
            "planner.entries.add",
            params,
        );
        assert_eq!(resp.get("applied").and_then(|v| v.as_bool()), Some(false));
    }

    let _ = request_ok(&mut stdin, &mut reader, "3", "classes.clearSelection", json!({}));
    let resp = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "planner.entries.add",
        json!({ "classId": b, "entry": { "week": 1, "subject": "기하", "chapter": "평면벡터" } }),
    );
    assert_eq!(resp.get("applied").and_then(|v| v.as_bool()), Some(false));

    for (i, id) in [&a, &b].iter().enumerate() {
        let listed = request_ok(
            &mut stdin,
            &mut reader,
            &format!("l{}", i),
            "planner.entries.list",
            json!({ "classId": id }),
        );
        assert!(entry_labels(&listed).is_empty());
    }

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn malformed_entry_params_are_rejected() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let class_id = class_id_of(&request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "classes.create",
        json!({ "name": "A" }),
    ));

    let cases = [
        ("planner.entries.add", json!({ "classId": class_id })),
        ("planner.entries.add", json!({ "classId": class_id, "entry": { "subject": "기하" } })),
        ("planner.entries.add", json!({ "classId": class_id, "entry": { "week": -1 } })),
        ("planner.entries.add", json!({ "entry": { "week": 1 } })),
        ("planner.entries.delete", json!({ "classId": class_id })),
        ("planner.entries.delete", json!({ "classId": class_id, "index": -1 })),
        ("planner.draft.update", json!({})),
        ("planner.draft.update", json!({ "patch": { "week": "three" } })),
    ];
    for (i, (method, params)) in cases.into_iter().enumerate() {
        let code = request_err(&mut stdin, &mut reader, &format!("e{}", i), method, params);
        assert_eq!(code, "bad_params", "{}", method);
    }

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn delete_removes_by_position_in_sorted_order() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let class_id = class_id_of(&request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "classes.create",
        json!({ "name": "A" }),
    ));
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "planner.entries.add",
        json!({ "classId": class_id, "entry": { "week": 2, "subject": "기하", "chapter": "평면벡터" } }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "planner.entries.add",
        json!({ "classId": class_id, "entry": { "week": 1, "subject": "기하", "chapter": "이차곡선" } }),
    );

    let out_of_range = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "planner.entries.delete",
        json!({ "classId": class_id, "index": 7 }),
    );
    assert_eq!(out_of_range.get("applied").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(entry_labels(&out_of_range).len(), 2);

    let deleted = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "planner.entries.delete",
        json!({ "classId": class_id, "index": 0 }),
    );
    assert_eq!(deleted.get("applied").and_then(|v| v.as_bool()), Some(true));
    let entries = deleted.get("entries").and_then(|v| v.as_array()).cloned().unwrap_or_default();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].get("label").and_then(|v| v.as_str()), Some("2주차"));
    assert_eq!(entries[0].get("chapter").and_then(|v| v.as_str()), Some("평면벡터"));

    let unknown = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "planner.entries.delete",
        json!({ "classId": "missing", "index": 0 }),
    );
    assert_eq!(unknown.get("applied").and_then(|v| v.as_bool()), Some(false));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn draft_subject_resets_chapter_and_commit_advances_week() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let class_id = class_id_of(&request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "classes.create",
        json!({ "name": "A" }),
    ));

    let draft = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "planner.draft.update",
        json!({ "patch": { "week": 3, "subject": "미적분", "chapter": "미분법", "details": "연습" } }),
    );
    assert_eq!(draft["draft"]["chapter"].as_str(), Some("미분법"));

    // Re-selecting the same subject still clears the chapter.
    let draft = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "planner.draft.update",
        json!({ "patch": { "subject": "미적분" } }),
    );
    assert_eq!(draft["draft"]["subject"].as_str(), Some("미적분"));
    assert_eq!(draft["draft"]["chapter"].as_str(), Some(""));

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "planner.draft.update",
        json!({ "patch": { "chapter": "적분법" } }),
    );
    let committed = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "planner.draft.commit",
        json!({ "classId": class_id }),
    );
    assert_eq!(committed.get("applied").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(entry_labels(&committed), vec!["3주차"]);
    assert_eq!(committed["entries"][0]["details"].as_str(), Some("연습"));
    assert_eq!(committed["draft"]["period"]["week"].as_u64(), Some(4));
    assert_eq!(committed["draft"]["subject"].as_str(), Some(""));
    assert_eq!(committed["draft"]["chapter"].as_str(), Some(""));

    // Empty draft cannot be committed.
    let empty = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "planner.draft.commit",
        json!({ "classId": class_id }),
    );
    assert_eq!(empty.get("applied").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(entry_labels(&empty), vec!["3주차"]);

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn month_week_scheme_orders_by_month_then_week() {
    let (mut child, mut stdin, mut reader) =
        spawn_sidecar_with_env(&[("PLANNERD_PERIOD_SCHEME", "monthWeek")]);
    let class_id = class_id_of(&request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "classes.create",
        json!({ "name": "방학반" }),
    ));

    let draft = request_ok(&mut stdin, &mut reader, "2", "planner.draft.get", json!({}));
    assert_eq!(draft["draft"]["label"].as_str(), Some("1월 1주차"));

    let mut last = serde_json::Value::Null;
    for (i, (month, week)) in [(8, 1), (7, 4), (7, 2)].iter().enumerate() {
        last = request_ok(
            &mut stdin,
            &mut reader,
            &format!("a{}", i),
            "planner.entries.add",
            json!({
                "classId": class_id,
                "entry": { "month": month, "week": week, "subject": "기하", "chapter": "평면벡터" }
            }),
        );
    }
    assert_eq!(entry_labels(&last), vec!["7월 2주차", "7월 4주차", "8월 1주차"]);
    assert_eq!(last["draft"]["label"].as_str(), Some("7월 3주차"));

    let code = request_err(
        &mut stdin,
        &mut reader,
        "3",
        "planner.entries.add",
        json!({ "classId": class_id, "entry": { "week": 1, "subject": "기하", "chapter": "평면벡터" } }),
    );
    assert_eq!(code, "bad_params");

    let rejected = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "planner.entries.add",
        json!({
            "classId": class_id,
            "entry": { "month": 13, "week": 1, "subject": "기하", "chapter": "평면벡터" }
        }),
    );
    assert_eq!(rejected.get("applied").and_then(|v| v.as_bool()), Some(false));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn draft_update_ignores_out_of_range_periods() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let draft = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "planner.draft.update",
        json!({ "patch": { "week": 0, "subject": "기하" } }),
    );
    assert_eq!(draft["draft"]["label"].as_str(), Some("1주차"));
    assert_eq!(draft["draft"]["period"]["week"].as_u64(), Some(1));
    // The rest of the patch still applies.
    assert_eq!(draft["draft"]["subject"].as_str(), Some("기하"));

    drop(stdin);
    let _ = child.wait();

    let (mut child, mut stdin, mut reader) =
        spawn_sidecar_with_env(&[("PLANNERD_PERIOD_SCHEME", "monthWeek")]);
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "planner.draft.update",
        json!({ "patch": { "month": 3, "week": 2 } }),
    );
    for (i, patch) in [
        json!({ "month": 13 }),
        json!({ "month": 0 }),
        json!({ "week": 0 }),
    ]
    .into_iter()
    .enumerate()
    {
        let draft = request_ok(
            &mut stdin,
            &mut reader,
            &format!("m{}", i),
            "planner.draft.update",
            json!({ "patch": patch }),
        );
        assert_eq!(draft["draft"]["label"].as_str(), Some("3월 2주차"));
    }

    drop(stdin);
    let _ = child.wait();
}
