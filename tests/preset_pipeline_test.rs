use anyhow::Result;
use flat_file_formatter::core::operations::{add_field, edit_header, order_fields, remove_field, run_function};
use flat_file_formatter::core::validator::parse_preset;
use flat_file_formatter::domain::preset::{FieldAssignment, FunctionKind, FunctionRule, HeaderRename};
use flat_file_formatter::{apply_preset, apply_schema, tokenize, FieldValue, Record, Workspace, Table};

fn record(json: &str) -> Record {
    serde_json::from_str(json).expect("valid record json")
}

fn dataset() -> Vec<Record> {
    vec![
        record(r#"{"id":1,"status":"A","city":"Taipei"}"#),
        record(r#"{"id":2,"status":"B","city":"Kaohsiung"}"#),
        record(r#"{"id":3,"city":"Hsinchu"}"#),
    ]
}

/// 測試操作不會修改輸入，移除欄位可重複套用
#[test]
fn test_operations_are_pure() {
    let input = dataset();
    let snapshot = input.clone();

    let removed = remove_field(&input, "status");
    let _ = add_field(&input, &FieldAssignment::new("x", "1"));
    let _ = edit_header(&input, &HeaderRename::new("city", "town"));
    let _ = order_fields(&input, &["id".to_string()]);

    assert_eq!(input, snapshot);
    assert_eq!(remove_field(&removed, "status"), removed);
}

/// 測試條件推導在缺少比較欄位的資料列上的行為
#[test]
fn test_run_function_on_heterogeneous_rows() {
    let rule = FunctionRule {
        field: "status".to_string(),
        function: FunctionKind::IfNot,
        condition: "A".to_string(),
        result_field: "flag".to_string(),
        value_true: "other".to_string(),
        value_false: "...".to_string(),
    };

    let result = run_function(&dataset(), &rule);

    assert!(!result[0].contains("flag"));
    assert_eq!(result[1].get("flag"), Some(&FieldValue::from("other")));
    assert_eq!(result[2].get("flag"), Some(&FieldValue::from("other")));
}

/// 測試從 JSON 匯入的 Preset 依固定順序套用
#[test]
fn test_imported_preset_applies_in_fixed_order() -> Result<()> {
    let preset = parse_preset(
        r#"{
            "name": null,
            "schema": "{1}",
            "order": ["a", "town"],
            "symbol": ",",
            "align": "left",
            "header": true,
            "format": "delimited",
            "export": "csv",
            "removed": ["a"],
            "added": [{"a": "new"}],
            "editedHeaders": [{"city": "town"}]
        }"#,
    )?;

    let (records, name) = apply_preset(&dataset(), "branch-list", &preset);

    assert_eq!(records[0], record(r#"{"a":"new","town":"Taipei"}"#));
    assert_eq!(records.len(), 3);
    assert_eq!(name, "list");
    Ok(())
}

/// 測試檔名模板
#[test]
fn test_naming_template() {
    assert_eq!(tokenize("report 2024.final"), vec!["report", "2024", "final"]);
    assert_eq!(apply_schema("report 2024.final", "{0}_{1}"), "report_2024");
    assert_eq!(apply_schema("report 2024.final", "{0}_{5}"), "report_");
    assert_eq!(apply_schema("report 2024.final", ""), "report 2024.final");
}

/// 測試工作區：匯入失敗保留原 Preset，匯出後可再匯入
#[test]
fn test_workspace_preset_import_export() -> Result<()> {
    let mut workspace = Workspace::new(Table::new("branches", dataset()));
    workspace.set_schema("{0}-export");
    workspace.set_order(vec!["city".to_string(), "id".to_string()]);

    let exported = workspace.export_preset()?;
    assert!(workspace.import_preset(r#"{"format": "pdf"}"#).is_err());
    assert_eq!(workspace.export_preset()?, exported);

    let preset = workspace.preset().clone();
    workspace.apply_preset(&preset);

    assert_eq!(workspace.name(), "branches-export");
    assert_eq!(workspace.fields(), vec!["city", "id"]);
    Ok(())
}
