//! 資料集轉換操作。每個操作都接收資料集並回傳新的資料集，不修改輸入。

use crate::domain::model::{Dataset, FieldValue, Record};
use crate::domain::preset::{
    FieldAssignment, FunctionKind, FunctionRule, HeaderRename, KEEP_VALUE, MATCH_ANY,
};

/// 單一轉換步驟
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Remove(String),
    Add(FieldAssignment),
    Rename(HeaderRename),
    Derive(FunctionRule),
    Project(Vec<String>),
}

impl Operation {
    pub fn apply(&self, dataset: &[Record]) -> Dataset {
        match self {
            Operation::Remove(field) => remove_field(dataset, field),
            Operation::Add(assignment) => add_field(dataset, assignment),
            Operation::Rename(rename) => edit_header(dataset, rename),
            Operation::Derive(rule) => run_function(dataset, rule),
            Operation::Project(order) => order_fields(dataset, order),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Operation::Remove(_) => "remove",
            Operation::Add(_) => "add",
            Operation::Rename(_) => "rename",
            Operation::Derive(_) => "derive",
            Operation::Project(_) => "project",
        }
    }
}

fn map_records(dataset: &[Record], f: impl Fn(&mut Record)) -> Dataset {
    dataset
        .iter()
        .map(|record| {
            let mut record = record.clone();
            f(&mut record);
            record
        })
        .collect()
}

pub fn remove_field(dataset: &[Record], field: &str) -> Dataset {
    map_records(dataset, |record| {
        record.remove(field);
    })
}

pub fn add_field(dataset: &[Record], assignment: &FieldAssignment) -> Dataset {
    map_records(dataset, |record| {
        record.insert(assignment.field.clone(), assignment.value.as_str());
    })
}

/// 只有文字值才可能等於條件字串；缺少的欄位永遠不相等
fn condition_matches(record: &Record, rule: &FunctionRule) -> bool {
    if rule.condition == MATCH_ANY {
        return true;
    }
    let equals = record.get(&rule.field).and_then(FieldValue::as_str) == Some(rule.condition.as_str());
    match rule.function {
        FunctionKind::If => equals,
        FunctionKind::IfNot => !equals,
    }
}

pub fn run_function(dataset: &[Record], rule: &FunctionRule) -> Dataset {
    map_records(dataset, |record| {
        let value = if condition_matches(record, rule) {
            &rule.value_true
        } else {
            &rule.value_false
        };
        // 維持原值時，不存在的結果欄位也不會被建立
        if value != KEEP_VALUE {
            record.insert(rule.result_field.clone(), value.as_str());
        }
    })
}

pub fn edit_header(dataset: &[Record], rename: &HeaderRename) -> Dataset {
    map_records(dataset, |record| {
        record.rename(&rename.from, &rename.to);
    })
}

pub fn order_fields(dataset: &[Record], order: &[String]) -> Dataset {
    dataset.iter().map(|record| record.project(order)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> Record {
        serde_json::from_str(json).unwrap()
    }

    fn rule(field: &str, function: FunctionKind, condition: &str, result: &str, t: &str, f: &str) -> FunctionRule {
        FunctionRule {
            field: field.to_string(),
            function,
            condition: condition.to_string(),
            result_field: result.to_string(),
            value_true: t.to_string(),
            value_false: f.to_string(),
        }
    }

    #[test]
    fn test_remove_field_is_idempotent() {
        let dataset = vec![record(r#"{"a":1,"b":2}"#), record(r#"{"b":3}"#)];

        let once = remove_field(&dataset, "a");
        let twice = remove_field(&once, "a");

        assert_eq!(once, vec![record(r#"{"b":2}"#), record(r#"{"b":3}"#)]);
        assert_eq!(once, twice);
        // 輸入不變
        assert_eq!(dataset[0], record(r#"{"a":1,"b":2}"#));
    }

    #[test]
    fn test_add_field_sets_every_record() {
        let dataset = vec![record(r#"{"a":1}"#), record(r#"{"a":2,"source":"old"}"#)];

        let result = add_field(&dataset, &FieldAssignment::new("source", "import"));

        for row in &result {
            assert_eq!(row.get("source"), Some(&FieldValue::from("import")));
        }
        assert_eq!(result[1], record(r#"{"a":2,"source":"import"}"#));
        assert_eq!(add_field(&result, &FieldAssignment::new("source", "import")), result);

        let overwritten = add_field(&result, &FieldAssignment::new("source", "manual"));
        assert_eq!(overwritten[0].get("source"), Some(&FieldValue::from("manual")));
    }

    #[test]
    fn test_run_function_wildcard() {
        let dataset = vec![
            record(r#"{"status":"A"}"#),
            record(r#"{"status":"B","x":"old"}"#),
            record(r#"{"other":1}"#),
        ];

        let result = run_function(
            &dataset,
            &rule("status", FunctionKind::If, "*", "x", "Y", "..."),
        );

        for row in &result {
            assert_eq!(row.get("x"), Some(&FieldValue::from("Y")));
        }
    }

    #[test]
    fn test_run_function_if_not() {
        let dataset = vec![record(r#"{"field":"B"}"#), record(r#"{"field":"A"}"#)];

        let result = run_function(
            &dataset,
            &rule("field", FunctionKind::IfNot, "A", "flag", "yes", "no"),
        );

        assert_eq!(result[0].get("flag"), Some(&FieldValue::from("yes")));
        assert_eq!(result[1].get("flag"), Some(&FieldValue::from("no")));
    }

    #[test]
    fn test_run_function_keep_value_sentinel() {
        let dataset = vec![
            record(r#"{"status":"A","label":"kept"}"#),
            record(r#"{"status":"B","label":"old"}"#),
            record(r#"{"status":"B"}"#),
        ];

        let result = run_function(
            &dataset,
            &rule("status", FunctionKind::If, "A", "label", "...", "changed"),
        );

        assert_eq!(result[0].get("label"), Some(&FieldValue::from("kept")));
        assert_eq!(result[1].get("label"), Some(&FieldValue::from("changed")));
        assert_eq!(result[2].get("label"), Some(&FieldValue::from("changed")));

        let untouched = run_function(
            &[record(r#"{"status":"A"}"#)],
            &rule("status", FunctionKind::If, "A", "label", "...", "..."),
        );
        assert!(!untouched[0].contains("label"));
    }

    #[test]
    fn test_run_function_compares_text_only() {
        let dataset = vec![record(r#"{"code":1}"#), record(r#"{"code":"1"}"#), record(r#"{}"#)];

        let result = run_function(
            &dataset,
            &rule("code", FunctionKind::If, "1", "hit", "y", "n"),
        );

        assert_eq!(result[0].get("hit"), Some(&FieldValue::from("n")));
        assert_eq!(result[1].get("hit"), Some(&FieldValue::from("y")));
        assert_eq!(result[2].get("hit"), Some(&FieldValue::from("n")));
    }

    #[test]
    fn test_run_function_self_reference_flips() {
        let flip = rule("state", FunctionKind::If, "on", "state", "off", "on");
        let dataset = vec![record(r#"{"state":"on"}"#)];

        let once = run_function(&dataset, &flip);
        let twice = run_function(&once, &flip);

        assert_eq!(once[0].get("state"), Some(&FieldValue::from("off")));
        assert_eq!(twice[0].get("state"), Some(&FieldValue::from("on")));
    }

    #[test]
    fn test_edit_header() {
        let dataset = vec![record(r#"{"a":1,"b":2}"#), record(r#"{"b":2}"#)];

        let result = edit_header(&dataset, &HeaderRename::new("a", "z"));

        assert_eq!(result[0], record(r#"{"z":1,"b":2}"#));
        assert_eq!(result[0].keys().collect::<Vec<_>>(), vec!["z", "b"]);
        assert_eq!(result[1], record(r#"{"b":2}"#));
    }

    #[test]
    fn test_edit_header_collision_keeps_renamed_value() {
        let dataset = vec![record(r#"{"z":9,"a":1,"b":2}"#), record(r#"{"a":1,"z":9}"#)];

        let result = edit_header(&dataset, &HeaderRename::new("a", "z"));

        assert_eq!(result[0], record(r#"{"z":1,"b":2}"#));
        assert_eq!(result[1], record(r#"{"z":1}"#));
    }

    #[test]
    fn test_order_fields_projects() {
        let dataset = vec![record(r#"{"a":1,"b":2,"c":3}"#), record(r#"{"a":4}"#)];

        let result = order_fields(&dataset, &["b".to_string(), "a".to_string()]);

        assert_eq!(result[0].keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(result[0], record(r#"{"b":2,"a":1}"#));
        assert_eq!(result[1], record(r#"{"a":4}"#));
        assert!(order_fields(&dataset, &[]).iter().all(Record::is_empty));
    }

    #[test]
    fn test_order_fields_repeated_key_emitted_once() {
        let dataset = vec![record(r#"{"a":1,"b":2}"#)];
        let order = ["a", "b", "a"].map(String::from);

        let result = order_fields(&dataset, &order);

        assert_eq!(result[0].len(), 2);
        assert_eq!(result[0].keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(serde_json::to_string(&result[0]).unwrap(), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn test_operation_dispatch() {
        let dataset = vec![record(r#"{"a":1,"b":2}"#)];
        let ops = [
            Operation::Remove("a".to_string()),
            Operation::Add(FieldAssignment::new("c", "3")),
            Operation::Rename(HeaderRename::new("b", "d")),
            Operation::Project(vec!["c".to_string(), "d".to_string()]),
        ];

        let result = ops.iter().fold(dataset, |data, op| op.apply(&data));

        assert_eq!(result, vec![record(r#"{"c":"3","d":2}"#)]);
        assert_eq!(ops[2].label(), "rename");
    }
}
