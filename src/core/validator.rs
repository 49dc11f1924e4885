//! Preset 與欄位設定檔的結構驗證。
//!
//! 驗證會一次收集所有問題，每個問題帶有欄位路徑（例如 `widths[1].city`、
//! `functions[0].function`），而不是遇到第一個錯誤就停止。

use crate::domain::preset::{
    Align, ExportLayout, ExportType, FieldAssignment, FieldWidth, Format, FunctionKind,
    FunctionRule, HeaderRename, ParserField, Preset,
};
use crate::utils::error::{FormatterError, Result, ValidationIssue};
use crate::utils::validation::coerce_width;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// 從 JSON 文字解析並驗證 Preset
pub fn parse_preset(content: &str) -> Result<Preset> {
    let value: Value = serde_json::from_str(content)?;
    validate_preset(&value)
}

/// 從 JSON 文字解析並驗證欄位設定檔 `[{property, width}]`
pub fn parse_field_config(content: &str) -> Result<Vec<ParserField>> {
    let value: Value = serde_json::from_str(content)?;
    validate_field_config(&value)
}

pub fn validate_preset(value: &Value) -> Result<Preset> {
    let mut checker = Checker::default();
    let Some(obj) = checker.object("", value) else {
        return Err(checker.into_error());
    };

    let name = checker.nullable_string(obj, "", "name");
    let schema = checker.string(obj, "", "schema");
    let order = checker.string_list(obj, "order");
    let symbol = checker.string(obj, "", "symbol");
    let widths = checker.widths(obj);
    let align = checker.choice(
        obj,
        "",
        "align",
        &[("left", Align::Left), ("right", Align::Right)],
    );
    let header = checker.boolean(obj, "header");
    let format = checker.choice(
        obj,
        "",
        "format",
        &[("delimited", Format::Delimited), ("fixed", Format::Fixed)],
    );
    let export = checker.choice(
        obj,
        "",
        "export",
        &[("csv", ExportType::Csv), ("txt", ExportType::Txt)],
    );
    let removed = checker.string_list(obj, "removed");
    let added = checker.string_entries(obj, "added", |field, value| FieldAssignment { field, value });
    let functions = checker.functions(obj);
    let edited_headers = checker.string_entries(obj, "editedHeaders", |from, to| HeaderRename { from, to });

    if !checker.issues.is_empty() {
        return Err(checker.into_error());
    }

    Ok(Preset {
        name,
        schema,
        order,
        layout: ExportLayout {
            symbol,
            widths,
            align: align.unwrap_or_default(),
            header,
            format: format.unwrap_or_default(),
            export: export.unwrap_or_default(),
        },
        removed,
        added,
        functions,
        edited_headers,
    })
}

pub fn validate_field_config(value: &Value) -> Result<Vec<ParserField>> {
    let mut checker = Checker::default();
    let Some(items) = value.as_array() else {
        checker.push("", "Expected an array of {property, width} objects");
        return Err(checker.into_error());
    };

    let mut fields = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let path = format!("[{}]", index);
        let Some(obj) = checker.object(&path, item) else {
            continue;
        };
        let property = checker.string(obj, &path, "property");
        let width_path = join(&path, "width");
        let width = match obj.get("width") {
            Some(raw) => checker.width(&width_path, raw),
            None => {
                checker.push(width_path, "Required");
                None
            }
        };
        if let Some(width) = width {
            fields.push(ParserField { property, width });
        }
    }

    if !checker.issues.is_empty() {
        return Err(checker.into_error());
    }
    Ok(fields)
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

#[derive(Default)]
struct Checker {
    issues: Vec<ValidationIssue>,
}

impl Checker {
    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(path, message));
    }

    fn into_error(self) -> FormatterError {
        FormatterError::schema(self.issues)
    }

    fn object<'a>(&mut self, path: &str, value: &'a Value) -> Option<&'a Map<String, Value>> {
        let obj = value.as_object();
        if obj.is_none() {
            self.push(path, "Expected an object");
        }
        obj
    }

    fn required<'a>(
        &mut self,
        obj: &'a Map<String, Value>,
        prefix: &str,
        key: &str,
    ) -> Option<&'a Value> {
        let value = obj.get(key);
        if value.is_none() {
            self.push(join(prefix, key), "Required");
        }
        value
    }

    fn string(&mut self, obj: &Map<String, Value>, prefix: &str, key: &str) -> String {
        match self.required(obj, prefix, key) {
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                self.push(join(prefix, key), "Expected a string");
                String::new()
            }
            None => String::new(),
        }
    }

    fn nullable_string(
        &mut self,
        obj: &Map<String, Value>,
        prefix: &str,
        key: &str,
    ) -> Option<String> {
        match obj.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.push(join(prefix, key), "Expected a string or null");
                None
            }
        }
    }

    fn boolean(&mut self, obj: &Map<String, Value>, key: &str) -> bool {
        match self.required(obj, "", key) {
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                self.push(key, "Expected a boolean");
                false
            }
            None => false,
        }
    }

    fn choice<T: Copy>(
        &mut self,
        obj: &Map<String, Value>,
        prefix: &str,
        key: &str,
        options: &[(&str, T)],
    ) -> Option<T> {
        let value = self.required(obj, prefix, key)?;
        let found = value
            .as_str()
            .and_then(|s| options.iter().find(|(name, _)| *name == s))
            .map(|(_, variant)| *variant);
        if found.is_none() {
            let expected = options
                .iter()
                .map(|(name, _)| format!("'{}'", name))
                .collect::<Vec<_>>()
                .join(" | ");
            self.push(join(prefix, key), format!("Expected {}", expected));
        }
        found
    }

    /// 缺少或為 null 的陣列欄位視為空陣列
    fn array<'a>(&mut self, obj: &'a Map<String, Value>, key: &str) -> &'a [Value] {
        match obj.get(key) {
            None | Some(Value::Null) => &[],
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.push(key, "Expected an array");
                &[]
            }
        }
    }

    fn string_list(&mut self, obj: &Map<String, Value>, key: &str) -> Vec<String> {
        let mut list = Vec::new();
        for (index, item) in self.array(obj, key).iter().enumerate() {
            match item {
                Value::String(s) => list.push(s.clone()),
                _ => self.push(format!("{}[{}]", key, index), "Expected a string"),
            }
        }
        list
    }

    /// 單一鍵值的物件，例如 `{"city": 12}`
    fn single_entry<'a>(&mut self, path: &str, value: &'a Value) -> Option<(&'a String, &'a Value)> {
        let obj = self.object(path, value)?;
        if obj.len() != 1 {
            self.push(
                path,
                format!("Expected exactly one entry, found {}", obj.len()),
            );
            return None;
        }
        obj.iter().next()
    }

    fn width(&mut self, path: &str, value: &Value) -> Option<u32> {
        match coerce_width(path, value) {
            Ok(width) => Some(width),
            Err(issue) => {
                self.issues.push(issue);
                None
            }
        }
    }

    fn widths(&mut self, obj: &Map<String, Value>) -> Vec<FieldWidth> {
        let mut widths = Vec::new();
        for (index, item) in self.array(obj, "widths").iter().enumerate() {
            let path = format!("widths[{}]", index);
            let Some((field, raw)) = self.single_entry(&path, item) else {
                continue;
            };
            if let Some(width) = self.width(&join(&path, field), raw) {
                widths.push(FieldWidth::new(field.clone(), width));
            }
        }
        widths
    }

    fn string_entries<T>(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        build: impl Fn(String, String) -> T,
    ) -> Vec<T> {
        let mut entries = Vec::new();
        for (index, item) in self.array(obj, key).iter().enumerate() {
            let path = format!("{}[{}]", key, index);
            let Some((field, raw)) = self.single_entry(&path, item) else {
                continue;
            };
            match raw {
                Value::String(value) => entries.push(build(field.clone(), value.clone())),
                _ => self.push(join(&path, field), "Expected a string"),
            }
        }
        entries
    }

    fn functions(&mut self, obj: &Map<String, Value>) -> Vec<FunctionRule> {
        let mut rules = Vec::new();
        for (index, item) in self.array(obj, "functions").iter().enumerate() {
            let path = format!("functions[{}]", index);
            let Some(rule) = self.object(&path, item) else {
                continue;
            };
            let before = self.issues.len();
            let field = self.string(rule, &path, "field");
            let function = self.choice(
                rule,
                &path,
                "function",
                &[("if", FunctionKind::If), ("if not", FunctionKind::IfNot)],
            );
            let condition = self.string(rule, &path, "condition");
            let result_field = self.string(rule, &path, "resultField");
            let value_true = self.string(rule, &path, "valueTrue");
            let value_false = self.string(rule, &path, "valueFalse");

            if let (Some(function), true) = (function, self.issues.len() == before) {
                rules.push(FunctionRule {
                    field,
                    function,
                    condition,
                    result_field,
                    value_true,
                    value_false,
                });
            }
        }
        rules
    }
}

impl<'de> Deserialize<'de> for Preset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        validate_preset(&value).map_err(serde::de::Error::custom)
    }
}
