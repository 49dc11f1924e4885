//! Preset 套用流程。
//!
//! 操作順序固定：移除 → 新增 → 改名 → 條件推導 → 投影。投影一定最後執行，
//! 讓前面步驟產生的欄位在投影時都看得到；即使 `order` 為空也會執行，
//! 此時每筆資料都會變成空的。

use crate::core::operations::Operation;
use crate::core::tokenizer::tokenize;
use crate::domain::model::{Dataset, Record};
use crate::domain::preset::Preset;
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([0-9]+)\}").expect("placeholder pattern is valid"))
}

/// 依固定順序展開 Preset 的所有操作
pub fn preset_operations(preset: &Preset) -> Vec<Operation> {
    let mut operations = Vec::with_capacity(
        preset.removed.len()
            + preset.added.len()
            + preset.edited_headers.len()
            + preset.functions.len()
            + 1,
    );
    operations.extend(preset.removed.iter().cloned().map(Operation::Remove));
    operations.extend(preset.added.iter().cloned().map(Operation::Add));
    operations.extend(preset.edited_headers.iter().cloned().map(Operation::Rename));
    operations.extend(preset.functions.iter().cloned().map(Operation::Derive));
    operations.push(Operation::Project(preset.order.clone()));
    operations
}

pub fn run_operations(dataset: &[Record], operations: &[Operation]) -> Dataset {
    let mut current = dataset.to_vec();
    for (step, operation) in operations.iter().enumerate() {
        current = operation.apply(&current);
        tracing::debug!(
            "🔄 Step {}: {} → {} records",
            step + 1,
            operation.label(),
            current.len()
        );
    }
    current
}

/// 把 `schema` 中的 `{n}` 換成檔名的第 n 個片段；超出範圍的索引換成空字串。
/// `schema` 為空時回傳原檔名。
pub fn apply_schema(name: &str, schema: &str) -> String {
    if schema.is_empty() {
        return name.to_string();
    }

    let tokens = tokenize(name);
    placeholder_pattern()
        .replace_all(schema, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| tokens.get(index))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}

/// 對資料集與檔名套用整個 Preset，輸入不會被修改
pub fn apply_preset(dataset: &[Record], name: &str, preset: &Preset) -> (Dataset, String) {
    let operations = preset_operations(preset);
    tracing::debug!(
        "📋 Applying preset {:?}: {} operations over {} records",
        preset.name,
        operations.len(),
        dataset.len()
    );

    let records = run_operations(dataset, &operations);
    let name = apply_schema(name, &preset.schema);
    (records, name)
}
