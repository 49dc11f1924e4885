//! 原始資料載入：分隔檔（CSV）與固定寬度文字檔。所有值都以文字載入。

use crate::domain::model::{Dataset, FieldValue, Record};
use crate::domain::preset::ParserField;
use crate::utils::error::{FormatterError, Result};
use std::path::Path;

/// 以輸入檔的主檔名（不含副檔名）作為資料集名稱
pub fn table_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// 第一列為欄位名稱
pub fn load_delimited(content: &[u8], delimiter: u8) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(content);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(key, value)| (key, FieldValue::from(value)))
            .collect();
        records.push(record);
    }

    tracing::debug!("📥 Parsed {} delimited rows with {} columns", records.len(), headers.len());
    Ok(records)
}

/// 依欄位設定逐列切出固定寬度的欄位，值會去除前後空白；空白列略過
pub fn load_fixed_width(content: &str, fields: &[ParserField]) -> Result<Dataset> {
    if fields.is_empty() {
        return Err(FormatterError::MissingConfigError {
            field: "parser_config".to_string(),
        });
    }

    let records: Dataset = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut chars = line.chars();
            fields
                .iter()
                .map(|field| {
                    let value: String = chars.by_ref().take(field.width as usize).collect();
                    (field.property.as_str(), FieldValue::from(value.trim()))
                })
                .collect()
        })
        .collect();

    tracing::debug!("📥 Parsed {} fixed-width rows", records.len());
    Ok(records)
}
