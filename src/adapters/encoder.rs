//! 平面檔編碼：分隔格式交給 `csv` 寫出，固定寬度依欄寬補齊或截斷。

use crate::domain::model::Record;
use crate::domain::preset::{Align, ExportLayout, Format};
use crate::utils::error::{FormatterError, Result};
use crate::utils::validation::file_stem;

/// `<name>.<csv|txt>`，名稱為空時使用 `export`。名稱可能來自命名範本，
/// 路徑分隔符號會被替換，檔案一定寫在輸出目錄內。
pub fn output_file_name(name: &str, layout: &ExportLayout) -> String {
    let stem = file_stem(name);
    format!("{}.{}", stem.as_deref().unwrap_or("export"), layout.export.extension())
}

pub fn encode(records: &[Record], layout: &ExportLayout) -> Result<Vec<u8>> {
    match layout.format {
        Format::Delimited => encode_delimited(records, layout),
        Format::Fixed => encode_fixed(records, layout),
    }
}

fn encode_delimited(records: &[Record], layout: &ExportLayout) -> Result<Vec<u8>> {
    let symbol = layout.effective_symbol()?;
    if !symbol.is_ascii() {
        return Err(FormatterError::InvalidConfigValueError {
            field: "symbol".to_string(),
            value: layout.symbol.clone(),
            reason: "Delimiter must be an ASCII character".to_string(),
        });
    }

    let columns: Vec<&str> = records
        .first()
        .map(|record| record.keys().collect())
        .unwrap_or_default();

    let mut writer = csv::WriterBuilder::new()
        .delimiter(symbol as u8)
        .from_writer(Vec::new());

    if layout.header && !columns.is_empty() {
        writer.write_record(&columns)?;
    }
    for record in records {
        writer.write_record(columns.iter().map(|column| {
            record
                .get(column)
                .map(ToString::to_string)
                .unwrap_or_default()
        }))?;
    }

    writer
        .into_inner()
        .map_err(|e| FormatterError::IoError(e.into_error()))
}

fn pad(value: &str, width: usize, align: Align, symbol: char) -> String {
    let length = value.chars().count();
    if length >= width {
        return value.chars().take(width).collect();
    }

    let filler = symbol.to_string().repeat(width - length);
    match align {
        Align::Left => format!("{}{}", value, filler),
        Align::Right => format!("{}{}", filler, value),
    }
}

/// 欄位依 `widths` 的順序輸出；同一欄位重複時只輸出一次，欄寬取最後一筆
fn encode_fixed(records: &[Record], layout: &ExportLayout) -> Result<Vec<u8>> {
    if layout.widths.is_empty() {
        return Err(FormatterError::EncodingError {
            message: "No field widths defined for fixed-width export".to_string(),
        });
    }
    let symbol = layout.effective_symbol()?;

    let mut columns: Vec<(&str, usize)> = Vec::new();
    for entry in &layout.widths {
        if !columns.iter().any(|(field, _)| *field == entry.field) {
            let width = layout.width_of(&entry.field).unwrap_or(entry.width);
            columns.push((entry.field.as_str(), width as usize));
        }
    }

    let mut output = String::new();
    if layout.header {
        for (field, width) in &columns {
            output.push_str(&pad(field, *width, layout.align, symbol));
        }
        output.push('\n');
    }
    for record in records {
        for (field, width) in &columns {
            let value = record.get(field).map(ToString::to_string).unwrap_or_default();
            output.push_str(&pad(&value, *width, layout.align, symbol));
        }
        output.push('\n');
    }

    Ok(output.into_bytes())
}
