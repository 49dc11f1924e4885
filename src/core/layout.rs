//! 匯出欄寬與格式設定，以及固定寬度解析用的欄位清單。

use crate::core::validator::parse_field_config;
use crate::domain::preset::{ExportLayout, FieldWidth, Format, ParserField};
use crate::utils::error::{FormatterError, Result};
use crate::utils::validation::{coerce_width, validate_single_char};
use serde_json::Value;

impl ExportLayout {
    /// 依欄位名稱查詢欄寬；同一欄位出現多次時以最後一筆為準
    pub fn width_of(&self, field: &str) -> Option<u32> {
        self.widths
            .iter()
            .rev()
            .find(|entry| entry.field == field)
            .map(|entry| entry.width)
    }

    /// 為目前資料的每個欄位產生預設欄寬，沒有設定過的欄位為 `None`
    pub fn default_widths(&self, fields: &[String]) -> Vec<(String, Option<u32>)> {
        fields
            .iter()
            .map(|field| (field.clone(), self.width_of(field)))
            .collect()
    }

    /// 整批取代欄寬。輸入會先轉型再驗證，任何一筆失敗時保留原本的設定。
    pub fn set_widths<I, K>(&mut self, input: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut widths = Vec::new();
        let mut issues = Vec::new();
        for (field, raw) in input {
            let field = field.into();
            match coerce_width(&format!("widths.{}", field), &raw) {
                Ok(width) => widths.push(FieldWidth::new(field, width)),
                Err(issue) => issues.push(issue),
            }
        }

        if !issues.is_empty() {
            return Err(FormatterError::schema(issues));
        }

        tracing::debug!("📏 Replaced widths for {} fields", widths.len());
        self.widths = widths;
        Ok(())
    }

    /// 編碼器使用的單一字元符號；空字串時分隔格式用逗號、固定寬度用空白
    pub fn effective_symbol(&self) -> Result<char> {
        if self.symbol.is_empty() {
            return Ok(match self.format {
                Format::Delimited => ',',
                Format::Fixed => ' ',
            });
        }
        validate_single_char("symbol", &self.symbol)
    }
}

/// 編輯中的欄位設定清單，重複匯入會接在後面
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldConfigList {
    entries: Vec<ParserField>,
}

impl FieldConfigList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ParserField] {
        &self.entries
    }

    pub fn push(&mut self, field: ParserField) {
        self.entries.push(field);
    }

    pub fn remove(&mut self, index: usize) -> Option<ParserField> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// 匯入設定檔內容並附加到清單，回傳新增的筆數。驗證失敗時清單不變。
    pub fn import(&mut self, content: &str) -> Result<usize> {
        let fields = parse_field_config(content)?;
        let count = fields.len();
        self.entries.extend(fields);
        tracing::debug!("📥 Imported {} parser fields ({} total)", count, self.entries.len());
        Ok(count)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}

impl From<Vec<ParserField>> for FieldConfigList {
    fn from(entries: Vec<ParserField>) -> Self {
        Self { entries }
    }
}
