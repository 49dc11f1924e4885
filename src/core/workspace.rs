//! 目前載入的資料、檔名與正在編輯的 Preset。
//!
//! 所有變更都透過純函式產生新的資料集再替換進來；匯入失敗時維持原狀態。

use crate::core::layout::FieldConfigList;
use crate::core::operations::{add_field, edit_header, order_fields, remove_field, run_function};
use crate::core::pipeline::{apply_preset, apply_schema};
use crate::core::validator::parse_preset;
use crate::domain::model::{Dataset, Table};
use crate::domain::preset::{
    Align, ExportType, FieldAssignment, Format, FunctionRule, HeaderRename, Preset,
};
use crate::utils::error::Result;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct Workspace {
    table: Table,
    preset: Preset,
    parser_fields: FieldConfigList,
}

impl Workspace {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            ..Self::default()
        }
    }

    /// 載入新的資料與檔名，取代目前的資料（Preset 保留）
    pub fn load(&mut self, table: Table) {
        tracing::debug!("📥 Loaded '{}' with {} records", table.name, table.records.len());
        self.table = table;
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    pub fn records(&self) -> &Dataset {
        &self.table.records
    }

    pub fn name(&self) -> &str {
        &self.table.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.table.name = name.into();
    }

    pub fn fields(&self) -> Vec<String> {
        self.table.fields()
    }

    pub fn preset(&self) -> &Preset {
        &self.preset
    }

    pub fn parser_fields(&self) -> &FieldConfigList {
        &self.parser_fields
    }

    pub fn parser_fields_mut(&mut self) -> &mut FieldConfigList {
        &mut self.parser_fields
    }

    pub fn remove_field(&mut self, field: &str) {
        self.table.records = remove_field(&self.table.records, field);
    }

    pub fn add_field(&mut self, assignment: &FieldAssignment) {
        self.table.records = add_field(&self.table.records, assignment);
    }

    pub fn run_function(&mut self, rule: &FunctionRule) {
        self.table.records = run_function(&self.table.records, rule);
    }

    pub fn edit_header(&mut self, rename: &HeaderRename) {
        self.table.records = edit_header(&self.table.records, rename);
    }

    pub fn order_fields(&mut self, order: &[String]) {
        self.table.records = order_fields(&self.table.records, order);
    }

    pub fn apply_schema(&mut self, schema: &str) {
        self.table.name = apply_schema(&self.table.name, schema);
    }

    /// 套用指定的 Preset 並將它設為目前的 Preset
    pub fn apply_preset(&mut self, preset: &Preset) {
        let (records, name) = apply_preset(&self.table.records, &self.table.name, preset);
        tracing::info!(
            "✅ Applied preset {:?}: {} records, name '{}' → '{}'",
            preset.name.as_deref().unwrap_or("preset"),
            records.len(),
            self.table.name,
            name
        );
        self.table = Table::new(name, records);
        self.preset = preset.clone();
    }

    /// 匯入 Preset 檔案內容；驗證失敗時回傳錯誤並保留目前的 Preset
    pub fn import_preset(&mut self, content: &str) -> Result<&Preset> {
        match parse_preset(content) {
            Ok(preset) => {
                self.preset = preset;
                Ok(&self.preset)
            }
            Err(e) => {
                tracing::warn!("⚠️ Invalid preset, keeping current one: {}", e);
                Err(e)
            }
        }
    }

    /// 匯出目前的 Preset（兩格縮排的 JSON）
    pub fn export_preset(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.preset)?)
    }

    pub fn set_preset(&mut self, preset: Preset) {
        self.preset = preset;
    }

    pub fn set_preset_name(&mut self, name: Option<String>) {
        self.preset.name = name;
    }

    pub fn set_schema(&mut self, schema: impl Into<String>) {
        self.preset.schema = schema.into();
    }

    pub fn set_order(&mut self, order: Vec<String>) {
        self.preset.order = order;
    }

    pub fn set_symbol(&mut self, symbol: impl Into<String>) {
        self.preset.layout.symbol = symbol.into();
    }

    pub fn set_align(&mut self, align: Align) {
        self.preset.layout.align = align;
    }

    pub fn set_header(&mut self, header: bool) {
        self.preset.layout.header = header;
    }

    pub fn set_format(&mut self, format: Format) {
        self.preset.layout.format = format;
    }

    pub fn set_export(&mut self, export: ExportType) {
        self.preset.layout.export = export;
    }

    /// 目前欄位的預設欄寬
    pub fn default_widths(&self) -> Vec<(String, Option<u32>)> {
        self.preset.layout.default_widths(&self.fields())
    }

    pub fn set_widths<I, K>(&mut self, input: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.preset.layout.set_widths(input)
    }
}
