use crate::utils::validation::file_stem;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// `condition` 為此值時，任何資料列都視為符合
pub const MATCH_ANY: &str = "*";

/// `valueTrue` / `valueFalse` 為此值時，結果欄位維持原值
pub const KEEP_VALUE: &str = "...";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Delimited,
    Fixed,
}

/// 匯出檔案的副檔名
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportType {
    #[default]
    Csv,
    Txt,
}

impl ExportType {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportType::Csv => "csv",
            ExportType::Txt => "txt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FunctionKind {
    #[serde(rename = "if")]
    If,
    #[serde(rename = "if not")]
    IfNot,
}

/// 條件式欄位推導規則
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRule {
    pub field: String,
    pub function: FunctionKind,
    pub condition: String,
    pub result_field: String,
    pub value_true: String,
    pub value_false: String,
}

/// `{field: width}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWidth {
    pub field: String,
    pub width: u32,
}

impl FieldWidth {
    pub fn new(field: impl Into<String>, width: u32) -> Self {
        Self {
            field: field.into(),
            width,
        }
    }
}

/// `{field: value}`，對每一筆資料新增或覆寫欄位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
    pub field: String,
    pub value: String,
}

impl FieldAssignment {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// `{old: new}`，欄位改名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRename {
    pub from: String,
    pub to: String,
}

impl HeaderRename {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

fn serialize_single_entry<S, V>(serializer: S, key: &str, value: &V) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize + ?Sized,
{
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(key, value)?;
    map.end()
}

impl Serialize for FieldWidth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_single_entry(serializer, &self.field, &self.width)
    }
}

impl Serialize for FieldAssignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_single_entry(serializer, &self.field, &self.value)
    }
}

impl Serialize for HeaderRename {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_single_entry(serializer, &self.from, &self.to)
    }
}

/// 匯出設定：交給編碼器使用的欄寬、符號、對齊與格式
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportLayout {
    pub symbol: String,
    pub widths: Vec<FieldWidth>,
    pub align: Align,
    pub header: bool,
    pub format: Format,
    pub export: ExportType,
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self {
            symbol: ",".to_string(),
            widths: Vec::new(),
            align: Align::default(),
            header: true,
            format: Format::default(),
            export: ExportType::default(),
        }
    }
}

/// 可重複使用、可序列化的轉換與輸出設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub name: Option<String>,
    pub schema: String,
    pub order: Vec<String>,
    #[serde(flatten)]
    pub layout: ExportLayout,
    pub removed: Vec<String>,
    pub added: Vec<FieldAssignment>,
    pub functions: Vec<FunctionRule>,
    #[serde(rename = "editedHeaders")]
    pub edited_headers: Vec<HeaderRename>,
}

impl Preset {
    /// 匯出檔名，未命名時為 `preset`；名稱中的路徑分隔符號會被替換
    pub fn file_name(&self) -> String {
        let stem = self.name.as_deref().and_then(file_stem);
        format!("{}.json", stem.as_deref().unwrap_or("preset"))
    }
}

/// 欄位設定檔中的一筆 `{property, width}`，供固定寬度載入器切欄使用
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParserField {
    pub property: String,
    pub width: u32,
}

impl ParserField {
    pub fn new(property: impl Into<String>, width: u32) -> Self {
        Self {
            property: property.into(),
            width,
        }
    }
}
