use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 欄位值：字串、數字、布林或 null
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// 一筆資料列。欄位以插入順序保存，投影與改名都依賴這個順序。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.position(key).map(|i| &self.fields[i].1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// 已存在的欄位就地覆寫，否則附加在最後
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(i) => self.fields[i].1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.position(key).map(|i| self.fields.remove(i).1)
    }

    /// 將 `from` 改名為 `to` 並保留位置；與 `to` 同名的其他欄位會被移除
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        let Some(index) = self.position(from) else {
            return false;
        };
        if from == to {
            return true;
        }

        self.fields[index].0 = to.to_string();
        let mut position = 0;
        self.fields.retain(|(key, _)| {
            let keep = position == index || key != to;
            position += 1;
            keep
        });
        true
    }

    /// 只保留 `order` 中列出的欄位，並依 `order` 排序；重複的欄位只取第一次出現的位置
    pub fn project(&self, order: &[String]) -> Record {
        let mut projected = Record::new();
        for key in order {
            if projected.contains(key) {
                continue;
            }
            if let Some(value) = self.get(key) {
                projected.fields.push((key.clone(), value.clone()));
            }
        }
        projected
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|(k, _)| k == key)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object of field values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
                let mut record = Record::new();
                while let Some((key, value)) = access.next_entry::<String, FieldValue>()? {
                    record.insert(key, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

pub type Dataset = Vec<Record>;

/// 資料集連同目前的檔名，在 extract / transform / load 之間傳遞
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub name: String,
    pub records: Dataset,
}

impl Table {
    pub fn new(name: impl Into<String>, records: Dataset) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// 欄位清單取自第一筆資料
    pub fn fields(&self) -> Vec<String> {
        self.records
            .first()
            .map(|record| record.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
