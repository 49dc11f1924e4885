use crate::core::layout::FieldConfigList;
use crate::core::validator::parse_preset;
use crate::core::Storage;
use crate::domain::preset::Preset;
use crate::utils::error::{FormatterError, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

pub(crate) fn utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| {
        FormatterError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

/// 讀取並驗證 Preset 檔案；讀取完成前不會套用任何東西
pub async fn read_preset<S: Storage>(storage: &S, path: &str) -> Result<Preset> {
    let content = utf8(storage.read_file(path).await?)?;
    let preset = parse_preset(&content)?;
    tracing::debug!("📋 Loaded preset {:?} from {}", preset.name, path);
    Ok(preset)
}

/// 將 Preset 寫到 `dir/<name>.json`，回傳寫入的路徑
pub async fn write_preset<S: Storage>(storage: &S, dir: &str, preset: &Preset) -> Result<String> {
    let path = Path::new(dir).join(preset.file_name());
    let path = path.to_string_lossy().into_owned();
    let json = serde_json::to_string_pretty(preset)?;
    storage.write_file(&path, json.as_bytes()).await?;
    Ok(path)
}

/// 讀取欄位設定檔並附加到清單
pub async fn read_field_config<S: Storage>(
    storage: &S,
    path: &str,
    list: &mut FieldConfigList,
) -> Result<usize> {
    let content = utf8(storage.read_file(path).await?)?;
    list.import(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_preset_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
        let preset = Preset {
            name: Some("weekly".to_string()),
            order: vec!["id".to_string()],
            ..Preset::default()
        };

        let path = write_preset(&storage, "presets", &preset).await.unwrap();
        assert!(path.ends_with("weekly.json"));
        assert!(temp_dir.path().join("presets/weekly.json").exists());

        let loaded = read_preset(&storage, &path).await.unwrap();
        assert_eq!(loaded, preset);
    }

    #[tokio::test]
    async fn test_preset_name_cannot_leave_directory() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
        let preset = Preset {
            name: Some("../../x".to_string()),
            ..Preset::default()
        };

        let path = write_preset(&storage, "out", &preset).await.unwrap();

        assert_eq!(Path::new(&path), Path::new("out").join(".._.._x.json"));
        assert!(temp_dir.path().join("out/.._.._x.json").exists());
        assert!(!temp_dir.path().join("../x.json").exists());
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());

        let err = read_preset(&storage, "missing.json").await.unwrap_err();
        assert!(matches!(err, FormatterError::IoError(_)));
    }

    #[tokio::test]
    async fn test_read_field_config_appends() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
        storage
            .write_file("config.json", br#"[{"property": "id", "width": 2}]"#)
            .await
            .unwrap();

        let mut list = FieldConfigList::new();
        read_field_config(&storage, "config.json", &mut list).await.unwrap();
        read_field_config(&storage, "config.json", &mut list).await.unwrap();
        assert_eq!(list.entries().len(), 2);
    }
}
