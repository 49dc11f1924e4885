use crate::adapters::encoder::{encode, output_file_name};
use crate::adapters::loader::{load_delimited, load_fixed_width, table_name};
use crate::adapters::storage::{read_field_config, read_preset, utf8, write_preset};
use crate::core::layout::FieldConfigList;
use crate::core::workspace::Workspace;
use crate::core::{ConfigProvider, Pipeline, Result, Storage, Table};
use crate::domain::preset::{ExportLayout, Preset};
use std::path::Path;
use tokio::sync::OnceCell;

/// 讀取輸入檔、套用 Preset、輸出平面檔
pub struct FilePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    preset: OnceCell<Option<Preset>>,
}

impl<S: Storage, C: ConfigProvider> FilePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            preset: OnceCell::new(),
        }
    }

    /// Preset 只讀取一次，transform 與 load 共用
    async fn preset(&self) -> Result<Option<&Preset>> {
        let preset = self
            .preset
            .get_or_try_init(|| async {
                match self.config.preset_path() {
                    Some(path) => read_preset(&self.storage, path).await.map(Some),
                    None => Ok(None),
                }
            })
            .await?;
        Ok(preset.as_ref())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for FilePipeline<S, C> {
    async fn extract(&self) -> Result<Table> {
        let input_path = self.config.input_path();
        tracing::debug!("Reading input from: {}", input_path);
        let content = self.storage.read_file(input_path).await?;

        let records = match self.config.parser_config_path() {
            Some(config_path) => {
                let mut fields = FieldConfigList::new();
                read_field_config(&self.storage, config_path, &mut fields).await?;
                tracing::debug!("Parsing fixed-width input with {} fields", fields.entries().len());
                load_fixed_width(&utf8(content)?, fields.entries())?
            }
            None => load_delimited(&content, self.config.input_delimiter())?,
        };

        if records.is_empty() {
            tracing::warn!("⚠️ Input '{}' contains no records", input_path);
        }

        Ok(Table::new(table_name(input_path), records))
    }

    async fn transform(&self, table: Table) -> Result<Table> {
        let Some(preset) = self.preset().await? else {
            tracing::info!("No preset given, exporting data unchanged");
            return Ok(table);
        };

        let mut workspace = Workspace::new(table);
        workspace.apply_preset(preset);
        Ok(workspace.into_table())
    }

    async fn load(&self, table: Table) -> Result<String> {
        let default_layout = ExportLayout::default();
        let preset = self.preset().await?;
        let layout = preset.map(|p| &p.layout).unwrap_or(&default_layout);

        let bytes = encode(&table.records, layout)?;
        let file_name = output_file_name(&table.name, layout);
        let output_path = Path::new(self.config.output_path())
            .join(file_name)
            .to_string_lossy()
            .into_owned();

        tracing::debug!("Writing {} bytes to {}", bytes.len(), output_path);
        self.storage.write_file(&output_path, &bytes).await?;

        if let Some(preset) = preset.filter(|_| self.config.export_preset()) {
            let preset_path = write_preset(&self.storage, self.config.output_path(), preset).await?;
            tracing::info!("📋 Preset saved to: {}", preset_path);
        }

        Ok(output_path)
    }
}
