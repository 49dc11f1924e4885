use crate::core::ConfigProvider;
use crate::utils::error::{FormatterError, Result};
use crate::utils::validation::{validate_path, validate_single_char, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "flat-file-formatter")]
#[command(about = "Reshape tabular data with a preset and export it as a delimited or fixed-width file")]
pub struct CliConfig {
    /// Input file (CSV, or fixed-width text when --parser-config is given)
    #[arg(long)]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Preset JSON file to apply
    #[arg(long)]
    pub preset: Option<String>,

    /// Field/width config JSON used to parse a fixed-width input
    #[arg(long)]
    pub parser_config: Option<String>,

    #[arg(long, default_value = ",")]
    pub delimiter: String,

    #[arg(long, help = "Also write the applied preset next to the output")]
    pub export_preset: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output_path", &self.output_path)?;
        if let Some(preset) = &self.preset {
            validate_path("preset", preset)?;
        }
        if let Some(parser_config) = &self.parser_config {
            validate_path("parser_config", parser_config)?;
        }
        if self.export_preset && self.preset.is_none() {
            return Err(FormatterError::MissingConfigError {
                field: "preset".to_string(),
            });
        }

        let delimiter = validate_single_char("delimiter", &self.delimiter)?;
        if !delimiter.is_ascii() {
            return Err(FormatterError::InvalidConfigValueError {
                field: "delimiter".to_string(),
                value: self.delimiter.clone(),
                reason: "Delimiter must be an ASCII character".to_string(),
            });
        }
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn preset_path(&self) -> Option<&str> {
        self.preset.as_deref()
    }

    fn parser_config_path(&self) -> Option<&str> {
        self.parser_config.as_deref()
    }

    fn input_delimiter(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }

    fn export_preset(&self) -> bool {
        self.export_preset
    }
}
