use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct FormatterEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> FormatterEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("🚀 Starting formatter run");

        // Extract
        let table = self.pipeline.extract().await?;
        tracing::info!("📥 Loaded {} records from '{}'", table.records.len(), table.name);

        // Transform
        let table = self.pipeline.transform(table).await?;
        tracing::info!(
            "🔄 Transformed into {} records named '{}'",
            table.records.len(),
            table.name
        );

        // Load
        let output_path = self.pipeline.load(table).await?;
        tracing::info!("📁 Output saved to: {} ({:?})", output_path, started.elapsed());

        Ok(output_path)
    }
}
