use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct SurchargeRunner<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SurchargeRunner<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Loading catalog...");
        let catalog = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} items and {} delivery times",
            catalog.items.len(),
            catalog.delivery_times.len()
        );

        tracing::info!("Applying surcharges...");
        let result = self.pipeline.transform(catalog).await?;
        tracing::info!(
            "Surcharge applied to {} of {} items",
            result.report.applied,
            result.report.evaluated
        );

        tracing::info!("Writing adjusted items...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
