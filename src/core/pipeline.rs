use crate::adapters::config::FileSurchargeConfig;
use crate::adapters::http::HttpDeliveryTimeRepository;
use crate::adapters::memory::InMemoryDeliveryTimes;
use crate::config::toml_config::TomlConfig;
use crate::core::handler::ItemLoadedHandler;
use crate::core::{
    Catalog, DeliveryTimeRepository, Item, Pipeline, Storage, SurchargeConfigSource,
    TransformResult,
};
use crate::utils::error::{Result, SurchargeError};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const JSON_OUTPUT: &str = "items.json";
pub const CSV_OUTPUT: &str = "items.csv";

/// Reads a JSON catalog, applies surcharges and writes the adjusted items.
pub struct CatalogPipeline<S: Storage> {
    storage: S,
    config: TomlConfig,
    settings_file: Option<PathBuf>,
}

impl<S: Storage> CatalogPipeline<S> {
    pub fn new(storage: S, config: TomlConfig) -> Self {
        Self {
            storage,
            config,
            settings_file: None,
        }
    }

    /// 每次 transform 都從這個檔案重新讀取 `[surcharge]`
    pub fn with_settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_file = Some(path.into());
        self
    }

    fn settings_source(&self) -> Box<dyn SurchargeConfigSource> {
        match &self.settings_file {
            Some(path) => {
                tracing::debug!("Reading surcharge settings from: {}", path.display());
                Box::new(FileSurchargeConfig::new(path))
            }
            None => Box::new(self.config.clone()),
        }
    }

    fn delivery_time_repository(
        &self,
        catalog: &Catalog,
    ) -> Result<Box<dyn DeliveryTimeRepository>> {
        match &self.config.delivery_times.endpoint {
            Some(endpoint) if self.config.uses_delivery_time_api() => {
                tracing::debug!("Resolving delivery times via API: {}", endpoint);
                Ok(Box::new(HttpDeliveryTimeRepository::new(
                    endpoint.clone(),
                    Duration::from_secs(self.config.timeout_seconds()),
                )?))
            }
            _ => Ok(Box::new(InMemoryDeliveryTimes::from(
                catalog.delivery_times.clone(),
            ))),
        }
    }

    fn output_file(&self, name: &str) -> String {
        Path::new(&self.config.catalog.output_path)
            .join(name)
            .to_string_lossy()
            .into_owned()
    }
}

/// 輸出 CSV：每筆 item 一行，只取主要價格
pub fn items_to_csv(items: &[Item]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id",
        "shipping_free",
        "delivery_time_id",
        "currency_id",
        "gross",
        "net",
    ])?;

    for item in items {
        let (currency_id, gross, net) = match item.primary_price() {
            Some(price) => (
                price.currency_id.clone(),
                price.gross.to_string(),
                price.net.to_string(),
            ),
            None => (String::new(), String::new(), String::new()),
        };
        writer.write_record([
            item.id.clone(),
            item.shipping_free.to_string(),
            item.delivery_time_id.clone().unwrap_or_default(),
            currency_id,
            gross,
            net,
        ])?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| SurchargeError::ProcessingError {
            message: format!("Failed to flush CSV output: {}", e),
        })?;
    String::from_utf8(data).map_err(|e| SurchargeError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for CatalogPipeline<S> {
    async fn extract(&self) -> Result<Catalog> {
        tracing::debug!("Reading catalog from: {}", self.config.catalog.input);
        let data = self.storage.read_file(&self.config.catalog.input).await?;
        let catalog: Catalog = serde_json::from_slice(&data)?;
        Ok(catalog)
    }

    async fn transform(&self, catalog: Catalog) -> Result<TransformResult> {
        let repository = self.delivery_time_repository(&catalog)?;
        let handler = ItemLoadedHandler::new(self.settings_source(), repository);

        let mut items = catalog.items;
        let report = handler
            .on_items_loaded(&mut items, &self.config.context)
            .await?;

        Ok(TransformResult { items, report })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        if self.config.writes_format("json") {
            let json = serde_json::to_vec_pretty(&result.items)?;
            self.storage
                .write_file(&self.output_file(JSON_OUTPUT), &json)
                .await?;
        }

        if self.config.writes_format("csv") {
            let csv = items_to_csv(&result.items)?;
            self.storage
                .write_file(&self.output_file(CSV_OUTPUT), csv.as_bytes())
                .await?;
        }

        Ok(self.config.catalog.output_path.clone())
    }
}
