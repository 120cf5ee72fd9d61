use crate::core::surcharge::SurchargeEngine;
use crate::core::{
    Context, DeliveryTimeRepository, Item, Result, SurchargeConfigSource, SurchargeReport,
};

/// Entry point for a freshly loaded batch of items.
///
/// Settings are pulled from the config source on every call, never cached.
pub struct ItemLoadedHandler<C: SurchargeConfigSource, R: DeliveryTimeRepository> {
    config: C,
    engine: SurchargeEngine<R>,
}

impl<C: SurchargeConfigSource, R: DeliveryTimeRepository> ItemLoadedHandler<C, R> {
    pub fn new(config: C, repository: R) -> Self {
        Self {
            config,
            engine: SurchargeEngine::new(repository),
        }
    }

    pub fn engine(&self) -> &SurchargeEngine<R> {
        &self.engine
    }

    pub async fn on_items_loaded(
        &self,
        items: &mut [Item],
        context: &Context,
    ) -> Result<SurchargeReport> {
        let settings = self.config.surcharge_settings()?;
        tracing::debug!(
            "Loaded {} items, surcharge settings: {:?}",
            items.len(),
            settings
        );

        self.engine.apply_surcharges(items, &settings, context).await
    }
}
