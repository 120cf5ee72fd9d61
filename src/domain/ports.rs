use crate::domain::model::{Catalog, Context, DeliveryTime, SurchargeSettings, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Exact-match lookup of delivery time records.
///
/// `Ok(None)` means the record does not exist. Any failure to reach the
/// backing store must surface as an error instead.
#[async_trait]
pub trait DeliveryTimeRepository: Send + Sync {
    async fn find(&self, id: &str, context: &Context) -> Result<Option<DeliveryTime>>;
}

#[async_trait]
impl<R: DeliveryTimeRepository + ?Sized> DeliveryTimeRepository for Box<R> {
    async fn find(&self, id: &str, context: &Context) -> Result<Option<DeliveryTime>> {
        (**self).find(id, context).await
    }
}

/// Supplies the surcharge settings. Implementations are read on every batch.
pub trait SurchargeConfigSource: Send + Sync {
    fn surcharge_settings(&self) -> Result<SurchargeSettings>;
}

impl<C: SurchargeConfigSource + ?Sized> SurchargeConfigSource for Box<C> {
    fn surcharge_settings(&self) -> Result<SurchargeSettings> {
        (**self).surcharge_settings()
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Catalog>;
    async fn transform(&self, catalog: Catalog) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
