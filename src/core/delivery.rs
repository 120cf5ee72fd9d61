use crate::core::{Context, DeliveryTimeRepository, Item, Result};

/// Decides whether an item ships instantly, based on its delivery time record.
pub struct DeliveryClassifier<R: DeliveryTimeRepository> {
    repository: R,
}

impl<R: DeliveryTimeRepository> DeliveryClassifier<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn is_instant(&self, item: &Item, context: &Context) -> Result<bool> {
        match item.delivery_time_ref() {
            Some(id) => self.is_instant_by_id(id, context).await,
            None => {
                tracing::debug!("Item {} has no delivery time reference", item.id);
                Ok(false)
            }
        }
    }

    pub async fn is_instant_by_id(&self, delivery_time_id: &str, context: &Context) -> Result<bool> {
        let record = self.repository.find(delivery_time_id, context).await?;

        match record {
            Some(delivery_time) => {
                let instant = delivery_time.is_instant();
                tracing::debug!(
                    "Delivery time {} (max: {:?}) instant: {}",
                    delivery_time.id,
                    delivery_time.max,
                    instant
                );
                Ok(instant)
            }
            // 找不到資料時不加價
            None => {
                tracing::debug!("Delivery time {} not found", delivery_time_id);
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDeliveryTimes;
    use crate::core::DeliveryTime;
    use crate::utils::error::SurchargeError;
    use async_trait::async_trait;

    struct UnavailableRepository;

    #[async_trait]
    impl DeliveryTimeRepository for UnavailableRepository {
        async fn find(&self, id: &str, _context: &Context) -> Result<Option<DeliveryTime>> {
            Err(SurchargeError::LookupError {
                delivery_time_id: id.to_string(),
                message: "store offline".to_string(),
            })
        }
    }

    fn delivery_time(id: &str, max: Option<u32>) -> DeliveryTime {
        DeliveryTime {
            id: id.to_string(),
            name: id.to_string(),
            min: Some(0),
            max,
            unit: "day".to_string(),
        }
    }

    fn item_with_delivery(delivery_time_id: Option<&str>) -> Item {
        Item {
            id: "sku-1".to_string(),
            delivery_time_id: delivery_time_id.map(str::to_string),
            shipping_free: false,
            prices: vec![],
        }
    }

    fn classifier() -> DeliveryClassifier<InMemoryDeliveryTimes> {
        DeliveryClassifier::new(InMemoryDeliveryTimes::from(vec![
            delivery_time("instant", Some(0)),
            delivery_time("open-ended", None),
            delivery_time("two-days", Some(2)),
        ]))
    }

    #[tokio::test]
    async fn test_zero_max_is_instant() {
        let result = classifier()
            .is_instant(&item_with_delivery(Some("instant")), &Context::default())
            .await
            .unwrap();
        assert!(result);
    }

    #[tokio::test]
    async fn test_missing_max_is_instant() {
        let result = classifier()
            .is_instant(&item_with_delivery(Some("open-ended")), &Context::default())
            .await
            .unwrap();
        assert!(result);
    }

    #[tokio::test]
    async fn test_positive_max_is_not_instant() {
        let result = classifier()
            .is_instant(&item_with_delivery(Some("two-days")), &Context::default())
            .await
            .unwrap();
        assert!(!result);
    }

    #[tokio::test]
    async fn test_unknown_record_is_not_instant() {
        let result = classifier()
            .is_instant(&item_with_delivery(Some("missing")), &Context::default())
            .await
            .unwrap();
        assert!(!result);
    }

    #[tokio::test]
    async fn test_item_without_reference_is_not_instant() {
        let result = classifier()
            .is_instant(&item_with_delivery(None), &Context::default())
            .await
            .unwrap();
        assert!(!result);
    }

    #[tokio::test]
    async fn test_empty_reference_skips_lookup() {
        let classifier = DeliveryClassifier::new(UnavailableRepository);
        let result = classifier
            .is_instant(&item_with_delivery(Some("")), &Context::default())
            .await
            .unwrap();
        assert!(!result);
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates() {
        let classifier = DeliveryClassifier::new(UnavailableRepository);
        let err = classifier
            .is_instant(&item_with_delivery(Some("instant")), &Context::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SurchargeError::LookupError { .. }));
    }
}
