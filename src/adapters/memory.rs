use crate::core::{Context, DeliveryTime, DeliveryTimeRepository, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Delivery times held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeliveryTimes {
    records: HashMap<String, DeliveryTime>,
}

impl InMemoryDeliveryTimes {
    pub fn insert(&mut self, delivery_time: DeliveryTime) {
        self.records.insert(delivery_time.id.clone(), delivery_time);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<DeliveryTime>> for InMemoryDeliveryTimes {
    fn from(delivery_times: Vec<DeliveryTime>) -> Self {
        let mut repository = Self::default();
        for delivery_time in delivery_times {
            repository.insert(delivery_time);
        }
        repository
    }
}

#[async_trait]
impl DeliveryTimeRepository for InMemoryDeliveryTimes {
    async fn find(&self, id: &str, _context: &Context) -> Result<Option<DeliveryTime>> {
        Ok(self.records.get(id).cloned())
    }
}
