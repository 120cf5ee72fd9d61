pub mod delivery;
pub mod etl;
pub mod handler;
pub mod pipeline;
pub mod surcharge;

pub use crate::domain::model::{
    Catalog, Context, DeliveryTime, Item, Price, SurchargeCategory, SurchargeReport,
    SurchargeSettings, SurchargeType, TransformResult,
};
pub use crate::domain::ports::{DeliveryTimeRepository, Pipeline, Storage, SurchargeConfigSource};
pub use crate::utils::error::Result;
