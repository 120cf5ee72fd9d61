pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::config::{FileSurchargeConfig, StaticSurchargeConfig};
pub use adapters::http::HttpDeliveryTimeRepository;
pub use adapters::memory::InMemoryDeliveryTimes;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{
    delivery::DeliveryClassifier,
    etl::SurchargeRunner,
    handler::ItemLoadedHandler,
    pipeline::CatalogPipeline,
    surcharge::{apply_surcharge, SurchargeEngine, SURCHARGE_EPSILON},
};
pub use domain::model::{
    Catalog, Context, DeliveryTime, Item, Price, SurchargeCategory, SurchargeReport,
    SurchargeSettings, SurchargeType,
};
pub use utils::error::{Result, SurchargeError};
