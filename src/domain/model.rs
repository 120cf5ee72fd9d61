use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub currency_id: String,
    pub gross: Decimal,
    pub net: Decimal,
    #[serde(default)]
    pub linked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub delivery_time_id: Option<String>,
    #[serde(default)]
    pub shipping_free: bool,
    #[serde(default)]
    pub prices: Vec<Price>,
}

impl Item {
    /// 第一筆價格即為主要價格
    pub fn primary_price(&self) -> Option<&Price> {
        self.prices.first()
    }

    pub fn primary_price_mut(&mut self) -> Option<&mut Price> {
        self.prices.first_mut()
    }

    /// Delivery time reference, with an empty id treated as no reference.
    pub fn delivery_time_ref(&self) -> Option<&str> {
        self.delivery_time_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTime {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub min: Option<u32>,
    #[serde(default)]
    pub max: Option<u32>,
    #[serde(default)]
    pub unit: String,
}

impl DeliveryTime {
    /// Zero or missing upper bound means the item ships immediately.
    pub fn is_instant(&self) -> bool {
        matches!(self.max, None | Some(0))
    }
}

/// Which rule decides whether an item receives the surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SurchargeCategory {
    FreeShipping,
    DeliveryTime,
    Unknown(String),
}

impl SurchargeCategory {
    pub const FREE_SHIPPING: &'static str = "freeShipping";
    pub const DELIVERY_TIME: &'static str = "deliveryTime";

    pub fn as_str(&self) -> &str {
        match self {
            SurchargeCategory::FreeShipping => Self::FREE_SHIPPING,
            SurchargeCategory::DeliveryTime => Self::DELIVERY_TIME,
            SurchargeCategory::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SurchargeCategory::Unknown(_))
    }
}

impl From<String> for SurchargeCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            Self::FREE_SHIPPING => SurchargeCategory::FreeShipping,
            Self::DELIVERY_TIME => SurchargeCategory::DeliveryTime,
            _ => SurchargeCategory::Unknown(value),
        }
    }
}

impl From<&str> for SurchargeCategory {
    fn from(value: &str) -> Self {
        SurchargeCategory::from(value.to_string())
    }
}

impl From<SurchargeCategory> for String {
    fn from(value: SurchargeCategory) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SurchargeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the configured amount is added to the gross price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SurchargeType {
    Absolute,
    Percent,
    Unknown(String),
}

impl SurchargeType {
    // 設定值沿用既有的拼寫 "absolut"
    pub const ABSOLUTE: &'static str = "absolut";
    pub const PERCENT: &'static str = "percent";

    pub fn as_str(&self) -> &str {
        match self {
            SurchargeType::Absolute => Self::ABSOLUTE,
            SurchargeType::Percent => Self::PERCENT,
            SurchargeType::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SurchargeType::Unknown(_))
    }
}

impl From<String> for SurchargeType {
    fn from(value: String) -> Self {
        match value.as_str() {
            Self::ABSOLUTE => SurchargeType::Absolute,
            Self::PERCENT => SurchargeType::Percent,
            _ => SurchargeType::Unknown(value),
        }
    }
}

impl From<&str> for SurchargeType {
    fn from(value: &str) -> Self {
        SurchargeType::from(value.to_string())
    }
}

impl From<SurchargeType> for String {
    fn from(value: SurchargeType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SurchargeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurchargeSettings {
    #[serde(default)]
    pub category: Option<SurchargeCategory>,
    #[serde(default)]
    pub surcharge_type: Option<SurchargeType>,
    #[serde(default)]
    pub surcharge_amount: Option<Decimal>,
}

impl SurchargeSettings {
    pub fn new(
        category: impl Into<SurchargeCategory>,
        surcharge_type: impl Into<SurchargeType>,
        surcharge_amount: Decimal,
    ) -> Self {
        Self {
            category: Some(category.into()),
            surcharge_type: Some(surcharge_type.into()),
            surcharge_amount: Some(surcharge_amount),
        }
    }

    /// Category and type are both required before any item is looked at.
    pub fn is_enabled(&self) -> bool {
        self.category.is_some() && self.surcharge_type.is_some()
    }
}

/// Execution context forwarded to delivery time lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub language_id: Option<String>,
    #[serde(default)]
    pub version_id: Option<String>,
}

impl Context {
    pub fn with_language(language_id: impl Into<String>) -> Self {
        Self {
            language_id: Some(language_id.into()),
            version_id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeReport {
    pub evaluated: usize,
    pub qualified: usize,
    pub applied: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub delivery_times: Vec<DeliveryTime>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub items: Vec<Item>,
    pub report: SurchargeReport,
}
