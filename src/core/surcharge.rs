use crate::core::delivery::DeliveryClassifier;
use crate::core::{
    Context, DeliveryTimeRepository, Item, Result, SurchargeCategory, SurchargeReport,
    SurchargeSettings, SurchargeType,
};
use crate::utils::error::SurchargeError;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Amounts below this are treated as "no surcharge configured" (0.0001).
pub const SURCHARGE_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

pub struct SurchargeEngine<R: DeliveryTimeRepository> {
    classifier: DeliveryClassifier<R>,
}

impl<R: DeliveryTimeRepository> SurchargeEngine<R> {
    pub fn new(repository: R) -> Self {
        Self {
            classifier: DeliveryClassifier::new(repository),
        }
    }

    pub fn classifier(&self) -> &DeliveryClassifier<R> {
        &self.classifier
    }

    /// Applies the configured surcharge to every qualifying item in place.
    ///
    /// Every new gross price is computed before the first one is written, so an
    /// error leaves `items` untouched.
    pub async fn apply_surcharges(
        &self,
        items: &mut [Item],
        settings: &SurchargeSettings,
        context: &Context,
    ) -> Result<SurchargeReport> {
        let (Some(category), Some(surcharge_type)) =
            (settings.category.as_ref(), settings.surcharge_type.as_ref())
        else {
            tracing::debug!("Surcharge disabled: category or surcharge type not configured");
            return Ok(SurchargeReport::default());
        };
        let amount = settings.surcharge_amount.unwrap_or(Decimal::ZERO);

        let qualifying = self.qualifying_items(items, category, context).await?;

        // 先算出全部新價格，任何錯誤都不會留下改到一半的批次
        let mut updates = Vec::with_capacity(qualifying.len());
        for &index in &qualifying {
            updates.push((index, surcharged_gross(&items[index], surcharge_type, amount)?));
        }

        let mut applied = 0;
        for (index, new_gross) in updates {
            if let Some(new_gross) = new_gross {
                set_gross(&mut items[index], new_gross);
                applied += 1;
            }
        }

        let report = SurchargeReport {
            evaluated: items.len(),
            qualified: qualifying.len(),
            applied,
        };
        tracing::info!(
            "Surcharge pass ({} / {} {}): {} evaluated, {} qualified, {} applied",
            category,
            surcharge_type,
            amount,
            report.evaluated,
            report.qualified,
            report.applied
        );
        Ok(report)
    }

    /// Value-in, value-out form of [`apply_surcharges`](Self::apply_surcharges).
    pub async fn adjusted(
        &self,
        mut items: Vec<Item>,
        settings: &SurchargeSettings,
        context: &Context,
    ) -> Result<Vec<Item>> {
        self.apply_surcharges(&mut items, settings, context).await?;
        Ok(items)
    }

    async fn qualifying_items(
        &self,
        items: &[Item],
        category: &SurchargeCategory,
        context: &Context,
    ) -> Result<Vec<usize>> {
        match category {
            SurchargeCategory::FreeShipping => Ok(items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.shipping_free)
                .map(|(index, _)| index)
                .collect()),
            SurchargeCategory::DeliveryTime => {
                // 同一批次內相同的 delivery time 只查一次
                let mut resolved: HashMap<&str, bool> = HashMap::new();
                let mut qualifying = Vec::new();

                for (index, item) in items.iter().enumerate() {
                    let instant = match item.delivery_time_ref() {
                        Some(id) => match resolved.get(id) {
                            Some(&instant) => instant,
                            None => {
                                let instant = self.classifier.is_instant_by_id(id, context).await?;
                                resolved.insert(id, instant);
                                instant
                            }
                        },
                        None => self.classifier.is_instant(item, context).await?,
                    };

                    if instant {
                        qualifying.push(index);
                    }
                }
                Ok(qualifying)
            }
            SurchargeCategory::Unknown(raw) => {
                tracing::debug!("Unknown surcharge category '{}', no item qualifies", raw);
                Ok(Vec::new())
            }
        }
    }
}

fn is_negligible(amount: Decimal) -> bool {
    amount.abs() < SURCHARGE_EPSILON
}

/// Adds the surcharge to the item's primary gross price.
///
/// Returns `false` only when the amount is within [`SURCHARGE_EPSILON`] of zero.
/// An unrecognised surcharge type leaves the price as is but still reports `true`.
pub fn apply_surcharge(
    item: &mut Item,
    surcharge_type: &SurchargeType,
    surcharge_amount: Decimal,
) -> Result<bool> {
    match surcharged_gross(item, surcharge_type, surcharge_amount)? {
        Some(new_gross) => {
            set_gross(item, new_gross);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// New primary gross price, or `None` when the amount is negligible.
fn surcharged_gross(
    item: &Item,
    surcharge_type: &SurchargeType,
    surcharge_amount: Decimal,
) -> Result<Option<Decimal>> {
    if is_negligible(surcharge_amount) {
        return Ok(None);
    }

    let current_gross = item
        .primary_price()
        .map(|price| price.gross)
        .ok_or_else(|| SurchargeError::MissingPriceError {
            item_id: item.id.clone(),
        })?;

    let new_gross = match surcharge_type {
        SurchargeType::Absolute => current_gross.checked_add(surcharge_amount),
        SurchargeType::Percent => current_gross
            .checked_mul(surcharge_amount)
            .and_then(|raised| raised.checked_div(Decimal::ONE_HUNDRED))
            .and_then(|delta| current_gross.checked_add(delta)),
        SurchargeType::Unknown(raw) => {
            tracing::warn!("Unknown surcharge type '{}', price of {} left unchanged", raw, item.id);
            Some(current_gross)
        }
    }
    .ok_or_else(|| SurchargeError::ProcessingError {
        message: format!(
            "Surcharge {} {} overflows gross price {} of item {}",
            surcharge_amount, surcharge_type, current_gross, item.id
        ),
    })?;

    Ok(Some(new_gross))
}

fn set_gross(item: &mut Item, new_gross: Decimal) {
    tracing::debug!("Item {} gross -> {}", item.id, new_gross);
    if let Some(price) = item.primary_price_mut() {
        price.gross = new_gross;
    }
}
