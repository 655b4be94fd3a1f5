//! Asset and user line-item aggregation

use std::collections::{BTreeMap, HashMap};

use mspdash_domain::constants::{QUANTITY_FREE_USERS, QUANTITY_REGULAR_USERS};
use mspdash_domain::{
    Asset, AssetBillingOverride, AssetBillingType, BilledItem, EffectiveRates, ItemOverride,
    ManualAsset, ManualUser, RateField, User, UserBillingOverride, UserBillingType,
};

/// Itemized charges for one category plus the quantities it contributed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemCharges {
    pub items: Vec<BilledItem>,
    pub total: f64,
    pub quantities: BTreeMap<String, u32>,
}

impl ItemCharges {
    fn push(&mut self, item: BilledItem, quantity_key: String) {
        self.total += item.cost;
        *self.quantities.entry(quantity_key).or_insert(0) += 1;
        self.items.push(item);
    }
}

/// Prices synced assets (with their override map) followed by manual assets.
pub fn aggregate_assets(
    assets: &[Asset],
    manual_assets: &[ManualAsset],
    overrides: &HashMap<i64, AssetBillingOverride>,
    rates: &EffectiveRates,
) -> ItemCharges {
    let mut charges = ItemCharges::default();

    for asset in assets {
        let item_override = overrides.get(&asset.id).map(|o| o as &dyn ItemOverride);
        let billing_type = asset_billing_type(item_override, asset.billing_type.as_deref());
        let cost = asset_cost(&billing_type, item_override, rates);
        let item = BilledItem::new(&asset.hostname, billing_type.as_str(), cost);
        charges.push(item, billing_type.quantity_key());
    }

    for asset in manual_assets {
        let item_override: Option<&dyn ItemOverride> = Some(asset);
        let billing_type = asset_billing_type(item_override, asset.billing_type.as_deref());
        let cost = asset_cost(&billing_type, item_override, rates);
        let item = BilledItem::new(&asset.hostname, billing_type.as_str(), cost);
        charges.push(item, billing_type.quantity_key());
    }

    charges
}

/// Prices active synced users (with their override map) followed by manual
/// users.
pub fn aggregate_users(
    users: &[User],
    manual_users: &[ManualUser],
    overrides: &HashMap<i64, UserBillingOverride>,
    rates: &EffectiveRates,
) -> ItemCharges {
    let mut charges = ItemCharges::default();

    let synced = users
        .iter()
        .map(|user| (&user.full_name, overrides.get(&user.id).map(|o| o as &dyn ItemOverride)));
    let manual = manual_users
        .iter()
        .map(|user| (&user.full_name, Some(user as &dyn ItemOverride)));

    for (name, item_override) in synced.chain(manual) {
        let billing_type = item_override
            .and_then(|o| o.billing_type())
            .and_then(UserBillingType::parse)
            .unwrap_or(UserBillingType::Paid);

        let cost = match billing_type {
            UserBillingType::Custom => custom_cost(item_override),
            UserBillingType::Paid => rates.rate(RateField::PerUserCost),
            UserBillingType::Free | UserBillingType::Other(_) => 0.0,
        };

        let key = if billing_type == UserBillingType::Paid {
            QUANTITY_REGULAR_USERS
        } else {
            QUANTITY_FREE_USERS
        };
        charges.push(BilledItem::new(name.as_str(), billing_type.as_str(), cost), key.to_string());
    }

    charges
}

/// Override type, then the item's stored type, then `Workstation`.
fn asset_billing_type(
    item_override: Option<&dyn ItemOverride>,
    stored: Option<&str>,
) -> AssetBillingType {
    item_override
        .and_then(|o| o.billing_type())
        .and_then(AssetBillingType::parse)
        .or_else(|| stored.and_then(AssetBillingType::parse))
        .unwrap_or(AssetBillingType::Workstation)
}

fn asset_cost(
    billing_type: &AssetBillingType,
    item_override: Option<&dyn ItemOverride>,
    rates: &EffectiveRates,
) -> f64 {
    match billing_type {
        AssetBillingType::Custom => custom_cost(item_override),
        AssetBillingType::NoCharge => 0.0,
        other => other.rate_field().map_or(0.0, |field| rates.rate(field)),
    }
}

fn custom_cost(item_override: Option<&dyn ItemOverride>) -> f64 {
    item_override.and_then(|o| o.custom_cost()).unwrap_or(0.0)
}
