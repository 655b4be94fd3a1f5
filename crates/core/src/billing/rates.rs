//! Rate resolution: plan values merged with enabled client overrides

use mspdash_domain::constants::{SUPPORT_LEVEL_HOURLY, SUPPORT_LEVEL_UNLIMITED};
use mspdash_domain::{
    BillingPlan, Client, ClientBillingOverride, EffectiveRates, FeatureField, RateField,
};

/// The `(plan, term)` key used to look up a client's billing plan.
///
/// An enabled, non-empty plan override replaces the client's own plan name.
/// A blank term is read as month to month.
pub fn effective_plan_key(
    client: &Client,
    overrides: Option<&ClientBillingOverride>,
) -> (String, String) {
    let overridden = overrides
        .and_then(|record| record.billing_plan.active().flatten())
        .map(|name| name.trim())
        .filter(|name| !name.is_empty());

    let plan = overridden.unwrap_or_else(|| client.plan_name());
    (plan.to_string(), client.term_or_default().to_string())
}

/// Builds the effective rate table for one client.
///
/// Each descriptor is checked independently: an enabled override replaces the
/// plan value (even with NULL), a disabled one is ignored entirely.
pub fn resolve_rates(
    plan: &BillingPlan,
    overrides: Option<&ClientBillingOverride>,
) -> EffectiveRates {
    let rates = RateField::ALL
        .iter()
        .map(|&field| {
            let value = match overrides.and_then(|record| record.rate(field)?.active()) {
                Some(active) => active.copied(),
                None => plan.rate(field),
            };
            (field, value)
        })
        .collect();

    let features = FeatureField::ALL
        .iter()
        .map(|&field| {
            let value = match overrides
                .and_then(|record| record.features.get(&field))
                .and_then(|entry| entry.active())
            {
                Some(active) => active.cloned(),
                None => plan.features.get(&field).cloned(),
            };
            (field, value)
        })
        .collect();

    let mut effective = EffectiveRates {
        billing_plan: plan.billing_plan.clone(),
        term_length: plan.term_length.clone(),
        rates,
        features,
        prepaid_hours_monthly: overrides.map_or(0.0, |r| r.effective_prepaid_monthly()),
        prepaid_hours_yearly: overrides.map_or(0.0, |r| r.effective_prepaid_yearly()),
        support_level_display: String::new(),
    };
    effective.support_level_display = support_level_display(&effective, overrides);
    effective
}

fn support_level_display(
    effective: &EffectiveRates,
    overrides: Option<&ClientBillingOverride>,
) -> String {
    let overridden = overrides
        .and_then(|record| record.support_level.active().flatten())
        .filter(|text| !text.trim().is_empty());
    if let Some(text) = overridden {
        return text.clone();
    }

    if effective.rate(RateField::PerHourTicketCost) == 0.0 {
        SUPPORT_LEVEL_UNLIMITED.to_string()
    } else {
        SUPPORT_LEVEL_HOURLY.to_string()
    }
}
