//! Custom line-item selection for a billing period

use mspdash_domain::{BilledItem, BillingPeriod, CustomLineItem, LineItemKind};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineItemCharges {
    pub items: Vec<BilledItem>,
    pub total: f64,
}

/// The mode under which `item` bills in `period`, with its fee.
///
/// Modes are tried in order (recurring, one-off, yearly) and the first match
/// wins. A one-off or yearly match whose fee is unset is not billed. Yearly
/// items match on month alone; `yearly_bill_day` is ignored.
pub fn match_line_item(
    item: &CustomLineItem,
    period: BillingPeriod,
) -> Option<(LineItemKind, f64)> {
    if let Some(fee) = item.monthly_fee {
        return Some((LineItemKind::Recurring, fee));
    }
    if item.one_off_year == Some(period.year) && item.one_off_month == Some(period.month) {
        return item.one_off_fee.map(|fee| (LineItemKind::OneOff, fee));
    }
    if item.yearly_bill_month == Some(period.month) {
        return item.yearly_fee.map(|fee| (LineItemKind::Yearly, fee));
    }
    None
}

pub fn select_custom_line_items(
    items: &[CustomLineItem],
    period: BillingPeriod,
) -> LineItemCharges {
    let mut charges = LineItemCharges::default();
    for item in items {
        if let Some((kind, fee)) = match_line_item(item, period) {
            charges.total += fee;
            charges.items.push(BilledItem::new(&item.name, kind.as_str(), fee));
        }
    }
    charges
}
