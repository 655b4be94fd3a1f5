//! Ticket-hours billing with monthly and yearly prepaid allowances

use chrono::{DateTime, Datelike, Utc};
use mspdash_domain::{BillingPeriod, TicketDetail};

/// Hours and charge for one billing period.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TicketCharges {
    pub tickets_for_period: Vec<TicketDetail>,
    pub hours_for_period: f64,
    pub hours_used_prior: f64,
    pub remaining_yearly_hours: f64,
    pub billable_hours: f64,
    pub ticket_charge: f64,
}

/// Bills the period's hours against the prepaid allowances.
///
/// `tickets` is the client's ticket history for one calendar year. Hours
/// logged before the period first consume the yearly allowance; the period's
/// own hours are then offset by the monthly allowance followed by whatever
/// yearly allowance is left.
pub fn bill_ticket_hours(
    tickets: &[TicketDetail],
    period: BillingPeriod,
    hourly_rate: f64,
    prepaid_monthly: f64,
    prepaid_yearly: f64,
) -> TicketCharges {
    let start = period.first_instant();

    let tickets_for_period: Vec<TicketDetail> = tickets
        .iter()
        .filter(|ticket| period.contains(ticket.last_updated_at))
        .cloned()
        .collect();
    let hours_for_period: f64 = tickets_for_period.iter().map(TicketDetail::hours).sum();

    let hours_used_prior: f64 = tickets
        .iter()
        .filter(|ticket| ticket.last_updated_at < start)
        .map(TicketDetail::hours)
        .sum();

    let remaining_yearly_hours = (prepaid_yearly - hours_used_prior).max(0.0);
    let after_monthly = (hours_for_period - prepaid_monthly).max(0.0);
    let billable_hours = (after_monthly - remaining_yearly_hours).max(0.0);

    TicketCharges {
        tickets_for_period,
        hours_for_period,
        hours_used_prior,
        remaining_yearly_hours,
        billable_hours,
        ticket_charge: billable_hours * hourly_rate,
    }
}

/// Year-to-date figures shown next to the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TicketSummary {
    pub hours_this_year: f64,
    pub hours_this_month: f64,
    pub hours_last_month: f64,
}

/// Sums the loaded year's tickets by the month number of `now` and of the
/// month before it.
pub fn summarize_ticket_hours(tickets: &[TicketDetail], now: DateTime<Utc>) -> TicketSummary {
    let this_month = BillingPeriod::containing(now).month;
    let last_month = BillingPeriod::containing(now).previous().month;

    let hours_in = |month: u32| -> f64 {
        tickets
            .iter()
            .filter(|ticket| ticket.last_updated_at.month() == month)
            .map(TicketDetail::hours)
            .sum()
    };

    TicketSummary {
        hours_this_year: tickets.iter().map(TicketDetail::hours).sum(),
        hours_this_month: hours_in(this_month),
        hours_last_month: hours_in(last_month),
    }
}
