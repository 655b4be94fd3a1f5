//! Contract end date display

use chrono::{Datelike, Duration, NaiveDate};
use mspdash_domain::constants::{
    CONTRACT_END_INVALID, CONTRACT_END_MONTH_TO_MONTH, CONTRACT_END_NOT_SET,
};
use mspdash_domain::{Client, ContractTerm};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractEnd {
    pub display: String,
    pub expired: bool,
}

impl ContractEnd {
    fn label(display: &str) -> Self {
        Self { display: display.to_string(), expired: false }
    }
}

/// Human-readable end of the client's contract as of `today`.
///
/// Fixed terms end one day before the anniversary of the start date. Any
/// parse failure, including a Feb 29 start that has no anniversary, yields
/// `"Invalid Start Date"` rather than an error.
pub fn contract_end_date(client: &Client, today: NaiveDate) -> ContractEnd {
    let Some(raw_start) = client.contract_start_date.as_deref().filter(|s| !s.trim().is_empty())
    else {
        return ContractEnd::label(CONTRACT_END_NOT_SET);
    };

    let Some(start) = parse_start_date(raw_start) else {
        return ContractEnd::label(CONTRACT_END_INVALID);
    };

    let years = match ContractTerm::from_label(client.term_or_default()) {
        Some(ContractTerm::MonthToMonth) => return ContractEnd::label(CONTRACT_END_MONTH_TO_MONTH),
        Some(term) => term.years().unwrap_or(0),
        None => return ContractEnd::label(CONTRACT_END_NOT_SET),
    };

    match start.with_year(start.year() + years) {
        Some(anniversary) => {
            let end = anniversary - Duration::days(1);
            ContractEnd { display: end.format("%Y-%m-%d").to_string(), expired: today > end }
        }
        None => ContractEnd::label(CONTRACT_END_INVALID),
    }
}

/// Accepts `YYYY-MM-DD` with an optional `T...` or ` ...` time suffix.
fn parse_start_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(start: Option<&str>, term: Option<&str>) -> Client {
        Client {
            contract_start_date: start.map(str::to_string),
            contract_term_length: term.map(str::to_string),
            ..Client::new("100", "Acme")
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn fixed_terms_end_the_day_before_the_anniversary() {
        let end = contract_end_date(&client(Some("2024-03-01"), Some("1-Year")), today());
        assert_eq!(end, ContractEnd { display: "2025-02-28".into(), expired: true });

        let end = contract_end_date(&client(Some("2024-03-01"), Some("3-Year")), today());
        assert_eq!(end, ContractEnd { display: "2027-02-28".into(), expired: false });
    }

    #[test]
    fn timestamp_suffix_is_tolerated() {
        let end =
            contract_end_date(&client(Some("2025-01-15T08:30:00Z"), Some("2-Year")), today());
        assert_eq!(end.display, "2027-01-14");

        let end = contract_end_date(&client(Some("2025-01-15 08:30:00"), Some("1-Year")), today());
        assert_eq!(end.display, "2026-01-14");
    }

    #[test]
    fn month_to_month_and_missing_values() {
        let end = contract_end_date(&client(Some("2024-03-01"), None), today());
        assert_eq!(end.display, "Month to Month");
        assert!(!end.expired);

        assert_eq!(contract_end_date(&client(None, Some("1-Year")), today()).display, "N/A");
        assert_eq!(contract_end_date(&client(Some("  "), Some("1-Year")), today()).display, "N/A");
    }

    #[test]
    fn unparseable_or_impossible_dates_degrade() {
        let end = contract_end_date(&client(Some("03/01/2024"), Some("1-Year")), today());
        assert_eq!(end.display, "Invalid Start Date");

        let leap = contract_end_date(&client(Some("2024-02-29"), Some("1-Year")), today());
        assert_eq!(leap.display, "Invalid Start Date");
    }

    #[test]
    fn unknown_term_is_not_set() {
        let end = contract_end_date(&client(Some("2024-03-01"), Some("5-Year")), today());
        assert_eq!(end.display, "N/A");
    }

    #[test]
    fn term_casing_must_match_the_stored_label() {
        let end = contract_end_date(&client(Some("2024-03-01"), Some("1-year")), today());
        assert_eq!(end, ContractEnd { display: "N/A".into(), expired: false });

        let end = contract_end_date(&client(Some("2024-03-01"), Some("month to month")), today());
        assert_eq!(end.display, "N/A");
    }

    #[test]
    fn end_date_itself_is_not_expired() {
        let end = contract_end_date(
            &client(Some("2024-06-02"), Some("1-Year")),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        );
        assert_eq!(end, ContractEnd { display: "2025-06-01".into(), expired: false });
    }
}
