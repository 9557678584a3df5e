//! Report assembly. Totals come straight from the stored rows every time a
//! report is requested; nothing derived is ever written back, so a report
//! is always consistent with the entries it was computed from.

pub mod draft;

use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;

use crate::dates::{days_in_month, format_entry_date, format_month_period, month_range};
use crate::store::{self, EntryKind};
use crate::{LedgerError, LedgerResult};

/// Commission withheld from gross sales.
pub const ADMIN_FEE_RATE: f64 = 0.15;
/// Flat terminal charge per calendar day.
pub const DAILY_CARD_FEE: f64 = 100.0;

/// One assembled report. `date` is `DD.MM.YY` for a daily report and
/// `MM.YY` for a monthly one; `balance` is only present when the caller
/// asked for the running balance.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Report {
    pub date: String,
    pub total_sales: i64,
    pub total_purchases: i64,
    pub admin_fee: i64,
    pub card_fee: i64,
    pub day_total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,
}

/// Applies the fee model to raw totals. The admin fee rounds half away
/// from zero; the final total truncates toward zero. The mismatch is
/// deliberate and load-bearing: stored ledgers were settled under it.
fn assemble(date: String, sales: f64, purchases: f64, card_fee: f64) -> Report {
    let admin_fee = (sales * ADMIN_FEE_RATE).round();
    let day_total = (sales - purchases - admin_fee - card_fee).trunc() as i64;

    Report {
        date,
        total_sales: sales as i64,
        total_purchases: purchases as i64,
        admin_fee: admin_fee as i64,
        card_fee: card_fee as i64,
        day_total,
        balance: None,
    }
}

fn totals_for_date(
    connection: &Connection,
    db_path: &Path,
    date: NaiveDate,
) -> LedgerResult<(f64, f64)> {
    let sales = store::sum_amount(connection, db_path, EntryKind::Sale, date, date)?;
    let purchases = store::sum_amount(connection, db_path, EntryKind::Purchase, date, date)?;
    Ok((sales, purchases))
}

/// Report for a single day: that day's entries plus one daily card fee.
pub fn daily_report(
    connection: &Connection,
    db_path: &Path,
    date: NaiveDate,
) -> LedgerResult<Report> {
    let (sales, purchases) = totals_for_date(connection, db_path, date)?;
    Ok(assemble(
        format_entry_date(date),
        sales,
        purchases,
        DAILY_CARD_FEE,
    ))
}

/// Daily report plus the running balance: the sum of every completed day
/// total from the first of the month through `date`. Each day is
/// recomputed from storage, so edits and deletions made after the fact
/// are always reflected.
pub fn daily_report_with_balance(
    connection: &Connection,
    db_path: &Path,
    date: NaiveDate,
) -> LedgerResult<Report> {
    let mut report = daily_report(connection, db_path, date)?;

    let mut balance = 0i64;
    for day in 1..=date.day() {
        let Some(current) = NaiveDate::from_ymd_opt(date.year(), date.month(), day) else {
            continue;
        };
        let (sales, purchases) = totals_for_date(connection, db_path, current)?;
        balance += assemble(String::new(), sales, purchases, DAILY_CARD_FEE).day_total;
    }

    report.balance = Some(balance);
    Ok(report)
}

/// Report for a whole month. The card fee scales with the month's length,
/// leap February included.
pub fn monthly_report(
    connection: &Connection,
    db_path: &Path,
    year: i32,
    month: u32,
) -> LedgerResult<Report> {
    let Some((first, last)) = month_range(year, month) else {
        return Err(LedgerError::invalid_argument(&format!(
            "`{month:02}.{year}` is not a valid month."
        )));
    };

    let sales = store::sum_amount(connection, db_path, EntryKind::Sale, first, last)?;
    let purchases = store::sum_amount(connection, db_path, EntryKind::Purchase, first, last)?;
    let card_fee = DAILY_CARD_FEE * f64::from(days_in_month(year, month));

    Ok(assemble(
        format_month_period(year, month),
        sales,
        purchases,
        card_fee,
    ))
}

#[cfg(test)]
mod tests {
    use super::{assemble, DAILY_CARD_FEE};

    #[test]
    fn fee_model_on_the_canonical_day() {
        let report = assemble("10.04.25".to_string(), 7000.0, 0.0, DAILY_CARD_FEE);
        assert_eq!(report.total_sales, 7000);
        assert_eq!(report.admin_fee, 1050);
        assert_eq!(report.card_fee, 100);
        assert_eq!(report.day_total, 5850);
        assert_eq!(report.balance, None);
    }

    #[test]
    fn admin_fee_rounds_half_away_from_zero() {
        // 15% of 1010 is 151.5; it rounds up to 152.
        let report = assemble("x".to_string(), 1010.0, 0.0, 0.0);
        assert_eq!(report.admin_fee, 152);
        assert_eq!(report.day_total, 858);
    }

    #[test]
    fn negative_day_total_truncates_toward_zero() {
        // 100 - 0 - 15 - 100 = -15; nothing fractional, stays -15.
        let report = assemble("x".to_string(), 100.0, 0.0, DAILY_CARD_FEE);
        assert_eq!(report.day_total, -15);
    }

    #[test]
    fn purchases_reduce_the_total_without_fees() {
        let report = assemble("x".to_string(), 7000.0, 2000.0, DAILY_CARD_FEE);
        assert_eq!(report.total_purchases, 2000);
        assert_eq!(report.day_total, 3850);
    }
}
