use std::path::{Path, PathBuf};

use crate::contracts::envelope::{success, SuccessEnvelope};
use crate::contracts::types::ReportData;
use crate::dates::{parse_entry_date, parse_month_period};
use crate::report::draft::{DraftReport, ReportField};
use crate::state::open_connection;
use crate::{report, LedgerError, LedgerResult};

use super::load_setup;

/// Session-scoped figure replacements for a single day report. Applied
/// after the report is computed; nothing here reaches storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportOverrides {
    pub total_sales: Option<i64>,
    pub total_purchases: Option<i64>,
    pub admin_fee: Option<i64>,
    pub card_fee: Option<i64>,
}

impl ReportOverrides {
    pub fn is_empty(&self) -> bool {
        self.total_sales.is_none()
            && self.total_purchases.is_none()
            && self.admin_fee.is_none()
            && self.card_fee.is_none()
    }
}

#[derive(Debug, Default)]
pub struct DayOptions<'a> {
    pub with_balance: bool,
    pub overrides: ReportOverrides,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct MonthOptions<'a> {
    pub home_override: Option<&'a Path>,
}

pub fn day(date: &str, with_balance: bool, overrides: ReportOverrides) -> LedgerResult<SuccessEnvelope> {
    day_with_options(
        date,
        DayOptions {
            with_balance,
            overrides,
            home_override: None,
        },
    )
}

#[doc(hidden)]
pub fn day_with_options(date: &str, options: DayOptions<'_>) -> LedgerResult<SuccessEnvelope> {
    let Some(parsed_date) = parse_entry_date(date) else {
        return Err(LedgerError::invalid_argument_for_command(
            &format!("Invalid date `{date}`. Expected DD.MM.YY, for example 10.04.25."),
            Some("report day"),
        ));
    };

    let setup = load_setup(options.home_override)?;
    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;

    let computed = if options.with_balance {
        report::daily_report_with_balance(&connection, &db_path, parsed_date)?
    } else {
        report::daily_report(&connection, &db_path, parsed_date)?
    };

    let overridden = !options.overrides.is_empty();
    let final_report = if overridden {
        let mut draft = DraftReport::from_report(&computed);
        apply_override(&mut draft, ReportField::TotalSales, options.overrides.total_sales)?;
        apply_override(
            &mut draft,
            ReportField::TotalPurchases,
            options.overrides.total_purchases,
        )?;
        apply_override(&mut draft, ReportField::AdminFee, options.overrides.admin_fee)?;
        apply_override(&mut draft, ReportField::CardFee, options.overrides.card_fee)?;
        draft.finalize()
    } else {
        computed
    };

    success(
        "report day",
        ReportData {
            scope: "day".to_string(),
            report: final_report,
            overridden,
        },
    )
}

pub fn month(period: &str) -> LedgerResult<SuccessEnvelope> {
    month_with_options(
        period,
        MonthOptions {
            home_override: None,
        },
    )
}

#[doc(hidden)]
pub fn month_with_options(period: &str, options: MonthOptions<'_>) -> LedgerResult<SuccessEnvelope> {
    let Some((year, month)) = parse_month_period(period) else {
        return Err(LedgerError::invalid_argument_for_command(
            &format!("Invalid month `{period}`. Expected MM.YY, for example 04.25."),
            Some("report month"),
        ));
    };

    let setup = load_setup(options.home_override)?;
    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;

    let computed = report::monthly_report(&connection, &db_path, year, month)?;

    success(
        "report month",
        ReportData {
            scope: "month".to_string(),
            report: computed,
            overridden: false,
        },
    )
}

fn apply_override(
    draft: &mut DraftReport,
    field: ReportField,
    value: Option<i64>,
) -> LedgerResult<()> {
    if let Some(value) = value {
        draft.set(field, value)?;
    }
    Ok(())
}
