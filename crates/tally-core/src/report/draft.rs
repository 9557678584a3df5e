//! Session-scoped report overrides. A draft starts from a computed report,
//! accepts replacement figures, and finalizes into a new report without
//! ever touching storage.

use super::Report;
use crate::{LedgerError, LedgerResult};

/// The four figures an override can replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportField {
    TotalSales,
    TotalPurchases,
    AdminFee,
    CardFee,
}

impl ReportField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TotalSales => "total_sales",
            Self::TotalPurchases => "total_purchases",
            Self::AdminFee => "admin_fee",
            Self::CardFee => "card_fee",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "total_sales" => Some(Self::TotalSales),
            "total_purchases" => Some(Self::TotalPurchases),
            "admin_fee" => Some(Self::AdminFee),
            "card_fee" => Some(Self::CardFee),
            _ => None,
        }
    }
}

/// A report with pending overrides. Overridden figures are taken verbatim;
/// in particular the admin fee is NOT recomputed when sales change, so an
/// operator can model the fee independently of the gross.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftReport {
    date: String,
    total_sales: i64,
    total_purchases: i64,
    admin_fee: i64,
    card_fee: i64,
    balance: Option<i64>,
}

impl DraftReport {
    pub fn from_report(report: &Report) -> Self {
        Self {
            date: report.date.clone(),
            total_sales: report.total_sales,
            total_purchases: report.total_purchases,
            admin_fee: report.admin_fee,
            card_fee: report.card_fee,
            balance: report.balance,
        }
    }

    /// Replaces one figure. Negative values are rejected and leave the
    /// draft untouched.
    pub fn set(&mut self, field: ReportField, value: i64) -> LedgerResult<()> {
        if value < 0 {
            return Err(LedgerError::invalid_argument(&format!(
                "`{}` cannot be negative (received {value}).",
                field.as_str()
            )));
        }

        match field {
            ReportField::TotalSales => self.total_sales = value,
            ReportField::TotalPurchases => self.total_purchases = value,
            ReportField::AdminFee => self.admin_fee = value,
            ReportField::CardFee => self.card_fee = value,
        }
        Ok(())
    }

    /// Recomputes the day total from the current figures. Plain integer
    /// subtraction; overridden figures flow through unchanged.
    pub fn finalize(&self) -> Report {
        Report {
            date: self.date.clone(),
            total_sales: self.total_sales,
            total_purchases: self.total_purchases,
            admin_fee: self.admin_fee,
            card_fee: self.card_fee,
            day_total: self.total_sales - self.total_purchases - self.admin_fee - self.card_fee,
            balance: self.balance,
        }
    }
}
