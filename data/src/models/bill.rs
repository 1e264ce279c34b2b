use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// Flat tax applied to every bill.
pub const TAX_RATE: f64 = 0.08;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(rename = "Id")]
    pub id: u32,
    pub patient_id: u32,
    pub patient_name: String,
    pub items: Vec<BillItem>,
    /// Derived: sum of item totals. Recomputed whenever `items` is replaced.
    pub subtotal: f64,
    /// Derived: `TAX_RATE * subtotal`.
    pub tax: f64,
    /// Derived: `subtotal + tax`.
    pub total: f64,
    pub status: BillStatus,
    pub created_at: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    pub description: String,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Paid,
    Overdue,
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
            Self::Overdue => write!(f, "overdue"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub patient_id: u32,
    pub patient_name: String,
    pub items: Vec<BillItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillUpdate {
    pub patient_id: Option<u32>,
    pub patient_name: Option<String>,
    /// Replacing the items recomputes subtotal, tax and total.
    pub items: Option<Vec<BillItem>>,
    pub status: Option<BillStatus>,
    pub due_date: Option<NaiveDate>,
    pub paid_at: Option<NaiveDate>,
}

impl Record for Bill {
    const ENTITY: &'static str = "Bill";

    fn id(&self) -> u32 {
        self.id
    }
}
