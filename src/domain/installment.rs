use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an installment is (or will be) paid.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Bank,
    #[default]
    Cheque,
    Upi,
    Other,
}

impl PaymentMethod {
    /// Whether a reference number can be recorded for this method.
    pub fn takes_reference(&self) -> bool {
        *self != PaymentMethod::Cash
    }
}

/// One scheduled rent payment.
///
/// `date` and `amount` are computed by the synchronizer and may be edited
/// afterwards; `method` and `ref_no` are owned by the user.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct InstallmentRow {
    pub method: PaymentMethod,
    pub ref_no: String,
    pub date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
}

impl InstallmentRow {
    /// A freshly appended row: paid by cheque, no reference yet.
    pub fn new(date: Option<NaiveDate>, amount: Option<Decimal>) -> Self {
        Self {
            method: PaymentMethod::Cheque,
            ref_no: String::new(),
            date,
            amount,
        }
    }

    /// Changes the payment method, clearing the reference for cash.
    pub fn set_method(&mut self, method: PaymentMethod) {
        self.method = method;
        if !method.takes_reference() {
            self.ref_no.clear();
        }
    }

    /// Records a reference number. Ignored while the method is cash.
    pub fn set_ref_no(&mut self, ref_no: impl Into<String>) {
        if self.method.takes_reference() {
            self.ref_no = ref_no.into();
        }
    }
}

/// Renders an optional amount the way the form displays it.
pub fn display_amount(amount: Option<Decimal>) -> String {
    format!("₹{:.2}", amount.unwrap_or(Decimal::ZERO))
}
