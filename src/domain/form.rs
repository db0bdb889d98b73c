use super::installment::{InstallmentRow, PaymentMethod};
use super::schedule::ScheduleInputs;
use super::terms::LeaseTerms;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A field of the lease form that derivations read or write.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Field {
    RentAmount,
    LeaseTermDuration,
    LeaseFrequency,
    PaymentFrequency,
    StartDate,
    LeaseTermInMonths,
    InstallmentCount,
    InstallmentAmount,
    Payments,
    PaymentDate,
    PaymentMethod,
}

/// Field state of an open lease dialog.
///
/// Lives only for the duration of the dialog; the payments list starts empty
/// and is sized by the synchronizer as the terms are filled in.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct LeaseForm {
    pub lease_id: String,
    pub terms: LeaseTerms,
    pub lease_term_in_months: Option<u32>,
    pub installment_count: Option<u32>,
    /// Read-only display value.
    pub installment_amount: Option<Decimal>,
    /// Quick-pay date, defaulted from the start date.
    pub payment_date: Option<NaiveDate>,
    /// Quick-pay method, defaulted to UPI once a start date is known.
    pub payment_method: Option<PaymentMethod>,
    pub payments: Vec<InstallmentRow>,
}

impl LeaseForm {
    /// Creates an empty form for `lease_id`; every term starts unset.
    pub fn new(lease_id: impl Into<String>) -> Self {
        Self {
            lease_id: lease_id.into(),
            ..Default::default()
        }
    }

    /// Snapshot of the fields the installment rows are computed from.
    pub fn schedule_inputs(&self) -> ScheduleInputs {
        ScheduleInputs {
            rent_amount: self.terms.rent_amount,
            lease_term_in_months: self.lease_term_in_months,
            installment_count: self.installment_count,
            payment_frequency: self.terms.payment_frequency,
            start_date: self.terms.start_date,
        }
    }

    /// Mutable access to one payment row, if it exists.
    pub fn payment_mut(&mut self, index: usize) -> Option<&mut InstallmentRow> {
        self.payments.get_mut(index)
    }

    /// Sum of all row amounts; rows without an amount count as zero.
    pub fn payments_total(&self) -> Decimal {
        self.payments
            .iter()
            .filter_map(|row| row.amount)
            .sum()
    }
}
