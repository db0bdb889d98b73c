use super::form::LeaseForm;
use super::installment::{InstallmentRow, PaymentMethod};
use super::schedule::MAX_INSTALLMENTS;
use super::terms::{LeaseFrequency, PaymentFrequency};
use crate::error::{Result, ScheduleError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lease payload sent on save, with the installment schedule attached.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct LeaseSubmission {
    pub lease_id: String,
    pub rent_amount: Decimal,
    pub lease_term_duration: u32,
    pub lease_frequency: LeaseFrequency,
    pub payment_frequency: PaymentFrequency,
    pub start_date: NaiveDate,
    pub installment_count: u32,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<PaymentMethod>,
    pub payments: Vec<InstallmentRow>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| ScheduleError::ValidationError(format!("{field} is required")))
}

impl TryFrom<&LeaseForm> for LeaseSubmission {
    type Error = ScheduleError;

    /// Validates the form and builds the payload; fails on the first missing field.
    fn try_from(form: &LeaseForm) -> Result<Self> {
        if form.lease_id.trim().is_empty() {
            return Err(ScheduleError::ValidationError(
                "lease_id is required".to_string(),
            ));
        }

        let terms = &form.terms;
        let rent_amount = required(terms.positive_rent(), "rent_amount")?;
        let lease_term_duration = required(
            terms.lease_term_duration.filter(|d| *d > 0),
            "lease_term_duration",
        )?;
        let lease_frequency = required(terms.lease_frequency, "lease_frequency")?;
        let payment_frequency = required(terms.payment_frequency, "payment_frequency")?;
        let start_date = required(terms.start_date, "start_date")?;
        let installment_count = required(form.installment_count, "installment_count")?;
        if installment_count > MAX_INSTALLMENTS {
            return Err(ScheduleError::ValidationError(format!(
                "installment_count {installment_count} exceeds the maximum of {MAX_INSTALLMENTS}"
            )));
        }

        if form.payments.is_empty() {
            return Err(ScheduleError::ValidationError(
                "payments must not be empty".to_string(),
            ));
        }
        if form.payments.len() != installment_count as usize {
            return Err(ScheduleError::ValidationError(format!(
                "expected {} payments, found {}",
                installment_count,
                form.payments.len()
            )));
        }
        for (index, row) in form.payments.iter().enumerate() {
            required(row.date, &format!("payments[{index}].date"))?;
            required(
                row.amount.filter(|a| *a > Decimal::ZERO),
                &format!("payments[{index}].amount"),
            )?;
        }

        Ok(Self {
            lease_id: form.lease_id.clone(),
            rent_amount,
            lease_term_duration,
            lease_frequency,
            payment_frequency,
            start_date,
            installment_count,
            payment_date: form.payment_date,
            payment_method: form.payment_method,
            payments: form.payments.clone(),
        })
    }
}
