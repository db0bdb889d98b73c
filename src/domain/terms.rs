use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unit in which the lease term duration is expressed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum LeaseFrequency {
    Monthly,
    Annually,
}

/// Cadence at which rent is actually collected.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    Monthly,
    Quarterly,
    Annually,
}

/// Lease inputs as entered so far.
///
/// Every field is optional: the form is filled incrementally and each
/// derivation only runs once the operands it needs are present.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct LeaseTerms {
    /// Currency amount charged per rent period.
    pub rent_amount: Option<Decimal>,
    /// Months or years, depending on `lease_frequency`.
    pub lease_term_duration: Option<u32>,
    pub lease_frequency: Option<LeaseFrequency>,
    pub payment_frequency: Option<PaymentFrequency>,
    pub start_date: Option<NaiveDate>,
}

impl LeaseTerms {
    /// Total lease term in months, if the duration and its unit are known.
    pub fn lease_term_in_months(&self) -> Option<u32> {
        let duration = self.lease_term_duration?;
        match self.lease_frequency? {
            LeaseFrequency::Monthly => Some(duration),
            LeaseFrequency::Annually => duration.checked_mul(12),
        }
    }

    /// Rent amount, only when strictly positive.
    pub fn positive_rent(&self) -> Option<Decimal> {
        self.rent_amount.filter(|rent| *rent > Decimal::ZERO)
    }
}
