//! Pure schedule arithmetic: installment count, per-installment amount,
//! due dates, and the two row-list passes (`resize` and
//! `refresh_computed_fields`) that reconciliation is built from.

use super::installment::InstallmentRow;
use super::terms::{LeaseFrequency, LeaseTerms, PaymentFrequency};
use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// Quarterly schedules always have this many installments.
pub const QUARTERLY_INSTALLMENTS: u32 = 4;

/// Upper bound on schedule length: a century of monthly payments.
pub const MAX_INSTALLMENTS: u32 = 1200;

/// Derives the installment count from the term and both frequencies.
///
/// Returns `None` until the duration and both frequencies are known.
pub fn installment_count(terms: &LeaseTerms) -> Option<u32> {
    let duration = terms.lease_term_duration?;
    let lease_frequency = terms.lease_frequency?;
    let payment_frequency = terms.payment_frequency?;

    match (payment_frequency, lease_frequency) {
        (PaymentFrequency::Monthly, LeaseFrequency::Annually) => Some(duration),
        (PaymentFrequency::Monthly, LeaseFrequency::Monthly) => terms.lease_term_in_months(),
        (PaymentFrequency::Quarterly, _) => Some(QUARTERLY_INSTALLMENTS),
        (PaymentFrequency::Annually, LeaseFrequency::Monthly) => Some(1),
        (PaymentFrequency::Annually, LeaseFrequency::Annually) => Some(duration),
    }
}

/// Snapshot of everything a schedule row depends on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScheduleInputs {
    pub rent_amount: Option<Decimal>,
    pub lease_term_in_months: Option<u32>,
    pub installment_count: Option<u32>,
    pub payment_frequency: Option<PaymentFrequency>,
    pub start_date: Option<NaiveDate>,
}

impl ScheduleInputs {
    /// Total rent over the whole term.
    pub fn total_rent(&self) -> Option<Decimal> {
        let rent = self.rent_amount.filter(|r| *r > Decimal::ZERO)?;
        let months = self.lease_term_in_months.filter(|m| *m > 0)?;
        Some(rent * Decimal::from(months))
    }

    /// Per-installment amount, rounded half-up and scaled to 2 decimal places.
    pub fn amount(&self) -> Option<Decimal> {
        let total = self.total_rent()?;
        let count = self.installment_count.filter(|c| *c > 0)?;
        let mut amount = (total / Decimal::from(count))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(2);
        Some(amount)
    }

    /// Due date of the installment at `index` (0-based).
    pub fn due_date(&self, index: u32) -> Option<NaiveDate> {
        let start = self.start_date?;
        let offset_months = match self.payment_frequency? {
            PaymentFrequency::Monthly => index,
            PaymentFrequency::Quarterly => match self.lease_term_in_months {
                Some(months) if self.installment_count == Some(QUARTERLY_INSTALLMENTS) => {
                    // Spread the whole term evenly across the four installments
                    let offset = u64::from(index) * u64::from(months)
                        / u64::from(QUARTERLY_INSTALLMENTS);
                    u32::try_from(offset).ok()?
                }
                _ => index.checked_mul(3)?,
            },
            PaymentFrequency::Annually => index.checked_mul(12)?,
        };
        start.checked_add_months(Months::new(offset_months))
    }

    /// Reconciliation needs a count within [`MAX_INSTALLMENTS`] plus known
    /// term and rent.
    pub fn can_reconcile(&self) -> bool {
        self.installment_count.is_some_and(|c| c <= MAX_INSTALLMENTS)
            && self.lease_term_in_months.is_some()
            && self.rent_amount.is_some()
    }

    fn new_row(&self, index: u32) -> InstallmentRow {
        InstallmentRow::new(self.due_date(index), self.amount())
    }
}

/// Adjusts the row list to `count` rows.
///
/// Missing rows are appended with computed date and amount; surplus rows are
/// dropped from the tail. Existing rows are left untouched.
pub fn resize(
    mut rows: Vec<InstallmentRow>,
    count: usize,
    inputs: &ScheduleInputs,
) -> Vec<InstallmentRow> {
    if rows.len() > count {
        rows.truncate(count);
    } else {
        let start = rows.len();
        rows.extend((start..count).map(|index| inputs.new_row(index as u32)));
    }
    rows
}

/// Recomputes `date` and `amount` of every row in place.
///
/// `method` and `ref_no` are preserved. A date that cannot be recomputed
/// keeps its current value; an undefined amount clears the row's amount.
pub fn refresh_computed_fields(
    mut rows: Vec<InstallmentRow>,
    inputs: &ScheduleInputs,
) -> Vec<InstallmentRow> {
    let amount = inputs.amount();
    for (index, row) in rows.iter_mut().enumerate() {
        if let Some(date) = inputs.due_date(index as u32) {
            row.date = Some(date);
        }
        row.amount = amount;
    }
    rows
}

/// What a reconciliation pass did to the row list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    Appended(usize),
    Truncated(usize),
    Refreshed,
    Skipped,
}

/// Brings `rows` in line with `inputs`.
///
/// A length change only appends or truncates, leaving the remaining rows as
/// they are. Computed fields are refreshed only when the length already
/// matches the installment count.
pub fn reconcile(
    rows: Vec<InstallmentRow>,
    inputs: &ScheduleInputs,
) -> (Vec<InstallmentRow>, Reconciliation) {
    let Some(count) = inputs.installment_count.filter(|_| inputs.can_reconcile()) else {
        return (rows, Reconciliation::Skipped);
    };
    let count = count as usize;
    let before = rows.len();

    match before.cmp(&count) {
        std::cmp::Ordering::Less => (
            resize(rows, count, inputs),
            Reconciliation::Appended(count - before),
        ),
        std::cmp::Ordering::Greater => (
            resize(rows, count, inputs),
            Reconciliation::Truncated(before - count),
        ),
        std::cmp::Ordering::Equal => (
            refresh_computed_fields(rows, inputs),
            Reconciliation::Refreshed,
        ),
    }
}
