use crate::application::synchronizer::{FieldUpdate, ScheduleSynchronizer};
use crate::domain::form::LeaseForm;
use crate::domain::terms::{LeaseFrequency, PaymentFrequency};
use crate::error::{Result, ScheduleError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One lease as entered in the input file. Blank cells mean "not entered yet".
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct LeaseRecord {
    pub lease_id: String,
    #[serde(default)]
    pub rent_amount: Option<Decimal>,
    #[serde(default)]
    pub lease_term_duration: Option<u32>,
    #[serde(default)]
    pub lease_frequency: Option<LeaseFrequency>,
    #[serde(default)]
    pub payment_frequency: Option<PaymentFrequency>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl LeaseRecord {
    /// The record's fields as form edits, in the order a user fills them in.
    pub fn field_updates(&self) -> Vec<FieldUpdate> {
        vec![
            FieldUpdate::RentAmount(self.rent_amount),
            FieldUpdate::LeaseTermDuration(self.lease_term_duration),
            FieldUpdate::LeaseFrequency(self.lease_frequency),
            FieldUpdate::PaymentFrequency(self.payment_frequency),
            FieldUpdate::StartDate(self.start_date),
        ]
    }

    /// Fills a fresh form field by field through the synchronizer.
    pub fn to_form(&self) -> LeaseForm {
        let mut sync = ScheduleSynchronizer::new(self.lease_id.clone());
        for update in self.field_updates() {
            sync.set(update);
        }
        sync.into_form()
    }
}

/// Reads lease records from a CSV source.
///
/// Wraps `csv::Reader`, trimming whitespace and accepting short rows.
pub struct LeaseReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> LeaseReader<R> {
    /// Creates a reader over `source`; the first row is the header.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes records, one `Result` per row.
    pub fn leases(self) -> impl Iterator<Item = Result<LeaseRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(ScheduleError::from))
    }
}
