use crate::domain::installment::PaymentMethod;
use crate::domain::submission::LeaseSubmission;
use crate::error::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ScheduleLine<'a> {
    lease_id: &'a str,
    installment: usize,
    method: PaymentMethod,
    ref_no: &'a str,
    date: Option<NaiveDate>,
    amount: String,
}

/// Writes saved leases as one CSV line per installment.
pub struct ScheduleWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ScheduleWriter<W> {
    pub fn new(sink: W) -> Self {
        // Header is written explicitly so an empty run still gets one
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        Self { writer }
    }

    /// Writes the header, then every installment of every lease, and flushes.
    pub fn write_schedules(&mut self, leases: &[LeaseSubmission]) -> Result<()> {
        self.writer
            .write_record(["lease_id", "installment", "method", "ref_no", "date", "amount"])?;

        for lease in leases {
            for (index, row) in lease.payments.iter().enumerate() {
                self.writer.serialize(ScheduleLine {
                    lease_id: &lease.lease_id,
                    installment: index + 1,
                    method: row.method,
                    ref_no: &row.ref_no,
                    date: row.date,
                    amount: row
                        .amount
                        .map(|amount| format!("{amount:.2}"))
                        .unwrap_or_default(),
                })?;
            }
        }

        self.writer.flush()?;
        Ok(())
    }
}
