use crate::domain::submission::LeaseSubmission;
use crate::error::Result;
use std::io::Write;

/// Writes saved leases as a pretty-printed JSON array of save payloads.
pub fn write_payloads<W: Write>(mut sink: W, leases: &[LeaseSubmission]) -> Result<()> {
    serde_json::to_writer_pretty(&mut sink, leases)?;
    writeln!(sink)?;
    Ok(())
}
