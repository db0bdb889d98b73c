#![allow(dead_code)]

use chrono::NaiveDate;
use rand::Rng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const HEADER: [&str; 6] = [
    "lease_id",
    "rent_amount",
    "lease_term_duration",
    "lease_frequency",
    "payment_frequency",
    "start_date",
];

const LEASE_FREQUENCIES: [&str; 2] = ["monthly", "annually"];
const PAYMENT_FREQUENCIES: [&str; 3] = ["monthly", "quarterly", "annually"];

/// Writes `rows` complete monthly leases of 12 months each.
pub fn generate_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(HEADER)?;

    for i in 1..=rows {
        let lease_id = format!("L-{i:05}");
        wtr.write_record([
            lease_id.as_str(),
            "1000",
            "12",
            "monthly",
            "monthly",
            "2024-01-01",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `rows` leases with random terms drawn from `rng`.
pub fn generate_random_csv(path: &Path, rows: usize, rng: &mut StdRng) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(HEADER)?;

    for i in 1..=rows {
        let terms = random_terms(rng);
        let lease_id = format!("R-{i:05}");
        let rent = terms.rent.to_string();
        let duration = terms.duration.to_string();
        let start = terms.start.to_string();
        wtr.write_record([
            lease_id.as_str(),
            rent.as_str(),
            duration.as_str(),
            terms.lease_frequency,
            terms.payment_frequency,
            start.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub struct RandomTerms {
    pub rent: Decimal,
    pub duration: u32,
    pub lease_frequency: &'static str,
    pub payment_frequency: &'static str,
    pub start: NaiveDate,
}

pub fn random_terms(rng: &mut StdRng) -> RandomTerms {
    let lease_frequency = LEASE_FREQUENCIES[rng.gen_range(0..LEASE_FREQUENCIES.len())];
    let duration = match lease_frequency {
        "monthly" => rng.gen_range(1..=60),
        _ => rng.gen_range(1..=10),
    };
    RandomTerms {
        // 1.00 ..= 99999.99
        rent: Decimal::new(rng.gen_range(100..10_000_000), 2),
        duration,
        lease_frequency,
        payment_frequency: PAYMENT_FREQUENCIES[rng.gen_range(0..PAYMENT_FREQUENCIES.len())],
        start: NaiveDate::from_ymd_opt(
            rng.gen_range(2000..2040),
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
        )
        .unwrap(),
    }
}
