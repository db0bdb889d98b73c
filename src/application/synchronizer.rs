use crate::domain::form::{Field, LeaseForm};
use crate::domain::installment::PaymentMethod;
use crate::domain::schedule::{self, Reconciliation};
use crate::domain::terms::{LeaseFrequency, PaymentFrequency};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::debug;

/// A user edit to one of the lease-level form fields.
#[derive(Debug, PartialEq, Clone)]
pub enum FieldUpdate {
    RentAmount(Option<Decimal>),
    LeaseTermDuration(Option<u32>),
    LeaseFrequency(Option<LeaseFrequency>),
    PaymentFrequency(Option<PaymentFrequency>),
    StartDate(Option<NaiveDate>),
    InstallmentCount(Option<u32>),
    PaymentDate(Option<NaiveDate>),
    PaymentMethod(Option<PaymentMethod>),
}

impl FieldUpdate {
    /// The form field this update writes.
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::RentAmount(_) => Field::RentAmount,
            FieldUpdate::LeaseTermDuration(_) => Field::LeaseTermDuration,
            FieldUpdate::LeaseFrequency(_) => Field::LeaseFrequency,
            FieldUpdate::PaymentFrequency(_) => Field::PaymentFrequency,
            FieldUpdate::StartDate(_) => Field::StartDate,
            FieldUpdate::InstallmentCount(_) => Field::InstallmentCount,
            FieldUpdate::PaymentDate(_) => Field::PaymentDate,
            FieldUpdate::PaymentMethod(_) => Field::PaymentMethod,
        }
    }

    fn apply(self, form: &mut LeaseForm) {
        match self {
            FieldUpdate::RentAmount(v) => form.terms.rent_amount = v,
            FieldUpdate::LeaseTermDuration(v) => form.terms.lease_term_duration = v,
            FieldUpdate::LeaseFrequency(v) => form.terms.lease_frequency = v,
            FieldUpdate::PaymentFrequency(v) => form.terms.payment_frequency = v,
            FieldUpdate::StartDate(v) => form.terms.start_date = v,
            FieldUpdate::InstallmentCount(v) => form.installment_count = v,
            FieldUpdate::PaymentDate(v) => form.payment_date = v,
            FieldUpdate::PaymentMethod(v) => form.payment_method = v,
        }
    }
}

/// A user edit to a single installment row.
#[derive(Debug, PartialEq, Clone)]
pub enum RowEdit {
    Method(PaymentMethod),
    RefNo(String),
    Date(Option<NaiveDate>),
    Amount(Option<Decimal>),
}

/// One step of the dependency graph.
struct Derivation {
    name: &'static str,
    inputs: &'static [Field],
    outputs: &'static [Field],
    run: fn(&mut LeaseForm),
}

/// Derivations in evaluation order. A derivation only reads outputs of
/// derivations declared before it, so a single sweep converges.
const DERIVATIONS: &[Derivation] = &[
    Derivation {
        name: "lease_term_in_months",
        inputs: &[Field::LeaseTermDuration, Field::LeaseFrequency],
        outputs: &[Field::LeaseTermInMonths],
        run: derive_term_in_months,
    },
    Derivation {
        name: "installment_count",
        inputs: &[
            Field::LeaseTermDuration,
            Field::LeaseFrequency,
            Field::PaymentFrequency,
            Field::LeaseTermInMonths,
        ],
        outputs: &[Field::InstallmentCount],
        run: derive_installment_count,
    },
    Derivation {
        name: "installment_amount",
        inputs: &[
            Field::RentAmount,
            Field::LeaseTermInMonths,
            Field::InstallmentCount,
        ],
        outputs: &[Field::InstallmentAmount],
        run: derive_installment_amount,
    },
    Derivation {
        name: "payments",
        inputs: &[
            Field::InstallmentCount,
            Field::RentAmount,
            Field::LeaseTermInMonths,
            Field::PaymentFrequency,
            Field::StartDate,
        ],
        outputs: &[Field::Payments],
        run: reconcile_payments,
    },
    Derivation {
        name: "payment_date",
        inputs: &[Field::StartDate],
        outputs: &[Field::PaymentDate],
        run: default_payment_date,
    },
    Derivation {
        name: "payment_method",
        inputs: &[Field::StartDate],
        outputs: &[Field::PaymentMethod],
        run: default_payment_method,
    },
];

fn derive_term_in_months(form: &mut LeaseForm) {
    form.lease_term_in_months = form.terms.lease_term_in_months();
}

fn derive_installment_count(form: &mut LeaseForm) {
    if let Some(count) = schedule::installment_count(&form.terms) {
        form.installment_count = Some(count);
    }
}

fn derive_installment_amount(form: &mut LeaseForm) {
    form.installment_amount = form.schedule_inputs().amount();
}

fn reconcile_payments(form: &mut LeaseForm) {
    let inputs = form.schedule_inputs();
    let rows = std::mem::take(&mut form.payments);
    let (rows, outcome) = schedule::reconcile(rows, &inputs);
    form.payments = rows;

    let total = form.payments.len();
    match outcome {
        Reconciliation::Appended(n) => debug!(appended = n, total, "installments appended"),
        Reconciliation::Truncated(n) => debug!(removed = n, total, "installments truncated"),
        Reconciliation::Refreshed => debug!(total, "installments refreshed"),
        Reconciliation::Skipped => debug!("schedule inputs incomplete, reconciliation skipped"),
    }
}

fn default_payment_date(form: &mut LeaseForm) {
    if form.payment_date.is_none() {
        form.payment_date = form.terms.start_date;
    }
}

fn default_payment_method(form: &mut LeaseForm) {
    if form.payment_method.is_none() && form.terms.start_date.is_some() {
        form.payment_method = Some(PaymentMethod::Upi);
    }
}

/// Keeps a lease form's installment schedule consistent with its terms.
///
/// Every mutation goes through [`ScheduleSynchronizer::set`], which applies
/// the edit and then calls [`ScheduleSynchronizer::recompute`] with the
/// touched field. The synchronizer is the form's only writer.
#[derive(Debug, Default)]
pub struct ScheduleSynchronizer {
    form: LeaseForm,
}

impl ScheduleSynchronizer {
    /// Creates a synchronizer over a new, empty form for `lease_id`.
    pub fn new(lease_id: impl Into<String>) -> Self {
        Self {
            form: LeaseForm::new(lease_id),
        }
    }

    /// Wraps an existing form, e.g. one opened for editing.
    pub fn from_form(form: LeaseForm) -> Self {
        Self { form }
    }

    /// Read-only view of the current form state.
    pub fn form(&self) -> &LeaseForm {
        &self.form
    }

    /// Consumes the synchronizer, handing the form over for submission.
    pub fn into_form(self) -> LeaseForm {
        self.form
    }

    /// Applies a field edit and re-runs the derivations that depend on it.
    ///
    /// Returns the names of the derivations that ran, in order.
    pub fn set(&mut self, update: FieldUpdate) -> Vec<&'static str> {
        let field = update.field();
        update.apply(&mut self.form);
        self.recompute(&[field])
    }

    /// Runs, in declaration order, every derivation whose inputs intersect
    /// `changed` or the outputs of a derivation already run in this pass.
    pub fn recompute(&mut self, changed: &[Field]) -> Vec<&'static str> {
        let mut dirty: HashSet<Field> = changed.iter().copied().collect();
        let mut ran = Vec::new();

        for derivation in DERIVATIONS {
            if !derivation.inputs.iter().any(|f| dirty.contains(f)) {
                continue;
            }
            debug!(derivation = derivation.name, "running derivation");
            (derivation.run)(&mut self.form);
            dirty.extend(derivation.outputs.iter().copied());
            ran.push(derivation.name);
        }

        ran
    }

    /// Runs the whole graph, as if every input had changed.
    pub fn recompute_all(&mut self) -> Vec<&'static str> {
        self.recompute(&[
            Field::RentAmount,
            Field::LeaseTermDuration,
            Field::LeaseFrequency,
            Field::PaymentFrequency,
            Field::StartDate,
        ])
    }

    /// Edits one installment row. Row edits trigger no derivation.
    ///
    /// Returns `false` if there is no row at `index`.
    pub fn edit_payment(&mut self, index: usize, edit: RowEdit) -> bool {
        let Some(row) = self.form.payment_mut(index) else {
            return false;
        };
        match edit {
            RowEdit::Method(method) => row.set_method(method),
            RowEdit::RefNo(ref_no) => row.set_ref_no(ref_no),
            RowEdit::Date(date) => row.date = date,
            RowEdit::Amount(amount) => row.amount = amount,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filled(
        rent: Decimal,
        duration: u32,
        lease: LeaseFrequency,
        payment: PaymentFrequency,
        start: NaiveDate,
    ) -> ScheduleSynchronizer {
        let mut sync = ScheduleSynchronizer::new("L-1");
        sync.set(FieldUpdate::RentAmount(Some(rent)));
        sync.set(FieldUpdate::LeaseTermDuration(Some(duration)));
        sync.set(FieldUpdate::LeaseFrequency(Some(lease)));
        sync.set(FieldUpdate::PaymentFrequency(Some(payment)));
        sync.set(FieldUpdate::StartDate(Some(start)));
        sync
    }

    #[test]
    fn test_monthly_twelve_month_scenario() {
        let sync = filled(
            dec!(12000),
            12,
            LeaseFrequency::Monthly,
            PaymentFrequency::Monthly,
            date(2024, 1, 1),
        );
        let form = sync.form();
        assert_eq!(form.installment_count, Some(12));
        assert_eq!(form.payments.len(), 12);
        for (i, row) in form.payments.iter().enumerate() {
            assert_eq!(row.amount, Some(dec!(12000.00)));
            assert_eq!(row.date, Some(date(2024, i as u32 + 1, 1)));
        }
        assert_eq!(form.payments[11].date, Some(date(2024, 12, 1)));
    }

    #[test]
    fn test_annual_term_quarterly_scenario() {
        let sync = filled(
            dec!(120000),
            1,
            LeaseFrequency::Annually,
            PaymentFrequency::Quarterly,
            date(2024, 1, 1),
        );
        let form = sync.form();
        assert_eq!(form.lease_term_in_months, Some(12));
        assert_eq!(form.installment_count, Some(4));
        assert_eq!(form.installment_amount, Some(dec!(360000.00)));
        let dates: Vec<_> = form.payments.iter().map(|r| r.date.unwrap()).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 1), date(2024, 4, 1), date(2024, 7, 1), date(2024, 10, 1)]
        );
    }

    #[test]
    fn test_rows_appear_once_inputs_complete() {
        let mut sync = ScheduleSynchronizer::new("L-1");
        sync.set(FieldUpdate::LeaseTermDuration(Some(6)));
        sync.set(FieldUpdate::LeaseFrequency(Some(LeaseFrequency::Monthly)));
        assert!(sync.form().payments.is_empty());

        sync.set(FieldUpdate::PaymentFrequency(Some(PaymentFrequency::Monthly)));
        // Count is known but rent is not
        assert_eq!(sync.form().installment_count, Some(6));
        assert!(sync.form().payments.is_empty());

        sync.set(FieldUpdate::RentAmount(Some(dec!(900))));
        assert_eq!(sync.form().payments.len(), 6);
        assert!(sync.form().payments.iter().all(|r| r.date.is_none()));

        sync.set(FieldUpdate::StartDate(Some(date(2024, 5, 1))));
        assert_eq!(sync.form().payments[5].date, Some(date(2024, 10, 1)));
    }

    #[test]
    fn test_lease_frequency_change_runs_dependents_in_one_pass() {
        let mut sync = filled(
            dec!(1000),
            2,
            LeaseFrequency::Monthly,
            PaymentFrequency::Monthly,
            date(2024, 1, 1),
        );
        assert_eq!(sync.form().payments.len(), 2);

        let ran = sync.set(FieldUpdate::LeaseFrequency(Some(LeaseFrequency::Annually)));
        assert_eq!(
            ran,
            vec!["lease_term_in_months", "installment_count", "installment_amount", "payments"]
        );
        assert_eq!(sync.form().lease_term_in_months, Some(24));
        assert_eq!(sync.form().installment_count, Some(2));
        assert_eq!(sync.form().installment_amount, Some(dec!(12000.00)));
    }

    #[test]
    fn test_growing_and_shrinking_term_preserves_user_fields() {
        let mut sync = filled(
            dec!(500),
            3,
            LeaseFrequency::Monthly,
            PaymentFrequency::Monthly,
            date(2024, 1, 1),
        );
        assert!(sync.edit_payment(0, RowEdit::Method(PaymentMethod::Bank)));
        assert!(sync.edit_payment(0, RowEdit::RefNo("NEFT-1".to_string())));
        assert!(sync.edit_payment(2, RowEdit::Method(PaymentMethod::Cash)));

        sync.set(FieldUpdate::LeaseTermDuration(Some(5)));
        let rows = &sync.form().payments;
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].method, PaymentMethod::Bank);
        assert_eq!(rows[0].ref_no, "NEFT-1");
        assert_eq!(rows[2].method, PaymentMethod::Cash);
        assert_eq!(rows[3].method, PaymentMethod::Cheque);
        assert_eq!(rows[4].date, Some(date(2024, 5, 1)));

        sync.set(FieldUpdate::LeaseTermDuration(Some(2)));
        let rows = &sync.form().payments;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].method, PaymentMethod::Bank);
        assert_eq!(rows[0].ref_no, "NEFT-1");
    }

    #[test]
    fn test_manual_count_drives_rows_until_inputs_change() {
        let mut sync = filled(
            dec!(1200),
            12,
            LeaseFrequency::Monthly,
            PaymentFrequency::Monthly,
            date(2024, 1, 1),
        );
        sync.set(FieldUpdate::InstallmentCount(Some(6)));
        assert_eq!(sync.form().payments.len(), 6);
        assert_eq!(sync.form().installment_amount, Some(dec!(2400.00)));

        // A count-determining input overwrites the manual value
        sync.set(FieldUpdate::PaymentFrequency(Some(PaymentFrequency::Monthly)));
        assert_eq!(sync.form().installment_count, Some(12));
        assert_eq!(sync.form().payments.len(), 12);
    }

    #[test]
    fn test_payment_date_defaults_once() {
        let mut sync = ScheduleSynchronizer::new("L-1");
        sync.set(FieldUpdate::StartDate(Some(date(2024, 2, 1))));
        assert_eq!(sync.form().payment_date, Some(date(2024, 2, 1)));
        assert_eq!(sync.form().payment_method, Some(PaymentMethod::Upi));

        sync.set(FieldUpdate::StartDate(Some(date(2024, 3, 1))));
        assert_eq!(sync.form().payment_date, Some(date(2024, 2, 1)));
    }

    #[test]
    fn test_user_payment_date_is_not_overwritten() {
        let mut sync = ScheduleSynchronizer::new("L-1");
        sync.set(FieldUpdate::PaymentDate(Some(date(2024, 1, 20))));
        sync.set(FieldUpdate::PaymentMethod(Some(PaymentMethod::Card)));
        sync.set(FieldUpdate::StartDate(Some(date(2024, 2, 1))));
        assert_eq!(sync.form().payment_date, Some(date(2024, 1, 20)));
        assert_eq!(sync.form().payment_method, Some(PaymentMethod::Card));
    }

    #[test]
    fn test_clearing_rent_keeps_rows_and_clears_display_amount() {
        let mut sync = filled(
            dec!(1000),
            3,
            LeaseFrequency::Monthly,
            PaymentFrequency::Monthly,
            date(2024, 1, 1),
        );
        sync.set(FieldUpdate::RentAmount(None));
        assert_eq!(sync.form().installment_amount, None);
        assert_eq!(sync.form().payments.len(), 3);
        assert_eq!(sync.form().payments[0].amount, Some(dec!(1000.00)));
    }

    #[test]
    fn test_appending_rows_keeps_row_overrides() {
        let mut sync = filled(
            dec!(500),
            3,
            LeaseFrequency::Monthly,
            PaymentFrequency::Monthly,
            date(2024, 1, 1),
        );
        assert!(sync.edit_payment(0, RowEdit::Date(Some(date(2024, 1, 10)))));
        assert!(sync.edit_payment(1, RowEdit::Amount(Some(dec!(499.00)))));

        sync.set(FieldUpdate::LeaseTermDuration(Some(5)));
        let rows = &sync.form().payments;
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].date, Some(date(2024, 1, 10)));
        assert_eq!(rows[1].amount, Some(dec!(499.00)));
        assert_eq!(rows[3].date, Some(date(2024, 4, 1)));
        assert_eq!(rows[3].amount, Some(dec!(500.00)));
    }

    #[test]
    fn test_zero_rent_clears_row_amounts() {
        let mut sync = filled(
            dec!(1000),
            3,
            LeaseFrequency::Monthly,
            PaymentFrequency::Monthly,
            date(2024, 1, 1),
        );
        sync.set(FieldUpdate::RentAmount(Some(dec!(0))));
        let form = sync.form();
        assert_eq!(form.installment_amount, None);
        assert_eq!(form.payments.len(), 3);
        assert!(form.payments.iter().all(|row| row.amount.is_none()));
        assert_eq!(form.payments[2].date, Some(date(2024, 3, 1)));
    }

    #[test]
    fn test_oversized_term_builds_no_rows() {
        let sync = filled(
            dec!(100),
            4_000_000_000,
            LeaseFrequency::Monthly,
            PaymentFrequency::Monthly,
            date(2024, 1, 1),
        );
        assert_eq!(sync.form().installment_count, Some(4_000_000_000));
        assert!(sync.form().payments.is_empty());
    }

    #[test]
    fn test_row_edit_out_of_range() {
        let mut sync = ScheduleSynchronizer::new("L-1");
        assert!(!sync.edit_payment(0, RowEdit::Amount(Some(dec!(1)))));
    }

    #[test]
    fn test_recompute_with_unchanged_inputs_is_idempotent() {
        let mut sync = filled(
            dec!(120000),
            1,
            LeaseFrequency::Annually,
            PaymentFrequency::Quarterly,
            date(2024, 1, 1),
        );
        sync.edit_payment(3, RowEdit::Method(PaymentMethod::Upi));
        sync.edit_payment(3, RowEdit::RefNo("upi-ref".to_string()));
        let before = sync.form().clone();

        sync.recompute_all();
        assert_eq!(sync.form(), &before);
    }
}
