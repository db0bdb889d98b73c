//! Domain layer: lease terms, installment rows, the pure schedule arithmetic,
//! form state, the save payload and the repository port.

pub mod form;
pub mod installment;
pub mod ports;
pub mod schedule;
pub mod submission;
pub mod terms;
