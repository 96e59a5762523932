//! review 固有のアダプター

pub mod code_reader;
pub mod confirm;
pub mod presenter;

pub use code_reader::StdCodeReader;
pub use confirm::{FixedConfirm, StdinConfirm};
