//! review のドメイン型

pub mod command;
pub mod example;

pub use command::{CodeSource, ReviewCommand};
pub use example::EXAMPLE_CODE;
