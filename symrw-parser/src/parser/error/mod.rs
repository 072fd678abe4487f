pub mod kind;

pub use symrw_error::Error;
