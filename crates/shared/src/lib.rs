pub mod domain;
pub mod error;
pub mod field;
pub mod protocol;
