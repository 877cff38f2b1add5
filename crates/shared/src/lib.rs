pub mod domain;
pub mod error;
pub mod inquiry;
pub mod protocol;
