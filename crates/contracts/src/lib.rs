pub mod billing;
pub mod domain;
