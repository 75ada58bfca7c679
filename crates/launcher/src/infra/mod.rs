pub mod audit;
pub mod redact;
