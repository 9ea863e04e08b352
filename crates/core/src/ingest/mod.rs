pub mod error;
pub mod gdelt;
pub mod provider;
pub mod types;
pub mod yahoo;
