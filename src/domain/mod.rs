pub mod account;
pub mod errors;
pub mod order;
pub mod pagination;
pub mod ports;
pub mod totals;
