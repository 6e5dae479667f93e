pub mod account_repo;
pub mod memory;
pub mod models;
pub mod order_number;
pub mod order_repo;
