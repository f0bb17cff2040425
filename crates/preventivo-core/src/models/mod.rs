pub mod account;
pub mod client;
pub mod project;
pub mod quote;
pub mod supplier;
pub mod task;
