//! preventivo-store
//!
//! Record access for the remote tabular store (Airtable REST API) and the
//! resolver that turns a project row into a fully linked quote.

pub mod client;
pub mod error;
pub mod filter;
pub mod memory;
pub mod resolve;
pub mod source;
