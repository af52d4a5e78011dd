//! Inbound adapters: the HTTP endpoints and the CSV files used by the CLI.

pub mod csv;
pub mod http;
