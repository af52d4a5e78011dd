//! CSV input and output: order files for the in-memory bridge, forms for the CLI.

pub mod form_writer;
pub mod order_reader;
