pub mod batch;
pub mod parse;
