//! The two pipelines. Each stage either hands its output to the next or
//! aborts the whole invocation; nothing is retried.

pub mod balance;
pub mod send;
