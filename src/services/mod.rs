// src/services/mod.rs

pub mod aggregator;
pub mod assembler;
pub mod catalog;
pub mod coach;
pub mod evaluator;
pub mod progress;
pub mod report;
pub mod test_store;
