// src/handlers/mod.rs

pub mod catalog;
pub mod quiz;
pub mod report;
pub mod video;
