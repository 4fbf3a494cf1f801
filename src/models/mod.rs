// src/models/mod.rs

pub mod answer;
pub mod progress;
pub mod question;
pub mod report;
pub mod result;
pub mod syllabus;
pub mod test;
pub mod video;
