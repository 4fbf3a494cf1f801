// src/models/syllabus.rs

use serde::{Deserialize, Serialize};

/// The exam syllabus, served to the client as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Syllabus {
    pub sections: Vec<SyllabusSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyllabusSection {
    pub id: String,
    pub name: String,
    /// Share of the exam, in percent.
    pub weightage: f64,
    pub topics: Vec<SyllabusTopic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyllabusTopic {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtopics: Option<Vec<String>>,
}
