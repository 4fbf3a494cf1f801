// src/services/catalog.rs

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{
    models::{
        question::{Difficulty, Question, QuestionType},
        syllabus::Syllabus,
        test::TestConfig,
        video::Video,
    },
    utils::text::{loose_match, subject_match},
};

pub const QUESTIONS_FILE: &str = "questions.json";
pub const SYLLABUS_FILE: &str = "syllabus.json";
pub const VIDEOS_FILE: &str = "videos.json";

/// An error returned while loading the static catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate question id {0}")]
    DuplicateId(String),

    #[error("MCQ question {0} has no options")]
    MissingOptions(String),
}

/// Question data files may be a bare array or wrapped as `{"questions": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionsFile {
    Wrapped { questions: Vec<Question> },
    Bare(Vec<Question>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VideosFile {
    Wrapped { videos: Vec<Video> },
    Bare(Vec<Video>),
}

/// Attribute filter over the question bank.
///
/// Every group is optional; an empty group imposes no constraint.
/// Groups are combined with AND, entries within a group with OR.
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    pub subjects: Vec<String>,
    pub topics: Vec<String>,
    pub difficulties: Vec<Difficulty>,
    pub types: Vec<QuestionType>,
}

impl QuestionFilter {
    pub fn matches(&self, question: &Question) -> bool {
        if !self.subjects.is_empty()
            && !self
                .subjects
                .iter()
                .any(|s| subject_match(&question.subject, s))
        {
            return false;
        }

        if !self.topics.is_empty() && !self.topics.iter().any(|t| loose_match(&question.topic, t)) {
            return false;
        }

        if !self.difficulties.is_empty() && !self.difficulties.contains(&question.difficulty) {
            return false;
        }

        if !self.types.is_empty() && !self.types.contains(&question.question_type) {
            return false;
        }

        true
    }
}

impl From<&TestConfig> for QuestionFilter {
    fn from(config: &TestConfig) -> Self {
        Self {
            subjects: config.subjects.clone(),
            topics: config.topics.clone().unwrap_or_default(),
            difficulties: config.difficulty.clone().unwrap_or_default(),
            types: config.question_types.clone().unwrap_or_default(),
        }
    }
}

/// The static, read-only catalog: questions, syllabus and study videos.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    questions: Vec<Question>,
    syllabus: Syllabus,
    videos: Vec<Video>,
}

impl Catalog {
    /// Builds a catalog from already-parsed parts, applying the same checks as [`Catalog::load`].
    pub fn new(
        questions: Vec<Question>,
        syllabus: Syllabus,
        videos: Vec<Video>,
    ) -> Result<Self, CatalogError> {
        check_questions(&questions)?;
        check_videos(&videos);
        Ok(Self {
            questions,
            syllabus,
            videos,
        })
    }

    /// Loads `questions.json`, `syllabus.json` and (optionally) `videos.json` from `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();

        let questions = match read_json::<QuestionsFile>(&dir.join(QUESTIONS_FILE))? {
            QuestionsFile::Wrapped { questions } | QuestionsFile::Bare(questions) => questions,
        };
        let syllabus: Syllabus = read_json(&dir.join(SYLLABUS_FILE))?;

        let videos_path = dir.join(VIDEOS_FILE);
        let videos = if videos_path.exists() {
            match read_json::<VideosFile>(&videos_path)? {
                VideosFile::Wrapped { videos } | VideosFile::Bare(videos) => videos,
            }
        } else {
            tracing::warn!("{} not found, serving no videos", videos_path.display());
            Vec::new()
        };

        let catalog = Self::new(questions, syllabus, videos)?;
        tracing::info!(
            questions = catalog.questions.len(),
            sections = catalog.syllabus.sections.len(),
            videos = catalog.videos.len(),
            "Catalog loaded from {}",
            dir.display()
        );
        Ok(catalog)
    }

    pub fn all_questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn syllabus(&self) -> &Syllabus {
        &self.syllabus
    }

    /// Questions matching `filter`, in catalog order.
    pub fn filter(&self, filter: &QuestionFilter) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect()
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn videos_by_subject(&self, subject: &str) -> Vec<Video> {
        self.videos
            .iter()
            .filter(|v| loose_match(&v.subject, subject))
            .cloned()
            .collect()
    }

    pub fn videos_by_topic(&self, topic: &str) -> Vec<Video> {
        self.videos
            .iter()
            .filter(|v| loose_match(&v.topic, topic))
            .cloned()
            .collect()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn check_questions(questions: &[Question]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for q in questions {
        if !seen.insert(q.id.as_str()) {
            return Err(CatalogError::DuplicateId(q.id.clone()));
        }

        match (&q.question_type, &q.options) {
            (QuestionType::Mcq, None) => return Err(CatalogError::MissingOptions(q.id.clone())),
            (QuestionType::Mcq, Some(options)) if options.is_empty() => {
                return Err(CatalogError::MissingOptions(q.id.clone()));
            }
            (QuestionType::Mcq, Some(options)) => {
                let answer = q.answer.trim().to_lowercase();
                if !options.iter().any(|o| o.trim().to_lowercase() == answer) {
                    tracing::warn!(question = %q.id, "MCQ answer is not one of its options");
                }
            }
            (_, Some(_)) => {
                tracing::warn!(question = %q.id, "options ignored on a non-MCQ question");
            }
            (_, None) => {}
        }
    }
    Ok(())
}

fn check_videos(videos: &[Video]) {
    for v in videos {
        if url::Url::parse(&v.thumbnail).is_err() {
            tracing::warn!(video = %v.id, "thumbnail is not a valid URL");
        }
    }
}
