//! Domain models shared across the ragmail crates.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Embedding vector representation.
pub type Vector = Vec<f32>;

/// Semantic role of a corpus unit's source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusSource {
    Projects,
    Achievements,
    ResearchInterests,
    Skills,
    Coursework,
}

impl std::fmt::Display for CorpusSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Projects => write!(f, "projects"),
            Self::Achievements => write!(f, "achievements"),
            Self::ResearchInterests => write!(f, "research_interests"),
            Self::Skills => write!(f, "skills"),
            Self::Coursework => write!(f, "coursework"),
        }
    }
}

/// Metadata attached to a corpus unit.
///
/// Project units carry id/title/kind/domains/keywords (and links when the
/// source record has any); background units carry only the source tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusMetadata {
    pub source: CorpusSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
}

impl CorpusMetadata {
    /// Metadata for a background text unit (source tag only).
    pub fn background(source: CorpusSource) -> Self {
        Self {
            source,
            project_id: None,
            title: None,
            kind: None,
            domains: Vec::new(),
            keywords: Vec::new(),
            links: Vec::new(),
        }
    }
}

/// One indexable unit of text plus its metadata.
///
/// Immutable once built: one unit per project record, one per background
/// file. The text of a project unit is a dense rendering tuned for embedding
/// quality, not for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusUnit {
    pub text: String,
    pub metadata: CorpusMetadata,
}

/// A portfolio project as stored in `projects.json`.
///
/// Every field except `github` and `demo` is required; a record missing a
/// required field fails corpus loading outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub domain: Vec<String>,
    pub technologies: Vec<String>,
    pub description: String,
    pub detailed_description: String,
    pub impact: String,
    pub key_features: Vec<String>,
    pub research_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
}

/// Read-only catalog entry for display purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub title: String,
    pub domain: Vec<String>,
    pub description: String,
}

/// The chosen candidate plus model-generated justification.
///
/// `relevance_score` is `None` on the forced-project path, where no score is
/// computed by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub project_id: String,
    pub project_title: String,
    pub alignment_explanation: String,
    pub key_technologies: Vec<String>,
    pub relevance_score: Option<u8>,
    pub source_document: CorpusUnit,
}

/// Which of the three fixed email structures was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateType {
    /// No paper reference given.
    Generic,
    /// Paper reference without a forced project.
    PaperGeneric,
    /// Paper reference with an explicitly forced project.
    PaperSpecific,
}

impl TemplateType {
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Generic => 1,
            Self::PaperGeneric => 2,
            Self::PaperSpecific => 3,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Generic),
            2 => Some(Self::PaperGeneric),
            3 => Some(Self::PaperSpecific),
            _ => None,
        }
    }
}

impl Serialize for TemplateType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for TemplateType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Self::from_u8(value)
            .ok_or_else(|| de::Error::custom(format!("invalid template type: {}", value)))
    }
}

impl std::fmt::Display for TemplateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Relevance score echoed in email metadata: the model's 1-10 rating, or
/// "N/A" when no score was computed (forced-project path).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelevanceScore {
    Scored(u8),
    NotApplicable,
}

impl From<Option<u8>> for RelevanceScore {
    fn from(score: Option<u8>) -> Self {
        match score {
            Some(s) => Self::Scored(s),
            None => Self::NotApplicable,
        }
    }
}

impl Serialize for RelevanceScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Scored(s) => serializer.serialize_u8(*s),
            Self::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

impl std::fmt::Display for RelevanceScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scored(s) => write!(f, "{}", s),
            Self::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// Metadata echoed alongside a generated email.
#[derive(Debug, Clone, Serialize)]
pub struct EmailMetadata {
    pub template_type: TemplateType,
    pub selected_project: String,
    pub relevance_score: RelevanceScore,
}

/// A generated email, returned to the caller and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
    pub metadata: EmailMetadata,
}

/// Inputs for a single email-generation request.
#[derive(Debug, Clone)]
pub struct EmailRequest {
    pub professor_name: String,
    pub university_name: String,
    pub research_domain: String,
    pub paper_title: Option<String>,
    pub paper_summary: Option<String>,
    /// Project id or title to use instead of model selection.
    pub force_project: Option<String>,
}

impl EmailRequest {
    pub fn new(
        professor_name: impl Into<String>,
        university_name: impl Into<String>,
        research_domain: impl Into<String>,
    ) -> Self {
        Self {
            professor_name: professor_name.into(),
            university_name: university_name.into(),
            research_domain: research_domain.into(),
            paper_title: None,
            paper_summary: None,
            force_project: None,
        }
    }
}
