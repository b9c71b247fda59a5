//! Project matching: similarity retrieval plus model-driven selection and
//! paragraph generation.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use ragmail_core::defaults::{FALLBACK_RELEVANCE_SCORE, MATCH_TOP_K, PROJECT_PREVIEW_CHARS};
use ragmail_core::{CorpusUnit, Error, GenerationBackend, Result, Selection};
use ragmail_index::SemanticIndex;

const SELECTION_SYSTEM_PROMPT: &str = "\
You are an expert at matching student projects with professor research interests.
Your task is to analyze the professor's research area and select the MOST RELEVANT project from the student's portfolio.

Consider:
- Technical alignment (technologies, methods, domains)
- Research area overlap
- Demonstrated skills relevant to the professor's work
- Impact and sophistication of the project

Respond in JSON format with:
{
    \"selected_project_number\": <1-based project number>,
    \"project_title\": \"<title>\",
    \"alignment_explanation\": \"<2-3 sentences explaining why this project aligns with the professor's research>\",
    \"key_technologies\": [\"tech1\", \"tech2\", ...],
    \"relevance_score\": <1-10>
}";

const PARAGRAPH_SYSTEM_PROMPT: &str = "\
You are writing a compelling paragraph for a graduate school application email.
The paragraph should:
1. Reference the professor's research or paper naturally
2. Describe the student's relevant project in 2-3 sentences
3. Highlight the technical alignment and demonstrated skills
4. Be professional, specific, and show genuine interest
5. Use active voice and concrete details

Keep it concise (3-4 sentences max) and authentic.";

/// The model's selection reply after the single boundary parse.
///
/// Either the reply deserialized as the requested JSON shape, or the raw
/// text when it did not. Downstream code consumes both variants uniformly
/// through [`resolve_selection`]; nothing else ever re-parses the reply.
#[derive(Debug)]
pub enum ModelSelection {
    Structured(SelectionReply),
    RawText(String),
}

/// The JSON shape requested from the model during selection.
///
/// `project_title` from the reply is not captured; the title and id on the
/// resulting [`Selection`] always come from the selected candidate's own
/// metadata.
#[derive(Debug, Deserialize)]
pub struct SelectionReply {
    pub selected_project_number: usize,
    pub alignment_explanation: String,
    #[serde(default)]
    pub key_technologies: Vec<String>,
    pub relevance_score: f64,
}

/// Parse a selection reply exactly once at the boundary.
pub fn parse_selection_reply(raw: &str) -> ModelSelection {
    match serde_json::from_str::<SelectionReply>(raw.trim()) {
        Ok(reply) => ModelSelection::Structured(reply),
        Err(_) => ModelSelection::RawText(raw.to_string()),
    }
}

/// Map a parsed or unparsed reply onto a concrete candidate.
///
/// Pure function; total over non-empty candidate lists. An unparsed reply
/// deterministically selects candidate #1 with the fixed fallback score and
/// the raw reply as the explanation; a structured reply has its index and
/// score clamped into valid ranges.
pub fn resolve_selection(reply: ModelSelection, candidates: &[CorpusUnit]) -> Selection {
    match reply {
        ModelSelection::Structured(reply) => {
            let idx = reply.selected_project_number.clamp(1, candidates.len()) - 1;
            let candidate = &candidates[idx];
            let score = (reply.relevance_score.round() as i64).clamp(1, 10) as u8;

            selection_from_candidate(
                candidate,
                reply.alignment_explanation,
                reply.key_technologies,
                Some(score),
            )
        }
        ModelSelection::RawText(raw) => {
            let candidate = &candidates[0];
            let technologies = candidate.metadata.domains.clone();

            selection_from_candidate(candidate, raw, technologies, Some(FALLBACK_RELEVANCE_SCORE))
        }
    }
}

fn selection_from_candidate(
    candidate: &CorpusUnit,
    explanation: String,
    key_technologies: Vec<String>,
    relevance_score: Option<u8>,
) -> Selection {
    Selection {
        project_id: candidate.metadata.project_id.clone().unwrap_or_default(),
        project_title: candidate.metadata.title.clone().unwrap_or_default(),
        alignment_explanation: explanation,
        key_technologies,
        relevance_score,
        source_document: candidate.clone(),
    }
}

/// Matches a professor's research description against the indexed portfolio.
pub struct ProjectMatcher {
    index: Arc<SemanticIndex>,
    gen: Arc<dyn GenerationBackend>,
}

impl ProjectMatcher {
    pub fn new(index: Arc<SemanticIndex>, gen: Arc<dyn GenerationBackend>) -> Self {
        Self { index, gen }
    }

    /// Retrieve the k project units most similar to the research area,
    /// folding a recent paper title into the query when given.
    pub async fn find_matching_projects(
        &self,
        research_area: &str,
        paper_title: Option<&str>,
        k: usize,
    ) -> Result<Vec<CorpusUnit>> {
        let query = match paper_title {
            Some(title) => format!("{}. Recent paper: {}", research_area, title),
            None => research_area.to_string(),
        };

        self.index.search_projects(&query, k).await
    }

    /// Have the model pick the best candidate and justify the alignment.
    ///
    /// When `candidates` is omitted the default pool is retrieved first.
    /// Malformed model replies never fail the request; they resolve to the
    /// deterministic fallback selection.
    #[instrument(skip_all, fields(component = "matcher", op = "select_best_project"))]
    pub async fn select_best_project(
        &self,
        research_area: &str,
        paper_title: Option<&str>,
        paper_summary: Option<&str>,
        candidates: Option<Vec<CorpusUnit>>,
    ) -> Result<Selection> {
        let candidates = match candidates {
            Some(candidates) => candidates,
            None => {
                self.find_matching_projects(research_area, paper_title, MATCH_TOP_K)
                    .await?
            }
        };
        if candidates.is_empty() {
            return Err(Error::Generation(
                "no matching projects found for selection".to_string(),
            ));
        }

        let prompt = selection_prompt(research_area, paper_title, paper_summary, &candidates);
        let raw = self
            .gen
            .generate_with_system(SELECTION_SYSTEM_PROMPT, &prompt)
            .await?;

        let reply = parse_selection_reply(&raw);
        if matches!(reply, ModelSelection::RawText(_)) {
            warn!(
                response_len = raw.len(),
                "Selection reply was not valid JSON, falling back to top candidate"
            );
        }

        let selection = resolve_selection(reply, &candidates);
        debug!(
            project = %selection.project_title,
            score = ?selection.relevance_score,
            "Project selected"
        );
        Ok(selection)
    }

    /// Draft the email's alignment paragraph for the selected project.
    ///
    /// When `selection` is omitted it is computed via
    /// [`select_best_project`](Self::select_best_project). The reply is
    /// returned trimmed but otherwise verbatim; the composer treats it as
    /// opaque prose.
    #[instrument(skip_all, fields(component = "matcher", op = "generate_project_paragraph"))]
    pub async fn generate_project_paragraph(
        &self,
        professor_name: &str,
        research_area: &str,
        paper_title: Option<&str>,
        paper_summary: Option<&str>,
        selection: Option<Selection>,
    ) -> Result<String> {
        let selection = match selection {
            Some(selection) => selection,
            None => {
                self.select_best_project(research_area, paper_title, paper_summary, None)
                    .await?
            }
        };

        let prompt = paragraph_prompt(
            professor_name,
            research_area,
            paper_title,
            paper_summary,
            &selection,
        );
        let raw = self
            .gen
            .generate_with_system(PARAGRAPH_SYSTEM_PROMPT, &prompt)
            .await?;

        Ok(raw.trim().to_string())
    }
}

fn selection_prompt(
    research_area: &str,
    paper_title: Option<&str>,
    paper_summary: Option<&str>,
    candidates: &[CorpusUnit],
) -> String {
    let projects_context = candidates
        .iter()
        .enumerate()
        .map(|(i, unit)| format!("PROJECT {}:\n{}\n", i + 1, unit.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut paper_info = String::new();
    if let Some(title) = paper_title {
        paper_info = format!("Recent Paper: {}", title);
        if let Some(summary) = paper_summary {
            paper_info.push_str(&format!("\nPaper Summary: {}", summary));
        }
    }

    format!(
        "Professor's Research Area: {}\n{}\n\nAvailable Projects:\n{}\n\nSelect the best matching project and explain the alignment.",
        research_area, paper_info, projects_context
    )
}

fn paragraph_prompt(
    professor_name: &str,
    research_area: &str,
    paper_title: Option<&str>,
    paper_summary: Option<&str>,
    selection: &Selection,
) -> String {
    let mut paper_info = String::new();
    if let Some(title) = paper_title {
        paper_info = format!("Recent Paper: \"{}\"", title);
        if let Some(summary) = paper_summary {
            paper_info.push_str(&format!("\n{}", summary));
        }
    }

    let text = &selection.source_document.text;
    let preview_end = text
        .char_indices()
        .nth(PROJECT_PREVIEW_CHARS)
        .map_or(text.len(), |(i, _)| i);
    let project_details = &text[..preview_end];

    format!(
        "Professor: Dr. {}\nProfessor's Research: {}\n{}\n\nStudent's Selected Project:\nTitle: {}\n{}\n\nAlignment Reasoning: {}\n\nWrite a compelling paragraph connecting this project to the professor's work.",
        professor_name,
        research_area,
        paper_info,
        selection.project_title,
        project_details,
        selection.alignment_explanation
    )
}
