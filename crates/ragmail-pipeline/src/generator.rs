//! The caller-owned email generator handle.
//!
//! Constructed once at startup and injected into request handling; there is
//! no process-wide instance. Lifecycle: [`EmailGenerator::new`] (validates
//! configuration and constructs backends), then either
//! [`EmailGenerator::load_index`] on the request-serving path or
//! [`EmailGenerator::build_index`] from the offline initializer.

use std::sync::Arc;

use tracing::{info, instrument};

use ragmail_core::defaults::{FORCED_MATCH_TOP_K, MATCH_TOP_K};
use ragmail_core::{
    CorpusUnit, EmailDraft, EmailMetadata, EmailRequest, EmbeddingBackend, Error,
    GenerationBackend, GeneratorConfig, ProjectSummary, Result, Selection,
};
use ragmail_corpus::CorpusLoader;
use ragmail_index::SemanticIndex;
use ragmail_inference::{GroqBackend, GroqConfig, OllamaBackend, OllamaConfig};

use crate::composer;
use crate::matcher::ProjectMatcher;

/// Explanation attached when the caller forces a specific project.
const FORCED_EXPLANATION: &str = "Specifically requested project";

/// Generates personalized outreach emails from the indexed portfolio.
pub struct EmailGenerator {
    config: GeneratorConfig,
    loader: CorpusLoader,
    embed: Arc<dyn EmbeddingBackend>,
    gen: Arc<dyn GenerationBackend>,
    matcher: Option<ProjectMatcher>,
}

impl std::fmt::Debug for EmailGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailGenerator")
            .field("config", &self.config)
            .field("matcher", &self.matcher.is_some())
            .finish_non_exhaustive()
    }
}

impl EmailGenerator {
    /// Create a generator with the real backends described by the config.
    ///
    /// Fails fast on invalid configuration; no network traffic happens here.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let embed = Arc::new(OllamaBackend::new(OllamaConfig {
            base_url: config.ollama_base_url.clone(),
            model: config.embed_model.clone(),
            dimension: config.embed_dimension,
            timeout_secs: config.embed_timeout_secs,
        })?);
        let gen = Arc::new(GroqBackend::new(GroqConfig {
            base_url: config.groq_base_url.clone(),
            api_key: config.groq_api_key.clone(),
            model: config.gen_model.clone(),
            timeout_secs: config.gen_timeout_secs,
            temperature: config.gen_temperature,
        })?);

        Ok(Self::with_backends(config, embed, gen))
    }

    /// Create a generator with caller-supplied backends.
    pub fn with_backends(
        config: GeneratorConfig,
        embed: Arc<dyn EmbeddingBackend>,
        gen: Arc<dyn GenerationBackend>,
    ) -> Self {
        let loader = CorpusLoader::new(&config.data_dir);
        Self {
            config,
            loader,
            embed,
            gen,
            matcher: None,
        }
    }

    /// Whether the generator can serve requests.
    pub fn is_ready(&self) -> bool {
        self.matcher.is_some()
    }

    /// Attach to the persisted index. [`Error::IndexNotFound`] means the
    /// offline build has never run.
    pub async fn load_index(&mut self) -> Result<()> {
        let mut index = SemanticIndex::new(&self.config.index_path, self.embed.clone());
        index.load().await?;
        self.attach(index);
        Ok(())
    }

    /// Offline initializer: build the corpus, embed it, and persist the
    /// index, replacing any prior one. Returns the number of indexed units.
    ///
    /// This is a long-running operation and must not run on the
    /// request-serving path.
    pub async fn build_index(&mut self) -> Result<usize> {
        let corpus = self.loader.build()?;

        let mut index = SemanticIndex::new(&self.config.index_path, self.embed.clone());
        index.build(&corpus).await?;
        let count = index.len();
        self.attach(index);
        Ok(count)
    }

    fn attach(&mut self, index: SemanticIndex) {
        self.matcher = Some(ProjectMatcher::new(Arc::new(index), self.gen.clone()));
    }

    /// Read-only project catalog for display purposes, independent of the
    /// matching pipeline (works before the index is loaded).
    pub fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        self.loader.project_summaries()
    }

    /// Generate one email.
    #[instrument(skip(self, request), fields(component = "generator", op = "generate_email"))]
    pub async fn generate_email(&self, request: &EmailRequest) -> Result<EmailDraft> {
        let matcher = self.matcher.as_ref().ok_or(Error::GeneratorNotReady)?;

        let has_paper = request.paper_title.is_some();
        let template = composer::select_template(has_paper, request.force_project.is_some());

        let selection = match &request.force_project {
            Some(forced) => {
                // Still retrieve a ranked pool; the forced project is looked
                // up inside it, and an unknown identifier falls back to the
                // normal selection flow over that same pool.
                let pool = matcher
                    .find_matching_projects(
                        &request.research_domain,
                        request.paper_title.as_deref(),
                        FORCED_MATCH_TOP_K,
                    )
                    .await?;

                match find_forced(&pool, forced) {
                    Some(unit) => forced_selection(unit),
                    None => {
                        matcher
                            .select_best_project(
                                &request.research_domain,
                                request.paper_title.as_deref(),
                                request.paper_summary.as_deref(),
                                Some(pool),
                            )
                            .await?
                    }
                }
            }
            None => {
                let pool = matcher
                    .find_matching_projects(
                        &request.research_domain,
                        request.paper_title.as_deref(),
                        MATCH_TOP_K,
                    )
                    .await?;
                matcher
                    .select_best_project(
                        &request.research_domain,
                        request.paper_title.as_deref(),
                        request.paper_summary.as_deref(),
                        Some(pool),
                    )
                    .await?
            }
        };

        let display_name = strip_honorifics(&request.professor_name);
        let paragraph = matcher
            .generate_project_paragraph(
                &display_name,
                &request.research_domain,
                request.paper_title.as_deref(),
                request.paper_summary.as_deref(),
                Some(selection.clone()),
            )
            .await?;

        let body = composer::compose_body(
            template,
            &request.professor_name,
            &request.university_name,
            &request.research_domain,
            request.paper_title.as_deref(),
            request.paper_summary.as_deref(),
            &paragraph,
        );

        info!(
            template_type = template.as_u8(),
            selected_project = %selection.project_title,
            "Email generated"
        );

        Ok(EmailDraft {
            subject: composer::SUBJECT.to_string(),
            body,
            metadata: EmailMetadata {
                template_type: template,
                selected_project: selection.project_title,
                relevance_score: selection.relevance_score.into(),
            },
        })
    }
}

/// Scan the candidate pool for an exact id or case-insensitive title match.
fn find_forced<'a>(pool: &'a [CorpusUnit], forced: &str) -> Option<&'a CorpusUnit> {
    pool.iter().find(|unit| {
        unit.metadata.project_id.as_deref() == Some(forced)
            || unit
                .metadata
                .title
                .as_deref()
                .is_some_and(|title| title.eq_ignore_ascii_case(forced))
    })
}

/// Selection for an explicitly forced project: no model involvement, so no
/// relevance score is computed.
fn forced_selection(unit: &CorpusUnit) -> Selection {
    Selection {
        project_id: unit.metadata.project_id.clone().unwrap_or_default(),
        project_title: unit.metadata.title.clone().unwrap_or_default(),
        alignment_explanation: FORCED_EXPLANATION.to_string(),
        key_technologies: unit.metadata.domains.clone(),
        relevance_score: None,
        source_document: unit.clone(),
    }
}

fn strip_honorifics(name: &str) -> String {
    name.replace("Dr. ", "").replace("Professor ", "")
}
