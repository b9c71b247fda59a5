//! Loading of project records and background text files.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use ragmail_core::defaults::PROJECTS_FILE;
use ragmail_core::{
    CorpusMetadata, CorpusSource, CorpusUnit, Error, ProjectRecord, ProjectSummary, Result,
};

use crate::render::render_project;

/// Background files in their fixed declared order. Each becomes one corpus
/// unit whose metadata source tag equals the file's semantic role.
pub const BACKGROUND_FILES: [(&str, CorpusSource); 4] = [
    ("achievements.txt", CorpusSource::Achievements),
    ("research_interests.txt", CorpusSource::ResearchInterests),
    ("skills.txt", CorpusSource::Skills),
    ("coursework.txt", CorpusSource::Coursework),
];

/// Loads and prepares corpus units from a data directory.
pub struct CorpusLoader {
    data_dir: PathBuf,
}

impl CorpusLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the raw project records from `projects.json`.
    pub fn load_projects(&self) -> Result<Vec<ProjectRecord>> {
        let path = self.data_dir.join(PROJECTS_FILE);
        let raw = read_required(&path)?;

        let projects: Vec<ProjectRecord> = serde_json::from_str(&raw).map_err(|e| {
            Error::CorpusLoad(format!("malformed {}: {}", path.display(), e))
        })?;

        debug!(project_count = projects.len(), "Loaded project records");
        Ok(projects)
    }

    /// Read-only catalog of all projects, for display purposes only.
    pub fn project_summaries(&self) -> Result<Vec<ProjectSummary>> {
        let projects = self.load_projects()?;
        Ok(projects
            .into_iter()
            .map(|p| ProjectSummary {
                id: p.id,
                title: p.title,
                domain: p.domain,
                description: p.description,
            })
            .collect())
    }

    /// Build the full corpus: projects first (in source order), then the
    /// background files in their fixed declared order.
    pub fn build(&self) -> Result<Vec<CorpusUnit>> {
        let projects = self.load_projects()?;

        let mut units = Vec::with_capacity(projects.len() + BACKGROUND_FILES.len());
        for project in &projects {
            units.push(project_unit(project));
        }
        for (filename, source) in BACKGROUND_FILES {
            units.push(self.background_unit(filename, source)?);
        }

        info!(
            unit_count = units.len(),
            project_count = projects.len(),
            "Corpus built"
        );
        Ok(units)
    }

    fn background_unit(&self, filename: &str, source: CorpusSource) -> Result<CorpusUnit> {
        let path = self.data_dir.join(filename);
        let text = read_required(&path)?;

        Ok(CorpusUnit {
            text,
            metadata: CorpusMetadata::background(source),
        })
    }
}

fn read_required(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| Error::CorpusLoad(format!("cannot read {}: {}", path.display(), e)))
}

fn project_unit(project: &ProjectRecord) -> CorpusUnit {
    let mut links = Vec::new();
    if let Some(github) = &project.github {
        links.push(github.clone());
    }
    if let Some(demo) = &project.demo {
        links.push(demo.clone());
    }

    CorpusUnit {
        text: render_project(project),
        metadata: CorpusMetadata {
            source: CorpusSource::Projects,
            project_id: Some(project.id.clone()),
            title: Some(project.title.clone()),
            kind: Some(project.kind.clone()),
            domains: project.domain.clone(),
            keywords: project.research_keywords.clone(),
            links,
        },
    }
}
