use crate::config::EngineConfig;
use crate::error::Result;
use crate::relevance::{rank, rank_scored, ScoredFile};
use scope_structure::CodeStructure;
use scope_task::TaskDescription;
use scope_workspace::{AnalysisStats, FileRecord, WorkspaceAnalysis, WorkspaceAnalyzer};
use std::path::Path;
use std::sync::Arc;

/// Entry point for callers: workspace analysis, task parsing and ranking
pub struct ScopeEngine {
    analyzer: WorkspaceAnalyzer,
}

impl ScopeEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let mut builder = WorkspaceAnalyzer::builder().config(config.analyzer);
        if let Some(root) = config.workspace_root {
            builder = builder.default_root(root);
        }
        Ok(Self {
            analyzer: builder.build()?,
        })
    }

    pub async fn analyze_workspace(&self, root: Option<&Path>) -> Result<Arc<WorkspaceAnalysis>> {
        Ok(self.analyzer.analyze(root).await?)
    }

    /// Workspace files ranked by relevance to `task`
    pub async fn find_relevant_files(
        &self,
        task: &TaskDescription,
        root: Option<&Path>,
    ) -> Result<Vec<FileRecord>> {
        let analysis = self.analyzer.analyze(root).await?;
        let ranked = rank(&analysis.files, task);
        log::debug!(
            "Ranked {} of {} files for {:?} task",
            ranked.len(),
            analysis.files.len(),
            task.intent
        );
        Ok(ranked)
    }

    /// [`Self::find_relevant_files`] with scores attached
    pub async fn find_relevant_scored(
        &self,
        task: &TaskDescription,
        root: Option<&Path>,
    ) -> Result<Vec<ScoredFile>> {
        let analysis = self.analyzer.analyze(root).await?;
        Ok(rank_scored(&analysis.files, task))
    }

    pub fn parse_task_description(&self, raw: &str) -> Result<TaskDescription> {
        Ok(scope_task::parse_task_description(raw)?)
    }

    pub async fn clear_cache(&self) {
        self.analyzer.invalidate().await;
    }

    /// Structure of one file; fails loudly for missing or unparsable files
    pub async fn analyze_file(&self, path: &Path) -> Result<CodeStructure> {
        Ok(self.analyzer.analyze_file(path).await?)
    }

    pub async fn read_file(&self, path: &Path) -> Result<String> {
        Ok(self.analyzer.read_file(path).await?)
    }

    pub async fn last_stats(&self) -> Option<AnalysisStats> {
        self.analyzer.last_stats().await
    }
}
