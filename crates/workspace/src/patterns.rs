use crate::analyzer::extract_structure;
use crate::pool::map_ordered;
use crate::reader::FileReader;
use crate::types::{relative_location, CodePattern, FileRecord, PatternKind};
use scope_structure::SourceParser;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Builds the pattern index from already-analyzed files.
///
/// Every source file is read and parsed again; a file that fails here only
/// loses its own patterns.
pub struct PatternCollector {
    reader: Arc<dyn FileReader>,
    parser: Arc<dyn SourceParser>,
    max_concurrency: usize,
}

impl PatternCollector {
    pub fn new(
        reader: Arc<dyn FileReader>,
        parser: Arc<dyn SourceParser>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            reader,
            parser,
            max_concurrency,
        }
    }

    /// Functions then classes per file, files in the given order
    pub async fn collect(&self, root: &Path, files: &[FileRecord]) -> Vec<CodePattern> {
        let sources: Vec<PathBuf> = files
            .iter()
            .filter(|f| f.kind.is_source())
            .map(|f| f.path.clone())
            .collect();

        let root = root.to_path_buf();
        let per_file = map_ordered(sources, self.max_concurrency, |path| {
            let reader = self.reader.clone();
            let parser = self.parser.clone();
            let root = root.clone();
            async move { patterns_for(reader, parser, &root, path).await }
        })
        .await;

        let patterns: Vec<CodePattern> = per_file.into_iter().flatten().flatten().collect();
        log::debug!("Collected {} patterns", patterns.len());
        patterns
    }
}

async fn patterns_for(
    reader: Arc<dyn FileReader>,
    parser: Arc<dyn SourceParser>,
    root: &Path,
    path: PathBuf,
) -> Vec<CodePattern> {
    let source = match reader.read_to_string(&path).await {
        Ok(source) => source,
        Err(e) => {
            log::warn!("Pattern pass skipped {}: {e}", path.display());
            return Vec::new();
        }
    };

    let structure = match extract_structure(parser, source, &path).await {
        Ok(structure) => structure,
        Err(e) => {
            log::warn!("Pattern pass skipped {}: {e}", path.display());
            return Vec::new();
        }
    };

    let location = relative_location(root, &path);
    let functions = structure.functions.into_iter().map(|f| CodePattern {
        kind: PatternKind::Function,
        name: f.name,
        location: location.clone(),
    });
    let classes = structure.classes.into_iter().map(|c| CodePattern {
        kind: PatternKind::Class,
        name: c.name,
        location: location.clone(),
    });
    functions.chain(classes).collect()
}
