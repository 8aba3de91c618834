use scope_task::TaskDescription;
use scope_workspace::FileRecord;
use serde::{Deserialize, Serialize};

/// Points awarded per scope keyword
pub struct ScoreWeights;

impl ScoreWeights {
    /// Keyword inside the file name
    pub const BASE_NAME: u32 = 10;
    /// Keyword anywhere in the path, on top of a base-name hit
    pub const PATH: u32 = 5;
    /// Keyword inside at least one import specifier
    pub const IMPORT: u32 = 3;
    /// Keyword inside at least one export name
    pub const EXPORT: u32 = 3;
}

/// A file together with its relevance score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredFile {
    pub file: FileRecord,
    pub score: u32,
}

/// Keyword relevance of `file` for `task`; all comparisons are case-folded
pub fn score(file: &FileRecord, task: &TaskDescription) -> u32 {
    let base_name = file.file_name().to_lowercase();
    let full_path = file.path.to_string_lossy().to_lowercase();
    let imports: Vec<String> = file.imports.iter().map(|i| i.to_lowercase()).collect();
    let exports: Vec<String> = file.exports.iter().map(|e| e.to_lowercase()).collect();

    task.scope
        .iter()
        .map(|keyword| keyword.to_lowercase())
        .map(|keyword| {
            let mut points = 0;
            if base_name.contains(&keyword) {
                points += ScoreWeights::BASE_NAME;
            }
            if full_path.contains(&keyword) {
                points += ScoreWeights::PATH;
            }
            if imports.iter().any(|i| i.contains(&keyword)) {
                points += ScoreWeights::IMPORT;
            }
            if exports.iter().any(|e| e.contains(&keyword)) {
                points += ScoreWeights::EXPORT;
            }
            points
        })
        .sum()
}

/// Files with a non-zero score, best first; ties keep discovery order.
///
/// When the task has no scope keywords or nothing scores, every file is
/// returned unranked.
pub fn rank(files: &[FileRecord], task: &TaskDescription) -> Vec<FileRecord> {
    rank_scored(files, task)
        .into_iter()
        .map(|scored| scored.file)
        .collect()
}

/// [`rank`] with the scores attached
pub fn rank_scored(files: &[FileRecord], task: &TaskDescription) -> Vec<ScoredFile> {
    let mut scored: Vec<ScoredFile> = files
        .iter()
        .map(|file| ScoredFile {
            score: score(file, task),
            file: file.clone(),
        })
        .collect();

    if task.scope.is_empty() || scored.iter().all(|s| s.score == 0) {
        log::debug!(
            "No scope match for {} files, returning them unranked",
            files.len()
        );
        return scored;
    }

    scored.retain(|s| s.score > 0);
    // stable: equal scores stay in discovery order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scope_task::Intent;
    use scope_workspace::FileKind;
    use std::path::PathBuf;

    fn record(path: &str, imports: &[&str], exports: &[&str]) -> FileRecord {
        FileRecord {
            path: PathBuf::from(path),
            kind: FileKind::from_path(path),
            size_bytes: 1,
            imports: imports.iter().map(|s| s.to_string()).collect(),
            exports: exports.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn task(scope: &[&str]) -> TaskDescription {
        TaskDescription {
            title: "t".to_string(),
            description: "t".to_string(),
            intent: Intent::Feature,
            scope: scope.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn base_name_hit_also_counts_as_path_hit() {
        let file = record("/w/src/cache.ts", &[], &[]);
        assert_eq!(score(&file, &task(&["cache"])), 15);
    }

    #[test]
    fn directory_only_hit_scores_path_weight() {
        let file = record("/w/src/cache/index.ts", &[], &[]);
        assert_eq!(score(&file, &task(&["cache"])), 5);
    }

    #[test]
    fn imports_and_exports_count_once_per_keyword() {
        let file = record(
            "/w/src/index.ts",
            &["./store", "../store/utils"],
            &["createStore", "StoreProvider"],
        );
        assert_eq!(score(&file, &task(&["store"])), 6);
    }

    #[test]
    fn keywords_accumulate_and_ignore_case() {
        let file = record("/w/src/Auth/Session.ts", &["./token"], &[]);
        assert_eq!(score(&file, &task(&["SESSION", "Token", "auth"])), 15 + 3 + 5);
    }

    #[test]
    fn base_name_beats_import_only() {
        let by_name = record("/w/src/router.ts", &[], &[]);
        let by_import = record("/w/src/app.ts", &["./router-utils"], &[]);
        // keep the import-only file first to prove sorting
        let ranked = rank_scored(&[by_import.clone(), by_name.clone()], &task(&["router"]));
        assert_eq!(ranked[0].file, by_name);
        assert_eq!(ranked[0].score, 15);
        assert_eq!(ranked[1].file, by_import);
        assert_eq!(ranked[1].score, 3);
    }

    #[test]
    fn zero_scores_are_dropped() {
        let files = vec![
            record("/w/a.ts", &[], &[]),
            record("/w/parser.ts", &[], &[]),
            record("/w/b.ts", &[], &[]),
        ];
        let ranked = rank(&files, &task(&["parser"]));
        assert_eq!(ranked, vec![files[1].clone()]);
    }

    #[test]
    fn ties_keep_discovery_order() {
        let files = vec![
            record("/w/z_auth.ts", &[], &[]),
            record("/w/a_auth.ts", &[], &[]),
            record("/w/m_auth.ts", &[], &[]),
        ];
        assert_eq!(rank(&files, &task(&["auth"])), files);
    }

    #[test]
    fn empty_scope_returns_input_unchanged() {
        let files = vec![record("/w/b.ts", &[], &[]), record("/w/a.ts", &[], &[])];
        assert_eq!(rank(&files, &task(&[])), files);
    }

    #[test]
    fn all_zero_scores_fall_back_to_full_list() {
        let files = vec![record("/w/b.ts", &[], &[]), record("/w/a.ts", &[], &[])];
        let ranked = rank_scored(&files, &task(&["nothing"]));
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|s| s.score == 0));
        assert_eq!(ranked[0].file, files[0]);
    }
}
