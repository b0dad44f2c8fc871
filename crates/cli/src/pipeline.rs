//! Batch comparison of two directory trees.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use linediff_core::{compare_strings, flatten_position_changes, position_changes, Chunk, CompareConfig};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

/// How a file differs between the two trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Removed,
    Modified,
    Unchanged,
}

/// Comparison result for one relative path.
#[derive(Debug, Serialize)]
pub struct FileResult {
    pub path: String,
    pub status: FileStatus,
    pub chunks: Vec<Chunk>,
    pub position_changes: Vec<usize>,
}

/// Totals over a batch run.
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub total_files: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub total_chunks: usize,
}

/// Discover all files under `root`, as paths relative to it.
pub fn discover_files(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.path().strip_prefix(root).ok().map(Path::to_path_buf))
        .collect();
    paths.sort();
    paths
}

fn read_if_present(path: &Path) -> std::io::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Compare the file at `relative` in both trees.
pub fn compare_file(
    old_root: &Path,
    new_root: &Path,
    relative: &Path,
    config: &CompareConfig,
) -> Result<FileResult, Box<dyn std::error::Error + Send + Sync>> {
    let old = read_if_present(&old_root.join(relative))?;
    let new = read_if_present(&new_root.join(relative))?;

    let status = match (&old, &new) {
        (None, _) => FileStatus::Added,
        (_, None) => FileStatus::Removed,
        (Some(old), Some(new)) if old == new => FileStatus::Unchanged,
        _ => FileStatus::Modified,
    };

    let chunks = compare_strings(
        old.as_deref().unwrap_or(""),
        new.as_deref().unwrap_or(""),
        config,
    )?;

    Ok(FileResult {
        path: relative.to_string_lossy().to_string(),
        status,
        position_changes: flatten_position_changes(&position_changes(&chunks)),
        chunks,
    })
}

/// Compare every file present in either tree, in parallel.
///
/// Files that fail to read or compare are logged and counted in the summary.
pub fn compare_trees(
    old_root: &Path,
    new_root: &Path,
    config: &CompareConfig,
) -> (Vec<FileResult>, BatchSummary) {
    let relative_paths: BTreeSet<PathBuf> = discover_files(old_root)
        .into_iter()
        .chain(discover_files(new_root))
        .collect();

    let total_files = relative_paths.len();
    let processed_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    let results: Vec<FileResult> = relative_paths
        .into_par_iter()
        .filter_map(|relative| {
            let result = compare_file(old_root, new_root, &relative, config);
            let count = processed_count.fetch_add(1, Ordering::Relaxed) + 1;
            if count % 100 == 0 || count == total_files {
                tracing::info!(count, total_files, "compared files");
            }

            match result {
                Ok(file_result) => Some(file_result),
                Err(e) => {
                    error_count.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(path = %relative.display(), error = %e, "failed to compare file");
                    None
                }
            }
        })
        .collect();

    let mut summary = BatchSummary {
        total_files,
        failed: error_count.load(Ordering::Relaxed),
        ..Default::default()
    };
    for result in &results {
        match result.status {
            FileStatus::Added => summary.added += 1,
            FileStatus::Removed => summary.removed += 1,
            FileStatus::Modified => summary.modified += 1,
            FileStatus::Unchanged => summary.unchanged += 1,
        }
        summary.total_chunks += result.chunks.len();
    }
    if summary.failed > 0 {
        tracing::warn!(failed = summary.failed, "some files failed to compare");
    }

    (results, summary)
}

/// Write one JSON line per changed file.
pub fn write_jsonl_output(results: &[FileResult], output: &Path) -> Result<usize, Box<dyn std::error::Error>> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = BufWriter::new(File::create(output)?);

    let mut written = 0;
    for result in results.iter().filter(|r| r.status != FileStatus::Unchanged) {
        writeln!(file, "{}", serde_json::to_string(result)?)?;
        written += 1;
    }
    file.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_discover_files() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.txt", "a\n");
        write(temp.path(), "subdir/b.txt", "b\n");

        let files = discover_files(temp.path());
        assert_eq!(files, vec![PathBuf::from("a.txt"), PathBuf::from("subdir/b.txt")]);
    }

    #[test]
    fn test_compare_trees() {
        let old = TempDir::new().unwrap();
        let new = TempDir::new().unwrap();
        write(old.path(), "same.txt", "same\n");
        write(new.path(), "same.txt", "same\n");
        write(old.path(), "edit.js", "const x = 1;\n");
        write(new.path(), "edit.js", "const x = 2;\n");
        write(old.path(), "gone.txt", "bye");
        write(new.path(), "src/new.txt", "hello");

        let (mut results, summary) = compare_trees(old.path(), new.path(), &CompareConfig::default());
        results.sort_by(|a, b| a.path.cmp(&b.path));

        assert_eq!(summary.total_files, 4);
        assert_eq!((summary.added, summary.removed, summary.modified, summary.unchanged), (1, 1, 1, 1));
        assert_eq!(summary.failed, 0);

        let edit = results.iter().find(|r| r.path == "edit.js").unwrap();
        assert_eq!(edit.chunks, vec![Chunk::new(10, 1, 10, 1)]);
        assert_eq!(edit.position_changes, vec![10, 11, 11]);

        let gone = results.iter().find(|r| r.path == "gone.txt").unwrap();
        assert_eq!(gone.status, FileStatus::Removed);
        assert_eq!(gone.chunks, vec![Chunk::new(0, 3, 0, 0)]);
    }

    #[test]
    fn test_write_jsonl_skips_unchanged() {
        let old = TempDir::new().unwrap();
        let new = TempDir::new().unwrap();
        write(old.path(), "same.txt", "same");
        write(new.path(), "same.txt", "same");
        write(new.path(), "added.txt", "abc");

        let (results, _) = compare_trees(old.path(), new.path(), &CompareConfig::default());
        let out = TempDir::new().unwrap();
        let output = out.path().join("diffs.jsonl");
        assert_eq!(write_jsonl_output(&results, &output).unwrap(), 1);

        let contents = std::fs::read_to_string(&output).unwrap();
        let record: serde_json::Value = serde_json::from_str(contents.trim()).unwrap();
        assert_eq!(record["path"], "added.txt");
        assert_eq!(record["status"], "added");
        assert_eq!(record["position_changes"], serde_json::json!([0, 0, 3]));
    }
}
