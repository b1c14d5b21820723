use std::path::{Path, PathBuf};

use walkdir::WalkDir;

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Expand CLI sequence inputs: plain files pass through as given,
/// directories are walked recursively with hidden entries skipped.
pub fn expand_sequence_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
        } else {
            let walker = WalkDir::new(input).into_iter();
            for entry in walker.filter_map(|e| e.ok()) {
                if entry.file_type().is_file() && !is_hidden(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        }
    }
    files
}
