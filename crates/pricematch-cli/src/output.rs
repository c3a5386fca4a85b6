//! Writing run artifacts without leaving partial files behind.

use std::path::{Path, PathBuf};

use anyhow::Context;

pub(crate) const STANDARDIZED_FILE: &str = "standardized_products.json";
pub(crate) const REPORT_FILE: &str = "comparison_report.json";

/// Write every `(file name, bytes)` artifact into `dir`.
///
/// All artifacts are first written to hidden temporary files; they are renamed
/// into place, in order, only once every write has succeeded. Callers pass the
/// report last, so a report on disk implies the rest of its run is too. If a
/// rename fails, the artifacts already moved into place are removed along with
/// the remaining temporary files, so no run leaves a partial set behind.
///
/// # Errors
///
/// Returns an error naming the file if the directory cannot be created or an
/// artifact cannot be written or renamed.
pub(crate) fn write_artifacts(dir: &Path, artifacts: &[(&str, Vec<u8>)]) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(artifacts.len());
    for (name, bytes) in artifacts {
        let tmp = dir.join(format!(".{name}.tmp"));
        let dest = dir.join(name);
        if let Err(e) = std::fs::write(&tmp, bytes) {
            remove_temps(staged.iter().map(|(t, _)| t.as_path()).chain([tmp.as_path()]));
            return Err(e).with_context(|| format!("failed to write {}", dest.display()));
        }
        staged.push((tmp, dest));
    }

    for (idx, (tmp, dest)) in staged.iter().enumerate() {
        if let Err(e) = std::fs::rename(tmp, dest) {
            remove_temps(staged[idx..].iter().map(|(t, _)| t.as_path()));
            remove_temps(staged[..idx].iter().map(|(_, d)| d.as_path()));
            return Err(e).with_context(|| format!("failed to move {} into place", dest.display()));
        }
        tracing::debug!(path = %dest.display(), "wrote artifact");
    }

    Ok(())
}

fn remove_temps<'a>(paths: impl Iterator<Item = &'a Path>) {
    for path in paths {
        if let Err(e) = std::fs::remove_file(path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove partial artifact");
            }
        }
    }
}
