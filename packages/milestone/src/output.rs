//! Writing split segments to disk.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::OUTPUT_EXTENSION;
use crate::error::{MilestoneError, Result};
use crate::splitting::SegmentMap;

/// Files written for one input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenSegments {
    /// Per-input subdirectory holding the segment files.
    pub directory: PathBuf,

    /// Segment files in document order.
    pub files: Vec<PathBuf>,
}

/// Name of the subdirectory for an input file: its base name without extension.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use milestone::output::subdirectory_name;
///
/// assert_eq!(subdirectory_name(Path::new("books/myfile.xml")), "myfile");
/// assert_eq!(subdirectory_name(Path::new("archive.tei.xml")), "archive.tei");
/// ```
pub fn subdirectory_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Make a milestone name safe to use as a file stem.
///
/// Path separators are replaced so an attribute value such as `12/13`
/// cannot write outside the per-input directory.
///
/// # Examples
/// ```
/// use milestone::output::sanitize_file_stem;
///
/// assert_eq!(sanitize_file_stem("iv"), "iv");
/// assert_eq!(sanitize_file_stem("12/13"), "12_13");
/// assert_eq!(sanitize_file_stem(".."), "_");
/// ```
pub fn sanitize_file_stem(name: &str) -> String {
    if name.is_empty() || name.chars().all(|c| c == '.') {
        return "_".to_string();
    }
    name.chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            _ => c,
        })
        .collect()
}

/// Path of the file for one segment.
pub fn segment_path(directory: &Path, name: &str) -> PathBuf {
    directory.join(format!("{}.{OUTPUT_EXTENSION}", sanitize_file_stem(name)))
}

/// Create a directory (and its parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| MilestoneError::io_at(dir, e))
}

/// Write every segment of `map` to `<output_dir>/<input stem>/<name>.xml`.
///
/// Distinct names that sanitize to the same file stem (`a/b` and `a_b`) are
/// rejected with [`MilestoneError::DuplicateName`] before anything is written.
pub fn write_segments(map: &SegmentMap, input: &Path, output_dir: &Path) -> Result<WrittenSegments> {
    let directory = output_dir.join(subdirectory_name(input));

    let mut paths = Vec::with_capacity(map.len());
    let mut seen = HashSet::with_capacity(map.len());
    for segment in map {
        let path = segment_path(&directory, &segment.name);
        if !seen.insert(path.clone()) {
            return Err(MilestoneError::DuplicateName {
                name: segment.name.clone(),
            });
        }
        paths.push(path);
    }

    ensure_dir(&directory)?;

    let mut files = Vec::with_capacity(map.len());
    for (index, (segment, path)) in map.iter().zip(paths).enumerate() {
        let content = map.combined_at(index).unwrap_or_default();
        write_file(&path, &content)?;
        tracing::debug!(name = %segment.name, path = %path.display(), "Wrote segment");
        files.push(path);
    }

    Ok(WrittenSegments { directory, files })
}

/// Write through a temp file and rename, so a failed write leaves no partial file.
fn write_file(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file).map_err(|e| MilestoneError::io_at(&temp_file, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| MilestoneError::io_at(&temp_file, e))?;
        file.sync_all()
            .map_err(|e| MilestoneError::io_at(&temp_file, e))?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path).map_err(|e| MilestoneError::io_at(path, e))
}
