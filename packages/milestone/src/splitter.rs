//! Splitter service that runs the segmentation over input files.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Document;

use crate::config::{OutputMode, SplitOptions};
use crate::error::{MilestoneError, Result};
use crate::output::{write_segments, WrittenSegments};
use crate::splitting::{parsing_options, split_document, SegmentMap};

/// Result of processing one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Split mode: segment files were written.
    Written(WrittenSegments),
    /// Transform mode: the transformed document.
    Transformed(String),
}

/// Splits input files at milestone elements with one set of options.
///
/// Every file gets a fresh segmentation; nothing carries over between files.
#[derive(Debug, Clone)]
pub struct Splitter {
    options: SplitOptions,
}

impl Splitter {
    /// Create a splitter, validating the options.
    pub fn new(options: SplitOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    /// Process all inputs in order.
    ///
    /// Returns the concatenated transform output (each file followed by a
    /// newline) in transform mode, and `None` in split mode.
    pub fn split_files<P: AsRef<Path>>(&self, inputs: &[P]) -> Result<Option<String>> {
        self.split_files_with(inputs, |_, _| {})
    }

    /// Like [`Splitter::split_files`], calling `on_file` after each file is processed.
    pub fn split_files_with<P, F>(&self, inputs: &[P], mut on_file: F) -> Result<Option<String>>
    where
        P: AsRef<Path>,
        F: FnMut(&Path, &FileOutcome),
    {
        let mut output = String::new();
        for input in inputs {
            let input = input.as_ref();
            let outcome = self.split_file(input)?;
            on_file(input, &outcome);
            if let FileOutcome::Transformed(text) = outcome {
                output.push_str(&text);
                output.push('\n');
            }
        }

        Ok(match self.options.mode {
            OutputMode::Transform => Some(output),
            OutputMode::Split => None,
        })
    }

    /// Process one input file.
    pub fn split_file(&self, path: &Path) -> Result<FileOutcome> {
        let map = self.segment_file(path)?;

        match self.options.mode {
            OutputMode::Split => {
                let written = write_segments(&map, path, &self.options.output_dir)?;
                tracing::info!(
                    file = %path.display(),
                    segments = written.files.len(),
                    directory = %written.directory.display(),
                    "Split file"
                );
                Ok(FileOutcome::Written(written))
            }
            OutputMode::Transform => {
                tracing::info!(file = %path.display(), segments = map.len(), "Transformed file");
                Ok(FileOutcome::Transformed(self.transform(&map)))
            }
        }
    }

    /// Read and segment one input file.
    pub fn segment_file(&self, path: &Path) -> Result<SegmentMap> {
        let xml = fs::read_to_string(path).map_err(|e| MilestoneError::io_at(path, e))?;
        let doc = Document::parse_with_options(&xml, parsing_options()).map_err(|source| {
            MilestoneError::XmlParseFile {
                path: PathBuf::from(path),
                source,
            }
        })?;
        split_document(&doc, &xml, &self.options)
    }

    /// Render a segment map as a transformed document.
    pub fn transform(&self, map: &SegmentMap) -> String {
        map.transform(&self.options.milestone_tag, self.options.id_attribute())
    }
}
