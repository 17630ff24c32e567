//! Per-file conversion pipeline and batch driver
//!
//! ```text
//! open store ─► adapter.extract ─► encoder.encode ─► adapter.write ─► store.save
//! ```
//!
//! Batch policy: files that cannot be opened, are of an unsupported kind, or
//! fail to save are skipped. A ReplayGain extraction error stops the batch.

use crate::adapter::adapter_for;
use crate::error::{Result, SoundCheckError};
use crate::file::open_tag_store;
use crate::{ConvertOptions, SoundCheckEncoder, SoundCheckVector, TagStore};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{error, info};

/// Outcome of a batch that ran to completion
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Files whose iTunNORM field was rewritten
    pub processed: usize,

    /// Skipped files with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

/// Drives the ReplayGain to SoundCheck conversion
pub struct Converter<'a> {
    options: &'a ConvertOptions,
    encoder: SoundCheckEncoder,
}

impl<'a> Converter<'a> {
    pub fn new(options: &'a ConvertOptions) -> Self {
        Self {
            options,
            encoder: SoundCheckEncoder::new(),
        }
    }

    /// Rewrite the iTunNORM field of an open store, without saving it
    pub fn convert_store(&self, tags: &mut dyn TagStore) -> Result<SoundCheckVector> {
        let adapter = adapter_for(tags.kind());

        let extraction = adapter.extract(&*tags, self.options)?;
        let vector = self
            .encoder
            .encode(extraction.gain.gain_db, &extraction.baseline);

        if self.options.verbose {
            info!("New iTunNORM: {}", vector);
        }

        adapter.write(tags, &vector)?;
        Ok(vector)
    }

    /// Convert one file in place
    pub fn convert_file(&self, path: &Path) -> Result<SoundCheckVector> {
        let mut tags = open_tag_store(path)?;
        self.convert_and_save(path, tags.as_mut())
    }

    /// Convert every file in `paths`, opening each with [`open_tag_store`]
    pub fn run<P: AsRef<Path>>(&self, paths: &[P]) -> Result<BatchSummary> {
        self.run_with(paths, |path| open_tag_store(path))
    }

    /// Convert every file in `paths`, opening each with `open`
    pub fn run_with<P, F>(&self, paths: &[P], mut open: F) -> Result<BatchSummary>
    where
        P: AsRef<Path>,
        F: FnMut(&Path) -> Result<Box<dyn TagStore>>,
    {
        let mut summary = BatchSummary::default();
        let total = paths.len();

        for (index, path) in paths.iter().enumerate() {
            let path = path.as_ref();

            if self.options.verbose {
                info!("Processing [{}/{}]: {}", index + 1, total, path.display());
            } else {
                info!("Processing [{}/{}]", index + 1, total);
            }

            let result = open(path).and_then(|mut tags| self.convert_and_save(path, tags.as_mut()));

            match result {
                Ok(_) => summary.processed += 1,
                Err(e) if e.is_replaygain_error() => {
                    error!("Error: {} ({})", e, path.display());
                    return Err(e);
                }
                Err(e) => {
                    error!("Error: {}", e);
                    summary.skipped.push((path.to_path_buf(), e.to_string()));
                }
            }
        }

        Ok(summary)
    }

    fn convert_and_save(&self, path: &Path, tags: &mut dyn TagStore) -> Result<SoundCheckVector> {
        let vector = self.convert_store(tags)?;

        let modified = if self.options.preserve_mtime {
            modified_time(path)
        } else {
            None
        };

        tags.save()?;

        if let Some(modified) = modified {
            restore_modified_time(path, modified)?;
        }

        Ok(vector)
    }
}

/// Modification time of `path`, if the file exists and the platform reports it
fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn restore_modified_time(path: &Path, modified: SystemTime) -> Result<()> {
    let file = File::options().write(true).open(path)?;
    file.set_modified(modified).map_err(SoundCheckError::from)
}
