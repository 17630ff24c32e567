/// Per-run conversion options, passed by reference through the pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Prefer album ReplayGain over track ReplayGain
    pub album: bool,

    /// Log per-file diagnostics (resolved tags, old and new iTunNORM)
    pub verbose: bool,

    /// Restore each file's modification time after saving
    pub preserve_mtime: bool,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_album(mut self, album: bool) -> Self {
        self.album = album;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_preserve_mtime(mut self, preserve_mtime: bool) -> Self {
        self.preserve_mtime = preserve_mtime;
        self
    }
}
