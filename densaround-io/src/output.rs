use std::fs::create_dir_all;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::PathBuf;

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::NamedTempFile;

use densaround_core::utils::is_stdin;

use crate::consts::GZIP_SUFFIX;
use crate::error::{OutputError, Result};

enum Sink {
    Stdout(BufWriter<Stdout>),
    Plain(BufWriter<NamedTempFile>),
    Gzip(GzEncoder<BufWriter<NamedTempFile>>),
}

///
/// A writable output destination that only appears on disk once committed.
///
/// Dropping an `OutputFile` without calling [`OutputFile::commit`] removes the
/// temporary file and leaves any previous file at the target path untouched.
///
pub struct OutputFile {
    sink: Sink,
    path: Option<PathBuf>,
}

impl OutputFile {
    ///
    /// Open an output destination.
    ///
    /// # Arguments
    /// - path: file to write, `-` for stdout; a `.gz` suffix writes gzip
    pub fn create(path: &str) -> Result<Self> {
        if is_stdin(path) {
            return Ok(OutputFile {
                sink: Sink::Stdout(BufWriter::new(io::stdout())),
                path: None,
            });
        }

        let path = PathBuf::from(path);
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        create_dir_all(&parent).map_err(|_| OutputError::ParentDirectoryCreation(parent.clone()))?;

        let temp = BufWriter::new(NamedTempFile::new_in(&parent)?);
        let sink = match path.to_string_lossy().ends_with(GZIP_SUFFIX) {
            true => Sink::Gzip(GzEncoder::new(temp, Compression::default())),
            false => Sink::Plain(temp),
        };

        Ok(OutputFile {
            sink,
            path: Some(path),
        })
    }

    ///
    /// Flush everything written so far, leaving the result in its temporary
    /// file until [`StagedOutput::persist`] is called.
    ///
    /// Stage every output of a run before persisting any of them, so a
    /// failing write leaves none of them behind.
    pub fn stage(self) -> Result<StagedOutput> {
        let temp = match self.sink {
            Sink::Stdout(mut out) => {
                out.flush()?;
                None
            }
            Sink::Plain(buf) => Some(buf.into_inner().map_err(|e| e.into_error())?),
            Sink::Gzip(encoder) => Some(
                encoder
                    .finish()?
                    .into_inner()
                    .map_err(|e| e.into_error())?,
            ),
        };

        Ok(StagedOutput {
            temp,
            path: self.path,
        })
    }

    /// Flush everything and move the temporary file onto the target path.
    pub fn commit(self) -> Result<()> {
        self.stage()?.persist()
    }
}

///
/// A fully written output waiting to be moved onto its target path. Dropping
/// it removes the temporary file.
///
pub struct StagedOutput {
    temp: Option<NamedTempFile>,
    path: Option<PathBuf>,
}

impl StagedOutput {
    pub fn persist(self) -> Result<()> {
        let (Some(temp), Some(path)) = (self.temp, self.path) else {
            // stdout was already flushed
            return Ok(());
        };

        temp.persist(&path).map_err(|e| OutputError::Persist {
            path,
            source: e.error,
        })?;

        Ok(())
    }
}

/// Persist staged outputs in order, stopping at the first failure.
pub fn persist_all(staged: Vec<StagedOutput>) -> Result<()> {
    staged.into_iter().try_for_each(StagedOutput::persist)
}

impl Write for OutputFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.sink {
            Sink::Stdout(w) => w.write(buf),
            Sink::Plain(w) => w.write(buf),
            Sink::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.sink {
            Sink::Stdout(w) => w.flush(),
            Sink::Plain(w) => w.flush(),
            Sink::Gzip(w) => w.flush(),
        }
    }
}
