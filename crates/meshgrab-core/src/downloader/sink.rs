//! Response handler that streams a 200 body into a collision-free file.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;

use super::FetchOptions;
use crate::error::FetchError;
use crate::http::{ResponseHandler, ResponseHead};
use crate::paths::unique_path;
use crate::progress::transfer_bar;
use crate::url_model::pick_filename;

/// Opens the destination only once a 200 head arrives, so rejected responses
/// never touch the disk.
pub(super) struct FileSink<'a> {
    url: &'a str,
    out_folder: &'a Path,
    opts: &'a FetchOptions,
    path: Option<PathBuf>,
    file: Option<File>,
    progress: Option<ProgressBar>,
}

impl<'a> FileSink<'a> {
    pub(super) fn new(url: &'a str, out_folder: &'a Path, opts: &'a FetchOptions) -> Self {
        Self {
            url,
            out_folder,
            opts,
            path: None,
            file: None,
            progress: None,
        }
    }

    /// Flushes the file and returns its path.
    pub(super) fn finish(&mut self) -> Result<PathBuf, FetchError> {
        let mut file = self.file.take().ok_or(FetchError::NoResponse)?;
        file.flush()?;
        file.sync_all()?;
        if let Some(pb) = self.progress.take() {
            pb.finish_and_clear();
        }
        self.path.clone().ok_or(FetchError::NoResponse)
    }

    /// Removes whatever this sink created (best effort).
    pub(super) fn discard(&mut self) {
        if let Some(pb) = self.progress.take() {
            pb.abandon();
        }
        self.file.take();
        if let Some(path) = self.path.take() {
            if let Err(e) = fs::remove_file(&path) {
                tracing::debug!(path = %path.display(), error = %e, "could not remove partial file");
            }
        }
    }
}

impl ResponseHandler for FileSink<'_> {
    fn on_response(&mut self, head: &ResponseHead) -> Result<(), FetchError> {
        if head.status != 200 {
            return Err(FetchError::Http(head.status));
        }
        let name = pick_filename(self.url, &head.headers, &self.opts.classifier);
        let path = unique_path(&self.out_folder.join(&name));
        let file = File::options().write(true).create_new(true).open(&path)?;
        tracing::debug!(url = %self.url, path = %path.display(), "writing response body");

        self.progress = transfer_bar(head.headers.content_length(), &name, self.opts.show_progress);
        self.path = Some(path);
        self.file = Some(file);
        Ok(())
    }

    fn on_chunk(&mut self, chunk: &[u8]) -> Result<(), FetchError> {
        let file = self.file.as_mut().ok_or(FetchError::NoResponse)?;
        for piece in chunk.chunks(self.opts.chunk_size.max(1)) {
            file.write_all(piece)?;
            if let Some(pb) = &self.progress {
                pb.inc(piece.len() as u64);
            }
        }
        Ok(())
    }
}
