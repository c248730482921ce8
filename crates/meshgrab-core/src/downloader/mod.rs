//! Asset downloader: inline `data:` decoding or streaming HTTP GET to disk.
//!
//! Every failure is logged here and handed back as a [`FetchError`] value so a
//! caller iterating over many candidates can skip the bad ones. Nothing is
//! retried.

mod inline;
mod sink;

pub use inline::save_inline_resource;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::classify::{is_data_url, AssetClassifier};
use crate::config::{DEFAULT_CHUNK_SIZE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::error::FetchError;
use crate::http::{CurlSession, GetRequest, Transport};
use crate::paths::ensure_folder;
use sink::FileSink;

/// Runtime knobs for a fetch. Usually built with `MeshgrabConfig::fetch_options`.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub user_agent: String,
    pub timeout: Duration,
    /// Maximum bytes per write to the output file.
    pub chunk_size: usize,
    pub show_progress: bool,
    /// Extension set used for filename and MIME decisions.
    pub classifier: AssetClassifier,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            chunk_size: DEFAULT_CHUNK_SIZE,
            show_progress: true,
            classifier: AssetClassifier::default(),
        }
    }
}

impl FetchOptions {
    pub(crate) fn request<'a>(&'a self, url: &'a str) -> GetRequest<'a> {
        GetRequest {
            url,
            user_agent: &self.user_agent,
            timeout: self.timeout,
            chunk_size: self.chunk_size,
        }
    }
}

/// Downloads `url` into `out_folder` and returns the absolute path written.
///
/// `data:` references are decoded in place. Other URLs are fetched with one GET
/// through `session`, or through a throwaway [`CurlSession`] when `None`. Only a
/// 200 response is saved; its name comes from [`crate::url_model::pick_filename`]
/// and is made unique in the folder. A file created for a transfer that later
/// fails is removed.
pub fn download_url(
    url: &str,
    out_folder: &Path,
    session: Option<&mut dyn Transport>,
    opts: &FetchOptions,
) -> Result<PathBuf, FetchError> {
    if let Err(e) = ensure_folder(out_folder) {
        tracing::warn!(folder = %out_folder.display(), error = %e, "cannot create output folder");
        return Err(e.into());
    }
    let out_folder = absolute(out_folder)?;

    if is_data_url(url) {
        return save_inline_resource(url, &out_folder, &opts.classifier);
    }

    let mut owned;
    let session: &mut dyn Transport = match session {
        Some(s) => s,
        None => {
            owned = CurlSession::new();
            &mut owned
        }
    };

    let mut sink = FileSink::new(url, &out_folder, opts);
    let result = session
        .get(&opts.request(url), &mut sink)
        .and_then(|summary| {
            let path = sink.finish()?;
            tracing::info!(url, path = %path.display(), bytes = summary.bytes, "downloaded");
            Ok(path)
        });

    if let Err(e) = &result {
        sink.discard();
        match e.status() {
            Some(status) => tracing::warn!(url, status, "download failed: HTTP {}", status),
            None => tracing::warn!(url, error = %e, "download failed"),
        }
    }
    result
}

fn absolute(path: &Path) -> Result<PathBuf, FetchError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{ResponseHandler, ResponseHead, ResponseHeaders, TransferSummary};

    /// Transport that replays a canned response without touching the network.
    struct Canned {
        status: u32,
        headers: Vec<(&'static str, &'static str)>,
        chunks: Vec<&'static [u8]>,
        fail_after_body: bool,
        calls: usize,
    }

    impl Canned {
        fn ok(headers: Vec<(&'static str, &'static str)>, chunks: Vec<&'static [u8]>) -> Self {
            Self {
                status: 200,
                headers,
                chunks,
                fail_after_body: false,
                calls: 0,
            }
        }
    }

    impl Transport for Canned {
        fn get(
            &mut self,
            request: &GetRequest<'_>,
            handler: &mut dyn ResponseHandler,
        ) -> Result<TransferSummary, FetchError> {
            self.calls += 1;
            let head = ResponseHead {
                status: self.status,
                headers: self.headers.iter().map(|(n, v)| (*n, *v)).collect::<ResponseHeaders>(),
            };
            handler.on_response(&head)?;
            let mut bytes = 0;
            for chunk in &self.chunks {
                handler.on_chunk(chunk)?;
                bytes += chunk.len() as u64;
            }
            if self.fail_after_body {
                return Err(FetchError::NoResponse);
            }
            Ok(TransferSummary {
                status: self.status,
                effective_url: Some(request.url.to_string()),
                bytes,
            })
        }
    }

    fn quiet() -> FetchOptions {
        FetchOptions {
            show_progress: false,
            ..FetchOptions::default()
        }
    }

    #[test]
    fn writes_body_under_url_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = Canned::ok(vec![("Content-Length", "12")], vec![b"hello ", b"world!"]);
        let path = download_url("https://example.com/asset.obj", dir.path(), Some(&mut t), &quiet()).unwrap();
        assert_eq!(path, dir.path().join("asset.obj"));
        assert_eq!(std::fs::read(&path).unwrap(), b"hello world!");
    }

    #[test]
    fn encoded_nul_in_url_is_saved_under_safe_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = Canned::ok(vec![], vec![b"glb"]);
        let path = download_url("https://e.test/a%00b.glb", dir.path(), Some(&mut t), &quiet()).unwrap();
        assert_eq!(path, dir.path().join("a_b.glb"));
        assert_eq!(std::fs::read(&path).unwrap(), b"glb");
    }

    #[test]
    fn session_reused_and_names_stay_unique() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = Canned::ok(vec![], vec![b"x"]);
        let a = download_url("https://example.com/m.stl", dir.path(), Some(&mut t), &quiet()).unwrap();
        let b = download_url("https://example.com/m.stl", dir.path(), Some(&mut t), &quiet()).unwrap();
        assert_eq!(t.calls, 2);
        assert_eq!(a, dir.path().join("m.stl"));
        assert_eq!(b, dir.path().join("m (1).stl"));
    }

    #[test]
    fn non_200_is_failure_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = Canned::ok(vec![], vec![b"not found"]);
        t.status = 404;
        let err = download_url("https://example.com/asset.obj", dir.path(), Some(&mut t), &quiet()).unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_transfer_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = Canned::ok(vec![("Content-Length", "100")], vec![b"partial"]);
        t.fail_after_body = true;
        assert!(download_url("https://example.com/big.glb", dir.path(), Some(&mut t), &quiet()).is_err());
        assert!(!dir.path().join("big.glb").exists());
    }

    #[test]
    fn small_chunk_size_still_writes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let opts = FetchOptions {
            chunk_size: 3,
            ..quiet()
        };
        let mut t = Canned::ok(vec![], vec![b"0123456789"]);
        let path = download_url("https://example.com/c.ply", dir.path(), Some(&mut t), &opts).unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"0123456789");
    }

    #[test]
    fn data_url_bypasses_transport() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = Canned::ok(vec![], vec![]);
        let path = download_url("data:model/stl;base64,c29saWQ=", dir.path(), Some(&mut t), &quiet()).unwrap();
        assert_eq!(t.calls, 0);
        assert_eq!(path.extension().unwrap(), "stl");
        assert_eq!(std::fs::read(path).unwrap(), b"solid");
    }

    #[test]
    fn creates_missing_out_folder() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("new").join("folder");
        let mut t = Canned::ok(vec![], vec![b"v 0 0 0"]);
        let path = download_url("https://example.com/p.obj", &out, Some(&mut t), &quiet()).unwrap();
        assert!(path.starts_with(&out));
    }
}
