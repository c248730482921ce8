//! Integration tests: real libcurl transfers against a local HTTP server.

mod common;

use common::asset_server::{self, Route};
use meshgrab_core::downloader::{download_url, FetchOptions};
use meshgrab_core::error::FetchError;
use meshgrab_core::http::CurlSession;
use std::time::Duration;
use tempfile::tempdir;

fn quiet() -> FetchOptions {
    FetchOptions {
        show_progress: false,
        ..FetchOptions::default()
    }
}

#[test]
fn ok_response_is_saved_under_url_name() {
    let server = asset_server::start(vec![("/models/asset.obj", Route::ok(b"hello world!"))]);
    let dir = tempdir().unwrap();

    let path = download_url(&server.url("/models/asset.obj"), dir.path(), None, &quiet())
        .expect("download");

    assert_eq!(path, dir.path().join("asset.obj"));
    assert_eq!(std::fs::read(&path).unwrap(), b"hello world!");
}

#[test]
fn not_found_leaves_no_file() {
    let server = asset_server::start(vec![]);
    let dir = tempdir().unwrap();

    let err = download_url(&server.url("/gone.glb"), dir.path(), None, &quiet()).unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn server_error_is_reported_as_http() {
    let server = asset_server::start(vec![("/boom.stl", Route::status(500))]);
    let dir = tempdir().unwrap();

    let err = download_url(&server.url("/boom.stl"), dir.path(), None, &quiet()).unwrap_err();

    assert!(matches!(err, FetchError::Http(500)), "{err:?}");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn content_disposition_overrides_url_name() {
    let server = asset_server::start(vec![(
        "/download",
        Route::ok(b"glTF")
            .header("Content-Type", "model/gltf-binary")
            .header("Content-Disposition", r#"attachment; filename="castle.glb""#),
    )]);
    let dir = tempdir().unwrap();

    let path = download_url(&server.url("/download?id=7"), dir.path(), None, &quiet()).unwrap();

    assert_eq!(path.file_name().unwrap(), "castle.glb");
}

#[test]
fn nameless_url_gets_synthesized_name_from_content_type() {
    let server = asset_server::start(vec![(
        "/",
        Route::ok(b"solid x").header("Content-Type", "model/stl; charset=binary"),
    )]);
    let dir = tempdir().unwrap();

    let path = download_url(&server.url("/"), dir.path(), None, &quiet()).unwrap();

    let name = path.file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("downloaded_"), "{name}");
    assert!(name.ends_with(".stl"), "{name}");
}

#[test]
fn existing_file_is_never_overwritten() {
    let server = asset_server::start(vec![("/asset.obj", Route::ok(b"new"))]);
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("asset.obj"), b"old").unwrap();

    let path = download_url(&server.url("/asset.obj"), dir.path(), None, &quiet()).unwrap();

    assert_eq!(path.file_name().unwrap(), "asset (1).obj");
    assert_eq!(std::fs::read(dir.path().join("asset.obj")).unwrap(), b"old");
    assert_eq!(std::fs::read(&path).unwrap(), b"new");
}

#[test]
fn body_without_content_length_is_read_to_close() {
    let body: Vec<u8> = (0u8..=255).cycle().take(40_000).collect();
    let server = asset_server::start(vec![("/big.ply", Route::ok(&body).without_length())]);
    let dir = tempdir().unwrap();
    let opts = FetchOptions {
        chunk_size: 1000,
        ..quiet()
    };

    let path = download_url(&server.url("/big.ply"), dir.path(), None, &opts).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), body);
}

#[test]
fn one_session_serves_several_downloads() {
    let server = asset_server::start(vec![
        ("/a.stl", Route::ok(b"aaa")),
        ("/b.fbx", Route::ok(b"bbbb")),
    ]);
    let dir = tempdir().unwrap();
    let mut session = CurlSession::new();
    let opts = FetchOptions {
        user_agent: "meshgrab-test/1".to_string(),
        ..quiet()
    };

    let a = download_url(&server.url("/a.stl"), dir.path(), Some(&mut session), &opts).unwrap();
    let b = download_url(&server.url("/b.fbx"), dir.path(), Some(&mut session), &opts).unwrap();
    let missing = download_url(&server.url("/c.obj"), dir.path(), Some(&mut session), &opts);

    assert_eq!(std::fs::read(a).unwrap(), b"aaa");
    assert_eq!(std::fs::read(b).unwrap(), b"bbbb");
    assert!(missing.is_err());

    let requests = server.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests
        .iter()
        .all(|r| r.contains("User-Agent: meshgrab-test/1")));
}

#[test]
fn refused_connection_is_a_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let dir = tempdir().unwrap();

    let err = download_url(
        &format!("http://127.0.0.1:{}/x.glb", port),
        dir.path(),
        None,
        &quiet(),
    )
    .unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)), "{err:?}");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn slow_body_outlasting_the_timeout_still_completes() {
    // Six bytes at 0.5 s each: about 3 s in total, but never idle for 2 s.
    let server = asset_server::start(vec![(
        "/slow.glb",
        Route::ok(b"glTF!!").dripping(Duration::from_millis(500)),
    )]);
    let dir = tempdir().unwrap();
    let opts = FetchOptions {
        timeout: Duration::from_secs(2),
        ..quiet()
    };

    let path = download_url(&server.url("/slow.glb"), dir.path(), None, &opts).expect("download");

    assert_eq!(std::fs::read(&path).unwrap(), b"glTF!!");
}

#[test]
fn stalled_body_is_abandoned() {
    let server = asset_server::start(vec![(
        "/stuck.obj",
        Route::ok(b"ab").dripping(Duration::from_secs(8)),
    )]);
    let dir = tempdir().unwrap();
    let opts = FetchOptions {
        timeout: Duration::from_secs(1),
        ..quiet()
    };

    let err = download_url(&server.url("/stuck.obj"), dir.path(), None, &opts).unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)), "{err:?}");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
