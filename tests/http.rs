#![cfg(feature = "http")]
use essentials::{
    error::Error,
    http::{
        download_file, download_file_async, download_string, has_connection_to, partial_path,
        Progress,
    },
};
use std::{
    fs,
    io::{Read, Write},
    net::TcpListener,
    path::PathBuf,
    thread,
};

// Nothing listens on the discard port, so these fail without touching the network.
const UNREACHABLE: &str = "http://127.0.0.1:9/file.bin";

/// Answers a single request on a local port with `response`, then closes the connection.
fn serve_once(response: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut request = Vec::new();
        let mut byte = [0u8; 1];
        while !request.ends_with(b"\r\n\r\n") {
            match stream.read(&mut byte) {
                Ok(0) | Err(_) => return,
                Ok(_) => request.push(byte[0]),
            }
        }
        let _ = stream.write_all(&response);
        let _ = stream.flush();
    });
    format!("http://{addr}/file.bin")
}

fn response(status: &str, content_length: usize, body: &[u8]) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {content_length}\r\nConnection: close\r\n\r\n"
    )
    .into_bytes();
    response.extend_from_slice(body);
    response
}

fn scratch_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir()
        .join("essentials-http-tests")
        .join(name);
    let _ = fs::remove_file(&path);
    let _ = fs::remove_file(partial_path(&path));
    path
}

fn body(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[test]
fn malformed_url_is_request_error() {
    assert!(matches!(
        download_string("not a url"),
        Err(Error::Request(_))
    ));
}

#[test]
fn failed_download_reports_no_progress() {
    let path = scratch_path("unreachable.bin");
    let mut reports = 0;
    let result = download_file(UNREACHABLE, path.to_str().unwrap(), |_| reports += 1);
    assert!(matches!(result, Err(Error::Request(_))));
    assert_eq!(reports, 0);
    assert!(!path.exists());
}

#[test]
fn async_download_surfaces_error() {
    let path = scratch_path("unreachable-async.bin");
    let download = download_file_async(UNREACHABLE, path.to_str().unwrap());
    assert_eq!(download.latest_progress(), None);
    let result = download.wait().unwrap();
    assert!(matches!(result, Err(Error::Request(_))));
}

#[test]
fn downloads_string_body() {
    let url = serve_once(response("200 OK", 5, b"hello"));
    assert_eq!(download_string(&url).unwrap(), "hello");
}

#[test]
fn downloads_file_with_progress() {
    let _ = env_logger::builder().is_test(true).try_init();
    let contents = body(20_000);
    let url = serve_once(response("200 OK", contents.len(), &contents));
    let path = scratch_path("complete.bin");

    let mut reports: Vec<Progress> = Vec::new();
    let written = download_file(&url, path.to_str().unwrap(), |p| reports.push(p)).unwrap();

    assert_eq!(written, 20_000);
    assert!(!reports.is_empty());
    assert!(reports.windows(2).all(|w| w[0].received < w[1].received));
    assert_eq!(
        reports.last(),
        Some(&Progress {
            received: 20_000,
            total: Some(20_000),
        })
    );
    assert_eq!(fs::read(&path).unwrap(), contents);
    assert!(!partial_path(&path).exists());
}

#[test]
fn truncated_body_leaves_no_file() {
    let url = serve_once(response("200 OK", 100_000, &body(5_000)));
    let path = scratch_path("truncated.bin");

    let result = download_file(&url, path.to_str().unwrap(), |_| {});

    assert!(result.is_err());
    assert!(!path.exists());
    assert!(!partial_path(&path).exists());
}

#[test]
fn oversized_content_length_is_rejected() {
    let url = serve_once(response("200 OK", 200 * 1024 * 1024, b""));
    let path = scratch_path("oversized.bin");

    let result = download_file(&url, path.to_str().unwrap(), |_| {});

    assert!(matches!(result, Err(Error::HttpTooBig)));
    assert!(!path.exists());
    assert!(!partial_path(&path).exists());
}

#[test]
fn async_download_reports_progress() {
    let contents = body(12_345);
    let url = serve_once(response("200 OK", contents.len(), &contents));
    let path = scratch_path("async.bin");

    let download = download_file_async(&url, path.to_str().unwrap());
    let progress = download.progress().clone();
    let written = download.wait().unwrap().unwrap();

    assert_eq!(written, 12_345);
    assert_eq!(
        progress.try_iter().last(),
        Some(Progress {
            received: 12_345,
            total: Some(12_345),
        })
    );
    assert_eq!(fs::read(&path).unwrap(), contents);
}

#[test]
fn any_http_answer_counts_as_connected() {
    assert!(has_connection_to(&serve_once(response("204 No Content", 0, b""))));
    assert!(has_connection_to(&serve_once(response(
        "500 Internal Server Error",
        0,
        b""
    ))));
}

#[test]
fn unreachable_host_is_not_connected() {
    assert!(!has_connection_to(UNREACHABLE));
}
