use predicates::str::contains;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;
use tempfile::tempdir;

const ZEBRA_RESPONSE: &str = r#"{"Species Name":"Equus quagga","Common Name":"Plains zebra","Habitat":"Grassland","Conservation Status":"Near Threatened"}"#;

/// Answer `count` requests with the same body; returns the base url.
fn fake_classifier(count: usize, status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    thread::spawn(move || {
        for _ in 0..count {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone"));
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).expect("read") == 0 || line == "\r\n" {
                    break;
                }
                if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = v.trim().parse().expect("length");
                }
            }
            let mut body_bytes = vec![0u8; content_length];
            reader.read_exact(&mut body_bytes).expect("body");

            let mut stream = stream;
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("respond");
        }
    });
    format!("http://{addr}")
}

fn wildwatch(home: &Path, classifier_url: &str) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("wildwatch");
    cmd.current_dir(home)
        .env("WILDWATCH_HOME", home)
        .env("WILDWATCH_CLASSIFIER_URL", classifier_url)
        .env("WILDWATCH_CLASSIFIER_TIMEOUT_SECS", "10")
        .env_remove("WILDWATCH_CONFIG_PATH")
        .env_remove("WILDWATCH_STORAGE_DIR")
        .env_remove("WILDWATCH_STORAGE_KEY")
        .env_remove("WILDWATCH_LOGS_DIR")
        .env_remove("WILDWATCH_RECENT_WINDOW_DAYS")
        .env_remove("WILDWATCH_INSIGHTS_TOP")
        .env_remove("WILDWATCH_TIMEZONE");
    cmd
}

#[test]
fn identify_records_each_file() {
    let tmp = tempdir().expect("tempdir");
    fs::write(tmp.path().join("a.jpg"), b"jpeg").expect("write");
    fs::write(tmp.path().join("b.mp4"), b"mp4").expect("write");
    let url = fake_classifier(2, "HTTP/1.1 200 OK", ZEBRA_RESPONSE);

    wildwatch(tmp.path(), &url)
        .args(["identify", "a.jpg", "b.mp4"])
        .assert()
        .success()
        .stdout(contains("Plains zebra (Equus quagga)"))
        .stdout(contains("badge=Threatened"))
        .stdout(contains("(Video Upload)"));

    wildwatch(tmp.path(), &url)
        .arg("stats")
        .assert()
        .success()
        .stdout(contains("total_identifications=2"))
        .stdout(contains("favorite_habitat=Grassland"))
        .stdout(contains("conservation_impact=2"));
}

#[test]
fn identify_no_save_leaves_journal_empty() {
    let tmp = tempdir().expect("tempdir");
    fs::write(tmp.path().join("a.jpg"), b"jpeg").expect("write");
    let url = fake_classifier(1, "HTTP/1.1 200 OK", ZEBRA_RESPONSE);

    wildwatch(tmp.path(), &url)
        .args(["identify", "--no-save", "a.jpg"])
        .assert()
        .success();
    assert!(!tmp.path().join("journal/wildwatch_entries.json").exists());
}

#[test]
fn classifier_error_status_fails_the_run() {
    let tmp = tempdir().expect("tempdir");
    fs::write(tmp.path().join("a.jpg"), b"jpeg").expect("write");
    let url = fake_classifier(1, "HTTP/1.1 500 Internal Server Error", "{}");

    wildwatch(tmp.path(), &url)
        .args(["identify", "a.jpg"])
        .assert()
        .failure()
        .stderr(contains("E004_CLASSIFIER_UNREACHABLE"))
        .stderr(contains("status 500"));
    assert!(!tmp.path().join("journal/wildwatch_entries.json").exists());
}
