//! Tests that run the compiled binary

use std::fs;
use std::net::TcpListener;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;

fn binary() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_persona-hearing"));
    command
        .env_remove("RUST_LOG")
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPENAI_MODEL")
        .env_remove("OPENAI_BASE_URL");
    command
}

#[test]
fn test_dotenv_log_filter_applies_to_tracing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "RUST_LOG=debug\n").unwrap();

    let output = binary()
        .current_dir(dir.path())
        .args(["--theme", "Remote work"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loaded .env"), "stderr: {stderr}");
    assert!(stderr.contains("OPENAI_API_KEY is not set"), "stderr: {stderr}");
}

#[cfg(unix)]
#[test]
fn test_interrupt_exits_130_without_saving() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("out");

    // Accepts the connection and never answers, so the run stays in phase 1
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let base_url = format!("http://{}/v1", listener.local_addr().unwrap());

    let mut child = binary()
        .current_dir(dir.path())
        .env("OPENAI_API_KEY", "sk-test")
        .env("OPENAI_BASE_URL", &base_url)
        .args(["--theme", "Remote work", "--quiet", "--output-dir"])
        .arg(&output_dir)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(30);
    let _stream = loop {
        match listener.accept() {
            Ok((stream, _)) => break stream,
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                if Instant::now() > deadline {
                    child.kill().ok();
                    panic!("binary never contacted the API endpoint");
                }
                thread::sleep(Duration::from_millis(20));
            }
            Err(e) => panic!("accept failed: {e}"),
        }
    };

    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let status = child.wait().unwrap();
    assert_eq!(status.code(), Some(130));
    assert!(!output_dir.exists());
}
