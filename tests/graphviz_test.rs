//! Tests for the Graphviz renderer seam: argument shape, stdin content,
//! failure surfacing and an end-to-end run against a fake engine.

#![cfg(unix)]

use std::io;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{ExitStatus, Output};
use std::sync::Mutex;

use snechart::errors::ChartError;
use snechart::render::{CommandRunner, GraphvizRenderer, OutputFormat};
use snechart::util::testing;

#[derive(Debug)]
struct Call {
    cmd: String,
    args: Vec<String>,
    stdin: Option<String>,
}

/// Records invocations and replies with a fixed exit code and stderr.
struct RecordingRunner {
    calls: Mutex<Vec<Call>>,
    exit_code: i32,
    stderr: &'static str,
}

impl RecordingRunner {
    fn new(exit_code: i32, stderr: &'static str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            exit_code,
            stderr,
        }
    }

    fn output(&self) -> Output {
        Output {
            // wait(2) status: exit code lives in the high byte
            status: ExitStatus::from_raw(self.exit_code << 8),
            stdout: Vec::new(),
            stderr: self.stderr.as_bytes().to_vec(),
        }
    }

    fn record(&self, cmd: &str, args: &[&str], stdin: Option<&str>) {
        self.calls.lock().unwrap().push(Call {
            cmd: cmd.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            stdin: stdin.map(|s| s.to_string()),
        });
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        self.record(cmd, args, None);
        Ok(self.output())
    }

    fn run_with_stdin(&self, cmd: &str, args: &[&str], stdin: &str) -> io::Result<Output> {
        self.record(cmd, args, Some(stdin));
        Ok(self.output())
    }
}

#[test]
fn given_successful_engine_when_rendering_then_invocation_is_correct() {
    testing::init_test_setup();

    // Arrange
    let runner: &'static RecordingRunner = Box::leak(Box::new(RecordingRunner::new(0, "")));
    let renderer = GraphvizRenderer::with_runner("dot", Box::new(RunnerRef(runner)));

    // Act
    renderer
        .render_to_file("digraph G {}", OutputFormat::Png, Path::new("out/chart.png"))
        .unwrap();

    // Assert
    let calls = runner.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].cmd, "dot");
    assert_eq!(calls[0].args, ["-Tpng", "-o", "out/chart.png"]);
    assert_eq!(calls[0].stdin.as_deref(), Some("digraph G {}"));
}

#[test]
fn given_failing_engine_when_rendering_then_stderr_is_surfaced() {
    // Arrange
    let runner = RecordingRunner::new(1, "Format: \"png\" not recognized");
    let renderer = GraphvizRenderer::with_runner("dot", Box::new(runner));

    // Act
    let result = renderer.render_to_file("digraph G {}", OutputFormat::Png, Path::new("x.png"));

    // Assert
    match result {
        Err(ChartError::GraphvizFailed { message, exit_code }) => {
            assert!(message.contains("not recognized"));
            assert_eq!(exit_code, Some(1));
        }
        other => panic!("expected GraphvizFailed, got {:?}", other.err()),
    }
}

#[test]
fn given_missing_program_when_rendering_then_launch_error() {
    let renderer = GraphvizRenderer::new("snechart-test-no-such-binary");
    let result = renderer.render_to_file("digraph G {}", OutputFormat::Pdf, Path::new("x.pdf"));
    assert!(matches!(result, Err(ChartError::GraphvizLaunch { .. })));
}

#[test]
fn given_version_banner_when_probing_then_version_is_parsed() {
    let runner = RecordingRunner::new(0, "dot - graphviz version 2.43.0 (0)");
    let renderer = GraphvizRenderer::with_runner("dot", Box::new(runner));
    assert_eq!(renderer.version().unwrap().as_deref(), Some("2.43.0"));
}

#[test]
fn given_unrecognized_banner_when_probing_then_none() {
    let runner = RecordingRunner::new(0, "something else entirely");
    let renderer = GraphvizRenderer::with_runner("dot", Box::new(runner));
    assert_eq!(renderer.version().unwrap(), None);
}

#[test]
fn given_fake_engine_script_when_rendering_then_file_is_written() {
    use std::os::unix::fs::PermissionsExt;

    // Arrange: a stand-in engine copying stdin to the -o target
    let temp = tempfile::TempDir::new().unwrap();
    let script = temp.path().join("fake-dot");
    std::fs::write(
        &script,
        "#!/bin/sh\nout=\"\"\nwhile [ $# -gt 0 ]; do\n  if [ \"$1\" = \"-o\" ]; then out=\"$2\"; shift; fi\n  shift\ndone\ncat > \"$out\"\n",
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let target = temp.path().join("chart.png");
    let renderer = GraphvizRenderer::new(script.display().to_string());

    // Act
    renderer
        .render_to_file("digraph SN_E_Flowchart {}", OutputFormat::Png, &target)
        .unwrap();

    // Assert
    let written = std::fs::read_to_string(&target).unwrap();
    assert_eq!(written, "digraph SN_E_Flowchart {}");
}

/// Forwarding wrapper so a test can keep inspecting a leaked runner
/// after handing ownership to the renderer.
struct RunnerRef(&'static RecordingRunner);

impl CommandRunner for RunnerRef {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        self.0.run(cmd, args)
    }

    fn run_with_stdin(&self, cmd: &str, args: &[&str], stdin: &str) -> io::Result<Output> {
        self.0.run_with_stdin(cmd, args, stdin)
    }
}
