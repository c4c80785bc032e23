mod common;

use annotate_core::api::{
    annotate_stdin, pipe, run_session, AnnotatedPipe, BoxedReader, ChildExit, ColorMode,
    CommandSession, PrefixSet, RunConfig, RunnerError, StreamTag, TtyState,
};
use async_trait::async_trait;
use common::CaptureSinks;
use pretty_assertions::assert_eq;
use tokio::io::{AsyncWriteExt, DuplexStream};
use tokio::task::JoinHandle;

/// A child simulated by a task writing into in-memory pipes.
struct ScriptedSession {
    stdout: Option<DuplexStream>,
    stderr: Option<DuplexStream>,
    task: Option<JoinHandle<i32>>,
    fail_wait: bool,
}

impl ScriptedSession {
    fn start(out: &[&[u8]], err: &[&[u8]], code: i32) -> Self {
        let out: Vec<Vec<u8>> = out.iter().map(|c| c.to_vec()).collect();
        let err: Vec<Vec<u8>> = err.iter().map(|c| c.to_vec()).collect();
        let (mut out_wr, out_rd) = tokio::io::duplex(256);
        let (mut err_wr, err_rd) = tokio::io::duplex(256);
        let task = tokio::spawn(async move {
            for i in 0..out.len().max(err.len()) {
                if let Some(o) = out.get(i) {
                    out_wr.write_all(o).await.unwrap();
                }
                if let Some(e) = err.get(i) {
                    err_wr.write_all(e).await.unwrap();
                }
            }
            code
        });
        Self {
            stdout: Some(out_rd),
            stderr: Some(err_rd),
            task: Some(task),
            fail_wait: false,
        }
    }
}

#[async_trait]
impl CommandSession for ScriptedSession {
    fn stdout(&mut self) -> Option<BoxedReader> {
        self.stdout.take().map(|s| Box::new(s) as BoxedReader)
    }

    fn stderr(&mut self) -> Option<BoxedReader> {
        self.stderr.take().map(|s| Box::new(s) as BoxedReader)
    }

    async fn wait(&mut self) -> std::io::Result<ChildExit> {
        let task = self.task.take().expect("wait called twice");
        let code = task.await.map_err(std::io::Error::other)?;
        if self.fail_wait {
            return Err(std::io::Error::other("wait failed"));
        }
        Ok(ChildExit::Code(code))
    }
}

fn prefixes() -> PrefixSet {
    PrefixSet::new("%0|%>| ", "job", ColorMode::Never, TtyState::default())
}

#[tokio::test]
async fn chunked_output_keeps_per_stream_order() {
    let sinks = CaptureSinks::default();
    let session = ScriptedSession::start(
        &[b"a", b"1\na2\r\n", b"a3\ra", b"4"],
        &[b"e1\n", b"", b"e2\n"],
        3,
    );

    let exit = run_session(session, &RunConfig::default(), prefixes(), &sinks)
        .await
        .unwrap();

    assert_eq!(exit, ChildExit::Code(3));
    assert_eq!(
        sinks.stdout.contents(),
        "job|O| a1\njob|O| a2\njob|O| a3\njob|O| a4\n"
    );
    assert_eq!(sinks.stderr.contents(), "job|E| e1\njob|E| e2\n");
}

#[tokio::test]
async fn wait_failure_still_flushes_buffered_output() {
    let sinks = CaptureSinks::default();
    let mut session = ScriptedSession::start(&[b"last words\n", b"no newline"], &[b"bye\n"], 0);
    session.fail_wait = true;

    let err = run_session(session, &RunConfig::default(), prefixes(), &sinks)
        .await
        .unwrap_err();

    assert!(matches!(err, RunnerError::Wait(_)));
    assert_eq!(
        sinks.stdout.contents(),
        "job|O| last words\njob|O| no newline\n"
    );
    assert_eq!(sinks.stderr.contents(), "job|E| bye\n");
}

#[tokio::test]
async fn stderr_only_skips_stdout_annotation() {
    let sinks = CaptureSinks::default();
    let session = ScriptedSession::start(&[b"out\n"], &[b"err\n"], 0);
    let cfg = RunConfig {
        only_stderr: true,
        ..RunConfig::default()
    };

    run_session(session, &cfg, prefixes(), &sinks).await.unwrap();

    assert_eq!(sinks.stdout.contents(), "");
    assert_eq!(sinks.stderr.contents(), "job|E| err\n");
}

#[tokio::test]
async fn piped_input_uses_pipe_name() {
    let sinks = CaptureSinks::default();
    let cfg = RunConfig {
        prefix: "%0 %> ".into(),
        color: ColorMode::Never,
        separator: Some("=".into()),
        ..RunConfig::default()
    };
    let mut input: &[u8] = b"one\ntwo";

    let lines = annotate_stdin(&mut input, &cfg, TtyState::default(), &sinks)
        .await
        .unwrap();

    assert_eq!(lines, 2);
    let rule = "=".repeat(80);
    assert_eq!(
        sinks.stdout.contents(),
        format!("> O {rule}\n> O one\n> O two\n> O {rule}\n")
    );
}

#[tokio::test]
async fn pipe_harness_feeds_a_capture_sink() {
    let sinks = CaptureSinks::default();
    let AnnotatedPipe { mut writer, task } = pipe(
        sinks.stdout.clone(),
        StreamTag::Stdin,
        |s: StreamTag| format!("{} ", s.letter()),
    );

    writer.write_all(b"x\r\ny\n").await.unwrap();
    drop(writer);

    assert_eq!(task.await.unwrap().unwrap(), 2);
    assert_eq!(sinks.stdout.contents(), "I x\nI y\n");
}
