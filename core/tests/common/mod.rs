use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use annotate_core::api::{BoxedWriter, OutputSinks};
use tokio::io::AsyncWrite;

/// An in-memory destination shared by every handle opened on it.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl AsyncWrite for SharedBuf {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Captures annotated stdout and stderr for assertions.
#[derive(Clone, Default)]
pub struct CaptureSinks {
    pub stdout: SharedBuf,
    pub stderr: SharedBuf,
}

impl OutputSinks for CaptureSinks {
    fn stdout(&self) -> BoxedWriter {
        Box::new(self.stdout.clone())
    }

    fn stderr(&self) -> BoxedWriter {
        Box::new(self.stderr.clone())
    }
}

#[allow(dead_code)]
pub fn sh(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}
