// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O streaming and output capture for processes.
//!
//! ```text
//! run_child_with_cancellation()
//!   stdout/stderr reader tasks
//!   mpsc channel buffers stderr lines
//!   wait (or cancel)
//!   --> ProcessOutput { stderr, exit_code, interrupted }
//! ```

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::error::{ProcessError, ProcessResult};

/// Spawns a reader task for one output stream.
fn spawn_reader<R>(
    stream: Option<R>,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &'static str,
    tx: mpsc::UnboundedSender<String>,
) -> Option<JoinHandle<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    stream.map(|stream| {
        let name = process_name.to_string();
        tokio::spawn(async move {
            read_stream(stream, flags, &name, stream_name, &tx).await;
        })
    })
}

/// Collects output from a channel into a string.
fn collect_output(rx: &mut mpsc::UnboundedReceiver<String>, flags: StreamFlags) -> String {
    if !flags.contains(StreamFlags::KEEP_IN_STRING) {
        return String::new();
    }
    let mut output = String::new();
    while let Ok(line) = rx.try_recv() {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&line);
    }
    output
}

/// Waits for reader tasks to complete.
async fn await_readers(handles: [Option<JoinHandle<()>>; 2]) {
    for handle in handles.into_iter().flatten() {
        let _ = handle.await;
    }
}

/// Reads from a stream line by line.
async fn read_stream<R>(
    reader: R,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &str,
    tx: &mpsc::UnboundedSender<String>,
) where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    trace!(process = %process_name, stream = %stream_name, line = %line, "output");
                }
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    let _ = tx.send(line);
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(
                    process = %process_name,
                    stream = %stream_name,
                    error = %e,
                    "error reading stream"
                );
                break;
            }
        }
    }
}

/// Reader tasks attached to a running child.
struct Readers {
    handles: [Option<JoinHandle<()>>; 2],
    stderr_rx: mpsc::UnboundedReceiver<String>,
}

impl ProcessBuilder {
    fn attach_readers(&self, name: &str, child: &mut Child) -> Readers {
        // stdout is only traced, so its channel is dropped with the reader
        let (stdout_tx, _) = mpsc::unbounded_channel::<String>();
        let (stderr_tx, stderr_rx) = mpsc::unbounded_channel::<String>();

        let stdout = spawn_reader(
            child.stdout.take(),
            StreamFlags::FORWARD_TO_LOG,
            name,
            "stdout",
            stdout_tx,
        );
        let stderr = spawn_reader(
            child.stderr.take(),
            self.stderr_config(),
            name,
            "stderr",
            stderr_tx,
        );

        Readers {
            handles: [stdout, stderr],
            stderr_rx,
        }
    }

    /// Runs the child process, killing it if `token` is cancelled first.
    pub(super) async fn run_child_with_cancellation(
        &self,
        name: &str,
        cmd_line: &str,
        child: &mut Child,
        token: CancellationToken,
    ) -> ProcessResult<ProcessOutput> {
        let mut readers = self.attach_readers(name, child);
        let io_err = |source| ProcessError::Io {
            command: cmd_line.to_string(),
            source,
        };

        let (exit_status, interrupted) = tokio::select! {
            status = child.wait() => (status.map_err(io_err)?, false),
            () = token.cancelled() => {
                warn!(process = %name, "Cancellation requested, terminating process");
                child.kill().await.ok();
                (child.wait().await.map_err(io_err)?, true)
            }
        };

        await_readers(readers.handles).await;
        Ok(ProcessOutput::new(
            exit_status.code().unwrap_or(-1),
            collect_output(&mut readers.stderr_rx, self.stderr_config()),
            interrupted,
        ))
    }
}
