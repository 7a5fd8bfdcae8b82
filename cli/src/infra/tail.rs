//! Infrastructure implementation of the `LogFollower` port.
//!
//! `FileTail` polls the container log for appended data and copies each
//! complete line to stdout. The control script forks the JVM and exits
//! before the log exists, so the tailer first waits for the file to
//! appear. There is no cancellation endpoint: tailing ends when the tool
//! process terminates.

use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::application::ports::LogFollower;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Production `LogFollower` that streams a growing file to stdout.
pub struct FileTail;

impl LogFollower for FileTail {
    async fn follow(&self, log: &Path) -> Result<()> {
        let file = wait_for_file(log).await?;
        let mut reader = BufReader::new(file);
        let mut stdout = tokio::io::stdout();
        let mut line = String::new();
        loop {
            let read = reader
                .read_line(&mut line)
                .await
                .with_context(|| format!("reading {}", log.display()))?;
            if read == 0 {
                tokio::time::sleep(POLL_INTERVAL).await;
                continue;
            }
            // Hold back partial lines until the writer finishes them.
            if line.ends_with('\n') {
                stdout.write_all(line.as_bytes()).await.context("writing log output")?;
                stdout.flush().await.context("flushing log output")?;
                line.clear();
            }
        }
    }
}

/// Wait for the log file to be created by the freshly started container.
async fn wait_for_file(log: &Path) -> Result<File> {
    loop {
        match File::open(log).await {
            Ok(file) => return Ok(file),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tokio::time::sleep(POLL_INTERVAL).await;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("opening {}", log.display()));
            }
        }
    }
}
