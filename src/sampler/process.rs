// Run an external command and capture its stderr.
//
// stderr is read line by line while the child runs, so a chatty sampler
// can't fill the pipe buffer and deadlock against our wait().

use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use super::traits::{SamplerOutcome, SamplerStatus};

/// Run `argv` (program first) to completion.
///
/// A nonzero exit is reported as [`SamplerStatus::Warning`] with the
/// captured stderr logged; failing to start is [`SamplerStatus::Fatal`].
pub fn run_capturing_stderr(argv: &[String]) -> SamplerOutcome {
    let Some((program, args)) = argv.split_first() else {
        return SamplerOutcome::fatal("empty sampler command");
    };
    let command_line = argv.join(" ");

    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return SamplerOutcome::fatal(format!("failed to start `{command_line}`: {e}")),
    };

    let mut lines = Vec::new();
    if let Some(stderr) = child.stderr.take() {
        let mut reader = BufReader::new(stderr);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    let line = line.trim_end_matches(|c| c == '\r' || c == '\n').to_string();
                    debug!("{line}");
                    lines.push(line);
                }
                Err(e) => {
                    warn!(error = %e, "Failed reading sampler stderr");
                    break;
                }
            }
        }
    }

    let status = match child.wait() {
        Ok(status) => status,
        Err(e) => {
            return SamplerOutcome {
                status: SamplerStatus::Fatal(format!("failed to wait for `{command_line}`: {e}")),
                stderr: lines,
            }
        }
    };
    debug!(rc = ?status.code(), command = %command_line, "Sampler finished");

    if status.success() {
        return SamplerOutcome::success(lines);
    }

    warn!(rc = ?status.code(), command = %command_line, "Sampler exited with an error. stderr:");
    for line in &lines {
        warn!("{line}");
    }
    SamplerOutcome {
        status: SamplerStatus::Warning {
            code: status.code(),
        },
        stderr: lines,
    }
}
