use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;
use tracing::{error, info};

/// Result of running an external command.
///
/// `output` holds stdout when the command succeeded and stderr (or the
/// spawn error) when it did not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub success: bool,
    pub output: String,
}

impl CommandOutcome {
    pub fn ok(output: impl Into<String>) -> Self {
        Self { success: true, output: output.into() }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self { success: false, output: output.into() }
    }
}

/// Runs external programs. Ordinary failures are reported through
/// `CommandOutcome`, never as errors.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String], input: Option<&str>) -> CommandOutcome;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[String], input: Option<&str>) -> CommandOutcome {
        (**self).run(program, args, input)
    }
}

/// Runs commands on the local machine with `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], input: Option<&str>) -> CommandOutcome {
        info!("Running command: {}", render_command(program, args));

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                let msg = format!("Failed to execute {}: {}", program, e);
                error!("Exception running command: {}", msg);
                return CommandOutcome::failed(msg);
            }
        };

        // Feed stdin from its own thread while wait_with_output drains stdout
        // and stderr. The pipe closes when the thread drops it.
        let writer = match (input, child.stdin.take()) {
            (Some(text), Some(mut stdin)) => {
                let text = text.to_owned();
                Some(thread::spawn(move || stdin.write_all(text.as_bytes())))
            }
            _ => None,
        };

        let output = match child.wait_with_output() {
            Ok(output) => output,
            Err(e) => {
                let msg = format!("Failed to wait for {}: {}", program, e);
                error!("Exception running command: {}", msg);
                return CommandOutcome::failed(msg);
            }
        };

        let write_result = match writer.map(|w| w.join()) {
            None | Some(Ok(Ok(()))) => Ok(()),
            Some(Ok(Err(e))) => Err(e.to_string()),
            Some(Err(_)) => Err("stdin writer panicked".to_string()),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!("Command failed: {}", stderr.trim_end());
            return CommandOutcome::failed(stderr);
        }

        if let Err(e) = write_result {
            let msg = format!("Failed to write stdin of {}: {}", program, e);
            error!("Exception running command: {}", msg);
            return CommandOutcome::failed(msg);
        }

        CommandOutcome::ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Space-joined command line, used for logging only.
pub fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
