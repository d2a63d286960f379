//! Driving the editor and the executor over the argument list.

use std::io::{self, Read, Write};

use crate::editor::{EditOutcome, InputDecoder, LineEditor};
use crate::path::Target;
use crate::rename::{self, AbortReason, RenameOutcome, RenameResult};
use crate::terminal::{RawMode, TerminalSession};

/// What to do after a rename fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first failure.
    #[default]
    Abort,
    /// Report the failure and move on; the run still ends as failed.
    KeepGoing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    Success,
    Failed,
    Interrupted,
}

impl BatchStatus {
    pub fn exit_code(self) -> u8 {
        match self {
            BatchStatus::Success => 0,
            BatchStatus::Failed => 1,
            BatchStatus::Interrupted => 130,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<RenameOutcome>,
    pub status: BatchStatus,
    pub aborted: Option<AbortReason>,
}

impl BatchReport {
    fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            status: BatchStatus::Success,
            aborted: None,
        }
    }
}

enum ArgumentStep {
    Done(RenameOutcome),
    Aborted(AbortReason),
}

/// Processes arguments strictly in order, one terminal session for all.
///
/// This is the only place where outcomes turn into terminal text and an
/// exit status.
pub struct BatchController<'s, R: Read, W: Write, M: RawMode> {
    session: &'s mut TerminalSession<W, M>,
    input: R,
    decoder: InputDecoder,
    policy: ErrorPolicy,
}

impl<'s, R: Read, W: Write, M: RawMode> BatchController<'s, R, W, M> {
    pub fn new(session: &'s mut TerminalSession<W, M>, input: R, policy: ErrorPolicy) -> Self {
        Self {
            session,
            input,
            decoder: InputDecoder::new(),
            policy,
        }
    }

    pub fn run<I, A>(&mut self, arguments: I) -> io::Result<BatchReport>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<[u8]>,
    {
        let mut report = BatchReport::new();

        for argument in arguments {
            match self.process(argument.as_ref())? {
                ArgumentStep::Done(outcome) => {
                    let message = outcome.result.message();
                    report.outcomes.push(outcome);
                    if let Some(message) = message {
                        self.session.report(&message)?;
                        report.status = BatchStatus::Failed;
                        if self.policy == ErrorPolicy::Abort {
                            tracing::info!("stopping after first failure");
                            break;
                        }
                    }
                }
                ArgumentStep::Aborted(reason) => {
                    tracing::info!(%reason, "batch aborted");
                    self.session.report(&reason.to_string())?;
                    report.status = match reason {
                        AbortReason::Interrupted => BatchStatus::Interrupted,
                        AbortReason::InputClosed => BatchStatus::Failed,
                    };
                    report.aborted = Some(reason);
                    break;
                }
            }
        }

        Ok(report)
    }

    fn process(&mut self, argument: &[u8]) -> io::Result<ArgumentStep> {
        let target = Target::parse(argument);
        if target.is_empty() {
            tracing::debug!(argument = %String::from_utf8_lossy(argument), "empty basename, skipping");
            return Ok(ArgumentStep::Done(RenameOutcome::new(
                target,
                Vec::new(),
                RenameResult::Skipped,
            )));
        }
        if let Err(err) = target.validate() {
            tracing::debug!(path = %target.display_path(), "{err}");
            return Ok(ArgumentStep::Done(RenameOutcome::new(
                target,
                Vec::new(),
                RenameResult::ValidationFailed(err),
            )));
        }

        tracing::debug!(path = %target.display_path(), "prompting");
        self.session.begin_line()?;
        let edited = LineEditor::new(target.basename()).run(
            &mut self.input,
            &mut self.decoder,
            self.session.output(),
        )?;

        match edited {
            EditOutcome::Committed(suffix) => {
                self.session.end_line()?;
                Ok(ArgumentStep::Done(rename::apply(target, suffix)))
            }
            EditOutcome::Aborted(reason) => Ok(ArgumentStep::Aborted(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rename::ValidationError;
    use crate::terminal::NoRawMode;
    use std::fs;
    use std::os::unix::ffi::OsStrExt;
    use tempfile::TempDir;

    struct Run {
        report: BatchReport,
        output: Vec<u8>,
    }

    fn run_batch(arguments: &[Vec<u8>], typed: &[u8], policy: ErrorPolicy) -> Run {
        let mut session = TerminalSession::open(Vec::new(), NoRawMode).unwrap();
        let report = BatchController::new(&mut session, typed, policy)
            .run(arguments)
            .unwrap();
        session.close().unwrap();
        Run {
            report,
            output: session.output().clone(),
        }
    }

    fn arg(dir: &TempDir, name: &str) -> Vec<u8> {
        dir.path().join(name).as_os_str().as_bytes().to_vec()
    }

    fn touch(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), b"").unwrap();
    }

    #[test]
    fn no_arguments_is_silent_success() {
        let run = run_batch(&[], b"", ErrorPolicy::Abort);
        assert_eq!(run.report.status, BatchStatus::Success);
        assert!(run.output.is_empty());
    }

    #[test]
    fn empty_and_separator_only_arguments_are_skipped_silently() {
        let arguments = vec![b"".to_vec(), b"/".to_vec(), b"///".to_vec()];
        let run = run_batch(&arguments, b"", ErrorPolicy::Abort);
        assert_eq!(run.report.status, BatchStatus::Success);
        assert_eq!(run.report.outcomes.len(), 3);
        assert!(run
            .report
            .outcomes
            .iter()
            .all(|outcome| outcome.result == RenameResult::Skipped));
        assert!(run.output.is_empty());
    }

    #[test]
    fn renames_with_typed_suffix() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "test2");
        let argument = arg(&dir, "test2");

        let run = run_batch(&[argument], b"hello\n", ErrorPolicy::Abort);

        assert_eq!(run.report.status, BatchStatus::Success);
        assert_eq!(run.report.outcomes[0].result, RenameResult::Success);
        assert!(dir.path().join("test2hello").is_file());
        assert_eq!(run.output, b"\x1b[?2004h> test2hello\r\n\x1b[?2004l\r");
    }

    #[test]
    fn too_long_basename_fails_without_prompt() {
        let argument = vec![b'x'; 513];
        let run = run_batch(&[argument], b"", ErrorPolicy::Abort);

        assert_eq!(run.report.status, BatchStatus::Failed);
        assert_eq!(
            run.report.outcomes[0].result,
            RenameResult::ValidationFailed(ValidationError::TooLong { len: 513 })
        );
        assert_eq!(run.output, b"Filename too long!\r\n");
    }

    #[test]
    fn slash_suffix_is_echoed_then_rejected() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "test21");

        let run = run_batch(&[arg(&dir, "test21")], b"/file.txt\n", ErrorPolicy::Abort);

        assert_eq!(run.report.status, BatchStatus::Failed);
        assert!(run
            .output
            .ends_with(b"test21/file.txt\r\nNew filename cannot contain a slash.\r\n\x1b[?2004l\r"));
        assert!(dir.path().join("test21").is_file());
    }

    #[test]
    fn first_failure_stops_the_batch() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "second");
        let arguments = vec![arg(&dir, "missing"), arg(&dir, "second")];

        let run = run_batch(&arguments, b"1\n2\n", ErrorPolicy::Abort);

        assert_eq!(run.report.status, BatchStatus::Failed);
        assert_eq!(run.report.outcomes.len(), 1);
        assert!(dir.path().join("second").is_file());
    }

    #[test]
    fn keep_going_processes_every_argument() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "second");
        let arguments = vec![arg(&dir, "missing"), arg(&dir, "second")];

        let run = run_batch(&arguments, b"1\n2\n", ErrorPolicy::KeepGoing);

        assert_eq!(run.report.status, BatchStatus::Failed);
        assert_eq!(run.report.outcomes.len(), 2);
        assert_eq!(run.report.outcomes[1].result, RenameResult::Success);
        assert!(dir.path().join("second2").is_file());
    }

    #[test]
    fn crlf_enter_does_not_skip_the_next_prompt() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a");
        touch(&dir, "b");
        let arguments = vec![arg(&dir, "a"), arg(&dir, "b")];

        let run = run_batch(&arguments, b"1\r\n2\r\n", ErrorPolicy::Abort);

        assert_eq!(run.report.status, BatchStatus::Success);
        assert!(dir.path().join("a1").is_file());
        assert!(dir.path().join("b2").is_file());
    }

    #[test]
    fn end_of_input_aborts_with_failure() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a");

        let run = run_batch(&[arg(&dir, "a")], b"abc", ErrorPolicy::KeepGoing);

        assert_eq!(run.report.status, BatchStatus::Failed);
        assert_eq!(run.report.aborted, Some(AbortReason::InputClosed));
        assert!(run
            .output
            .ends_with(b"abc\r\nUnexpected end of input.\r\n\x1b[?2004l\r"));
        assert!(dir.path().join("a").is_file());
    }

    #[test]
    fn ctrl_c_interrupts_with_status_130() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a");
        touch(&dir, "b");
        let arguments = vec![arg(&dir, "a"), arg(&dir, "b")];

        let run = run_batch(&arguments, b"x\x03", ErrorPolicy::KeepGoing);

        assert_eq!(run.report.status, BatchStatus::Interrupted);
        assert_eq!(run.report.status.exit_code(), 130);
        assert!(run.report.outcomes.is_empty());
        assert!(dir.path().join("a").is_file());
    }

    #[test]
    fn exit_codes() {
        assert_eq!(BatchStatus::Success.exit_code(), 0);
        assert_eq!(BatchStatus::Failed.exit_code(), 1);
    }
}
