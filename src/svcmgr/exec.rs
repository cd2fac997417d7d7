use std::{fmt, io, process::Command};

/// Result of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    /// Standard output followed by standard error.
    pub output: String,
}

impl Invocation {
    pub fn new(code: Option<i32>, output: impl Into<String>) -> Self {
        Self {
            code,
            output: output.into(),
        }
    }

    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Describes how the process exited, or `None` if it exited successfully.
    pub fn failure(&self) -> Option<ExitFailure> {
        if self.success() {
            None
        } else {
            Some(ExitFailure(self.code))
        }
    }
}

/// A non-zero exit. Renders as `exit status N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitFailure(Option<i32>);

impl ExitFailure {
    pub const fn code(self) -> Option<i32> {
        self.0
    }
}

impl fmt::Display for ExitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "exit status {code}"),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// Runs external programs on behalf of a service manager.
pub trait CommandRunner {
    /// Run `program` with `args`, block until it exits and capture its output.
    ///
    /// An `Err` means the program could not be executed at all. A program that
    /// ran and failed is reported through [`Invocation::code`].
    fn run(&self, program: &str, args: &[&str]) -> io::Result<Invocation>;
}

/// Spawns real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<Invocation> {
        let output = Command::new(program).args(args).output()?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(Invocation::new(output.status.code(), combined))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_rendering() {
        assert_eq!(Invocation::new(Some(0), "").failure(), None);
        assert_eq!(
            Invocation::new(Some(3), "").failure().unwrap().to_string(),
            "exit status 3"
        );
        assert_eq!(
            Invocation::new(None, "").failure().unwrap().to_string(),
            "terminated by signal"
        );
    }

    #[test]
    fn runs_real_process() {
        let inv = SystemRunner.run("sh", &["-c", "echo out; echo err >&2; exit 4"]).unwrap();
        assert_eq!(inv.code, Some(4));
        assert_eq!(inv.output, "out\nerr\n");
    }

    #[test]
    fn missing_program_is_an_error() {
        assert!(SystemRunner.run("/nonexistent/sysunit-test-binary", &[]).is_err());
    }
}
