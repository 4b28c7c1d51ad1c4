//! Key runner: feeds tokens to a session and prints the display

use std::io::{BufRead, Write};

use rpn_engine::prelude::Session;
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::error::CliResult;

/// Drives one [`Session`] from command-line tokens or line input
#[derive(Debug)]
pub struct Runner<W: Write> {
    session: Session,
    config: CliConfig,
    out: W,
}

impl<W: Write> Runner<W> {
    /// Creates a runner, seeding the session from the configuration
    pub fn new(config: CliConfig, out: W) -> Self {
        let session = config
            .seed
            .clone()
            .map_or_else(Session::new, Session::with_seed);
        Self {
            session,
            config,
            out,
        }
    }

    /// Presses every token, then prints the result once
    pub fn run_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) -> CliResult<()> {
        for token in tokens {
            self.press(token.as_ref())?;
        }
        self.emit()?;
        self.finish();
        Ok(())
    }

    /// Presses each line's tokens and prints the result after every
    /// non-blank line
    pub fn run_reader<R: BufRead>(&mut self, reader: R) -> CliResult<()> {
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            debug!(line = line.as_str(), "input");
            for token in line.split_whitespace() {
                self.press(token)?;
            }
            self.emit()?;
        }
        self.finish();
        Ok(())
    }

    /// A rejected token has already been logged by the session, so only
    /// fail-fast mode turns it into an error
    fn press(&mut self, token: &str) -> CliResult<()> {
        match self.session.press_key(token) {
            Err(err) if self.config.fail_fast => Err(err.into()),
            _ => Ok(()),
        }
    }

    fn emit(&mut self) -> CliResult<()> {
        if self.config.show_stack {
            writeln!(self.out, "{}", self.session.state().to_json()?)?;
        } else {
            writeln!(self.out, "{}", self.session.display())?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn finish(&self) {
        info!(
            depth = self.session.state().len(),
            rejected = self.session.rejected_count(),
            "session finished"
        );
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Consumes the runner, returning the output sink
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use rpn_engine::prelude::{CalcError, Seed};

    fn output(runner: Runner<Vec<u8>>) -> String {
        String::from_utf8(runner.into_inner()).unwrap()
    }

    #[test]
    fn test_tokens_print_display_once() {
        let mut runner = Runner::new(CliConfig::new(), Vec::new());
        runner.run_tokens(&["1", "enter", "2", "+"]).unwrap();
        assert_eq!(output(runner), "3\n");
    }

    #[test]
    fn test_no_tokens_prints_seed_display() {
        let mut runner = Runner::new(CliConfig::new().with_seed(vec![7.0]), Vec::new());
        runner.run_tokens::<&str>(&[]).unwrap();
        assert_eq!(output(runner), "7\n");
    }

    #[test]
    fn test_reader_prints_after_each_line() {
        let mut runner = Runner::new(CliConfig::new(), Vec::new());
        let input = "6 enter\n\n7 *\n2 /\n";
        runner.run_reader(input.as_bytes()).unwrap();
        assert_eq!(output(runner), "6\n42\n21\n");
    }

    #[test]
    fn test_show_stack_prints_json() {
        let config = CliConfig::new().with_show_stack(true);
        let mut runner = Runner::new(config, Vec::new());
        runner.run_tokens(&["1", "enter", "2"]).unwrap();
        assert_eq!(output(runner), "[\"2\",1.0]\n");
    }

    #[test]
    fn test_rejection_is_skipped_by_default() {
        let mut runner = Runner::new(CliConfig::new(), Vec::new());
        runner
            .run_tokens(&["drop", "4", "sqrt", "enter", "enter", "+"])
            .unwrap();
        assert_eq!(runner.session().rejected_count(), 2);
        assert_eq!(output(runner), "8\n");
    }

    #[test]
    fn test_fail_fast_stops_at_rejection() {
        let config = CliConfig::new()
            .with_seed(vec![0.0, 1.0])
            .with_fail_fast(true);
        let mut runner = Runner::new(config, Vec::new());
        let err = runner.run_tokens(&["/", "5"]).unwrap_err();
        assert!(matches!(err, CliError::Calc(CalcError::InfiniteResult)));
        assert_eq!(runner.session().display(), "0");
        assert_eq!(output(runner), "");
    }

    #[test]
    fn test_seed_resumes_edit() {
        let config = CliConfig::new().with_seed(Seed::Editing {
            editing_text: "1.2E-3".into(),
            committed: vec![456.0],
        });
        let mut runner = Runner::new(config, Vec::new());
        runner.run_tokens(&["chs"]).unwrap();
        assert_eq!(output(runner), "1.2E+3\n");
    }
}
