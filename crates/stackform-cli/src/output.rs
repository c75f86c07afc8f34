//! Output management and formatting.
//!
//! stdout carries the artifact and nothing else; status lines go to
//! stderr so `stackform > vpc.yaml` captures a clean template.

use std::io;

use console::Term;
use owo_colors::OwoColorize;

use crate::cli::GlobalArgs;

/// Manages CLI output.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    stdout: Term,
    stderr: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs) -> Self {
        let stderr = Term::stderr();
        Self {
            quiet: args.quiet,
            no_color: args.no_color || !stderr.features().colors_supported(),
            stdout: Term::stdout(),
            stderr,
        }
    }

    /// Write the rendered template verbatim. Never suppressed.
    pub fn artifact(&self, text: &str) -> io::Result<()> {
        self.stdout.write_str(text)?;
        self.stdout.flush()
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.stderr.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.stderr.write_line(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
        };
        OutputManager::new(&args)
    }

    #[test]
    fn quiet_suppresses_status() {
        let out = make_manager(true, true);
        assert!(out.success("written").is_ok());
        assert!(out.info("dry run").is_ok());
    }

    #[test]
    fn no_color_flag_is_honoured() {
        assert!(make_manager(false, true).no_color);
    }
}
