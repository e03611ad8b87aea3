//! Argument vector construction

use std::fmt;
use std::process::Command;

use crate::request::LoginRequest;
use crate::sensitive::Sensitive;

/// A single command-line token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Token that may be shown in logs
    Plain(String),
    /// Token rendered as a redaction marker everywhere except the argv
    Sensitive(Sensitive),
}

impl Arg {
    fn expose(&self) -> &str {
        match self {
            Self::Plain(value) => value,
            Self::Sensitive(value) => value.expose(),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(value) => f.write_str(value),
            Self::Sensitive(value) => fmt::Display::fmt(value, f),
        }
    }
}

/// Program plus ordered arguments, passed to the child without a shell.
///
/// `Display` redacts sensitive tokens, so a `CommandLine` can be logged as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<Arg>,
}

impl CommandLine {
    /// Create a command line for `program` with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a plain argument
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg::Plain(value.into()));
        self
    }

    /// Append a sensitive argument
    pub fn sensitive_arg(mut self, value: Sensitive) -> Self {
        self.args.push(Arg::Sensitive(value));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// The full argument vector, program first, secrets in cleartext
    pub fn tokens(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|a| a.expose().to_string()))
            .collect()
    }

    /// Tokens joined by single spaces, secrets in cleartext
    pub fn preview(&self) -> String {
        self.tokens().join(" ")
    }

    /// Build the process command with every token as a discrete argument
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(self.args.iter().map(Arg::expose));
        command
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Build `<tool> login <registry> -u <username> -p <password>`
pub fn login_command(tool: &str, request: &LoginRequest) -> CommandLine {
    CommandLine::new(tool)
        .arg("login")
        .arg(request.registry())
        .arg("-u")
        .arg(request.username())
        .arg("-p")
        .sensitive_arg(request.password().clone())
}
