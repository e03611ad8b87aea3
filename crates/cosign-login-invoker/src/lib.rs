//! cosign-login Invoker - registry authentication through the cosign CLI
//!
//! This crate turns a [`LoginRequest`] into a `cosign login` invocation and
//! reports the outcome as a [`LoginResult`]:
//! - the argument vector is built from discrete tokens, never a shell string
//! - dry-run mode previews the command without spawning anything
//! - a nonzero exit from cosign is reported as data, not as an error
//!
//! The password travels as a [`Sensitive`] value so it cannot reach a log
//! record or serialized output without an explicit `expose()` call.

pub mod command;
pub mod error;
pub mod host;
pub mod invoker;
pub mod request;
pub mod result;
pub mod sensitive;

#[cfg(test)]
pub(crate) mod testing;

pub use command::{login_command, Arg, CommandLine};
pub use error::{LoginError, Result};
pub use host::{run_module, ModuleArgs, ModuleResponse};
pub use invoker::{login, CosignInvoker};
pub use request::LoginRequest;
pub use result::{LoginResult, NOT_RUN_EXIT_CODE};
pub use sensitive::{Sensitive, REDACTED};
