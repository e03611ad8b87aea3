//! Automation host module adapter
//!
//! The host invokes a module with a JSON argument file and expects a single
//! JSON object back. Arguments follow the host's argument-spec conventions
//! (required fields, string coercion, `_ansible_*` internal keys) and every
//! occurrence of the no-log password is masked in the response.


use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::error::{LoginError, Result};
use crate::invoker::CosignInvoker;
use crate::request::LoginRequest;
use crate::result::LoginResult;
use crate::sensitive::Sensitive;

/// Module name used in host-facing messages
pub const MODULE_NAME: &str = "cosign_login";

/// Accepted parameters, sorted
const PARAMETERS: [&str; 3] = ["password", "registry", "username"];

/// Wrapper key used when arguments arrive on stdin
const WRAPPER_KEY: &str = "ANSIBLE_MODULE_ARGS";

const INTERNAL_PREFIX: &str = "_ansible_";
const CHECK_MODE_KEY: &str = "_ansible_check_mode";

/// Parsed module invocation
#[derive(Debug, Clone)]
pub struct ModuleArgs {
    pub request: LoginRequest,
    pub check_mode: bool,
}

impl ModuleArgs {
    /// Parse the host's JSON arguments
    pub fn from_json(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| LoginError::MalformedArguments(e.to_string()))?;

        let mut object = match value {
            Value::Object(object) => object,
            _ => {
                return Err(LoginError::MalformedArguments(
                    "expected a JSON object".to_string(),
                ))
            }
        };

        match object.remove(WRAPPER_KEY) {
            Some(Value::Object(inner)) => object = inner,
            Some(_) => {
                return Err(LoginError::MalformedArguments(format!(
                    "{WRAPPER_KEY} must be a JSON object"
                )))
            }
            None => {}
        }

        Self::from_map(object)
    }

    fn from_map(mut args: Map<String, Value>) -> Result<Self> {
        let check_mode = args
            .get(CHECK_MODE_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false);
        args.retain(|key, _| !key.starts_with(INTERNAL_PREFIX));

        let mut unsupported: Vec<&str> = args
            .keys()
            .map(String::as_str)
            .filter(|key| !PARAMETERS.contains(key))
            .collect();
        if !unsupported.is_empty() {
            unsupported.sort_unstable();
            return Err(LoginError::InvalidArguments(format!(
                "Unsupported parameters for ({MODULE_NAME}) module: {}. Supported parameters include: {}.",
                unsupported.join(", "),
                PARAMETERS.join(", ")
            )));
        }

        let mut values = Vec::with_capacity(PARAMETERS.len());
        let mut missing = Vec::new();
        for name in PARAMETERS {
            match coerce_str(name, args.remove(name))? {
                Some(value) if !value.is_empty() => values.push(value),
                _ => {
                    missing.push(name);
                    values.push(String::new());
                }
            }
        }
        if !missing.is_empty() {
            return Err(LoginError::InvalidArguments(format!(
                "missing required arguments: {}",
                missing.join(", ")
            )));
        }

        let [password, registry, username]: [String; 3] = values
            .try_into()
            .map_err(|_| LoginError::MalformedArguments("argument count".to_string()))?;

        Ok(Self {
            request: LoginRequest::new(registry, username, Sensitive::from(password))?,
            check_mode,
        })
    }
}

/// Convert a JSON value to the host's `str` type without echoing its content
fn coerce_str(name: &str, value: Option<Value>) -> Result<Option<String>> {
    let kind = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => return Ok(Some(s)),
        Some(Value::Number(n)) => return Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => return Ok(Some(if b { "True" } else { "False" }.to_string())),
        Some(Value::Array(_)) => "list",
        Some(Value::Object(_)) => "dict",
    };
    Err(LoginError::InvalidArguments(format!(
        "argument '{name}' is of type {kind} and we were unable to convert to str"
    )))
}

/// The single JSON object a module run writes to stdout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ModuleResponse {
    /// The module ran (or previewed) the login
    Exit {
        changed: bool,
        cmd: String,
        rc: i32,
        stdout: String,
        stderr: String,
    },
    /// Arguments were rejected or cosign could not be launched
    Failed {
        failed: bool,
        changed: bool,
        msg: String,
    },
}

impl ModuleResponse {
    /// Build a response from a login result, masking the password everywhere
    pub fn exit(result: &LoginResult, password: &Sensitive) -> Self {
        Self::Exit {
            changed: result.changed,
            cmd: password.mask(&result.cmd()),
            rc: result.exit_code,
            stdout: password.mask(&result.stdout),
            stderr: password.mask(&result.stderr),
        }
    }

    /// Build a failure response
    pub fn fail(msg: impl Into<String>) -> Self {
        Self::Failed {
            failed: true,
            changed: false,
            msg: msg.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Run one module invocation from the host's JSON arguments
#[instrument(skip_all, fields(module = MODULE_NAME))]
pub fn run_module(invoker: &CosignInvoker, input: &str) -> ModuleResponse {
    let args = match ModuleArgs::from_json(input) {
        Ok(args) => args,
        Err(e) => {
            debug!(error = %e, "rejected module arguments");
            return ModuleResponse::fail(e.to_string());
        }
    };

    let password = args.request.password();
    match invoker.login(&args.request, args.check_mode) {
        Ok(result) => ModuleResponse::exit(&result, password),
        Err(e) => ModuleResponse::fail(password.mask(&e.to_string())),
    }
}
