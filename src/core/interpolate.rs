//! Placeholder interpolation
//!
//! Replaces `{key}` tokens in a message with context values and a few
//! runtime-derived placeholders:
//!
//! - `{post_vars}`, `{get_vars}`: current request parameters
//! - `{session_vars}`: session data, only while a session is active
//! - `{env}`: environment name
//! - `{env:NAME}`: environment variable `NAME`, or `n/a`
//! - `{file}`, `{line}`: call site of the log statement
//!
//! Exception values render as `<message> <file>:<line>` with the file passed
//! through [`PathRoots::clean`](super::runtime::PathRoots::clean).
//!
//! Substitution happens in a single pass; replaced text is never scanned again.

use super::log_context::{FieldValue, LogContext};
use super::log_entry::{CallSite, Message};
use super::runtime::{RuntimeContext, VarMap};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Value substituted for `{env:NAME}` when `NAME` is unset
pub const MISSING_ENV_VALUE: &str = "n/a";

/// Value substituted for `{file}`/`{line}` without a call site
pub const UNKNOWN_LOCATION: &str = "unknown";

static ENV_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"env:([^}]+)").expect("Invalid env token regex"));

/// Expand placeholders in `message`.
///
/// Structured messages are returned untouched.
///
/// # Example
///
/// ```
/// use rust_log_dispatcher::core::{interpolate, AmbientRuntime, LogContext, Message};
///
/// let runtime = AmbientRuntime::new().with_environment("production");
/// let context = LogContext::new().with_field("id", 42);
///
/// let message = interpolate(
///     Message::from("User {id} logged in from {env}"),
///     &context,
///     &runtime,
///     None,
/// );
/// assert_eq!(message.as_text(), Some("User 42 logged in from production"));
/// ```
pub fn interpolate(
    message: Message,
    context: &LogContext,
    runtime: &dyn RuntimeContext,
    call_site: Option<&CallSite>,
) -> Message {
    let Message::Text(template) = message else {
        return message;
    };

    let replacements = build_replacements(&template, context, runtime, call_site);
    Message::Text(replace_placeholders(&template, &replacements))
}

fn build_replacements(
    template: &str,
    context: &LogContext,
    runtime: &dyn RuntimeContext,
    call_site: Option<&CallSite>,
) -> HashMap<String, String> {
    let mut replace = HashMap::with_capacity(context.len() + 4);

    for (key, value) in context.fields() {
        let value = match value {
            FieldValue::Exception(e) => {
                format!("{} {}:{}", e.message, runtime.roots().clean(&e.file), e.line)
            }
            other => other.to_string(),
        };
        replace.insert(format!("{{{}}}", key), value);
    }

    // Runtime placeholders win over context keys of the same name.
    // Each is only computed when its token appears.
    if template.contains("{post_vars}") {
        replace.insert("{post_vars}".to_string(), dump_vars("POST", &runtime.post_vars()));
    }
    if template.contains("{get_vars}") {
        replace.insert("{get_vars}".to_string(), dump_vars("GET", &runtime.get_vars()));
    }
    if template.contains("{env}") {
        replace.insert("{env}".to_string(), runtime.environment());
    }

    if template.contains("{file}") {
        let (file, line) = match call_site {
            Some(site) => (runtime.roots().clean(&site.file), site.line.to_string()),
            None => (UNKNOWN_LOCATION.to_string(), UNKNOWN_LOCATION.to_string()),
        };
        replace.insert("{file}".to_string(), file);
        replace.insert("{line}".to_string(), line);
    }

    if template.contains("env:") {
        for caps in ENV_TOKEN.captures_iter(template) {
            let key = &caps[1];
            let value = runtime
                .env_var(key)
                .unwrap_or_else(|| MISSING_ENV_VALUE.to_string());
            replace.insert(format!("{{env:{}}}", key), value);
        }
    }

    if template.contains("{session_vars}") {
        if let Some(session) = runtime.session_vars() {
            replace.insert("{session_vars}".to_string(), dump_vars("SESSION", &session));
        }
    }

    replace
}

fn dump_vars(label: &str, vars: &VarMap) -> String {
    let dump = serde_json::to_string_pretty(vars).unwrap_or_else(|_| format!("{:?}", vars));
    format!("{}: {}", label, dump)
}

/// Single left-to-right pass; at each position the longest matching key wins.
/// Every key starts with `{`.
fn replace_placeholders(template: &str, replacements: &HashMap<String, String>) -> String {
    if replacements.is_empty() {
        return template.to_string();
    }

    let mut keys: Vec<&str> = replacements.keys().map(String::as_str).collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        match keys.iter().find(|key| tail.starts_with(**key)) {
            Some(key) => {
                out.push_str(&replacements[*key]);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
