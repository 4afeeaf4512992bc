//! Built-in targets the `run` command can wrap.

use std::sync::Arc;

use callwrap_error::{Error, TargetFailure};
use callwrap_intercept::{Args, FnTarget, Invocable, Value};
use clap::ValueEnum;

/// Targets selectable on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetArg {
    /// Multiplies an integer by two
    Double,
    /// Reverses a string
    Reverse,
    /// Capitalizes a word and adds an exclamation mark
    Shout,
    /// Lowercases a word and trails off
    Whisper,
    /// Always fails
    Fail,
}

impl TargetArg {
    /// Builds the invocable for this target
    pub fn build(self) -> Arc<dyn Invocable> {
        match self {
            Self::Double => double(),
            Self::Reverse => reverse(),
            Self::Shout => shout(),
            Self::Whisper => whisper(),
            Self::Fail => fail(),
        }
    }
}

fn word(args: &Args) -> String {
    args.get(0)
        .or_else(|| args.get_named("word"))
        .map_or_else(|| "yes".to_string(), |v| v.as_str().map_or_else(|| v.to_string(), str::to_string))
}

/// `double(x) = x * 2`
pub fn double() -> Arc<dyn Invocable> {
    FnTarget::new("double", |args: &Args| {
        let x = args
            .get(0)
            .or_else(|| args.get_named("x"))
            .ok_or(Error::invalid_argument("double expects one integer argument"))?;
        let x = x.as_int().ok_or(Error::target_type_mismatch("double expects an integer"))?;
        x.checked_mul(2).map(Value::Int).ok_or_else(|| TargetFailure("integer overflow").into())
    })
    .with_doc("Multiplies an integer by two")
    .shared()
}

/// Reverses its first argument
pub fn reverse() -> Arc<dyn Invocable> {
    FnTarget::new("reverse_string", |args: &Args| {
        let text = args
            .get(0)
            .and_then(Value::as_str)
            .ok_or(Error::invalid_argument("reverse expects one string argument"))?;
        Ok(Value::Str(text.chars().rev().collect()))
    })
    .with_doc("Reverses a string")
    .shared()
}

/// `shout(word="yes")`: capitalized, with an exclamation mark
pub fn shout() -> Arc<dyn Invocable> {
    FnTarget::new("shout", |args: &Args| {
        let word = word(args);
        let mut chars = word.chars();
        let capitalized: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            None => String::new(),
        };
        Ok(Value::Str(format!("{capitalized}!")))
    })
    .with_doc("Capitalizes a word and adds an exclamation mark")
    .shared()
}

/// `whisper(word="yes")`: lowercased, trailing off
pub fn whisper() -> Arc<dyn Invocable> {
    FnTarget::new("whisper", |args: &Args| Ok(Value::Str(format!("{}...", word(args).to_lowercase()))))
        .with_doc("Lowercases a word and trails off")
        .shared()
}

/// Always fails with a target failure
pub fn fail() -> Arc<dyn Invocable> {
    FnTarget::new("fail", |_: &Args| Err(TargetFailure("target failed on purpose").into()))
        .with_doc("Always fails")
        .shared()
}

/// Parses one command line argument into a value
///
/// Integers, floats and booleans are recognized; anything else is a string.
pub fn parse_value(raw: &str) -> Value {
    if let Ok(int) = raw.parse::<i64>() {
        Value::Int(int)
    } else if let Ok(float) = raw.parse::<f64>() {
        Value::Float(float)
    } else if let Ok(flag) = raw.parse::<bool>() {
        Value::Bool(flag)
    } else {
        Value::from(raw)
    }
}

/// Builds call arguments; `key=value` entries become named arguments
pub fn parse_args(raw: &[String]) -> Args {
    raw.iter().fold(Args::new(), |args, item| match item.split_once('=') {
        Some((key, value)) if !key.is_empty() => args.named(key, parse_value(value)),
        _ => args.arg(parse_value(item)),
    })
}
