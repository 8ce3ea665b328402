use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static ENV_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ENV\[([A-Za-z_][A-Za-z0-9_]*)\]$").unwrap());

/// Resolves template placeholders embedded in raw property values.
///
/// Resolution is late-bound: a property bag stores raw values and runs them
/// through a resolver on every read, so a placeholder picks up the current
/// environment rather than the one present at construction time.
pub trait TemplateResolver {
    /// Converts a raw stored value into its concrete form. Values without
    /// placeholders must pass through unchanged.
    fn resolve(&self, raw: &Value) -> Value;
}

/// A resolver that performs no substitution. Useful when properties are known
/// to be literal, and as the baseline for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl TemplateResolver for NoopResolver {
    fn resolve(&self, raw: &Value) -> Value {
        raw.clone()
    }
}

/// Resolves `ENV[VAR]` placeholders from the process environment.
///
/// A string property whose entire value matches `ENV[VAR]` is replaced by the
/// value of the `VAR` environment variable; an unset variable resolves to
/// `null`. Arrays are resolved element-wise. Every other value passes through.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvResolver;

impl TemplateResolver for EnvResolver {
    fn resolve(&self, raw: &Value) -> Value {
        match raw {
            Value::String(s) => match ENV_PATTERN.captures(s) {
                Some(caps) => std::env::var(&caps[1])
                    .map(Value::String)
                    .unwrap_or(Value::Null),
                None => raw.clone(),
            },
            Value::Array(items) => Value::Array(items.iter().map(|v| self.resolve(v)).collect()),
            other => other.clone(),
        }
    }
}
