//! Contains helper functions shared by the command handlers.

use std::sync::{Mutex, PoisonError};

use crate::core::BrowserError;
use serde_json::Value;

/// Locks the browser, runs `query_fn` against it and releases the lock.
///
/// Every query holds the lock for its whole duration, so traversal and
/// activation never interleave between concurrent requests. A poisoned lock is
/// recovered, since the browser holds no invariants a panicking query could break.
pub fn with_browser<B, T, F>(browser: &Mutex<B>, query_fn: F) -> T
where
    F: FnOnce(&mut B) -> T,
{
    let mut guard = browser.lock().unwrap_or_else(PoisonError::into_inner);
    query_fn(&mut guard)
}

/// Reads the parameter at `index` as a string.
///
/// Any scalar is accepted and stringified; `None` means the parameter is missing.
pub fn string_param(params: &[Value], index: usize) -> Result<Option<String>, BrowserError> {
    match params.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(BrowserError::InvalidInput(format!(
            "parameter {index} is not a scalar: {other}"
        ))),
    }
}

/// Reads a required string parameter.
pub fn required_string(params: &[Value], index: usize, what: &str) -> Result<String, BrowserError> {
    string_param(params, index)?
        .ok_or_else(|| BrowserError::InvalidInput(format!("missing {what}")))
}

/// Reads the parameter at `index` as an integer, or returns `default` when it
/// is missing.
///
/// Floats are truncated and numeric strings are parsed.
pub fn int_param(params: &[Value], index: usize, default: i64) -> Result<i64, BrowserError> {
    let invalid = |value: &Value| {
        BrowserError::InvalidInput(format!("parameter {index} is not an integer: {value}"))
    };

    match params.get(index) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| invalid(&params[index])),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
                .ok_or_else(|| invalid(&params[index]))
        }
        Some(other) => Err(invalid(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_param_stringifies_scalars() {
        let params = vec![json!("Drums"), json!(808), json!(true), json!(null)];
        assert_eq!(string_param(&params, 0).unwrap().as_deref(), Some("Drums"));
        assert_eq!(string_param(&params, 1).unwrap().as_deref(), Some("808"));
        assert_eq!(string_param(&params, 2).unwrap().as_deref(), Some("true"));
        assert_eq!(string_param(&params, 3).unwrap(), None);
        assert_eq!(string_param(&params, 9).unwrap(), None);
    }

    #[test]
    fn test_string_param_rejects_structures() {
        let params = vec![json!(["a"])];
        assert!(string_param(&params, 0).is_err());
    }

    #[test]
    fn test_required_string_reports_missing_parameter() {
        let err = required_string(&[], 0, "pack name").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: missing pack name");
    }

    #[test]
    fn test_int_param_coerces_numbers_and_strings() {
        let params = vec![json!(5), json!(7.9), json!(" 12 "), json!("3.5"), json!("lots")];
        assert_eq!(int_param(&params, 0, 10).unwrap(), 5);
        assert_eq!(int_param(&params, 1, 10).unwrap(), 7);
        assert_eq!(int_param(&params, 2, 10).unwrap(), 12);
        assert_eq!(int_param(&params, 3, 10).unwrap(), 3);
        assert!(int_param(&params, 4, 10).is_err());
        assert_eq!(int_param(&params, 5, 10).unwrap(), 10);
    }

    #[test]
    fn test_with_browser_recovers_from_poisoned_lock() {
        let browser = std::sync::Arc::new(Mutex::new(0_u32));
        let poisoner = browser.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        let value = with_browser(&*browser, |count| {
            *count += 1;
            *count
        });
        assert_eq!(value, 1);
    }
}
