//! Sanitization of JSON documents.

use crate::error::Result;
use crate::sanitizer::{DEFAULT_SANITIZER, XssSanitizer};
use serde_json::Value;

impl XssSanitizer {
    /// Recursively sanitize every string in a JSON value.
    ///
    /// Object keys are left alone.
    pub fn sanitize_json_value(&self, value: &mut Value) {
        match value {
            Value::String(s) => {
                *s = self.sanitize_str(s);
            }
            Value::Array(arr) => {
                for item in arr.iter_mut() {
                    self.sanitize_json_value(item);
                }
            }
            Value::Object(obj) => {
                for (_key, val) in obj.iter_mut() {
                    self.sanitize_json_value(val);
                }
            }
            _ => {}
        }
    }

    /// Parse, sanitize and re-serialize a JSON document.
    pub fn sanitize_json_str(&self, json: &str) -> Result<String> {
        let mut value: Value = serde_json::from_str(json)?;
        self.sanitize_json_value(&mut value);
        Ok(serde_json::to_string(&value)?)
    }
}

/// [`XssSanitizer::sanitize_json_value`] with the default sanitizer.
pub fn sanitize_json_value(value: &mut Value) {
    DEFAULT_SANITIZER.sanitize_json_value(value)
}

/// [`XssSanitizer::sanitize_json_str`] with the default sanitizer.
pub fn sanitize_json_str(json: &str) -> Result<String> {
    DEFAULT_SANITIZER.sanitize_json_str(json)
}
