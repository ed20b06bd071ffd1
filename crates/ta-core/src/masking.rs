//! PII masking for log lines and surfaced error messages.
//!
//! Masking is a pure transform. [`MaskedLog`] applies it at the point of
//! emission so handlers never have to remember which strings carry account
//! identifiers.

use regex::{Captures, Regex};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt::Display;
use std::sync::OnceLock;

static ACCOUNT_ID_RE: OnceLock<Regex> = OnceLock::new();

fn account_id_regex() -> &'static Regex {
    ACCOUNT_ID_RE.get_or_init(|| Regex::new(r"\d{12}").expect("valid regex"))
}

/// Masks account identifiers, names and emails when enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Masker {
    enabled: bool,
}

impl Masker {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// A masker that leaves everything untouched.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Replace every run of twelve digits with its first digit, seven `X`
    /// and its last four digits: `123456789012` becomes `1XXXXXXX9012`.
    pub fn mask_text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !self.enabled {
            return Cow::Borrowed(text);
        }
        account_id_regex().replace_all(text, |caps: &Captures<'_>| {
            let digits = &caps[0];
            format!("{}XXXXXXX{}", &digits[..1], &digits[8..])
        })
    }

    /// Keep the first and last three characters of a name or email.
    pub fn mask_label(&self, label: &str) -> String {
        if !self.enabled {
            return label.to_string();
        }
        let chars: Vec<char> = label.chars().collect();
        let head: String = chars.iter().take(3).collect();
        let tail: String = chars[chars.len().saturating_sub(3)..].iter().collect();
        format!("{}-MASKED-{}", head, tail)
    }

    /// Mask the account fields of a JSON record (recursing into arrays and
    /// nested objects). Keys are matched by substring, so `AccountId` also
    /// covers keys like `ParentAccountId`.
    pub fn mask_record(&self, record: &Value) -> Value {
        if !self.enabled {
            return record.clone();
        }
        match record {
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), self.mask_field(key, value)))
                    .collect(),
            ),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.mask_record(v)).collect()),
            other => other.clone(),
        }
    }

    fn mask_field(&self, key: &str, value: &Value) -> Value {
        if key.contains("AccountId") {
            Value::String(self.mask_text(&scalar_text(value)).into_owned())
        } else if key.contains("AccountName") || key.contains("AccountEmail") {
            Value::String(self.mask_label(&scalar_text(value)))
        } else {
            self.mask_record(value)
        }
    }

    /// Mask a CSV row whose last three cells are account id, name and email.
    pub fn mask_row(&self, row: &[String]) -> Vec<String> {
        let mut masked = row.to_vec();
        if !self.enabled || masked.len() < 3 {
            return masked;
        }
        let n = masked.len();
        masked[n - 3] = self.mask_text(&row[n - 3]).into_owned();
        masked[n - 2] = self.mask_label(&row[n - 2]);
        masked[n - 1] = self.mask_label(&row[n - 1]);
        masked
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Logging capability handed to each handler. Every message passes through
/// the masker before it reaches the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaskedLog {
    masker: Masker,
}

impl MaskedLog {
    pub fn new(masker: Masker) -> Self {
        Self { masker }
    }

    pub fn masker(&self) -> Masker {
        self.masker
    }

    pub fn debug(&self, message: impl Display) {
        log::debug!("{}", self.masker.mask_text(&message.to_string()));
    }

    pub fn info(&self, message: impl Display) {
        log::info!("{}", self.masker.mask_text(&message.to_string()));
    }

    pub fn warn(&self, message: impl Display) {
        log::warn!("{}", self.masker.mask_text(&message.to_string()));
    }

    pub fn error(&self, message: impl Display) {
        log::error!("{}", self.masker.mask_text(&message.to_string()));
    }

    /// Log a JSON record with its account fields masked.
    pub fn record(&self, label: &str, record: &Value) {
        log::info!("{}: {}", label, self.masker.mask_record(record));
    }

    /// Log a CSV row with its trailing account cells masked.
    pub fn row(&self, row: &[String]) {
        log::debug!("{:?}", self.masker.mask_row(row));
    }
}

#[cfg(test)]
#[path = "masking_test.rs"]
mod tests;
