use std::fmt;

use serde::Deserialize;
use serde_yaml::Value;

// ---------------------------------------------------------------------------
// Number – a numeric field as it appeared in the source file
// ---------------------------------------------------------------------------

/// A numeric field that remembers whether the source wrote an integer or a
/// float, so `20` prints as `20` and `3.0` prints as `3.0`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(v) => *v,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{i}"),
            Number::Float(v) => f.write_str(&format_float(*v)),
        }
    }
}

/// Render a float the way it reads as a literal: always with a fractional
/// part or an exponent, scientific notation below `1e-4` and from `1e16` up.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let abs = v.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        // `{:e}` yields "1e16" / "1.5e-7"; normalise the exponent to a sign
        // and at least two digits.
        let sci = format!("{v:e}");
        let Some((mantissa, exp)) = sci.split_once('e') else {
            return sci;
        };
        let (sign, digits) = match exp.strip_prefix('-') {
            Some(d) => ('-', d),
            None => ('+', exp),
        };
        return format!("{mantissa}e{sign}{digits:0>2}");
    }

    let plain = format!("{v}");
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

// ---------------------------------------------------------------------------
// FieldValue – a display-only field of any shape
// ---------------------------------------------------------------------------

/// A field that is printed but never interpreted. Any value is accepted,
/// including null; only a missing key is an error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FieldValue(pub Value);

#[cfg(test)]
impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue(Value::String(s.to_string()))
    }
}

#[cfg(test)]
impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue(Value::Number(i.into()))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => f.write_str(&render_value(other)),
        }
    }
}

/// Render a value as a literal: `None`, `True`, `3.0`, `'text'`, `[1, 2]`,
/// `{'k': 'v'}`. Strings are quoted here; a bare top-level string is not
/// (see `FieldValue`'s `Display`).
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (None, Some(u), _) => u.to_string(),
            (None, None, Some(v)) => format_float(v),
            _ => n.to_string(),
        },
        Value::String(s) => quote_str(s),
        Value::Sequence(seq) => {
            let items: Vec<String> = seq.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", render_value(k), render_value(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Value::Tagged(tagged) => render_value(&tagged.value),
    }
}

fn quote_str(s: &str) -> String {
    if s.contains('\'') && !s.contains('"') {
        return format!("\"{s}\"");
    }
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

// ---------------------------------------------------------------------------
// StudentRecord – one entry of the `students` list
// ---------------------------------------------------------------------------

/// A single student. All four keys are required; extra keys are ignored.
/// Only `gpa` has to be numeric since it is compared against the threshold.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudentRecord {
    pub name: FieldValue,
    pub age: FieldValue,
    pub major: FieldValue,
    pub gpa: Number,
}

impl fmt::Display for StudentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Age: {}, Major: {}, GPA: {}",
            self.name, self.age, self.major, self.gpa
        )
    }
}

// ---------------------------------------------------------------------------
// StudentRoster – the complete loaded collection
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("student record #{index} is invalid: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_yaml::Error,
    },
}

/// The ordered student list. Built once and never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentRoster {
    pub students: Vec<StudentRecord>,
}

/// Whether a loaded document counts as "some data": null, `false`, zero, and
/// empty strings/sequences/mappings do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// Locate the `students` sequence in a loaded document.
///
/// `None` covers every "no valid data" case alike: a falsy document, a
/// document that is not a mapping, a missing key, or a key whose value is
/// not a sequence.
pub fn student_entries(doc: &Value) -> Option<&[Value]> {
    if !is_truthy(doc) {
        return None;
    }
    doc.as_mapping()?
        .get("students")?
        .as_sequence()
        .map(|seq| seq.as_slice())
}

impl StudentRoster {
    /// Materialise records from the generic `students` sequence.
    /// Record numbers in errors are 1-based.
    pub fn from_values(items: &[Value]) -> Result<Self, RosterError> {
        let students = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                serde_yaml::from_value(item.clone())
                    .map_err(|source| RosterError::InvalidRecord { index: i + 1, source })
            })
            .collect::<Result<Vec<StudentRecord>, _>>()?;
        Ok(StudentRoster { students })
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }
}
