use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::{self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess};
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Value};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Error: The file '{}' was not found.", .0.display())]
    NotFound(PathBuf),

    #[error("Error reading file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error parsing YAML file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Error parsing JSON file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error parsing CSV file: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a data file and report any failure to `out`.
///
/// Returns `None` when the file is missing or unreadable; the caller only has
/// to decide what "no data" means for it. Failing to write the report itself
/// is the only error that escapes.
pub fn load_data(path: &Path, out: &mut impl Write) -> io::Result<Option<Value>> {
    match load_file(path) {
        Ok(value) => {
            log::info!("loaded {}", path.display());
            Ok(Some(value))
        }
        Err(err) => {
            log::warn!("failed to load {}: {err:?}", path.display());
            writeln!(out, "{err}")?;
            Ok(None)
        }
    }
}

/// Parse a file into a generic value.  Dispatch by extension.
///
/// Supported formats:
/// * `.yaml` / `.yml` – the native format, also used for unknown extensions
/// * `.json`          – same document shape as the YAML file
/// * `.csv`           – one student per row, wrapped as `{ students: [...] }`
pub fn load_file(path: &Path) -> Result<Value, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        _ => load_yaml(path),
    }
}

fn read_text(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

// ---------------------------------------------------------------------------
// YAML / JSON loaders
// ---------------------------------------------------------------------------

fn load_yaml(path: &Path) -> Result<Value, LoadError> {
    let text = read_text(path)?;
    // An empty document is a valid YAML null, not a parse error.
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    let LastKeyWins(value) = serde_yaml::from_str(&text)?;
    Ok(value)
}

fn load_json(path: &Path) -> Result<Value, LoadError> {
    let text = read_text(path)?;
    let LastKeyWins(value) = serde_json::from_str(&text)?;
    Ok(value)
}

// ---------------------------------------------------------------------------
// Generic document value
// ---------------------------------------------------------------------------

/// A `Value` built without rejecting repeated mapping keys: a later entry
/// overwrites an earlier one and keeps the earlier key's position.
struct LastKeyWins(Value);

impl<'de> Deserialize<'de> for LastKeyWins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LastKeyWinsVisitor).map(LastKeyWins)
    }
}

struct LastKeyWinsVisitor;

impl<'de> de::Visitor<'de> for LastKeyWinsVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("any YAML or JSON value")
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> Result<Value, E> {
        Ok(Value::Number(i.into()))
    }

    fn visit_u64<E: de::Error>(self, u: u64) -> Result<Value, E> {
        Ok(Value::Number(u.into()))
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<Value, E> {
        Ok(Value::Number(f.into()))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        LastKeyWins::deserialize(deserializer).map(|v| v.0)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(LastKeyWins(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut entries = Mapping::new();
        while let Some((LastKeyWins(key), LastKeyWins(value))) = map.next_entry()? {
            entries.insert(key, value);
        }
        Ok(Value::Mapping(entries))
    }

    // serde_yaml hands custom `!tags` over as single-variant enums.
    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Value, A::Error> {
        let (tag, variant): (String, _) = data.variant()?;
        let LastKeyWins(value) = variant.newtype_variant()?;
        Ok(Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new(tag),
            value,
        })))
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one student per row.
/// Cells are typed by guessing, so `20` becomes an integer and `3.8` a float.
fn load_csv(path: &Path) -> Result<Value, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|err| {
        let missing = matches!(
            err.kind(),
            csv::ErrorKind::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound
        );
        if missing {
            LoadError::NotFound(path.to_path_buf())
        } else {
            LoadError::Csv(err)
        }
    })?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = Mapping::new();
        for (col_name, cell) in headers.iter().zip(record.iter()) {
            row.insert(Value::String(col_name.clone()), guess_value_type(cell.trim()));
        }
        rows.push(Value::Mapping(row));
    }
    log::debug!("read {} CSV rows from {}", rows.len(), path.display());

    let mut root = Mapping::new();
    root.insert(Value::String("students".into()), Value::Sequence(rows));
    Ok(Value::Mapping(root))
}

fn guess_value_type(s: &str) -> Value {
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Number(f.into());
    }
    if s == "true" || s == "false" {
        return Value::Bool(s == "true");
    }
    Value::String(s.to_string())
}
