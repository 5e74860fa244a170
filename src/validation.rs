//! Input-data validation defects and their aggregated rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::internal::InternalError;

const INDENT: &str = "    ";

/// One step into the input document: a mapping key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(idx) => write!(f, "{idx}"),
            Self::Key(key) => f.write_str(key),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        Self::Index(idx)
    }
}

/// A single validator complaint: where in the document, and what is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defect {
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl Defect {
    pub fn new<I, S>(path: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    /// Defect about the document as a whole.
    pub fn at_root(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }

    /// Builds a defect from an RFC 6901 JSON pointer such as `/volumes/0/size`.
    ///
    /// Canonical decimal segments become [`PathSegment::Index`]; `~1` and `~0`
    /// are unescaped in that order.
    pub fn from_pointer(pointer: &str, message: impl Into<String>) -> Self {
        let path = match pointer.strip_prefix('/').unwrap_or(pointer) {
            "" if pointer.is_empty() => Vec::new(),
            rest => rest.split('/').map(pointer_segment).collect(),
        };
        Self {
            path,
            message: message.into(),
        }
    }

    /// `/`-joined path, empty for the document root.
    pub fn joined_path(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn pointer_segment(raw: &str) -> PathSegment {
    let canonical_index = raw == "0" || (!raw.starts_with('0') && !raw.is_empty());
    if canonical_index
        && raw.bytes().all(|b| b.is_ascii_digit())
        && let Ok(idx) = raw.parse()
    {
        return PathSegment::Index(idx);
    }
    PathSegment::Key(raw.replace("~1", "/").replace("~0", "~"))
}

/// Input data rejected by schema validation.
///
/// The defects are kept verbatim, in validator order, next to the rendered
/// text so they can be re-emitted in machine-readable form.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct InputDataSchemaValidationError {
    defects: Vec<Defect>,
    message: String,
}

impl InputDataSchemaValidationError {
    /// Fails with an [`InternalError`] when `defects` is empty: a validation
    /// failure without a single defect means the caller is broken.
    pub fn try_new(defects: Vec<Defect>) -> Result<Self, InternalError> {
        if defects.is_empty() {
            return Err(InternalError::new(
                "Input data schema validation failed without reporting any defect",
            ));
        }
        let message = render(&defects);
        Ok(Self { defects, message })
    }

    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    pub fn into_defects(self) -> Vec<Defect> {
        self.defects
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn render(defects: &[Defect]) -> String {
    let lines: Vec<String> = defects
        .iter()
        .enumerate()
        .map(|(idx, defect)| {
            let label = format!("#{idx}");
            format!("{label:>2} (/{}): {}", defect.joined_path(), defect.message)
        })
        .collect();
    format!(
        "Invalid input data:\n{INDENT}{}",
        lines.join(&format!("\n{INDENT}"))
    )
}
