//! Deserialized source parser output: tokens, comments, failures.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::base::Position;

/// A 1-indexed line and 0-indexed column as the source parser reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct RawPoint {
    pub line: usize,
    pub column: usize,
}

impl From<RawPoint> for Position {
    fn from(point: RawPoint) -> Self {
        Position::new(point.line, point.column)
    }
}

impl From<Position> for RawPoint {
    fn from(position: Position) -> Self {
        RawPoint {
            line: position.line,
            column: position.column,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct RawLoc {
    pub start: RawPoint,
    pub end: RawPoint,
}

/// Whatever position metadata a raw node, token or comment carries.
///
/// Source parsers report offsets as `start`/`end`, as a `range` pair, or
/// only as a line/column `loc`; any one of them is enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct RawPositions {
    #[serde(default)]
    pub start: Option<u32>,
    #[serde(default)]
    pub end: Option<u32>,
    #[serde(default)]
    pub range: Option<[u32; 2]>,
    #[serde(default)]
    pub loc: Option<RawLoc>,
}

impl RawPositions {
    pub fn from_offsets(start: u32, end: u32) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }

    /// Read position metadata out of a raw JSON object
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let offset = |key: &str| {
            map.get(key)
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
        };
        let range = map.get("range").and_then(Value::as_array).and_then(|pair| {
            match pair.as_slice() {
                [start, end] => Some([
                    u32::try_from(start.as_u64()?).ok()?,
                    u32::try_from(end.as_u64()?).ok()?,
                ]),
                _ => None,
            }
        });
        let loc = map.get("loc").and_then(|loc| {
            Some(RawLoc {
                start: point(loc.get("start")?)?,
                end: point(loc.get("end")?)?,
            })
        });

        Self {
            start: offset("start"),
            end: offset("end"),
            range,
            loc,
        }
    }
}

fn point(value: &Value) -> Option<RawPoint> {
    Some(RawPoint {
        line: usize::try_from(value.get("line")?.as_u64()?).ok()?,
        column: usize::try_from(value.get("column")?.as_u64()?).ok()?,
    })
}

/// A source parser token type record (`{label, keyword, isAssign, ...}`)
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawTokenType {
    pub label: String,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default, rename = "isAssign")]
    pub is_assign: bool,
}

impl RawTokenType {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn keyword(keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        Self {
            label: keyword.clone(),
            keyword: Some(keyword),
            is_assign: false,
        }
    }

    pub fn assign(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            keyword: None,
            is_assign: true,
        }
    }
}

/// The `type` of a raw token: a type record, or a bare string for comment
/// entries mixed into the token list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawTokenKind {
    Comment(String),
    Type(RawTokenType),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawToken {
    #[serde(rename = "type")]
    pub kind: RawTokenKind,
    #[serde(default)]
    pub value: Value,
    #[serde(flatten)]
    pub positions: RawPositions,
}

impl RawToken {
    pub fn new(kind: RawTokenType, value: Value, start: u32, end: u32) -> Self {
        Self {
            kind: RawTokenKind::Type(kind),
            value,
            positions: RawPositions::from_offsets(start, end),
        }
    }

    /// The type record, unless this entry is a comment
    pub fn token_type(&self) -> Option<&RawTokenType> {
        match &self.kind {
            RawTokenKind::Type(ty) => Some(ty),
            RawTokenKind::Comment(_) => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.token_type().map(|ty| ty.label.as_str())
    }

    /// The string value, if the source parser recorded one
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

/// A syntax failure as the source parser reports it
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSyntaxError {
    pub message: String,
    #[serde(default)]
    pub reason_code: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub loc: Option<RawPoint>,
    #[serde(default)]
    pub pos: Option<u32>,
}

impl RawSyntaxError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_reason_code(mut self, code: impl Into<String>) -> Self {
        self.reason_code = Some(code.into());
        self
    }

    pub fn at(mut self, pos: u32, line: usize, column: usize) -> Self {
        self.pos = Some(pos);
        self.loc = Some(RawPoint { line, column });
        self
    }
}

/// A successful source parse: the raw program plus flat token and comment
/// lists
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawParse {
    pub program: Value,
    #[serde(default)]
    pub tokens: Vec<RawToken>,
    #[serde(default)]
    pub comments: Vec<Value>,
}

impl RawParse {
    pub fn new(program: Value) -> Self {
        Self {
            program,
            tokens: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn with_tokens(mut self, tokens: Vec<RawToken>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_comments(mut self, comments: Vec<Value>) -> Self {
        self.comments = comments;
        self
    }

    /// Decode serialized source parser output.
    ///
    /// Accepts a `File` object (`program`, `tokens`, `comments`), a bare
    /// `Program` object, or `{"error": {...}}` for a failed parse.
    pub fn from_json(json: &str) -> Result<Result<RawParse, RawSyntaxError>, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Result<RawParse, RawSyntaxError>, serde_json::Error> {
        if let Some(error) = value.get("error") {
            return Ok(Err(RawSyntaxError::deserialize(error)?));
        }
        if value.get("type").and_then(Value::as_str) == Some("Program") {
            return Ok(Ok(RawParse::new(value)));
        }
        Ok(Ok(RawParse::deserialize(value)?))
    }
}
