use serde::Serialize;
use serde_json::{Map, Value};

pub const HANDLE_KEY: &str = "authorHandle";
pub const FOLLOWED_KEY: &str = "isFollowed";

/// One follow record. The object is kept as-is (unknown fields and key
/// order included); only `authorHandle` is guaranteed to be a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    NotAnObject,
    MissingHandle,
    HandleNotString,
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "record is not a JSON object"),
            Self::MissingHandle => write!(f, "record has no '{HANDLE_KEY}' field"),
            Self::HandleNotString => write!(f, "'{HANDLE_KEY}' is not a string"),
        }
    }
}

impl std::error::Error for RecordError {}

impl TryFrom<Value> for Record {
    type Error = RecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(fields) = value else {
            return Err(RecordError::NotAnObject);
        };
        match fields.get(HANDLE_KEY) {
            None => Err(RecordError::MissingHandle),
            Some(Value::String(_)) => Ok(Self(fields)),
            Some(_) => Err(RecordError::HandleNotString),
        }
    }
}

impl Record {
    pub fn author_handle(&self) -> &str {
        self.0
            .get(HANDLE_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn is_followed(&self) -> bool {
        self.0.get(FOLLOWED_KEY).is_some_and(truthy)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => {
            // Judged on the literal so values beyond f64 range still count.
            let literal = n.to_string();
            let mantissa = literal.split(['e', 'E']).next().unwrap_or_default();
            mantissa.bytes().any(|b| matches!(b, b'1'..=b'9'))
        }
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
