/// Parser for task files with structure like
/// "task1 method: newton initial_guess: 0.5 task3 row1: 1, 1, 1 row2: 0, 2, 5"
/// which has section titles and pairs key-vector of values. The result is a
/// HashMap<String, HashMap<String, Vec<Value>>>, which parameters a task accepts
/// is checked by `tasks::Task::from_section`.
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, char, multispace0, space0},
    combinator::{map, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, preceded, terminated},
};
use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;

pub type DocumentMap = HashMap<String, SectionMap>;
pub type SectionMap = HashMap<String, Vec<Value>>;

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    /// integer, then float, then boolean, anything else is kept as text
    pub fn from_token(token: &str) -> Value {
        if let Ok(val) = token.parse::<i64>() {
            Value::Integer(val)
        } else if let Ok(val) = token.parse::<f64>() {
            Value::Float(val)
        } else if let Ok(val) = token.parse::<bool>() {
            Value::Boolean(val)
        } else {
            Value::String(token.to_string())
        }
    }

    /// numeric value, integers are widened
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    /// non-negative integer, e.g. an iteration cap or a subinterval count
    pub fn as_usize(&self) -> Option<usize> {
        self.as_integer().and_then(|i| usize::try_from(i).ok())
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// letter or underscore, then letters, digits and underscores
fn identifier(input: &str) -> IResult<&str, String> {
    let word = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    map(word, String::from).parse(input)
}

/// section title, whitespace up to the first key is consumed
pub(crate) fn parse_title(input: &str) -> IResult<&str, String> {
    terminated(identifier, multispace0).parse(input)
}

/// key together with its colon: "initial_guess :"
pub(crate) fn parse_key(input: &str) -> IResult<&str, String> {
    terminated(identifier, delimited(space0, char(':'), space0)).parse(input)
}

/// a single value, up to the next comma, semicolon or whitespace
pub(crate) fn parse_value(input: &str) -> IResult<&str, Value> {
    let token = take_while1(|c: char| c != ',' && c != ';' && !c.is_whitespace());
    map(token, Value::from_token).parse(input)
}

pub(crate) fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    separated_list0(delimited(space0, char(','), space0), parse_value).parse(input)
}

/// key: value1, value2, ... and the whitespace after it
pub(crate) fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    terminated(pair(parse_key, parse_value_list), multispace0).parse(input)
}

/// title followed by one or more key-value pairs; a repeated key keeps its last values
pub(crate) fn parse_section(input: &str) -> IResult<&str, (String, SectionMap)> {
    let pairs = map(many1(parse_key_value_pair), |pairs: Vec<(String, Vec<Value>)>| {
        pairs.into_iter().collect::<SectionMap>()
    });
    preceded(space0, pair(parse_title, pairs)).parse(input)
}

/// Drops comment lines (starting with //, # or %) and blank lines
pub(crate) fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !(trimmed.is_empty()
                || trimmed.starts_with("//")
                || trimmed.starts_with('#')
                || trimmed.starts_with('%'))
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// nom level parser of a comment free document
pub(crate) fn parse_sections(input: &str) -> IResult<&str, DocumentMap> {
    let sections = many1(delimited(multispace0, parse_section, multispace0));
    map(sections, |sections: Vec<(String, SectionMap)>| {
        sections.into_iter().collect::<DocumentMap>()
    })
    .parse(input)
}

/// Parses the entire document. Fails if anything is left unparsed.
pub fn parse_document(input: &str) -> Result<DocumentMap, String> {
    let filtered = filter_comments(input);
    if filtered.trim().is_empty() {
        return Ok(HashMap::new());
    }
    match parse_sections(&filtered) {
        Ok((remaining, parsed)) if remaining.trim().is_empty() => Ok(parsed),
        Ok((remaining, _)) => Err(format!(
            "Failed to parse entire document. Remaining: '{}'",
            remaining
        )),
        Err(e) => Err(format!("Parsing error: {:?}", e)),
    }
}

/// Reads and parses a task file
pub fn parse_task_file<P: AsRef<Path>>(path: P) -> Result<DocumentMap, String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read task file {}: {}", path.display(), e))?;
    parse_document(&content)
}
