//! Safe decoder for string-encoded lists such as `"['a', 'b']"` or `"[a, b]"`.
//!
//! The catalog sometimes renders list-valued fields as text. JSON is tried
//! first; otherwise a small literal grammar is accepted: lists, tuples, dicts,
//! quoted strings, numbers, `True`/`False`/`None` and bare words inside
//! containers. Nothing is ever evaluated.

use serde_json::{Map, Number, Value};

const MAX_LITERAL_DEPTH: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("empty input")]
    Empty,
    #[error("not a list literal")]
    NotAList,
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },
    #[error("unexpected {found:?} at offset {offset}")]
    Unexpected { found: char, offset: usize },
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },
    #[error("literal nested too deeply at offset {offset}")]
    TooDeep { offset: usize },
    #[error("trailing input at offset {offset}")]
    TrailingInput { offset: usize },
}

/// Decodes `text` as a list literal. The top level must be `[...]` or `(...)`.
pub fn decode_literal_list(text: &str) -> Result<Vec<Value>, DecodeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::Empty);
    }
    if !(trimmed.starts_with('[') || trimmed.starts_with('(')) {
        return Err(DecodeError::NotAList);
    }
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(trimmed) {
        return Ok(items);
    }

    let mut p = Parser::new(trimmed);
    let value = p.value(0)?;
    p.skip_ws();
    if let Some((offset, _)) = p.peek() {
        return Err(DecodeError::TrailingInput { offset });
    }
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(DecodeError::NotAList),
    }
}

/// True when `text` looks like it was meant to be a list literal.
pub fn looks_like_list(text: &str) -> bool {
    let t = text.trim_start();
    t.starts_with('[') || t.starts_with('(')
}

struct Parser<'a> {
    src: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
        }
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }

    fn end_offset(&self) -> usize {
        self.src.len()
    }

    fn skip_ws(&mut self) {
        while let Some((_, c)) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        self.skip_ws();
        let Some((offset, c)) = self.peek() else {
            return Err(DecodeError::UnexpectedEnd {
                offset: self.end_offset(),
            });
        };
        if depth > MAX_LITERAL_DEPTH {
            return Err(DecodeError::TooDeep { offset });
        }
        match c {
            '[' => self.sequence(']', depth),
            '(' => self.sequence(')', depth),
            '{' => self.dict(depth),
            '\'' | '"' => self.string().map(Value::String),
            ']' | ')' | '}' | ',' | ':' => Err(DecodeError::Unexpected { found: c, offset }),
            _ => self.bare(depth),
        }
    }

    fn sequence(&mut self, close: char, depth: usize) -> Result<Value, DecodeError> {
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => {
                    return Err(DecodeError::UnexpectedEnd {
                        offset: self.end_offset(),
                    });
                }
                Some((_, c)) if c == close => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                Some(_) => {}
            }
            items.push(self.value(depth + 1)?);
            self.skip_ws();
            match self.bump() {
                Some((_, ',')) => continue,
                Some((_, c)) if c == close => return Ok(Value::Array(items)),
                Some((offset, found)) => return Err(DecodeError::Unexpected { found, offset }),
                None => {
                    return Err(DecodeError::UnexpectedEnd {
                        offset: self.end_offset(),
                    });
                }
            }
        }
    }

    fn dict(&mut self, depth: usize) -> Result<Value, DecodeError> {
        self.bump();
        let mut out = Map::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => {
                    return Err(DecodeError::UnexpectedEnd {
                        offset: self.end_offset(),
                    });
                }
                Some((_, '}')) => {
                    self.bump();
                    return Ok(Value::Object(out));
                }
                Some(_) => {}
            }
            let key = match self.value(depth + 1)? {
                Value::String(s) => s,
                other => other.to_string(),
            };
            self.skip_ws();
            match self.bump() {
                Some((_, ':')) => {}
                Some((offset, found)) => return Err(DecodeError::Unexpected { found, offset }),
                None => {
                    return Err(DecodeError::UnexpectedEnd {
                        offset: self.end_offset(),
                    });
                }
            }
            let value = self.value(depth + 1)?;
            out.insert(key, value);
            self.skip_ws();
            match self.bump() {
                Some((_, ',')) => continue,
                Some((_, '}')) => return Ok(Value::Object(out)),
                Some((offset, found)) => return Err(DecodeError::Unexpected { found, offset }),
                None => {
                    return Err(DecodeError::UnexpectedEnd {
                        offset: self.end_offset(),
                    });
                }
            }
        }
    }

    fn string(&mut self) -> Result<String, DecodeError> {
        let Some((start, quote)) = self.bump() else {
            return Err(DecodeError::UnexpectedEnd {
                offset: self.end_offset(),
            });
        };
        let mut out = String::new();
        let mut escape = false;
        while let Some((_, c)) = self.bump() {
            if escape {
                out.push(match c {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '0' => '\0',
                    other => other,
                });
                escape = false;
                continue;
            }
            match c {
                '\\' => escape = true,
                c if c == quote => return Ok(out),
                c => out.push(c),
            }
        }
        Err(DecodeError::UnterminatedString { offset: start })
    }

    /// A run of characters up to the next delimiter, e.g. `a` in `[a, b]`.
    fn bare(&mut self, depth: usize) -> Result<Value, DecodeError> {
        if depth == 0 {
            let (offset, found) = self.peek().unwrap_or((0, ' '));
            return Err(DecodeError::Unexpected { found, offset });
        }
        let mut word = String::new();
        while let Some((_, c)) = self.peek() {
            if matches!(c, ',' | ']' | ')' | '}' | ':' | '[' | '(' | '{' | '\'' | '"') {
                break;
            }
            word.push(c);
            self.bump();
        }
        Ok(bare_word(word.trim()))
    }
}

fn bare_word(word: &str) -> Value {
    match word {
        "True" | "true" => return Value::Bool(true),
        "False" | "false" => return Value::Bool(false),
        "None" | "null" => return Value::Null,
        _ => {}
    }
    if let Ok(n) = word.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = word.parse::<f64>()
        && let Some(n) = Number::from_f64(f)
    {
        return Value::Number(n);
    }
    Value::String(word.to_string())
}

#[cfg(test)]
#[path = "../tests/normalize/literal_tests.rs"]
mod tests;
