use serde::{Deserialize, Serialize};
use tracing::debug;

const ASSIST_MARKER: &str = "Assist:";
const PENALTY_MARKER: &str = "(P)";
const EVENT_SEPARATOR: char = '|';
const MINUTE_SEPARATOR: char = '·';
const SCORER_FIELD_INDEX: usize = 2;

/// One encoded event cell as it arrives from the match table.
///
/// Goal and card columns are either a literal list written as text
/// (`"['45|Goal|Jane Doe|Assist: Ann Smith']"`) or an already-decoded list.
/// Penalty columns are plain `|`-separated text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventField {
    #[default]
    Missing,
    List(Vec<String>),
    Text(String),
}

impl EventField {
    pub fn text(raw: impl Into<String>) -> Self {
        Self::Text(raw.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Missing values, malformed text and literals that are not lists all decode
/// to an empty list; this never fails.
pub fn decode_list_field(value: &EventField) -> Vec<String> {
    match value {
        EventField::Missing => Vec::new(),
        EventField::List(items) => items.clone(),
        EventField::Text(raw) => match parse_literal(raw) {
            Some(Literal::List(items)) => items,
            Some(Literal::Scalar) => Vec::new(),
            None => {
                debug!(raw = %raw, "event field is not a literal list; treating as empty");
                Vec::new()
            }
        },
    }
}

pub fn count(value: &EventField) -> u32 {
    decode_list_field(value).len() as u32
}

/// Scoring player of a goal-detail event (`minute|kind|player|...`), `None` without a player slot.
pub fn extract_scorer(event: &str) -> Option<&str> {
    event
        .split(EVENT_SEPARATOR)
        .nth(SCORER_FIELD_INDEX)
        .map(str::trim)
}

pub fn has_assist(event: &str) -> bool {
    event.contains(ASSIST_MARKER)
}

/// Decode a penalty-goal field (`"Jane Doe (P)·45|John Roe·60"`) into player names.
pub fn decode_penalty_field(value: &EventField) -> Vec<String> {
    let EventField::Text(raw) = value else {
        return Vec::new();
    };
    raw.split(EVENT_SEPARATOR)
        .map(|entry| {
            let before_minute = entry.split(MINUTE_SEPARATOR).next().unwrap_or_default();
            before_minute.replace(PENALTY_MARKER, "").trim().to_string()
        })
        .collect()
}

#[derive(Debug, PartialEq)]
enum Literal {
    List(Vec<String>),
    Scalar,
}

// Nested items (tuples, lists, dicts) are kept as their source text.
fn parse_literal(raw: &str) -> Option<Literal> {
    let mut cursor = Cursor::new(raw.trim());
    let literal = match cursor.peek()? {
        '[' => Literal::List(cursor.container()?),
        _ => {
            cursor.item()?;
            Literal::Scalar
        }
    };
    cursor.skip_ws();
    cursor.at_end().then_some(literal)
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn item(&mut self) -> Option<String> {
        match self.peek()? {
            '\'' | '"' => self.string(),
            '[' | '(' | '{' => {
                let start = self.pos;
                self.container()?;
                Some(self.src[start..self.pos].to_string())
            }
            _ => self.scalar(),
        }
    }

    /// Bracketed sequence of items; dict entries yield their keys.
    fn container(&mut self) -> Option<Vec<String>> {
        let close = match self.bump()? {
            '[' => ']',
            '(' => ')',
            '{' => '}',
            _ => return None,
        };
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek()? == close {
                self.bump();
                return Some(items);
            }
            items.push(self.item()?);
            self.skip_ws();
            if close == '}' && self.peek() == Some(':') {
                self.bump();
                self.skip_ws();
                self.item()?;
                self.skip_ws();
            }
            match self.bump()? {
                ',' => continue,
                ch if ch == close => return Some(items),
                _ => return None,
            }
        }
    }

    /// Quoted string, including implicit concatenation of adjacent literals.
    fn string(&mut self) -> Option<String> {
        let mut out = self.quoted()?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some('\'' | '"') => out.push_str(&self.quoted()?),
                _ => return Some(out),
            }
        }
    }

    fn quoted(&mut self) -> Option<String> {
        let quote = self.bump()?;
        let mut out = String::new();
        loop {
            match self.bump()? {
                ch if ch == quote => return Some(out),
                '\n' => return None,
                '\\' => match self.bump()? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    'a' => out.push('\u{7}'),
                    'b' => out.push('\u{8}'),
                    'f' => out.push('\u{c}'),
                    'v' => out.push('\u{b}'),
                    '\\' => out.push('\\'),
                    '\'' => out.push('\''),
                    '"' => out.push('"'),
                    '\n' => {}
                    'x' => out.push(self.hex_escape(2)?),
                    'u' => out.push(self.hex_escape(4)?),
                    'U' => out.push(self.hex_escape(8)?),
                    first @ '0'..='7' => out.push(self.octal_escape(first)?),
                    // `\N{...}` named escapes are not decoded.
                    'N' => return None,
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                },
                ch => out.push(ch),
            }
        }
    }

    fn hex_escape(&mut self, digits: usize) -> Option<char> {
        let end = self.pos.checked_add(digits)?;
        let hex = self.src.get(self.pos..end)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        self.pos = end;
        char::from_u32(u32::from_str_radix(hex, 16).ok()?)
    }

    fn octal_escape(&mut self, first: char) -> Option<char> {
        let mut code = first.to_digit(8)?;
        for _ in 0..2 {
            match self.peek().and_then(|c| c.to_digit(8)) {
                Some(digit) => {
                    code = code * 8 + digit;
                    self.bump();
                }
                None => break,
            }
        }
        char::from_u32(code)
    }

    fn scalar(&mut self) -> Option<String> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if matches!(ch, ',' | ':' | ']' | ')' | '}') || ch.is_whitespace() {
                break;
            }
            self.bump();
        }
        let token = &self.src[start..self.pos];
        let is_keyword = matches!(token, "None" | "True" | "False");
        let is_number = token.parse::<f64>().is_ok()
            && token
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'));
        (is_keyword || is_number).then(|| token.to_string())
    }
}
