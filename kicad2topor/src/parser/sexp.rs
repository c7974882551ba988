//! S-expression reader for the KiCad board grammar.
//!
//! The `.kicad_pcb` format is a nested parenthesized list of tokens and
//! quoted strings. This module turns the raw text into a [`Sexpr`] tree and
//! offers keyed accessors over it; everything format-specific (field
//! meaning, units, coordinate conventions) lives in `parser::pcb`.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SexprError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEof(usize),
    #[error("unexpected closing paren at byte {0}")]
    UnbalancedClose(usize),
    #[error("trailing input after top-level form at byte {0}")]
    TrailingInput(usize),
    #[error("empty input")]
    Empty,
}

/// One node of the parsed tree: a bare token / quoted string, or a list.
#[derive(Debug, Clone, PartialEq)]
pub enum Sexpr {
    Atom(String),
    List(Vec<Sexpr>),
}

impl Sexpr {
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Sexpr::Atom(s) => Some(s),
            Sexpr::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Sexpr]> {
        match self {
            Sexpr::List(items) => Some(items),
            Sexpr::Atom(_) => None,
        }
    }

    /// Leading atom of a list, i.e. the record tag: `(net 1 GND)` → `net`.
    pub fn tag(&self) -> Option<&str> {
        self.as_list()?.first()?.as_atom()
    }

    /// First child list whose tag equals `key`. Returns the whole sublist so
    /// the caller can pick positional fields out of it.
    pub fn child(&self, key: &str) -> Option<&Sexpr> {
        self.as_list()?
            .iter()
            .find(|item| item.tag() == Some(key))
    }

    /// All child lists tagged `key`, in source order.
    pub fn children<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Sexpr> {
        self.as_list()
            .unwrap_or(&[])
            .iter()
            .filter(move |item| item.tag() == Some(key))
    }

    /// Atom at position `idx` of this list: `(net 1 GND)`.nth_atom(2) → `GND`.
    pub fn nth_atom(&self, idx: usize) -> Option<&str> {
        self.as_list()?.get(idx)?.as_atom()
    }

    /// Positional field parsed as f64.
    pub fn nth_f64(&self, idx: usize) -> Option<f64> {
        self.nth_atom(idx)?.parse().ok()
    }

    /// Value of a single-valued keyed child: `(width 0.25)` → 0.25.
    pub fn value_f64(&self, key: &str) -> Option<f64> {
        self.child(key)?.nth_f64(1)
    }

    /// Value of a single-valued keyed child as a string.
    pub fn value_str(&self, key: &str) -> Option<&str> {
        self.child(key)?.nth_atom(1)
    }

    /// Value of a single-valued keyed child parsed as u32.
    pub fn value_u32(&self, key: &str) -> Option<u32> {
        self.value_str(key)?.parse().ok()
    }
}

impl fmt::Display for Sexpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexpr::Atom(s) => {
                if s.is_empty() || s.contains(|c: char| c.is_whitespace() || c == '(' || c == ')') {
                    write!(f, "\"{}\"", s.replace('"', "\\\""))
                } else {
                    write!(f, "{}", s)
                }
            }
            Sexpr::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Parse a complete document; the whole input must be one top-level form.
pub fn parse(input: &str) -> Result<Sexpr, SexprError> {
    let mut cursor = Cursor::new(input);
    cursor.skip_whitespace();
    if cursor.eof() {
        return Err(SexprError::Empty);
    }
    let root = cursor.parse_value()?;
    cursor.skip_whitespace();
    if !cursor.eof() {
        return Err(SexprError::TrailingInput(cursor.pos));
    }
    Ok(root)
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn parse_value(&mut self) -> Result<Sexpr, SexprError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(SexprError::UnexpectedEof(self.pos)),
            Some(b'(') => self.parse_list(),
            Some(b')') => Err(SexprError::UnbalancedClose(self.pos)),
            Some(b'"') => self.parse_quoted(),
            Some(_) => Ok(self.parse_token()),
        }
    }

    fn parse_list(&mut self) -> Result<Sexpr, SexprError> {
        self.pos += 1; // consume '('
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(SexprError::UnexpectedEof(self.pos)),
                Some(b')') => {
                    self.pos += 1;
                    return Ok(Sexpr::List(items));
                }
                Some(_) => items.push(self.parse_value()?),
            }
        }
    }

    fn parse_quoted(&mut self) -> Result<Sexpr, SexprError> {
        self.pos += 1; // consume opening quote
        let mut s = String::new();
        loop {
            match self.peek() {
                None => return Err(SexprError::UnexpectedEof(self.pos)),
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(Sexpr::Atom(s));
                }
                Some(b'\\') => {
                    self.pos += 1;
                    match self.peek() {
                        None => return Err(SexprError::UnexpectedEof(self.pos)),
                        Some(b'n') => s.push('\n'),
                        Some(b't') => s.push('\t'),
                        Some(b'r') => s.push('\r'),
                        Some(b) => s.push(b as char),
                    }
                    self.pos += 1;
                }
                Some(_) => {
                    let start = self.pos;
                    while let Some(b) = self.peek() {
                        if b == b'"' || b == b'\\' {
                            break;
                        }
                        self.pos += 1;
                    }
                    s.push_str(std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or(""));
                }
            }
        }
    }

    fn parse_token(&mut self) -> Sexpr {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b'(' || b == b')' || b == b'"' {
                break;
            }
            self.pos += 1;
        }
        Sexpr::Atom(
            std::str::from_utf8(&self.bytes[start..self.pos])
                .unwrap_or("")
                .to_string(),
        )
    }
}
