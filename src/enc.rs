//! Run-length encoding of cell sets.
//!
//! The bare grammar handled by [`encode`] and [`decode`] uses only the
//! alphabet `b o $ 0-9 !`:
//!
//! * `b` is a run of dead cells and `o` a run of alive cells, each with an
//!   optional decimal count (1 if absent),
//! * `$` ends a row; a count `k` moves the row cursor down by `k`,
//! * `!` terminates the pattern and may only appear last.
//!
//! [`RunLengthEncoded`] wraps the grammar in the usual file layout with
//! comment lines, an `x = .., y = ..` header and wrapped body lines.

use crate::{Pos2, error::FormatError, pattern::CellSet};
use regex::Regex;
use std::sync::OnceLock;

const LINE_LEN: usize = 70;

/// Upper bound on the number of alive cells [`decode`] produces.
pub const MAX_CELLS: usize = 1 << 24;

/// Bidirectional conversion between text and a set of alive cells.
pub trait Codec {
    fn encode(&self, cells: &CellSet) -> String;
    fn decode(&self, value: &str) -> Result<CellSet, FormatError>;
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d*)([bo$!])").expect("valid token regex"))
}

/// Rejects anything outside the grammar before a single cell is produced.
fn validate(body: &str) -> Result<(), FormatError> {
    for (offset, ch) in body.char_indices() {
        match ch {
            'b' | 'o' | '$' | '0'..='9' => {}
            '!' if offset + 1 == body.len() => {}
            '!' => return Err(FormatError::MisplacedTerminator { offset }),
            _ => return Err(FormatError::InvalidCharacter { ch, offset }),
        }
    }
    Ok(())
}

/// Decodes a bare RLE body into the set of alive cells.
///
/// Coordinates are relative to the top-left of the pattern as written. A
/// dangling count with no tag after it (`"o3"`, `"o4!"`) is ignored.
///
/// # Errors
/// [`FormatError::InvalidCharacter`] for anything outside `b o $ 0-9 !`,
/// [`FormatError::MisplacedTerminator`] when `!` is not the last character
/// and [`FormatError::RunLengthOverflow`] when a count overflows a coordinate.
/// [`FormatError::TooManyCells`] when the body holds more than [`MAX_CELLS`]
/// alive cells; runs never overlap, so this is checked before a run is
/// materialised.
pub fn decode(body: &str) -> Result<CellSet, FormatError> {
    validate(body)?;

    let mut alive = CellSet::new();
    let mut cursor = Pos2::zero();
    for caps in token_regex().captures_iter(body) {
        let offset = caps.get(0).map_or(0, |m| m.start());
        let (_, [run_str, state]) = caps.extract();
        let run = match run_str {
            "" => 1,
            digits => digits
                .parse::<i32>()
                .map_err(|_| FormatError::RunLengthOverflow { offset })?,
        };
        let overflow = || FormatError::RunLengthOverflow { offset };

        match state {
            "o" => {
                let end = cursor.x.checked_add(run).ok_or_else(overflow)?;
                if alive.len() + run as usize > MAX_CELLS {
                    return Err(FormatError::TooManyCells { limit: MAX_CELLS });
                }
                alive.extend((cursor.x..end).map(|x| Pos2 { x, y: cursor.y }));
                cursor.x = end;
            }
            "b" => cursor.x = cursor.x.checked_add(run).ok_or_else(overflow)?,
            "$" => {
                cursor.x = 0;
                cursor.y = cursor.y.checked_add(run).ok_or_else(overflow)?;
            }
            "!" => break,
            _ => unreachable!(),
        }
    }

    Ok(alive)
}

/// Encodes a set of cells as a canonical bare RLE body.
///
/// No normalization is done: the body is anchored at the origin, so leading
/// blank rows and columns are written out. Sets that reach into negative
/// coordinates are anchored at the bounding box corner on that axis instead.
/// The empty set encodes to `"!"`.
pub fn encode(cells: &CellSet) -> String {
    encode_body(cells, usize::MAX)
}

fn encode_body(cells: &CellSet, max_line_len: usize) -> String {
    let mut seq = RunEncoder::new(max_line_len);
    for token in compact(raw_tokens(cells)) {
        seq.push_run(token.run, token.tag);
    }
    seq.end()
}

/// The top-left corner the encoder measures runs from.
fn origin(cells: &CellSet) -> Pos2 {
    cells
        .iter()
        .copied()
        .reduce(Pos2::component_min)
        .map_or(Pos2::zero(), |tl| tl.component_min(Pos2::zero()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token {
    run: u64,
    tag: char,
}

/// One token per alive cell plus the gaps and row breaks between them.
fn raw_tokens(cells: &CellSet) -> Vec<Token> {
    let tl = origin(cells);
    let mut sorted: Vec<Pos2> = cells.iter().copied().collect();
    sorted.sort_unstable();

    let mut tokens = Vec::with_capacity(sorted.len() * 2);
    let mut last: Option<Pos2> = None;
    for pos in sorted {
        // rows skipped since the previous cell (or the origin)
        let lines_run = match last {
            Some(last) => i64::from(pos.y) - i64::from(last.y),
            None => i64::from(pos.y) - i64::from(tl.y),
        };
        let prev_x = match last {
            Some(last) if lines_run == 0 => i64::from(last.x),
            _ => i64::from(tl.x) - 1,
        };
        let dead_run = i64::from(pos.x) - prev_x - 1;

        if lines_run > 0 {
            tokens.push(Token {
                run: lines_run as u64,
                tag: '$',
            });
        }
        if dead_run > 0 {
            tokens.push(Token {
                run: dead_run as u64,
                tag: 'b',
            });
        }
        tokens.push(Token { run: 1, tag: 'o' });
        last = Some(pos);
    }
    tokens
}

/// Collapses adjacent tokens with the same tag into a single counted run.
fn compact(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match out.last_mut() {
            Some(prev) if prev.tag == token.tag => prev.run += token.run,
            _ => out.push(token),
        }
    }
    out
}

struct RunEncoder {
    sequence: String,
    line_len: usize,
    max_line_len: usize,
}
impl RunEncoder {
    fn new(max_line_len: usize) -> Self {
        Self {
            sequence: String::new(),
            line_len: 0,
            max_line_len,
        }
    }

    fn push_run(&mut self, run: u64, c: char) {
        let append = match run {
            0 => return,
            1 => c.to_string(),
            n => format!("{}{}", n, c),
        };
        // a run is never split across lines
        if self.line_len > 0 && self.line_len + append.len() > self.max_line_len {
            self.sequence.push('\n');
            self.line_len = 0;
        }
        self.line_len += append.len();
        self.sequence.push_str(&append);
    }

    fn end(mut self) -> String {
        if self.line_len + 1 > self.max_line_len {
            self.sequence.push('\n');
        }
        self.sequence.push('!');
        self.sequence
    }
}

/// RLE file codec: `#` comments, an optional header and a wrapped body.
#[derive(Debug, Clone)]
pub struct RunLengthEncoded {
    name: Option<String>,
    header: bool,
    max_line_len: usize,
}
impl RunLengthEncoded {
    pub fn set_name<T: AsRef<str>>(mut self, name: T) -> Self {
        self.name = Some(name.as_ref().to_owned());
        self
    }

    /// Writes only the body, without `#N` or `x = ..` lines.
    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    fn encode_header(&self, cells: &CellSet) -> String {
        let mut header = String::new();
        if !self.header {
            return header;
        }
        if let Some(name) = &self.name {
            header.push_str(&format!("#N {}\n", name));
        }
        let tl = origin(cells);
        let (w, h) = cells
            .iter()
            .copied()
            .reduce(Pos2::component_max)
            .map_or((0, 0), |br| {
                (
                    i64::from(br.x) - i64::from(tl.x) + 1,
                    i64::from(br.y) - i64::from(tl.y) + 1,
                )
            });
        header.push_str(&format!("x = {}, y = {}, rule = B3/S23\n", w, h));
        header
    }

    fn check_header(line: &str) -> Result<(), FormatError> {
        let invalid = |msg: String| FormatError::InvalidHeader(msg);
        let mut seen_x = false;
        let mut seen_y = false;
        for part in line.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| invalid(format!("missing '=' in {:?}", part.trim())))?;
            let (key, value) = (key.trim(), value.trim());
            match key {
                "x" | "y" => {
                    value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("{} is not a size: {:?}", key, value)))?;
                    seen_x |= key == "x";
                    seen_y |= key == "y";
                }
                "rule" => {
                    let rule = value.to_ascii_uppercase();
                    if rule != "B3/S23" && rule != "23/3" {
                        return Err(invalid(format!("only B3/S23 is supported, got {}", value)));
                    }
                }
                other => return Err(invalid(format!("unknown key {:?}", other))),
            }
        }
        if !(seen_x && seen_y) {
            return Err(invalid("expected both x and y".to_owned()));
        }
        Ok(())
    }
}
impl Default for RunLengthEncoded {
    fn default() -> Self {
        Self {
            name: None,
            header: true,
            max_line_len: LINE_LEN,
        }
    }
}

impl Codec for RunLengthEncoded {
    fn encode(&self, cells: &CellSet) -> String {
        let body = encode_body(cells, self.max_line_len);
        format!("{}{}\n", self.encode_header(cells), body)
    }

    fn decode(&self, value: &str) -> Result<CellSet, FormatError> {
        let mut body = String::new();
        for line in value.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('x') {
                Self::check_header(line)?;
                continue;
            }
            body.push_str(line);
            // anything after the terminator is free-form text
            if line.ends_with('!') {
                break;
            }
        }
        decode(&body)
    }
}
