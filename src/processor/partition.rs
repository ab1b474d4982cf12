//! Splits a chunked snippet into top-level declarations and `main` body.
//!
//! Import, type and func blocks are pulled out of the snippet and placed in
//! front of `main`; everything else goes inside `main`. Blocks are found
//! with a line-oriented heuristic that fits gofmt-style code: a `{` or `(`
//! that *ends* a line opens a block, and the matching `}` or `)` that
//! *starts* a later line closes it. Brackets opened and closed on the same
//! line are invisible to it, so `func f() int { return 1 }` is a one-line
//! top-level declaration.
//!
//! Lines are moved around, so each routed line that begins at a line
//! boundary is preceded by a `//line :N` directive; the Go compiler then
//! reports errors against the user's line numbers.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::imports;
use super::lexer::Lexer;
use crate::error::EvalError;
use crate::model::{Chunk, ChunkKind, ImportSet, Partition};

const DECL_PREFIXES: [&str; 3] = ["func ", "type ", "import "];

/// Mutable state threaded through the lines, in order.
#[derive(Debug, Default)]
struct LineState {
    /// Closers we are waiting for, innermost last.
    closers: Vec<char>,
    /// Line that opened the outermost pending block; 0 when none is open.
    opened_at: usize,
    top_level: bool,
    imports: ImportSet,
}

impl LineState {
    fn depth(&self) -> usize {
        self.closers.len()
    }

    fn closing_char(&self) -> Option<char> {
        self.closers.last().copied()
    }

    fn close(&mut self) {
        self.closers.pop();
        if self.closers.is_empty() {
            self.opened_at = 0;
        }
    }

    fn open(&mut self, closer: char, line_num: usize) {
        if self.closers.is_empty() {
            self.opened_at = line_num;
        }
        self.closers.push(closer);
    }

    /// Update bracket depth and top-level mode from one line's code text.
    /// Only spaces and tabs are trimmed, so a blank line at depth zero leaves
    /// top-level mode; a comment-only line has no code text and keeps it.
    fn track(&mut self, line_num: usize, text: &str) {
        let l = text.trim_start_matches([' ', '\t']);
        if let Some(first) = l.chars().next() {
            if Some(first) == self.closing_char() {
                self.close();
            } else if self.depth() == 0 {
                self.top_level = DECL_PREFIXES.iter().any(|p| l.starts_with(p));
            }
        }

        match l.trim_end().chars().last() {
            Some('{') => self.open('}', line_num),
            Some('(') => self.open(')', line_num),
            _ => {}
        }
    }
}

/// Group chunks by the line on which they start (index 0 is line 1).
fn bucket_lines(src: &str) -> Result<Vec<Vec<Chunk<'_>>>, EvalError> {
    let mut lines: Vec<Vec<Chunk<'_>>> = Vec::new();
    let mut line_num = 1;
    for chunk in Lexer::new(src) {
        let chunk = chunk?;
        if lines.len() < line_num {
            lines.resize_with(line_num, Vec::new);
        }
        lines[line_num - 1].push(chunk);
        line_num += chunk.newlines;
    }
    Ok(lines)
}

/// Append `line` to `buf`, announcing its original line number first when
/// `buf` is at a line boundary. A directive is never inserted mid-line, as
/// that could land inside a multi-line literal.
fn add_line(buf: &mut String, line_num: usize, line: &str) {
    if buf.is_empty() || buf.ends_with('\n') {
        buf.push_str(&format!("//line :{line_num}\n"));
    }
    buf.push_str(line);
}

/// Chunk `src`, then route each line to the top-level or body buffer.
/// `extra_packages` extends the standard short-name table used for import
/// inference.
pub fn partition(
    src: &str,
    extra_packages: &BTreeMap<String, String>,
) -> Result<Partition, EvalError> {
    let lines = bucket_lines(src)?;
    debug!(lines = lines.len(), "chunked snippet");

    let mut state = LineState::default();
    let mut top_level = String::new();
    let mut body = String::new();

    for (idx, chunks) in lines.iter().enumerate() {
        // lines inside a multi-line comment or raw string have no chunks
        if chunks.is_empty() {
            continue;
        }
        let line_num = idx + 1;

        let mut code = String::new();
        for chunk in chunks.iter().filter(|c| c.kind == ChunkKind::Text) {
            imports::infer(chunk.text, extra_packages, &mut state.imports);
            code.push_str(chunk.text);
        }
        state.track(line_num, &code);

        let line: String = chunks.iter().map(|c| c.text).collect();
        trace!(line_num, depth = state.depth(), top_level = state.top_level, "routed line");
        if state.top_level {
            add_line(&mut top_level, line_num, &line);
        } else {
            add_line(&mut body, line_num, &line);
        }
    }

    if state.depth() > 0 {
        return Err(EvalError::UnclosedBracket {
            line: state.opened_at,
            depth: state.depth(),
        });
    }

    debug!(imports = ?state.imports, "partitioned snippet");
    Ok(Partition {
        top_level,
        body,
        imports: state.imports,
    })
}
