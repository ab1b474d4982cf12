//! Character-level chunker for Go snippets.
//!
//! The lexer does *not* produce tokens. It only cuts the raw source into
//! comments, string literals and everything else, so that later passes can
//! look at brackets and package qualifiers without being fooled by a `{`
//! inside a string or a `fmt.` inside a comment.
//
//  Chunk shapes:
//
//      Comment  ::= '//' .* ('\n' | EOF)
//                 | '/*' .*? ('*/' | EOF)
//      String   ::= '"' ( '\' . | [^"\n] )* ('"' | EOF)
//                 | "'" ( '\' . | [^'\n] )* ("'" | EOF)
//                 | '`' [^`]* ('`' | EOF)
//      Text     ::= '\n'
//                 | anything up to a comment/string opener, or through '\n'
//
//  Every chunk is a slice of the input, so concatenating them gives the
//  input back unchanged.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::EvalError;
use crate::model::{Chunk, ChunkKind};

#[derive(Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
    /// Line on which the next chunk starts (1-based).
    line: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
            line: 1,
            finished: false,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        self.chars.next().map(|(_, c)| c)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Byte offset of the read head.
    fn pos(&mut self) -> usize {
        self.chars.peek().map_or(self.src.len(), |&(i, _)| i)
    }

    fn at_comment(&mut self) -> bool {
        let pos = self.pos();
        let rest = &self.src[pos..];
        rest.starts_with("//") || rest.starts_with("/*")
    }

    /// Package everything from `start` up to the read head.
    fn chunk(&mut self, start: usize, kind: ChunkKind, newlines: usize) -> Chunk<'a> {
        let end = self.pos();
        let src = self.src;
        self.line += newlines;
        Chunk {
            kind,
            text: &src[start..end],
            newlines,
        }
    }

    fn read_line_comment(&mut self, start: usize) -> Chunk<'a> {
        loop {
            match self.next_char() {
                Some('\n') => return self.chunk(start, ChunkKind::Comment, 1),
                Some(_) => {}
                None => return self.chunk(start, ChunkKind::Comment, 0),
            }
        }
    }

    fn read_block_comment(&mut self, start: usize) -> Chunk<'a> {
        // "/*" is already consumed
        let mut newlines = 0;
        loop {
            match self.next_char() {
                Some('\n') => newlines += 1,
                Some('*') if self.peek_char() == Some('/') => {
                    self.next_char();
                    return self.chunk(start, ChunkKind::Comment, newlines);
                }
                Some(_) => {}
                // unterminated; hand back what we have
                None => return self.chunk(start, ChunkKind::Comment, newlines),
            }
        }
    }

    fn read_quoted(&mut self, start: usize, quote: char) -> Result<Chunk<'a>, EvalError> {
        loop {
            match self.next_char() {
                Some('\n') => return Err(EvalError::NewlineInString { line: self.line }),
                Some('\\') => match self.next_char() {
                    Some('\n') => return Err(EvalError::NewlineInString { line: self.line }),
                    Some(_) => {}
                    None => return Ok(self.chunk(start, ChunkKind::String, 0)),
                },
                Some(c) if c == quote => return Ok(self.chunk(start, ChunkKind::String, 0)),
                Some(_) => {}
                None => return Ok(self.chunk(start, ChunkKind::String, 0)),
            }
        }
    }

    fn read_raw_string(&mut self, start: usize) -> Chunk<'a> {
        let mut newlines = 0;
        loop {
            match self.next_char() {
                Some('`') | None => return self.chunk(start, ChunkKind::String, newlines),
                Some('\n') => newlines += 1,
                Some(_) => {}
            }
        }
    }

    fn read_text(&mut self, start: usize) -> Chunk<'a> {
        // stop in front of anything the next call has to classify itself
        loop {
            match self.peek_char() {
                None | Some('"' | '\'' | '`') => return self.chunk(start, ChunkKind::Text, 0),
                Some('\n') => {
                    self.next_char();
                    return self.chunk(start, ChunkKind::Text, 1);
                }
                Some('/') if self.at_comment() => {
                    return self.chunk(start, ChunkKind::Text, 0);
                }
                Some(_) => {
                    self.next_char();
                }
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Chunk<'a>, EvalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let start = self.pos();
        let ch = match self.next_char() {
            Some(c) => c,
            None => {
                self.finished = true;
                return None;
            }
        };

        let chunk_res = match ch {
            '/' => match self.peek_char() {
                Some('/') => {
                    self.next_char();
                    Ok(self.read_line_comment(start))
                }
                Some('*') => {
                    self.next_char();
                    Ok(self.read_block_comment(start))
                }
                // a lone slash is division; rescan what follows it
                _ => Ok(self.read_text(start)),
            },
            '"' | '\'' => self.read_quoted(start, ch),
            '`' => Ok(self.read_raw_string(start)),
            '\n' => Ok(self.chunk(start, ChunkKind::Text, 1)),
            _ => Ok(self.read_text(start)),
        };

        if chunk_res.is_err() {
            self.finished = true;
        }
        Some(chunk_res)
    }
}
