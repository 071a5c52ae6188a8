//! Character-level token source for module files.
//!
//! The lexer never builds a token stream up front: the translator pulls one
//! word or one special character at a time, and may save and restore the
//! cursor around a lookahead. End of line is folded into `advance`, which
//! lands on the first non-blank character of the next non-empty line and
//! remembers how many line breaks it crossed.

/// What the next token would be, without consuming it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    SpecialCharacter,
}

/// Saved cursor, restored with [`Lexer::reset`].
#[derive(Debug, Clone)]
pub struct Mark {
    position: usize,
    line: usize,
    line_start: usize,
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    line_start: usize,
    eol_crossed: usize,
    token_line: usize,
    file_name: String,
}

impl Lexer {
    pub fn new(source: &str, file_name: &str) -> Self {
        Self {
            input: source.chars().collect(),
            position: 0,
            line: 1,
            line_start: 0,
            eol_crossed: 0,
            token_line: 1,
            file_name: file_name.to_string(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// NUL once the input is exhausted.
    pub fn current_char(&self) -> char {
        self.peek(0)
    }

    pub fn peek(&self, offset: usize) -> char {
        self.input
            .get(self.position + offset)
            .copied()
            .unwrap_or('\0')
    }

    pub fn is_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// 1-based line of the cursor.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the cursor.
    pub fn column(&self) -> usize {
        self.position - self.line_start + 1
    }

    /// Line on which the last word read by `get_token` started.
    pub fn token_line(&self) -> usize {
        self.token_line
    }

    /// Line breaks crossed by the last `advance`.
    pub fn eol_crossed(&self) -> usize {
        self.eol_crossed
    }

    /// Full text of the line under the cursor, for diagnostics.
    pub fn current_line_text(&self) -> String {
        self.input[self.line_start.min(self.input.len())..]
            .iter()
            .take_while(|ch| **ch != '\n')
            .filter(|ch| **ch != '\r')
            .collect()
    }

    fn step(&mut self) {
        if let Some(&ch) = self.input.get(self.position) {
            self.position += 1;
            if ch == '\n' {
                self.line += 1;
                self.line_start = self.position;
                self.eol_crossed += 1;
            }
        }
    }

    fn is_line_break(ch: char) -> bool {
        ch == '\n' || ch == '\r'
    }

    /// Moves one character forward, folding any end of line reached.
    pub fn advance(&mut self) {
        self.eol_crossed = 0;
        let leaving_line = Self::is_line_break(self.current_char());
        self.step();

        if leaving_line || Self::is_line_break(self.current_char()) {
            while !self.is_end() && matches!(self.current_char(), ' ' | '\t' | '\r' | '\n') {
                self.step();
            }
        }
    }

    pub fn skip_delim(&mut self) {
        while !self.is_end() && matches!(self.current_char(), ' ' | '\t' | '\r' | '\n') {
            self.advance();
        }
    }

    /// Skips up to the start of the next non-empty line.
    pub fn skip_line(&mut self) {
        while !self.is_end() {
            self.advance();
            if self.eol_crossed > 0 {
                break;
            }
        }
    }

    fn is_word_char(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_'
    }

    pub fn next_kind(&mut self) -> TokenKind {
        self.skip_delim();
        if Self::is_word_char(self.current_char()) {
            TokenKind::Word
        } else {
            TokenKind::SpecialCharacter
        }
    }

    /// Reads the next word. Returns an empty string, consuming nothing but
    /// blanks, when the next character is not part of a word.
    pub fn get_token(&mut self) -> String {
        self.skip_delim();
        self.token_line = self.line;

        let mut token = String::new();
        while !self.is_end() && Self::is_word_char(self.current_char()) {
            token.push(self.current_char());
            self.advance();
        }

        token
    }

    fn at(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(offset, ch)| self.peek(offset) == ch)
    }

    fn push_raw(&self, out: &mut String, ch: char) {
        if self.eol_crossed > 0 && !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
        out.push(ch);
    }

    /// Raw text up to `delim`, which is consumed. Line breaks become one space.
    /// `None` when the input ends first.
    pub fn get_literal(&mut self, delim: &str) -> Option<String> {
        let mut literal = String::new();
        self.eol_crossed = 0;

        while !self.is_end() {
            if self.at(delim) {
                for _ in delim.chars() {
                    self.advance();
                }
                return Some(literal);
            }

            let ch = self.current_char();
            self.push_raw(&mut literal, ch);
            self.advance();
        }

        None
    }

    /// Raw text up to the `close` matching an already consumed `open`.
    pub fn get_balanced(&mut self, open: char, close: char) -> Option<String> {
        let mut text = String::new();
        let mut depth = 0usize;
        self.eol_crossed = 0;

        while !self.is_end() {
            let ch = self.current_char();

            if ch == close {
                if depth == 0 {
                    self.advance();
                    return Some(text);
                }
                depth -= 1;
            } else if ch == open {
                depth += 1;
            }

            self.push_raw(&mut text, ch);
            self.advance();
        }

        None
    }

    pub fn mark(&self) -> Mark {
        Mark {
            position: self.position,
            line: self.line,
            line_start: self.line_start,
        }
    }

    pub fn reset(&mut self, mark: Mark) {
        self.position = mark.position;
        self.line = mark.line;
        self.line_start = mark.line_start;
        self.eol_crossed = 0;
    }
}
