//! Expression lexer.
//!
//! Turns source text into a flat token stream. The vocabulary is closed: any
//! word not in the keyword table is an error, except the zone name that
//! follows `in`, which is taken verbatim up to the next whitespace.

use super::token::{Token, TokenKind, keyword, suggest_keyword};
use crate::error::{ScheduleError, ScheduleResult, Span};
use crate::schedule::core::TimeOfDay;

/// Tokenizes a schedule expression.
///
/// ## Errors
///
/// Returns `ScheduleError::Lex` for an unexpected character, an unknown
/// keyword, an out-of-range or malformed time, an oversized number, or a
/// missing timezone after `in`.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn tokenize(input: &str) -> ScheduleResult<Vec<Token>> {
    let tokens = Lexer::new(input).run()?;
    tracing::trace!(count = tokens.len(), "Tokenized expression");
    Ok(tokens)
}

struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    after_in: bool,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            after_in: false,
        }
    }

    fn run(mut self) -> ScheduleResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            if self.after_in {
                self.after_in = false;
                tokens.push(self.lex_timezone()?);
                continue;
            }

            self.skip_whitespace();
            let Some(&byte) = self.bytes.get(self.pos) else {
                break;
            };
            let start = self.pos;

            let token = if byte == b',' {
                self.pos += 1;
                Token {
                    kind: TokenKind::Comma,
                    span: Span::new(start, self.pos),
                }
            } else if byte.is_ascii_digit() {
                self.lex_numeric()?
            } else if byte.is_ascii_alphabetic() {
                self.lex_word()?
            } else {
                let ch = self.input[start..].chars().next().unwrap_or('\u{fffd}');
                return Err(ScheduleError::lex(
                    format!("unexpected character '{ch}'"),
                    Span::new(start, start + ch.len_utf8()),
                    self.input,
                ));
            };

            if token.kind == TokenKind::In {
                self.after_in = true;
            }
            tokens.push(token);
        }

        Ok(tokens)
    }

    fn skip_whitespace(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(u8::is_ascii_whitespace)
        {
            self.pos += 1;
        }
    }

    fn digit_at(&self, pos: usize) -> bool {
        self.bytes.get(pos).is_some_and(u8::is_ascii_digit)
    }

    fn byte_is(&self, pos: usize, expected: u8) -> bool {
        self.bytes.get(pos) == Some(&expected)
    }

    /// Consumes everything up to the next whitespace as a zone name.
    fn lex_timezone(&mut self) -> ScheduleResult<Token> {
        self.skip_whitespace();
        let start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| !b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
        let tz = &self.input[start..self.pos];
        if tz.is_empty() {
            return Err(ScheduleError::lex(
                "expected timezone after 'in'",
                Span::at(start),
                self.input,
            ));
        }
        Ok(Token {
            kind: TokenKind::Timezone(tz.to_string()),
            span: Span::new(start, self.pos),
        })
    }

    /// ISO date, time of day, ordinal number, or plain number.
    fn lex_numeric(&mut self) -> ScheduleResult<Token> {
        let start = self.pos;
        while self.digit_at(self.pos) {
            self.pos += 1;
        }
        let digits = &self.input[start..self.pos];

        // YYYY-MM-DD
        if digits.len() == 4
            && self.byte_is(start + 4, b'-')
            && self.digit_at(start + 5)
            && self.digit_at(start + 6)
            && self.byte_is(start + 7, b'-')
            && self.digit_at(start + 8)
            && self.digit_at(start + 9)
        {
            self.pos = start + 10;
            return Ok(Token {
                kind: TokenKind::IsoDate(self.input[start..self.pos].to_string()),
                span: Span::new(start, self.pos),
            });
        }

        // H:MM or HH:MM
        if digits.len() <= 2 && self.byte_is(self.pos, b':') {
            let minute_start = self.pos + 1;
            let mut end = minute_start;
            while self.digit_at(end) {
                end += 1;
            }
            self.pos = end;
            let span = Span::new(start, end);
            if end - minute_start != 2 {
                return Err(ScheduleError::lex("invalid time", span, self.input));
            }
            let hour = parse_u32(digits, span, self.input)?;
            let minute = parse_u32(&self.input[minute_start..end], span, self.input)?;
            if hour > 23 || minute > 59 {
                return Err(ScheduleError::lex("invalid time", span, self.input));
            }
            return Ok(Token {
                kind: TokenKind::Time(TimeOfDay::new(hour, minute)),
                span,
            });
        }

        let value = parse_u32(digits, Span::new(start, self.pos), self.input)?;

        if let Some(suffix) = self.input.get(self.pos..self.pos + 2)
            && matches!(
                suffix.to_ascii_lowercase().as_str(),
                "st" | "nd" | "rd" | "th"
            )
        {
            self.pos += 2;
            return Ok(Token {
                kind: TokenKind::OrdinalNumber(value),
                span: Span::new(start, self.pos),
            });
        }

        Ok(Token {
            kind: TokenKind::Number(value),
            span: Span::new(start, self.pos),
        })
    }

    fn lex_word(&mut self) -> ScheduleResult<Token> {
        let start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
        {
            self.pos += 1;
        }
        let span = Span::new(start, self.pos);
        let word = self.input[start..self.pos].to_ascii_lowercase();

        let Some(kind) = keyword(&word) else {
            let err = ScheduleError::lex(format!("unknown keyword '{word}'"), span, self.input);
            return Err(match suggest_keyword(&word) {
                Some(fix) => err.with_suggestion(fix),
                None => err,
            });
        };

        Ok(Token { kind, span })
    }
}

fn parse_u32(digits: &str, span: Span, input: &str) -> ScheduleResult<u32> {
    digits
        .parse()
        .map_err(|_err| ScheduleError::lex("number out of range", span, input))
}
