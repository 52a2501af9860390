use super::token::{self, BodyLexeme, HeaderLexeme};
use super::Token;
use logos::{Lexer as LogosLexer, Logos};
use std::iter::FusedIterator;

/// Scanning phase of a [`Tokenizer`]. A tokenizer starts in `Header`, moves
/// to `Body` the first time a line is not a header line, and never goes back.
enum Phase<'source> {
    Header(LogosLexer<'source, HeaderLexeme>),
    Body(LogosLexer<'source, BodyLexeme>),
    Finished,
}

/// Splits OFX text into [`Token`]s, lazily and in a single forward pass.
///
/// Tokens of the header block (`KEY:VALUE` lines) are produced until the
/// first line that is not a header line. From that position on, the input is
/// scanned for tags, newlines and content. Scanning stops at the end of the
/// input or at the first character sequence none of the body tokens accepts,
/// such as a stray `>`.
pub struct Tokenizer<'source> {
    src: &'source str,
    phase: Phase<'source>,
}

impl<'source> Tokenizer<'source> {
    pub fn new(src: &'source str) -> Self {
        Tokenizer {
            src,
            phase: Phase::Header(HeaderLexeme::lexer(src)),
        }
    }

    /// Returns `true` once the header block has ended.
    pub fn in_body(&self) -> bool {
        !matches!(self.phase, Phase::Header(_))
    }

    fn enter_body(&mut self, offset: usize) {
        log::trace!("header block ends at byte {}", offset);
        let rest = self.src.get(offset..).unwrap_or("");
        self.phase = Phase::Body(BodyLexeme::lexer(rest));
    }
}

impl<'source> Iterator for Tokenizer<'source> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            match &mut self.phase {
                Phase::Header(llex) => match llex.next() {
                    Some(HeaderLexeme::Line) => return Some(token::header(llex.slice())),
                    Some(HeaderLexeme::Error) => {
                        let offset = llex.span().start;
                        self.enter_body(offset);
                    }
                    None => {
                        self.phase = Phase::Finished;
                        return None;
                    }
                },
                Phase::Body(llex) => {
                    let token = match llex.next() {
                        Some(BodyLexeme::OpenTag) => Token::OpenTag(token::tag_name(llex.slice())),
                        Some(BodyLexeme::CloseTag) => {
                            Token::CloseTag(token::tag_name(llex.slice()))
                        }
                        Some(BodyLexeme::Newline) => Token::Newline,
                        Some(BodyLexeme::Content) => Token::Content(llex.slice().to_string()),
                        Some(BodyLexeme::Error) => {
                            log::debug!("unrecognized input {:?}, stop scanning", llex.slice());
                            self.phase = Phase::Finished;
                            return None;
                        }
                        None => {
                            self.phase = Phase::Finished;
                            return None;
                        }
                    };
                    log::trace!("{}", token);
                    return Some(token);
                }
                Phase::Finished => return None,
            }
        }
    }
}

impl<'source> FusedIterator for Tokenizer<'source> {}
