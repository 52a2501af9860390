//! The OFX pipeline: text is split into [`Token`]s by a [`Tokenizer`], and
//! the tokens are folded into an [`Element`](crate::Element) tree by
//! [`parse`].

mod files;
mod lexer;
mod parser;
mod token;

pub use files::{decode, parse_file, parse_files, read_file};
pub use lexer::Tokenizer;
pub use parser::*;
pub use token::Token;
