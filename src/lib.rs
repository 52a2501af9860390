//! # ofx
//!
//! ofx is a library for parsing OFX (Open Financial Exchange) files, the
//! SGML-based format banks use to export statements.
//!
//! A document is read in three steps: [`parse::Tokenizer`] splits the text
//! into tokens, [`parse::parse`] folds them into an [`Element`] tree, and
//! [`Finance`] reads accounts, balances and transactions from the tree.
//!
//! ```
//! use ofx::parse::parse_str;
//!
//! let src = "OFXHEADER:100\r\n\r\n<OFX><BANKACCTFROM><ACCTID>000111222</BANKACCTFROM></OFX>";
//! let root = parse_str(src).unwrap();
//! assert_eq!(root.content_at(&["bankacctfrom", "acctid"]), Some("000111222"));
//! ```

mod element;
mod finance;
pub mod parse;
pub mod utils;

pub use element::Element;
pub use finance::*;
