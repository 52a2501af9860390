use super::lexer::Tokenizer;
use super::token::Token;
use crate::Element;

/// Builds an [`Element`] tree from tokens, one token at a time.
///
/// OFX leaves are usually left unclosed (`<TRNAMT>-42.50` with no
/// `</TRNAMT>`). Open elements are kept on a stack; a close tag pops the
/// stack down to the element it names and attaches everything popped on the
/// way, in document order, as that element's children.
#[derive(Debug, Default)]
pub struct Parser {
    stack: Vec<Element>,
}

impl Parser {
    pub fn push_token(&mut self, token: Token) {
        match token {
            Token::Header { .. } | Token::Newline => {}
            Token::OpenTag(name) => self.stack.push(Element::new(&name)),
            Token::CloseTag(name) => self.close(&name),
            Token::Content(text) => {
                if let Some(top) = self.stack.last_mut() {
                    top.push_content(&text);
                }
            }
        }
    }

    fn close(&mut self, name: &str) {
        let mut popped = Vec::new();
        while let Some(mut top) = self.stack.pop() {
            if top.is_named(name) {
                popped.reverse();
                top.children.extend(popped);
                self.stack.push(top);
                return;
            }
            popped.push(top);
        }
        // Nothing on the stack matches: the popped elements are lost.
        log::debug!(
            "</{}> matches no open tag, {} element(s) dropped",
            name,
            popped.len()
        );
    }

    /// Returns the bottom of the stack, or `None` if nothing is open.
    pub fn finish(mut self) -> Option<Element> {
        if self.stack.len() > 1 {
            log::debug!(
                "{} unclosed element(s) above <{}> discarded",
                self.stack.len() - 1,
                self.stack[0].name
            );
        }
        self.stack.truncate(1);
        self.stack.pop()
    }
}

/// Folds `tokens` into a document tree. Returns `None` when the tokens hold
/// no element at all.
pub fn parse<I: IntoIterator<Item = Token>>(tokens: I) -> Option<Element> {
    let mut parser = Parser::default();
    for token in tokens {
        parser.push_token(token);
    }
    parser.finish()
}

/// Tokenizes and parses OFX text.
pub fn parse_str(src: &str) -> Option<Element> {
    parse(Tokenizer::new(src))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(name: &str) -> Token {
        Token::OpenTag(name.to_string())
    }

    fn close(name: &str) -> Token {
        Token::CloseTag(name.to_string())
    }

    fn content(text: &str) -> Token {
        Token::Content(text.to_string())
    }

    #[test]
    fn implicit_close() {
        let root = parse(vec![open("A"), open("B"), content("x"), close("A")]).unwrap();
        assert_eq!(
            root,
            Element::new("A").with_child(Element::new("B").with_content("x"))
        );
        assert_eq!(root.content(), "");
    }

    #[test]
    fn unclosed_siblings_keep_order() {
        let root = parse(vec![
            open("STMTTRN"),
            open("TRNTYPE"),
            content("DEBIT"),
            Token::Newline,
            open("TRNAMT"),
            content("-42.50"),
            Token::Newline,
            close("STMTTRN"),
        ])
        .unwrap();
        let names: Vec<_> = root.children().iter().map(|c| c.name().as_str()).collect();
        assert_eq!(names, vec!["TRNTYPE", "TRNAMT"]);
        assert_eq!(root.content_at(&["trnamt"]), Some("-42.50"));
    }

    #[test]
    fn closed_elements_stay_until_parent_closes() {
        let root = parse_str("<SONRS><STATUS><CODE>0</STATUS><DTSERVER>20170318</SONRS>").unwrap();
        let names: Vec<_> = root.children().iter().map(|c| c.name().as_str()).collect();
        assert_eq!(names, vec!["STATUS", "DTSERVER"]);
        assert_eq!(root.content_at(&["STATUS", "CODE"]), Some("0"));
    }

    #[test]
    fn close_tag_is_case_insensitive() {
        let root = parse(vec![open("ofx"), open("a"), close("OFX")]).unwrap();
        assert_eq!(root.name(), "OFX");
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn content_accumulates() {
        let root = parse(vec![
            open("MEMO"),
            content("first"),
            Token::Newline,
            content("second"),
        ])
        .unwrap();
        assert_eq!(root.content(), "first second");
    }

    #[test]
    fn content_without_element_is_dropped() {
        let root = parse(vec![content("stray"), open("A"), close("A")]).unwrap();
        assert_eq!(root, Element::new("A"));
    }

    #[test]
    fn headers_and_newlines_are_ignored() {
        let tokens = vec![
            Token::Header {
                key: "OFXHEADER".to_string(),
                value: "100".to_string(),
            },
            Token::Newline,
            open("OFX"),
            Token::Newline,
            close("OFX"),
        ];
        assert_eq!(parse(tokens), Some(Element::new("OFX")));
    }

    #[test]
    fn empty_document() {
        assert_eq!(parse(Vec::new()), None);
        assert_eq!(parse_str("OFXHEADER:100\nDATA:OFXSGML\n"), None);
        assert_eq!(parse_str("\r\n\r\n"), None);
    }

    #[test]
    fn stray_close_tag_drops_subtree() {
        assert_eq!(parse(vec![open("A"), open("B"), close("C")]), None);

        let root = parse(vec![
            open("A"),
            close("A"),
            open("B"),
            content("lost"),
            close("C"),
        ]);
        assert_eq!(root, None);
    }

    #[test]
    fn result_is_bottom_of_stack() {
        let root = parse(vec![open("A"), content("a"), open("B"), content("b")]).unwrap();
        assert_eq!(root, Element::new("A").with_content("a"));
    }
}
