//! Reads a complete SGML statement file with a bank account and a credit card
//! account.

use ofx::parse::{parse_file, parse_files, parse_str, Token, Tokenizer};
use ofx::{Decimal, ErrorType, Finance, MerchantCategoryCode, Record};

const EXAMPLE: &str = include_str!("fixtures/example.ofx");

fn fixture_path() -> String {
    format!("{}/tests/fixtures/example.ofx", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn header_block() {
    let headers: Vec<_> = Tokenizer::new(EXAMPLE)
        .take_while(|token| matches!(token, Token::Header { .. }))
        .collect();
    assert_eq!(headers.len(), 9);
    assert_eq!(
        headers[1],
        Token::Header {
            key: "DATA".to_string(),
            value: "OFXSGML".to_string()
        }
    );
}

#[test]
fn body_tokens() {
    let mut tokenizer = Tokenizer::new(EXAMPLE)
        .skip_while(|token| matches!(token, Token::Header { .. }));
    assert_eq!(tokenizer.next(), Some(Token::Newline));
    assert_eq!(tokenizer.next(), Some(Token::OpenTag("OFX".to_string())));
    assert_eq!(tokenizer.last(), Some(Token::Newline));
}

#[test]
fn tree_shape() {
    let root = parse_str(EXAMPLE).unwrap();
    assert_eq!(root.name(), "OFX");
    let names: Vec<_> = root.children().iter().map(|c| c.name().as_str()).collect();
    assert_eq!(
        names,
        vec!["SIGNONMSGSRSV1", "BANKMSGSRSV1", "CREDITCARDMSGSRSV1"]
    );

    let sonrs = root.path(&["SIGNONMSGSRSV1", "SONRS"]).unwrap();
    let names: Vec<_> = sonrs.children().iter().map(|c| c.name().as_str()).collect();
    assert_eq!(names, vec!["STATUS", "DTSERVER", "LANGUAGE", "FI"]);
    assert_eq!(sonrs.content_at(&["status", "severity"]), Some("INFO"));
    assert_eq!(sonrs.content_at(&["fi", "org"]), Some("Example Bank"));

    let list = root
        .path(&["BANKMSGSRSV1", "STMTTRNRS", "STMTRS", "BANKTRANLIST"])
        .unwrap();
    assert_eq!(list.children_named("stmttrn").count(), 2);
}

#[test]
fn session() {
    let finance = Finance::parse(EXAMPLE).unwrap();
    let session = finance.session();
    assert_eq!(session.institution().name(), "Example Bank");
    assert_eq!(session.institution().id(), "1234");
    assert_eq!(session.date().to_rfc3339(), "2017-03-18T12:00:00-05:00");
}

#[test]
fn bank_account() {
    let finance = Finance::parse(EXAMPLE).unwrap();
    assert!(finance.accounts().is_empty());
    assert_eq!(finance.bank_accounts().len(), 1);

    let account = &finance.bank_accounts()[0];
    assert_eq!(account.currency(), "USD");
    assert_eq!(account.bank(), "123456789");
    assert_eq!(account.account(), "000111222");
    assert_eq!(account.account_type(), "CHECKING");
    assert_eq!(account.balance(), Decimal::new(152375, 2));
    assert_eq!(account.date().to_rfc3339(), "2017-03-18T00:00:00+00:00");

    let transactions = account.statement().transactions();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].amount(), Decimal::new(-4250, 2));
    assert_eq!(transactions[0].category(), Some(MerchantCategoryCode(5411)));
    assert_eq!(transactions[1].kind(), "CHECK");
    assert_eq!(transactions[1].check(), Some(1042));
    assert_eq!(transactions[1].description(), "Check 1042");
}

#[test]
fn credit_account() {
    let finance = Finance::parse(EXAMPLE).unwrap();
    assert_eq!(finance.credit_accounts().len(), 1);

    let account = &finance.credit_accounts()[0];
    assert_eq!(account.account(), "4111222233334444");
    assert_eq!(account.balance(), Decimal::new(-1999, 2));
    assert_eq!(account.statement().transactions().len(), 1);
    assert_eq!(
        account.statement().transactions()[0].id(),
        "CC2017031201"
    );
}

#[test]
fn lowercase_tags() {
    let finance = Finance::parse(&EXAMPLE.to_lowercase()).unwrap();
    assert_eq!(finance.bank_accounts().len(), 1);
    assert_eq!(finance.credit_accounts().len(), 1);
}

#[test]
fn missing_session() {
    let src = EXAMPLE.replace("<DTSERVER>", "<DTCLIENT>");
    let error = Finance::parse(&src).unwrap_err();
    assert_eq!(error.r#type, ErrorType::Incomplete);
}

#[test]
fn broken_account_is_skipped() {
    let src = EXAMPLE.replace("<BALAMT>1523.75", "<BALAMT>n/a");
    let finance = Finance::parse(&src).unwrap();
    assert!(finance.bank_accounts().is_empty());
    assert_eq!(finance.credit_accounts().len(), 1);
}

#[test]
fn from_file() {
    let finance = Finance::from_file(&fixture_path()).unwrap();
    assert_eq!(finance, Finance::parse(EXAMPLE).unwrap());

    let root = parse_file(&fixture_path()).unwrap();
    assert_eq!(Finance::from_element(&root).unwrap(), finance);
}

#[test]
fn files_in_order() {
    let paths = vec![
        fixture_path(),
        "/nonexistent/statement.ofx".to_string(),
        fixture_path(),
    ];
    let results = parse_files(&paths);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().name(), "OFX");
    assert_eq!(results[1].as_ref().unwrap_err().r#type, ErrorType::Io);
    assert_eq!(results[0], results[2]);
}
