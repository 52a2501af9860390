use crate::parse::{parse_file, parse_str};
use crate::utils::{parse_date, parse_decimal};
use crate::Element;
use chrono::{DateTime, FixedOffset};
use getset::{CopyGetters, Getters};
pub use rust_decimal::Decimal;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A date-time with the GMT offset it was written with.
pub type Date = DateTime<FixedOffset>;

/// Kinds of errors `ofx` reports.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// IO error, e.g., the content of an input file cannot be read.
    Io,
    /// The input holds no OFX element.
    Empty,
    /// A required tag is missing.
    Incomplete,
    /// A number or a date cannot be parsed.
    Invalid,
}

/// Contains the full information of an error.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Error {
    pub msg: String,
    pub r#type: ErrorType,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.r#type, self.msg)
    }
}

impl std::error::Error for Error {}

/// Trimmed content at `tags`, or an [`ErrorType::Incomplete`] error.
fn required<'a>(element: &'a Element, tags: &[&str]) -> Result<&'a str, Error> {
    element
        .content_at(tags)
        .map(str::trim)
        .ok_or_else(|| Error {
            msg: format!("<{}> has no {}.", element.name(), tags.join("/")),
            r#type: ErrorType::Incomplete,
        })
}

fn optional(element: &Element, tags: &[&str]) -> Option<String> {
    element
        .content_at(tags)
        .map(|content| content.trim().to_string())
}

/// A record stored under a fixed tag of an OFX document.
pub trait Record: Sized {
    /// The tag of the record.
    const LABEL: &'static str;

    /// Reads the record from its own element.
    fn from_element(element: &Element) -> Result<Self, Error>;

    /// Reads the record from the first child of `parent` tagged
    /// [`Record::LABEL`].
    fn from_parent(parent: &Element) -> Result<Self, Error> {
        let element = parent.child(Self::LABEL).ok_or_else(|| Error {
            msg: format!("<{}> has no {}.", parent.name(), Self::LABEL),
            r#type: ErrorType::Incomplete,
        })?;
        Self::from_element(element)
    }

    /// Reads every child of `parent` tagged [`Record::LABEL`], skipping the
    /// ones that are incomplete or invalid.
    fn all_from(parent: &Element) -> Vec<Self> {
        parent
            .children_named(Self::LABEL)
            .filter_map(|element| match Self::from_element(element) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("skipped <{}>: {}", Self::LABEL, e);
                    None
                }
            })
            .collect()
    }
}

/// The financial institution (`<FI>`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Institution {
    /// Returns the organization name, or an empty string.
    #[getset(get = "pub")]
    pub(crate) name: String,

    /// Returns the institution id, or an empty string.
    #[getset(get = "pub")]
    pub(crate) id: String,
}

impl Record for Institution {
    const LABEL: &'static str = "FI";

    fn from_element(element: &Element) -> Result<Self, Error> {
        Ok(Institution {
            name: optional(element, &["ORG"]).unwrap_or_default(),
            id: optional(element, &["FID"]).unwrap_or_default(),
        })
    }
}

/// The sign-on response (`<SONRS>`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Session {
    /// Returns the server time of the response.
    #[getset(get_copy = "pub")]
    pub(crate) date: Date,

    #[getset(get = "pub")]
    pub(crate) institution: Institution,
}

impl Record for Session {
    const LABEL: &'static str = "SONRS";

    fn from_element(element: &Element) -> Result<Self, Error> {
        Ok(Session {
            institution: Institution::from_parent(element)?,
            date: parse_date(required(element, &["DTSERVER"])?)?,
        })
    }
}

/// An account listed in an account information response (`<ACCTINFO>`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct AccountInfo {
    #[getset(get = "pub")]
    pub(crate) description: String,

    #[getset(get = "pub")]
    pub(crate) id: String,

    #[getset(get = "pub")]
    pub(crate) bank: Option<String>,

    #[getset(get = "pub")]
    pub(crate) account_type: Option<String>,
}

impl Record for AccountInfo {
    const LABEL: &'static str = "ACCTINFO";

    fn from_element(element: &Element) -> Result<Self, Error> {
        Ok(AccountInfo {
            id: required(element, &["ACCTID"])?.to_string(),
            description: optional(element, &["DESC"]).unwrap_or_default(),
            bank: optional(element, &["BANKID"]),
            account_type: optional(element, &["ACCTTYPE"]),
        })
    }
}

/// A Standard Industrial Classification code (`<SIC>`) describing the
/// merchant of a transaction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MerchantCategoryCode(pub u16);

impl FromStr for MerchantCategoryCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .map(MerchantCategoryCode)
            .map_err(|_| Error {
                msg: format!("Invalid merchant category code: {:?}.", s),
                r#type: ErrorType::Invalid,
            })
    }
}

impl fmt::Display for MerchantCategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A statement transaction (`<STMTTRN>`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Transaction {
    /// Returns the transaction type, e.g., `DEBIT` or `CHECK`.
    #[getset(get = "pub")]
    pub(crate) kind: String,

    /// Returns the date the transaction was posted.
    #[getset(get_copy = "pub")]
    pub(crate) date: Date,

    /// Returns the amount; negative for money leaving the account.
    #[getset(get_copy = "pub")]
    pub(crate) amount: Decimal,

    /// Returns the id assigned by the institution (`<FITID>`).
    #[getset(get = "pub")]
    pub(crate) id: String,

    #[getset(get = "pub")]
    pub(crate) description: String,

    #[getset(get = "pub")]
    pub(crate) payee: Option<String>,

    #[getset(get = "pub")]
    pub(crate) memo: Option<String>,

    #[getset(get_copy = "pub")]
    pub(crate) category: Option<MerchantCategoryCode>,

    /// Returns the check number.
    #[getset(get_copy = "pub")]
    pub(crate) check: Option<u64>,
}

impl Record for Transaction {
    const LABEL: &'static str = "STMTTRN";

    fn from_element(element: &Element) -> Result<Self, Error> {
        Ok(Transaction {
            kind: required(element, &["TRNTYPE"])?.to_string(),
            date: parse_date(required(element, &["DTPOSTED"])?)?,
            amount: parse_decimal(required(element, &["TRNAMT"])?)?,
            id: required(element, &["FITID"])?.to_string(),
            description: required(element, &["NAME"])?.to_string(),
            payee: optional(element, &["PAYEE"]),
            memo: optional(element, &["MEMO"]),
            category: optional(element, &["SIC"]).and_then(|sic| sic.parse().ok()),
            check: optional(element, &["CHECKNUM"]).and_then(|num| num.parse().ok()),
        })
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<8} {:>12} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.amount.to_string(),
            self.description
        )?;
        if let Some(memo) = &self.memo {
            write!(f, " ({})", memo)?;
        }
        if let Some(category) = self.category {
            write!(f, " #{}", category)?;
        }
        Ok(())
    }
}

/// A list of transactions over a period (`<BANKTRANLIST>`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Statement {
    #[getset(get_copy = "pub")]
    pub(crate) start: Date,

    #[getset(get_copy = "pub")]
    pub(crate) end: Date,

    #[getset(get = "pub")]
    pub(crate) transactions: Vec<Transaction>,
}

impl Record for Statement {
    const LABEL: &'static str = "BANKTRANLIST";

    fn from_element(element: &Element) -> Result<Self, Error> {
        Ok(Statement {
            start: parse_date(required(element, &["DTSTART"])?)?,
            end: parse_date(required(element, &["DTEND"])?)?,
            transactions: Transaction::all_from(element),
        })
    }
}

/// A bank statement response (`<STMTTRNRS>`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct BankAccount {
    /// Returns the default currency of the statement.
    #[getset(get = "pub")]
    pub(crate) currency: String,

    /// Returns the routing number.
    #[getset(get = "pub")]
    pub(crate) bank: String,

    #[getset(get = "pub")]
    pub(crate) account: String,

    /// Returns the account type, e.g., `CHECKING`.
    #[getset(get = "pub")]
    pub(crate) account_type: String,

    /// Returns the ledger balance.
    #[getset(get_copy = "pub")]
    pub(crate) balance: Decimal,

    /// Returns the date of the ledger balance.
    #[getset(get_copy = "pub")]
    pub(crate) date: Date,

    #[getset(get = "pub")]
    pub(crate) statement: Statement,
}

impl Record for BankAccount {
    const LABEL: &'static str = "STMTTRNRS";

    fn from_element(element: &Element) -> Result<Self, Error> {
        let response = element.child("STMTRS").ok_or_else(|| Error {
            msg: format!("<{}> has no STMTRS.", element.name()),
            r#type: ErrorType::Incomplete,
        })?;
        Ok(BankAccount {
            currency: required(response, &["CURDEF"])?.to_string(),
            bank: required(response, &["BANKACCTFROM", "BANKID"])?.to_string(),
            account: required(response, &["BANKACCTFROM", "ACCTID"])?.to_string(),
            account_type: required(response, &["BANKACCTFROM", "ACCTTYPE"])?.to_string(),
            balance: parse_decimal(required(response, &["LEDGERBAL", "BALAMT"])?)?,
            date: parse_date(required(response, &["LEDGERBAL", "DTASOF"])?)?,
            statement: Statement::from_parent(response)?,
        })
    }
}

/// A credit card statement response (`<CCSTMTTRNRS>`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct CreditAccount {
    #[getset(get = "pub")]
    pub(crate) currency: String,

    #[getset(get = "pub")]
    pub(crate) account: String,

    #[getset(get_copy = "pub")]
    pub(crate) balance: Decimal,

    #[getset(get_copy = "pub")]
    pub(crate) date: Date,

    #[getset(get = "pub")]
    pub(crate) statement: Statement,
}

impl Record for CreditAccount {
    const LABEL: &'static str = "CCSTMTTRNRS";

    fn from_element(element: &Element) -> Result<Self, Error> {
        let response = element.child("CCSTMTRS").ok_or_else(|| Error {
            msg: format!("<{}> has no CCSTMTRS.", element.name()),
            r#type: ErrorType::Incomplete,
        })?;
        Ok(CreditAccount {
            currency: required(response, &["CURDEF"])?.to_string(),
            account: required(response, &["CCACCTFROM", "ACCTID"])?.to_string(),
            balance: parse_decimal(required(response, &["LEDGERBAL", "BALAMT"])?)?,
            date: parse_date(required(response, &["LEDGERBAL", "DTASOF"])?)?,
            statement: Statement::from_parent(response)?,
        })
    }
}

/// Everything `ofx` reads from a document (`<OFX>`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Finance {
    #[getset(get = "pub")]
    pub(crate) session: Session,

    /// Returns the accounts of an account information response.
    #[getset(get = "pub")]
    pub(crate) accounts: Vec<AccountInfo>,

    /// Returns the bank statements.
    #[getset(get = "pub")]
    pub(crate) bank_accounts: Vec<BankAccount>,

    /// Returns the credit card statements.
    #[getset(get = "pub")]
    pub(crate) credit_accounts: Vec<CreditAccount>,
}

impl Record for Finance {
    const LABEL: &'static str = "OFX";

    /// Reads a document from its `<OFX>` element. A root with another name is
    /// searched for an `<OFX>` child first.
    fn from_element(element: &Element) -> Result<Self, Error> {
        let element = if element.is_named(Self::LABEL) {
            element
        } else {
            element.child(Self::LABEL).unwrap_or(element)
        };
        let signon = element.child("SIGNONMSGSRSV1").ok_or_else(|| Error {
            msg: format!("<{}> has no SIGNONMSGSRSV1.", element.name()),
            r#type: ErrorType::Incomplete,
        })?;
        Ok(Finance {
            session: Session::from_parent(signon)?,
            accounts: element
                .child("ACCTINFOTRNRS")
                .map(AccountInfo::all_from)
                .unwrap_or_default(),
            bank_accounts: element
                .child("BANKMSGSRSV1")
                .map(BankAccount::all_from)
                .unwrap_or_default(),
            credit_accounts: element
                .child("CREDITCARDMSGSRSV1")
                .map(CreditAccount::all_from)
                .unwrap_or_default(),
        })
    }
}

impl Finance {
    /// Parses OFX text.
    pub fn parse(src: &str) -> Result<Self, Error> {
        let root = parse_str(src).ok_or_else(|| Error {
            msg: "The input contains no OFX element.".to_string(),
            r#type: ErrorType::Empty,
        })?;
        Self::from_element(&root)
    }

    pub fn from_file(path: &str) -> Result<Self, Error> {
        Self::from_element(&parse_file(path)?)
    }
}
