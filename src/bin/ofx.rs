use clap::{Parser, Subcommand};
use ofx::parse::{parse_files, read_file, Tokenizer};
use ofx::{Finance, Record};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

fn tokens(inputs: &[String]) {
    for path in inputs {
        match read_file(path) {
            Ok(text) => {
                println!("# {}", path);
                for token in Tokenizer::new(&text) {
                    println!("{}", token);
                }
            }
            Err(e) => eprintln!("{}\n", e),
        }
    }
}

fn tree(inputs: &[String]) {
    for (path, result) in inputs.iter().zip(parse_files(inputs)) {
        match result {
            Ok(root) => println!("# {}\n{}", path, root),
            Err(e) => eprintln!("{}\n", e),
        }
    }
}

fn finances(inputs: &[String]) -> Vec<(&String, Finance)> {
    let mut result = vec![];
    for (path, parsed) in inputs.iter().zip(parse_files(inputs)) {
        match parsed.and_then(|root| Finance::from_element(&root)) {
            Ok(finance) => result.push((path, finance)),
            Err(e) => eprintln!("{}: {}\n", path, e),
        }
    }
    result
}

fn summary(inputs: &[String]) {
    for (path, finance) in finances(inputs) {
        let session = finance.session();
        println!("# {}", path);
        println!(
            "{} ({}) {}",
            session.institution().name(),
            session.institution().id(),
            session.date()
        );
        for account in finance.accounts() {
            println!("account {} {}", account.id(), account.description());
        }
        for account in finance.bank_accounts() {
            println!(
                "bank {} {} {} {} {} as of {}, {} transactions",
                account.bank(),
                account.account(),
                account.account_type(),
                account.balance(),
                account.currency(),
                account.date().format("%Y-%m-%d"),
                account.statement().transactions().len()
            );
        }
        for account in finance.credit_accounts() {
            println!(
                "credit {} {} {} as of {}, {} transactions",
                account.account(),
                account.balance(),
                account.currency(),
                account.date().format("%Y-%m-%d"),
                account.statement().transactions().len()
            );
        }
    }
}

fn transactions(inputs: &[String]) {
    let mut result = vec![];
    for (_, finance) in finances(inputs) {
        let bank = finance
            .bank_accounts()
            .iter()
            .map(|account| (account.account(), account.statement()));
        let credit = finance
            .credit_accounts()
            .iter()
            .map(|account| (account.account(), account.statement()));
        for (account, statement) in bank.chain(credit) {
            for txn in statement.transactions() {
                result.push((txn.date(), format!("{} {}", account, txn)));
            }
        }
    }
    result.sort();
    for (_, line) in result {
        println!("{}", line);
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "ofx",
    about = "Reads OFX statement files.",
    version = VERSION,
    author = AUTHOR,
)]
struct Cli {
    /// Input files; repeat to read several files in parallel.
    #[arg(short, long, required = true)]
    input: Vec<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Prints the tokens of each file.
    Tokens,
    /// Prints the element tree of each file.
    Tree,
    /// Prints the institution and the accounts of each file.
    Summary,
    /// Prints all transactions, sorted by date.
    Transactions,
}

fn main() {
    pretty_env_logger::init();
    let args = Cli::parse();
    match args.command {
        Commands::Tokens => tokens(&args.input),
        Commands::Tree => tree(&args.input),
        Commands::Summary => summary(&args.input),
        Commands::Transactions => transactions(&args.input),
    }
}
