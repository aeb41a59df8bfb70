use std::io::Read;

use anyhow::{anyhow, bail};
use clap::Parser;
use postfix_nfa_lib::{
    automaton::{nfa::NFA, postfix::PostfixCompiler},
    config::{OutputFormat, QueryConfig},
    logger::Logger,
    solver::{
        PrefixQuery, QueryResult, SerializableQueryResult,
        shortest_word::{ShortestWordSolver, solve_query},
    },
};
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "Postfix NFA Query Tool")]
#[command(version = "0.1")]
#[command(
    about = "Length of the shortest word with a forced prefix accepted by a postfix regular expression",
    long_about = None
)]
struct Args {
    /// Postfix expression over a, b, c, 1 and the operators +, . and *.
    /// Read from stdin if not given.
    #[arg(short, long)]
    expression: Option<String>,

    /// The letter the word has to start with. Read from stdin if not given.
    #[arg(short, long)]
    symbol: Option<String>,

    /// How often the word has to start with the symbol. Read from stdin if not
    /// given.
    #[arg(short, long)]
    length: Option<String>,

    #[arg(short, long)]
    config: Option<String>,

    /// Diagnostic output on stderr, repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn needs_input(&self) -> bool {
        self.expression.is_none() || self.symbol.is_none() || self.length.is_none()
    }
}

/// The three query tokens before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawQuery {
    expression: String,
    symbol: String,
    length: String,
}

impl RawQuery {
    /// Takes tokens from the command line where present and fills the others
    /// from the whitespace separated tokens of `input`, in order.
    fn collect(args: &Args, input: &str) -> Self {
        let mut tokens = input.split_whitespace();
        let mut next = |given: &Option<String>, default: &str| match given {
            Some(value) => value.clone(),
            None => tokens.next().unwrap_or(default).to_string(),
        };

        RawQuery {
            expression: next(&args.expression, ""),
            symbol: next(&args.symbol, "a"),
            length: next(&args.length, "0"),
        }
    }

    fn parse_query(&self) -> anyhow::Result<PrefixQuery> {
        let mut chars = self.symbol.chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(symbol), None) => symbol,
            _ => bail!(
                "prefix symbol must be a single character, got {:?}",
                self.symbol
            ),
        };

        let length = self
            .length
            .parse::<usize>()
            .map_err(|e| anyhow!("invalid prefix length {:?}: {}", self.length, e))?;

        Ok(PrefixQuery::new(symbol, length))
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

/// DOT of the automaton with the states left after reading the prefix
/// highlighted.
fn graphviz(nfa: &NFA, query: PrefixQuery) -> String {
    let frontier = ShortestWordSolver::new(nfa, None).prefix_frontier(query);
    nfa.to_graphviz(Some(&frontier.into_iter().collect()))
}

fn run(raw: &RawQuery, config: &QueryConfig, logger: Option<&Logger>) -> SerializableQueryResult {
    let built = PostfixCompiler::new()
        .with_optional_logger(logger)
        .compile(&raw.expression);

    let query = match raw.parse_query() {
        Ok(query) => query,
        Err(e) => {
            eprintln!("Error: {}", e);
            tracing::warn!(symbol = %raw.symbol, length = %raw.length, "malformed query");

            let fallback = PrefixQuery::new(
                raw.symbol.chars().next().unwrap_or('a'),
                raw.length.parse().unwrap_or(0),
            );
            return SerializableQueryResult::new(
                &raw.expression,
                fallback,
                QueryResult::invalid(),
                Some(e.to_string()),
            );
        }
    };

    if *config.get_output().get_graphviz()
        && let Ok(nfa) = &built
    {
        eprintln!("{}", graphviz(nfa, query));
    }

    let result = solve_query(built.as_ref(), query, logger);
    let error = built.err().map(|e| e.to_string());

    SerializableQueryResult::new(&raw.expression, query, result, error)
}

fn render(report: &SerializableQueryResult, format: &OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Plain => report.output.clone(),
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = QueryConfig::from_optional_file(args.config.as_ref())?;
    let logger = Logger::from_config(config.get_logger(), "Query".into())?;

    let mut input = String::new();
    if args.needs_input() {
        std::io::stdin().read_to_string(&mut input)?;
    }

    let raw = RawQuery::collect(&args, &input);
    let report = run(&raw, &config, logger.as_ref());

    println!("{}", render(&report, config.get_output().get_format())?);

    Ok(())
}
