use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use argparser::{ArgumentType, ByteCoercion, ParseOutcome, ParserConfig, Registry};
use tracing_subscriber::{EnvFilter, fmt};

/// Selects how `--initial` is read: `decimal` (default) or `first-char`.
const BYTE_COERCION_ENV: &str = "ARGPARSER_BYTE_COERCION";

const DUMP_SCHEMA: &str = "--dump-schema";

fn main() -> Result<ExitCode> {
    init_tracing();

    let argv: Vec<String> = std::env::args().collect();
    let program = argv
        .first()
        .cloned()
        .unwrap_or_else(|| "argparser-sandbox".to_string());

    let mut parser = build_parser(&program, config_from_env()?)?;

    // The schema dump must work without the required arguments.
    if argv.iter().skip(1).any(|arg| arg == DUMP_SCHEMA) {
        let json = serde_json::to_string_pretty(&parser.schema())
            .context("failed to serialize schema")?;
        println!("{json}");
        return Ok(ExitCode::SUCCESS);
    }

    match parser.parse(&argv) {
        Ok(ParseOutcome::Parsed) => {}
        Ok(ParseOutcome::Help(text)) => {
            print!("{text}");
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => {
            tracing::debug!(position = ?err.position(), "parse failed");
            eprintln!("[ERROR]: {err}");
            eprint!("{}", parser.usage());
            return Ok(ExitCode::FAILURE);
        }
    }

    println!("Count: {}", parser.get_u64("count", 0)?);

    if parser.found("name")? {
        println!("Name: {}", parser.get_str("name", 0)?);
    } else {
        println!("Name: (not provided)");
    }

    if parser.found("initial")? {
        println!("Initial: {}", parser.get_u8("initial", 0)?);
    }

    if parser.flag("verbose")? {
        println!("Verbose mode is ON");
    } else {
        println!("Verbose mode is OFF");
    }

    if !parser.positionals().is_empty() {
        println!("Positionals: {}", parser.positionals().join(" "));
    }

    Ok(ExitCode::SUCCESS)
}

fn build_parser(program: &str, config: ParserConfig) -> Result<Registry> {
    let mut parser = Registry::with_config(program, ["-c <count> [-n <name>] [-v]"], config);

    parser.add(
        "count",
        "Number of items to process",
        true,
        1,
        ArgumentType::U64,
        ["--count", "-c"],
    )?;
    parser.add(
        "name",
        "Name of the user",
        false,
        1,
        ArgumentType::String,
        ["--name", "-n"],
    )?;
    parser.add(
        "initial",
        "Initial as an 8-bit number",
        false,
        1,
        ArgumentType::U8,
        ["--initial", "-i"],
    )?;
    parser.add(
        "verbose",
        "Enable verbose output",
        false,
        0,
        ArgumentType::None,
        ["--verbose", "-v"],
    )?;
    parser.add(
        "dump-schema",
        "Print the argument schema as JSON and exit",
        false,
        0,
        ArgumentType::None,
        [DUMP_SCHEMA],
    )?;

    Ok(parser)
}

fn config_from_env() -> Result<ParserConfig> {
    let mode = match std::env::var(BYTE_COERCION_ENV) {
        Ok(value) => match value.as_str() {
            "decimal" => ByteCoercion::Decimal,
            "first-char" => ByteCoercion::FirstChar,
            other => bail!("{BYTE_COERCION_ENV} must be `decimal` or `first-char`, got `{other}`"),
        },
        Err(std::env::VarError::NotPresent) => ByteCoercion::default(),
        Err(err) => return Err(err).context(format!("failed to read {BYTE_COERCION_ENV}")),
    };
    tracing::debug!(?mode, "byte coercion");
    Ok(ParserConfig::default().byte_coercion(mode))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
