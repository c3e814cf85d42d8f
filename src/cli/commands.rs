//! Command implementations for the tokenlens CLI.

use std::path::PathBuf;

use chrono::Local;
use log::debug;
use tokio::runtime::Builder as TokioRuntimeBuilder;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::SessionConfig;
use crate::error::{Result, TokenlensError};
use crate::io::default_file_name;
use crate::session::{EventOutcome, TokenizationSession};

/// Execute a CLI command.
pub fn execute_command(args: TokenlensArgs) -> Result<()> {
    let config = args.session_config()?;
    debug!("session config: {config:?}");

    let runtime = TokioRuntimeBuilder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| TokenlensError::runtime(format!("failed to initialize runtime: {err}")))?;

    runtime.block_on(async {
        match &args.command {
            Command::Tokenize(tokenize_args) => tokenize(tokenize_args, config, &args).await,
            Command::Freq(freq_args) => frequencies(freq_args, config, &args).await,
            Command::Search(search_args) => search(search_args, config, &args).await,
            Command::Export(export_args) => export(export_args, config, &args).await,
        }
    })
}

/// Build a session and load the requested input into it.
async fn load_session(
    input: &InputArgs,
    config: SessionConfig,
    cli_args: &TokenlensArgs,
) -> Result<TokenizationSession> {
    let mut session = TokenizationSession::new(config)?;

    match input.source()? {
        InputSource::Text(text) => session.set_input_text(text),
        InputSource::File(path) => {
            if cli_args.verbosity() > 1 {
                println!("Importing: {}", path.display());
            }
            let started = session.start_import(&path);
            output_notifications(&session.take_notifications(), cli_args);
            started?;

            for outcome in session.settle().await {
                if let EventOutcome::ImportFailed { message, .. } = outcome {
                    return Err(TokenlensError::other(message));
                }
            }
            output_notifications(&session.take_notifications(), cli_args);
        }
    }

    Ok(session)
}

/// Print the token sequence.
async fn tokenize(
    args: &TokenizeArgs,
    config: SessionConfig,
    cli_args: &TokenlensArgs,
) -> Result<()> {
    let session = load_session(&args.input, config, cli_args).await?;

    let tokens = session
        .tokens()
        .iter()
        .map(|token| TokenRow {
            position: token.position,
            text: token.text.clone(),
            start_offset: args.detailed.then_some(token.start_offset),
            end_offset: args.detailed.then_some(token.end_offset),
            token_type: args.detailed.then(|| format!("{:?}", token.token_type)),
        })
        .collect();

    output_result(
        "Tokenization complete",
        &TokenizeResult {
            engine: session.engine_name().to_string(),
            tokens,
            total_tokens: session.total_token_count(),
            unique_tokens: session.unique_token_count(),
            duration_us: session.processing_duration().as_micros() as u64,
        },
        cli_args,
    )
}

/// Print the frequency table.
async fn frequencies(
    args: &FreqArgs,
    config: SessionConfig,
    cli_args: &TokenlensArgs,
) -> Result<()> {
    let session = load_session(&args.input, config, cli_args).await?;
    let map = session.frequencies();

    let rows: Vec<FrequencyRow> = match args.top {
        Some(n) => map
            .top(n)
            .into_iter()
            .map(|(token, freq)| FrequencyRow {
                token: token.to_string(),
                freq,
            })
            .collect(),
        None => map
            .iter()
            .map(|(token, freq)| FrequencyRow {
                token: token.to_string(),
                freq,
            })
            .collect(),
    };

    output_result(
        "Frequency table",
        &FrequencyResult {
            total_tokens: map.total(),
            unique_tokens: map.len(),
            frequencies: rows,
        },
        cli_args,
    )
}

/// Run a query against the tokens.
async fn search(args: &SearchArgs, config: SessionConfig, cli_args: &TokenlensArgs) -> Result<()> {
    let mut session = load_session(&args.input, config, cli_args).await?;

    session.set_search_query(&args.query);
    session.settle().await;

    let tokens = session.tokens();
    let matches = session
        .matches()
        .iter()
        .filter_map(|index| {
            tokens.get(index).map(|token| MatchRow {
                index,
                token: token.text.clone(),
            })
        })
        .collect();

    output_result(
        "Search complete",
        &SearchResult {
            query: session.normalized_query().to_string(),
            match_count: session.match_count(),
            total_tokens: session.total_token_count(),
            matches,
        },
        cli_args,
    )
}

/// Write tokens and frequencies to disk.
async fn export(args: &ExportArgs, config: SessionConfig, cli_args: &TokenlensArgs) -> Result<()> {
    let mut session = load_session(&args.input, config, cli_args).await?;

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_file_name(args.export_format, Local::now())));

    let started = session.start_export(&path, args.export_format);
    output_notifications(&session.take_notifications(), cli_args);
    started?;

    for outcome in session.settle().await {
        if let EventOutcome::ExportFailed { message, .. } = outcome {
            return Err(TokenlensError::other(message));
        }
    }
    output_notifications(&session.take_notifications(), cli_args);

    output_result(
        "Export complete",
        &ExportResult {
            path: path.display().to_string(),
            format: args.export_format.to_string(),
            total_tokens: session.total_token_count(),
            unique_tokens: session.unique_token_count(),
        },
        cli_args,
    )
}
