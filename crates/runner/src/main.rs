use clap::{Parser, Subcommand};
use explorer_api::{ExplorerClient, ExplorerError, QueryParams};
use futures_util::{StreamExt, TryStreamExt};
use percent_encoding::percent_decode_str;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "explorer", about = "Query the Altmetric Explorer API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count policy and blog mention sources across all time.
    MentionSources,

    /// Walk an already signed URL page by page, printing rows as JSON.
    Page {
        url: String,
        /// Rows requested per page.
        #[arg(long, default_value_t = 100)]
        page_size: u32,
        /// Stop after this many rows.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the parts of each URL (read from stdin when none are given).
    DecodeUrl { urls: Vec<String> },

    /// Re-sign a URL with your own API key and secret.
    RecodeUrl { url: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    common::init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::MentionSources => mention_sources().await,
        Command::Page {
            url,
            page_size,
            limit,
        } => page(&url, page_size, limit).await,
        Command::DecodeUrl { urls } => decode_urls(urls).await,
        Command::RecodeUrl { url } => recode_url(&url),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            if e.is_timeout() {
                warn!("The Explorer API did not answer in time; try a smaller page size");
            }
            ExitCode::FAILURE
        }
    }
}

async fn mention_sources() -> Result<(), ExplorerError> {
    let client = ExplorerClient::from_env()?;

    info!(
        api_key = %client.api_key(),
        "Querying explorer API for policy & blog mention sources"
    );

    let params = QueryParams::new()
        .with("order", "profile-type")
        .with("mention_sources_types", ["type:policy", "type:blog"])
        .with("timeframe", "at");
    let response = client.get_mention_sources(&params).await?;

    if response.failed() {
        error!(
            status = response.status_code(),
            body = %response.text(),
            "Explorer API request failed"
        );
        return Ok(());
    }

    if let Some(meta) = response.meta().and_then(|m| m.as_object()) {
        println!("Metadata:");
        for (key, value) in meta {
            println!("  {} = {}", key, value);
        }
    }

    let count = response.data().try_fold(0usize, |n, _| async move { Ok(n + 1) }).await?;
    info!(count = count, "Found policy blog sources");

    Ok(())
}

async fn page(url: &str, page_size: u32, limit: Option<usize>) -> Result<(), ExplorerError> {
    let client = ExplorerClient::from_env()?;
    let separator = if url.contains('?') { '&' } else { '?' };
    let url = format!("{}{}page[size]={}", url, separator, page_size);

    let response = client.fetch_url(&url).await?;
    if response.failed() {
        error!(status = response.status_code(), "Explorer API request failed");
        return Ok(());
    }

    let mut rows = response.data().take(limit.unwrap_or(usize::MAX));
    while let Some(row) = rows.next().await {
        println!("{}", row?);
    }

    Ok(())
}

async fn decode_urls(urls: Vec<String>) -> Result<(), ExplorerError> {
    if !urls.is_empty() {
        for url in urls {
            decode_url(&url)?;
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| ExplorerError::InvalidUrl(e.to_string()))?
    {
        let line = line.trim();
        if !line.is_empty() {
            decode_url(line)?;
        }
    }

    Ok(())
}

fn decode_url(url: &str) -> Result<(), ExplorerError> {
    let parsed = Url::parse(url).map_err(|e| ExplorerError::InvalidUrl(format!("{}: {}", url, e)))?;

    println!("unencoded: {}", percent_decode_str(url).decode_utf8_lossy());
    println!("host: {}", parsed.host_str().unwrap_or_default());
    println!("path: {}", parsed.path());
    println!("params:");

    let mut params: Vec<(String, Vec<String>)> = Vec::new();
    for (key, value) in parsed.query_pairs() {
        match params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value.into_owned()),
            None => params.push((key.into_owned(), vec![value.into_owned()])),
        }
    }
    for (key, values) in params {
        println!("  - {:?}: {:?}", key, values);
    }

    Ok(())
}

fn recode_url(url: &str) -> Result<(), ExplorerError> {
    let client = ExplorerClient::from_env()?;
    info!(api_key = %client.api_key(), "Re-signing URL");
    println!("{}", client.recode_url(url)?);
    Ok(())
}
