//! CLI administration tool for url-shortener-core.
//!
//! Runs shortener operations directly against the configured backing store,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check that both stores answer
//! cargo run --bin admin -- check
//!
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com --cdn-prefix https://s.example.com
//!
//! # Resolve a short code
//! cargo run --bin admin -- resolve 7a895df74ca2b36e
//!
//! # Compute a code offline, without touching any store
//! cargo run --bin admin -- code 42 https://example.com --client-ip 203.0.113.7
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `STORE_BACKEND`, `DATABASE_URL` or `REDIS_URL`,
//! `MAX_RETRIES`, `BACKOFF`, `HASH_DIGEST_SIZE`, ...

use url_shortener_core::config::{self, Config};
use url_shortener_core::infrastructure::stores;
use url_shortener_core::server::build_service;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing url-shortener-core.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ping the counter and mapping stores
    Check,

    /// Create a short URL
    Shorten {
        /// Long URL to shorten
        url: String,

        /// Prefix the short code is appended to
        #[arg(short, long)]
        cdn_prefix: String,

        /// Caller identity used to personalise the code
        #[arg(long, default_value = "127.0.0.1")]
        client_ip: String,
    },

    /// Resolve a short code to its long URL
    Resolve {
        /// Short code
        code: String,
    },

    /// Compute the short code for a counter value without touching a store
    Code {
        /// Counter value
        counter: u64,

        /// Long URL
        url: String,

        /// Caller identity
        #[arg(long, default_value = "")]
        client_ip: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Check => check(&config).await?,
        Commands::Shorten {
            url,
            cdn_prefix,
            client_ip,
        } => shorten(&config, &url, &cdn_prefix, &client_ip).await?,
        Commands::Resolve { code } => resolve(&config, &code).await?,
        Commands::Code {
            counter,
            url,
            client_ip,
        } => {
            let code = config.code_generator()?.generate(counter, &url, &client_ip);
            println!("{}", code.bright_green().bold());
        }
    }

    Ok(())
}

/// Pings both stores and reports each result.
async fn check(config: &Config) -> Result<()> {
    println!(
        "{}",
        format!("Checking {} store...", config.store_backend).bright_blue()
    );

    let stores = stores::connect(config)
        .await
        .context("Failed to connect to backing store")?;

    let counter = stores.counter.ping().await;
    let mappings = stores.mappings.ping().await;

    report("Counter store", counter.as_ref().err());
    report("Mapping store", mappings.as_ref().err());

    if counter.is_err() || mappings.is_err() {
        anyhow::bail!("store check failed");
    }

    Ok(())
}

fn report(name: &str, error: Option<&impl std::fmt::Display>) {
    match error {
        None => println!("  {} {}", "✓".green().bold(), name),
        Some(e) => println!("  {} {}: {}", "✗".red().bold(), name, e),
    }
}

/// Shortens a URL through the retrying service.
async fn shorten(config: &Config, url: &str, cdn_prefix: &str, client_ip: &str) -> Result<()> {
    let stores = stores::connect(config).await?;
    let service = build_service(config, &stores)?;

    let shortened = service.shorten(url, cdn_prefix, client_ip).await?;

    println!("  Long URL:  {}", shortened.long_url.bright_white());
    println!("  Code:      {}", shortened.short_code.bright_green().bold());
    println!("  Short URL: {}", shortened.short_url.bright_green());
    println!("  Counter:   {}", shortened.counter_value);

    Ok(())
}

/// Resolves a short code through the retrying service.
async fn resolve(config: &Config, code: &str) -> Result<()> {
    let stores = stores::connect(config).await?;
    let service = build_service(config, &stores)?;

    match service.resolve(code).await? {
        Some(mapping) => println!("{}", mapping.long_url.bright_green()),
        None => anyhow::bail!("no mapping for '{}'", code),
    }

    Ok(())
}
