//! WebPrivacy CLI
//!
//! CLI tool for validating privacy configurations and checking what the
//! policy core decides for a URL.

use std::fs;

use clap::{Parser, Subcommand};

use wp_config::{merge_domains, parse_allowlist, parse_config, stats, validate};
use wp_core::types::{AllowList, Config};
use wp_core::SuffixList;

#[derive(Parser)]
#[command(name = "wp-cli")]
#[command(about = "WebPrivacy configuration and policy tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a configuration file and report irregularities
    Validate {
        /// Configuration JSON file
        #[arg(short, long)]
        input: String,
    },

    /// Dump configuration summary info
    Info {
        /// Configuration JSON file
        #[arg(short, long)]
        input: String,
    },

    /// Evaluate a URL against a configuration
    Check {
        /// Configuration JSON file
        #[arg(short, long)]
        config: String,

        /// URL to evaluate
        url: String,

        /// Tracker data set with entity domains
        #[arg(short, long)]
        tds: Option<String>,

        /// User allowlist JSON file
        #[arg(short, long)]
        allowlist: Option<String>,

        /// Public Suffix List file
        #[arg(short, long)]
        psl: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { input } => cmd_validate(&input),
        Commands::Info { input } => cmd_info(&input),
        Commands::Check {
            config,
            url,
            tds,
            allowlist,
            psl,
        } => cmd_check(&config, &url, tds.as_deref(), allowlist.as_deref(), psl.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_config(path: &str, tds: Option<&str>) -> Result<Config, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path, e))?;
    let mut config = parse_config(&text)
        .map_err(|e| format!("Invalid config '{}': {}", path, e))?;

    if let Some(tds_path) = tds {
        let tds_text = fs::read_to_string(tds_path)
            .map_err(|e| format!("Failed to read '{}': {}", tds_path, e))?;
        merge_domains(&mut config, &tds_text)
            .map_err(|e| format!("Invalid tracker data '{}': {}", tds_path, e))?;
    }

    Ok(config)
}

fn cmd_validate(input: &str) -> Result<(), String> {
    let config = load_config(input, None)?;
    let issues = validate(&config);

    if issues.is_empty() {
        println!("Config '{}' is clean", input);
    } else {
        println!("Config '{}' has {} issue(s):", input, issues.len());
        for issue in &issues {
            println!("  {issue}");
        }
    }

    Ok(())
}

fn cmd_info(input: &str) -> Result<(), String> {
    let config = load_config(input, None)?;
    let stats = stats(&config);

    println!("Config: {}", input);
    println!("  Features:       {} ({} enabled)", stats.feature_count, stats.enabled_feature_count);
    println!("  Exceptions:     {}", stats.exception_count);
    println!("  Broken sites:   {}", stats.unprotected_count);
    println!("  Entity domains: {}", stats.entity_domain_count);

    Ok(())
}

fn cmd_check(
    config_path: &str,
    url: &str,
    tds: Option<&str>,
    allowlist_path: Option<&str>,
    psl_path: Option<&str>,
) -> Result<(), String> {
    let config = load_config(config_path, tds)?;

    let allowlist = match allowlist_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read '{}': {}", path, e))?;
            parse_allowlist(&text).map_err(|e| format!("Invalid allowlist '{}': {}", path, e))?
        }
        None => AllowList::new(),
    };

    let psl = match psl_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read '{}': {}", path, e))?;
            SuffixList::parse(&text)
        }
        None => SuffixList::new(),
    };

    println!("URL: {}", url);
    println!("  Host:           {}", wp_core::normalize_host(url, false));
    match wp_core::extract_limited_domain(url, false, &psl) {
        Some(limited) => println!("  Limited domain: {}", limited),
        None => println!("  Limited domain: (not a URL)"),
    }

    match wp_core::find_parent_entity(&config, url) {
        Some(entity) => println!("  Owned by:       {}", entity.display_name),
        None => println!("  Owned by:       (no known entity)"),
    }

    println!("  Safe-listed:    {}", wp_core::is_safe_listed(&config, &allowlist, url));
    println!("  Broken site:    {}", wp_core::is_broken(&config, url));
    println!("  Cookie-excl:    {}", wp_core::is_cookie_excluded(&config, url));

    let broken = wp_core::broken_features(&config, url);
    if broken.is_empty() {
        println!("  All {} features protect this URL", config.features.len());
    } else {
        println!("  Broken features:");
        for name in &broken {
            println!("    {name}");
        }
    }

    Ok(())
}
