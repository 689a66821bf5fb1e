//! pf-search: CLI for PharmaFinder search.
//!
//! Runs the search engine over JSON catalogs exported from the backend.

mod output;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use pharmafinder_search::catalog::{parse_pharmacies, parse_products};
use pharmafinder_search::{
    fuzzy_search_with, match_locations, normalize, rank_by_relevance, ByFields, FuzzyOptions,
    OcrClassifier, OcrTerms, Pharmacy, Product, SearchConfig, SearchHit, Searchable,
    SpellingSuggester, UnifiedSearch,
};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pf-search")]
#[command(about = "Fuzzy search, relevance ranking and spelling suggestions for PharmaFinder")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to pharmafinder-search.toml if present)
    #[arg(long, global = true, env = "PF_SEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum CatalogKind {
    Products,
    Pharmacies,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the normalized comparison form of a text
    Normalize {
        /// Text to normalize
        text: String,
    },
    /// Typo-tolerant search over a catalog
    Fuzzy {
        /// JSON catalog file
        catalog: PathBuf,
        /// Search query
        query: String,
        /// Catalog record type
        #[arg(long, value_enum, default_value = "products")]
        kind: CatalogKind,
        /// Minimum score (overrides the config)
        #[arg(long)]
        threshold: Option<f64>,
        /// Maximum results (0 for all)
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Exact / prefix / substring relevance ranking over a catalog
    Rank {
        /// JSON catalog file
        catalog: PathBuf,
        /// Search query
        query: String,
        /// Catalog record type
        #[arg(long, value_enum, default_value = "products")]
        kind: CatalogKind,
        /// Maximum results (0 for all)
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Spelling suggestions from the configured dictionary
    Suggest {
        /// Possibly misspelled query
        query: String,
        /// Maximum suggestions (overrides the config)
        #[arg(long)]
        max: Option<usize>,
    },
    /// Match known neighbourhoods and cities
    Locations {
        /// Search query
        query: String,
    },
    /// Search products, pharmacies and locations together
    Unified {
        /// Search query
        query: String,
        /// JSON product catalog
        #[arg(long)]
        products: Option<PathBuf>,
        /// JSON pharmacy catalog
        #[arg(long)]
        pharmacies: Option<PathBuf>,
    },
    /// Build a search query from OCR text (file path, or - for stdin)
    Ocr {
        /// File holding recognised text
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let config = match &cli.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SearchConfig::discover()?,
    };

    match cli.command {
        Commands::Normalize { text } => {
            let normalized = normalize(&text);
            if cli.json {
                output::json(&normalized)?;
            } else {
                println!("{normalized}");
            }
        }

        Commands::Fuzzy { catalog, query, kind, threshold, limit } => {
            let options = FuzzyOptions {
                threshold: threshold.unwrap_or(config.fuzzy.threshold),
                ..config.fuzzy
            };
            match kind {
                CatalogKind::Products => {
                    let items = load_products(&catalog)?;
                    fuzzy(&items, &query, &options, limit, cli.json)?;
                }
                CatalogKind::Pharmacies => {
                    let items = load_pharmacies(&catalog)?;
                    fuzzy(&items, &query, &options, limit, cli.json)?;
                }
            }
        }

        Commands::Rank { catalog, query, kind, limit } => match kind {
            CatalogKind::Products => {
                let items = load_products(&catalog)?;
                rank(&items, &query, limit, cli.json)?;
            }
            CatalogKind::Pharmacies => {
                let items = load_pharmacies(&catalog)?;
                rank(&items, &query, limit, cli.json)?;
            }
        },

        Commands::Suggest { query, max } => {
            let suggester = SpellingSuggester::new(config.suggest.dictionary.iter().cloned())
                .with_min_similarity(config.suggest.min_similarity);
            let max = max.unwrap_or(config.suggest.max_suggestions);
            let suggestions = suggester.suggest(&query, max);

            if cli.json {
                output::json(&suggestions)?;
            } else if suggestions.is_empty() {
                output::warning(&format!("No suggestion for \"{query}\""));
            } else {
                for suggestion in suggestions {
                    println!("{suggestion}");
                }
            }
        }

        Commands::Locations { query } => {
            let locations = match_locations(&query, &config.unified.locations);
            if cli.json {
                output::json(&locations)?;
            } else {
                for location in locations {
                    println!("{location}");
                }
            }
        }

        Commands::Unified { query, products, pharmacies } => {
            let products = match products {
                Some(path) => load_products(&path)?,
                None => Vec::new(),
            };
            let pharmacies = match pharmacies {
                Some(path) => load_pharmacies(&path)?,
                None => Vec::new(),
            };

            let engine = UnifiedSearch::new(&config);
            let results = engine.search(&query, &products, &pharmacies);

            if cli.json {
                output::json(&results)?;
            } else {
                output::header(&format!("Intent: {:?}", results.intent));
                for (i, hit) in results.hits.iter().enumerate() {
                    let (kind, label) = match hit {
                        SearchHit::Product { item, .. } => ("product", item.name.as_str()),
                        SearchHit::Pharmacy { item } => ("pharmacy", item.name.as_str()),
                        SearchHit::Location { name } => ("location", *name),
                    };
                    output::ranked(i + 1, kind, label);
                }
                if !results.suggestions.is_empty() {
                    println!("Did you mean: {}", results.suggestions.join(", "));
                }
            }
        }

        Commands::Ocr { input } => {
            let text = read_input(&input)?;
            let classifier = OcrClassifier::new(&config.ocr);

            if cli.json {
                #[derive(Serialize)]
                struct OcrReport {
                    terms: OcrTerms,
                    query: Option<String>,
                }
                output::json(&OcrReport {
                    terms: classifier.classify(&text),
                    query: classifier.build_query(&text),
                })?;
            } else {
                match classifier.build_query(&text) {
                    Some(query) => println!("{query}"),
                    None => {
                        output::warning("No searchable text detected");
                        std::process::exit(1);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. RUST_LOG takes precedence over `level`.
fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialized");
    Ok(())
}

fn load_products(path: &Path) -> anyhow::Result<Vec<Product>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    parse_products(&json).with_context(|| format!("Invalid product catalog {}", path.display()))
}

fn load_pharmacies(path: &Path) -> anyhow::Result<Vec<Pharmacy>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    parse_pharmacies(&json).with_context(|| format!("Invalid pharmacy catalog {}", path.display()))
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// First searchable field, which is the record's name.
fn label<T: Searchable>(item: &T) -> String {
    item.search_fields().into_iter().next().unwrap_or_default()
}

fn fuzzy<T>(
    items: &[T],
    query: &str,
    options: &FuzzyOptions,
    limit: usize,
    json: bool,
) -> anyhow::Result<()>
where
    T: Searchable + Serialize,
{
    let mut results = fuzzy_search_with(items, query, ByFields, options);
    if limit > 0 {
        results.truncate(limit);
    }

    if json {
        return output::json(&results);
    }

    if results.is_empty() {
        output::warning(&format!("No match for \"{query}\""));
    }
    for (i, result) in results.iter().enumerate() {
        output::ranked(i + 1, &output::fuzzy_score(result.score), &label(result.item));
    }
    Ok(())
}

fn rank<T>(items: &[T], query: &str, limit: usize, json: bool) -> anyhow::Result<()>
where
    T: Searchable + Serialize,
{
    let mut results = rank_by_relevance(items, query, ByFields);
    if limit > 0 {
        results.truncate(limit);
    }

    if json {
        return output::json(&results);
    }

    if results.is_empty() {
        output::warning(&format!("No match for \"{query}\""));
    }
    for (i, result) in results.iter().enumerate() {
        output::ranked(i + 1, &output::relevance_score(result.score), &label(result.item));
    }
    Ok(())
}
