//! `ontoagg`: aggregates and compares crowd-sourced descriptions against a
//! sample concept hierarchy.
//!
//! **Subcommands:**
//! - `inspect`: summarize the chosen sample ontology
//! - `generalize <property> <concept>`: show what one statement implies and excludes
//! - `aggregate <sources.json>`: fuse several sources into a consensus
//! - `metric <a.json> <b.json>`: distance between two descriptions
//!
//! **Usage:**
//! ```text
//! ontoagg [--ontology small|medium|large] [--rule voting|sb] [--threshold <t>] <command>
//! ```
//!
//! Statements are `[subject, property, concept]` triples; properties and
//! concepts are given by local name or full IRI.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use ontoagg_engine::{
    aggregate, generalize_statement, is_undefined, metric, statement_generalizations,
    CachePolicy, CombinationRule, Consensus, HierarchyIndex, Statement,
};
use ontoagg_ontology::{Concept, HierarchyGraph, Ontology, Property};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Ontology-aware aggregation of crowd-sourced statements.
#[derive(Parser)]
#[command(
    name = "ontoagg",
    version,
    about = "Aggregate and compare crowd-sourced descriptions over a concept hierarchy"
)]
struct Cli {
    /// Built-in sample ontology to use.
    #[arg(long, global = true, default_value = "small")]
    ontology: String,

    /// Belief combination rule.
    #[arg(long, global = true, default_value = "voting")]
    rule: CombinationRule,

    /// Support threshold (default: a majority of sources for voting, 0.5 for sb).
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Cap every memo table at this many entries.
    #[arg(long, global = true)]
    cache_capacity: Option<usize>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize the sample ontology.
    Inspect,
    /// Show what asserting one statement implies and excludes.
    Generalize {
        /// Property name or IRI.
        property: String,
        /// Concept name or IRI.
        concept: String,
    },
    /// Fuse the sources in a JSON file into a consensus.
    Aggregate {
        /// `{"sources": [{"belief": 1.0, "statements": [[s, p, c], ...]}, ...]}`
        sources: PathBuf,
    },
    /// Distance between two descriptions, each a JSON array of triples.
    Metric {
        /// First description.
        a: PathBuf,
        /// Second description.
        b: PathBuf,
    },
}

/// One `[subject, property, concept]` triple as written in input files.
type Triple = (String, String, String);

#[derive(Deserialize)]
struct SourcesFile {
    sources: Vec<SourceEntry>,
}

#[derive(Deserialize)]
struct SourceEntry {
    belief: f64,
    statements: Vec<Triple>,
}

/// A statement with its terms spelled out, for output.
#[derive(Serialize)]
struct NamedStatement<'a> {
    subject: &'a str,
    property: &'a str,
    concept: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    belief: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    loss: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let onto = Ontology::sample(&cli.ontology).ok_or_else(|| {
        anyhow!(
            "unknown ontology `{}` (expected small, medium, or large)",
            cli.ontology
        )
    })?;
    let policy = cli
        .cache_capacity
        .map_or(CachePolicy::Unbounded, CachePolicy::Capped);
    let index = HierarchyIndex::with_policy(onto, policy);

    match &cli.command {
        Command::Inspect => inspect(&cli, onto, &index),
        Command::Generalize { property, concept } => {
            generalize(&cli, onto, &index, property, concept)
        }
        Command::Aggregate { sources } => run_aggregate(&cli, onto, &index, sources),
        Command::Metric { a, b } => run_metric(&cli, onto, &index, a, b),
    }
}

fn inspect(cli: &Cli, onto: &Ontology, index: &HierarchyIndex<'_, Ontology>) -> Result<()> {
    index.warm();
    let stats = index.cache_stats();

    if cli.json {
        let summary = serde_json::json!({
            "ontology": cli.ontology,
            "base_iri": onto.base_iri,
            "classes": onto.class_count(),
            "properties": onto.property_count(),
            "disjoint_groups": onto.disjoint_group_count(),
            "equivalences": onto.equivalence_count(),
            "cached_entries": stats.entries,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Ontology {} <{}>", cli.ontology, onto.base_iri);
    println!("================================");
    println!("  classes:         {}", onto.class_count());
    println!("  properties:      {}", onto.property_count());
    println!("  disjoint groups: {}", onto.disjoint_group_count());
    println!("  equivalences:    {}", onto.equivalence_count());
    println!();
    println!("Properties:");
    for p in onto.property_handles().filter(|p| !p.is_marker()) {
        let parents: Vec<&str> = index
            .super_properties(p)
            .iter()
            .map(|&q| onto.property_label(q))
            .collect();
        println!(
            "  {:16} depth {}  {}",
            onto.property_label(p),
            onto.property_depth(p),
            if parents.is_empty() {
                String::new()
            } else {
                format!("⊑ {}", parents.join(", "))
            }
        );
    }
    println!();
    println!("Index warmed: {} cached entries", stats.entries);
    Ok(())
}

fn generalize(
    cli: &Cli,
    onto: &Ontology,
    index: &HierarchyIndex<'_, Ontology>,
    property: &str,
    concept: &str,
) -> Result<()> {
    let statement = resolve(onto, &("_".to_owned(), property.to_owned(), concept.to_owned()))?;
    let implied = generalize_statement(index, statement.property, statement.concept);
    let mut enumeration: Vec<_> = statement_generalizations(index, &statement).collect();
    enumeration.sort_by_key(|g| g.loss);

    let pair = |&(p, c): &(Property, Concept)| {
        format!("({}, {})", onto.property_label(p), onto.concept_label(c))
    };
    if cli.json {
        let named: Vec<NamedStatement<'_>> = enumeration
            .iter()
            .map(|g| NamedStatement {
                subject: g.statement.subject.as_str(),
                property: onto.property_label(g.statement.property),
                concept: onto.concept_label(g.statement.concept),
                belief: None,
                loss: Some(g.loss),
            })
            .collect();
        let out = serde_json::json!({
            "positive": implied.positive.iter().map(pair).collect::<Vec<_>>(),
            "negative": implied.negative.iter().map(pair).collect::<Vec<_>>(),
            "generalizations": named,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Implied ({}):", implied.positive.len());
    for p in &implied.positive {
        println!("  + {}", pair(p));
    }
    println!("Excluded ({}):", implied.negative.len());
    for n in &implied.negative {
        println!("  - {}", pair(n));
    }
    println!("Generalizations by loss ({}):", enumeration.len());
    for g in &enumeration {
        println!(
            "  {:>3}  {} {}",
            g.loss,
            onto.property_label(g.statement.property),
            onto.concept_label(g.statement.concept)
        );
    }
    Ok(())
}

fn run_aggregate(
    cli: &Cli,
    onto: &Ontology,
    index: &HierarchyIndex<'_, Ontology>,
    path: &Path,
) -> Result<()> {
    let file: SourcesFile = read_json(path)?;
    let mut sources = Vec::with_capacity(file.sources.len());
    for (i, entry) in file.sources.iter().enumerate() {
        cli.rule
            .validate_belief(entry.belief)
            .with_context(|| format!("source {i} in {}", path.display()))?;
        let statements = entry
            .statements
            .iter()
            .map(|t| resolve(onto, t))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("source {i} in {}", path.display()))?;
        sources.push((entry.belief, statements));
    }

    let threshold = match (cli.threshold, cli.rule) {
        (Some(t), _) => t,
        (None, CombinationRule::Voting) => (sources.len() / 2 + 1) as f64,
        (None, CombinationRule::ShortliffeBuchanan) => 0.5,
    };
    if !threshold.is_finite() {
        return Err(anyhow!("threshold must be a finite number, got {threshold}"));
    }
    info!(sources = sources.len(), rule = %cli.rule, threshold, "aggregating");

    let consensus = aggregate(index, &sources, cli.rule, threshold);
    if consensus.is_empty() {
        warn!(threshold, "no statement reached the support threshold");
    }
    print_consensus(cli, onto, &consensus)
}

fn print_consensus(cli: &Cli, onto: &Ontology, consensus: &Consensus) -> Result<()> {
    let named: Vec<NamedStatement<'_>> = consensus
        .iter()
        .map(|(s, belief)| NamedStatement {
            subject: s.subject.as_str(),
            property: onto.property_label(s.property),
            concept: onto.concept_label(s.concept),
            belief: Some(belief),
            loss: None,
        })
        .collect();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&named)?);
        return Ok(());
    }
    println!("Consensus ({} statements, rule {}):", named.len(), cli.rule);
    for n in &named {
        println!(
            "  {:8.3}  {} {} {}",
            n.belief.unwrap_or_default(),
            n.subject,
            n.property,
            n.concept
        );
    }
    Ok(())
}

fn run_metric(
    cli: &Cli,
    onto: &Ontology,
    index: &HierarchyIndex<'_, Ontology>,
    a: &Path,
    b: &Path,
) -> Result<()> {
    let load = |path: &Path| -> Result<Vec<Statement>> {
        let triples: Vec<Triple> = read_json(path)?;
        triples
            .iter()
            .map(|t| resolve(onto, t))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("in {}", path.display()))
    };
    let da = load(a)?;
    let db = load(b)?;

    let score = metric(index, &da, &db);
    let undefined = is_undefined(score);
    if undefined {
        warn!(score, "no common generalization for some statement; score is undefined");
    }

    if cli.json {
        let shown = (!undefined).then_some(score);
        let out = serde_json::json!({ "score": shown, "raw": score });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if undefined {
        println!("undefined ({score})");
    } else {
        println!("{score}");
    }
    Ok(())
}

/// Looks up a triple's property and concept by local name or IRI.
fn resolve(onto: &Ontology, (subject, property, concept): &Triple) -> Result<Statement> {
    let p = onto
        .find_property(property)
        .ok_or_else(|| anyhow!("unknown property `{property}`"))?;
    let c = onto
        .find_class(concept)
        .ok_or_else(|| anyhow!("unknown concept `{concept}`"))?;
    Ok(Statement::new(subject.as_str(), p, c))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}
