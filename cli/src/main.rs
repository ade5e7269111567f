//! SPARQL Bridge CLI — command-line front end for a SPARQL 1.1 triple store
//!
//! Builds dump, keyword and `INSERT DATA` requests with the sparql-bridge
//! builders and sends them through its `StoreClient`.

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use sparql_bridge::{
    InsertSpec, Namespace, NamespaceManager, QuerySpec, SparqlStore, StoreClient, StoreConfig,
    TriplePattern, TripleRecord,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sparql-bridge", version, about = "SPARQL Bridge CLI")]
struct Cli {
    /// Store query endpoint URL
    #[arg(long, env = "SPARQL_BRIDGE_QUERY_URL")]
    query_url: String,

    /// Store update endpoint URL
    #[arg(long, env = "SPARQL_BRIDGE_UPDATE_URL")]
    update_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "SPARQL_BRIDGE_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Shorten IRIs with well-known prefixes (rdf, rdfs, xsd, owl, ...)
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// List triples without any filter
    Dump {
        /// Maximum number of rows
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
    /// Find triples whose subject, predicate or object contains a keyword
    Search {
        /// Case-insensitive keyword
        keyword: String,

        /// Maximum number of rows
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
    /// Execute a SELECT query as given
    Query {
        /// The SPARQL query string
        sparql: String,
    },
    /// Insert triples with INSERT DATA
    Insert {
        /// Prefix declaration, e.g. ex=http://example.org/
        #[arg(long = "prefix", value_parser = parse_prefix)]
        prefixes: Vec<Namespace>,

        /// Triple as three SPARQL terms, e.g. --triple ex:a ex:b '"c"'
        #[arg(
            long = "triple",
            num_args = 3,
            value_names = ["SUBJECT", "PREDICATE", "OBJECT"],
            required = true
        )]
        triples: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = StoreConfig::new(&cli.query_url, &cli.update_url);
    config.timeout_secs = cli.timeout_secs;
    let client = match StoreClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match &cli.command {
        Commands::Dump { limit } => run_read(&client, &QuerySpec::Dump { limit: *limit }, &cli).await,
        Commands::Search { keyword, limit } => {
            let spec = QuerySpec::Keyword {
                keyword: keyword.clone(),
                limit: *limit,
            };
            run_read(&client, &spec, &cli).await
        }
        Commands::Query { sparql } => {
            run_read(&client, &QuerySpec::Raw { text: sparql.clone() }, &cli).await
        }
        Commands::Insert { prefixes, triples } => run_insert(&client, prefixes, triples).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn parse_prefix(raw: &str) -> Result<Namespace, String> {
    match raw.split_once('=') {
        Some((prefix, iri)) if !iri.is_empty() => Ok(Namespace::new(prefix.trim(), iri.trim())),
        _ => Err(format!("expected PREFIX=IRI, got '{}'", raw)),
    }
}

async fn run_read(
    client: &StoreClient,
    spec: &QuerySpec,
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut records = client.query(spec).await?;
    if cli.compact {
        compact_records(&mut records, &NamespaceManager::with_common_prefixes());
    }

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::Csv => {
            println!("subject,predicate,object");
            for record in &records {
                let cells: Vec<String> = record_cells(record)
                    .into_iter()
                    .map(format_csv_value)
                    .collect();
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            if records.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["subject", "predicate", "object"]);

            for record in &records {
                let cells: Vec<&str> = record_cells(record)
                    .into_iter()
                    .map(|v| v.unwrap_or(""))
                    .collect();
                table.add_row(cells);
            }

            println!("{}", table);
            println!("{} row(s)", records.len());
        }
    }

    Ok(())
}

async fn run_insert(
    client: &StoreClient,
    prefixes: &[Namespace],
    triples: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let spec = InsertSpec {
        prefixes: prefixes.to_vec(),
        triples: triples
            .chunks_exact(3)
            .map(|t| TriplePattern::new(t[0].as_str(), t[1].as_str(), t[2].as_str()))
            .collect(),
    };

    client.insert(&spec).await?;
    println!("Inserted {} triple(s)", spec.triples.len());
    Ok(())
}

fn record_cells(record: &TripleRecord) -> [Option<&str>; 3] {
    [
        record.subject.as_deref(),
        record.predicate.as_deref(),
        record.object.as_deref(),
    ]
}

fn compact_records(records: &mut [TripleRecord], namespaces: &NamespaceManager) {
    for record in records.iter_mut() {
        for field in [&mut record.subject, &mut record.predicate, &mut record.object] {
            if let Some(short) = field.as_deref().and_then(|v| namespaces.compact(v)) {
                *field = Some(short);
            }
        }
    }
}

fn format_csv_value(v: Option<&str>) -> String {
    match v {
        None => String::new(),
        Some(s) => {
            if s.contains(',') || s.contains('"') || s.contains('\n') {
                format!("\"{}\"", s.replace('"', "\"\""))
            } else {
                s.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefix() {
        let ns = parse_prefix("ex=http://ex#").unwrap();
        assert_eq!(ns, Namespace::new("ex", "http://ex#"));
        assert!(parse_prefix("ex").is_err());
        assert!(parse_prefix("ex=").is_err());
    }

    #[test]
    fn test_insert_arguments() {
        let cli = Cli::try_parse_from([
            "sparql-bridge",
            "--query-url",
            "http://store:3030/ds/sparql",
            "--update-url",
            "http://store:3030/ds/update",
            "insert",
            "--prefix",
            "ex=http://ex#",
            "--triple",
            "ex:a",
            "ex:b",
            "\"c\"",
            "--triple",
            "ex:a",
            "ex:b",
            "ex:d",
        ])
        .unwrap();

        match cli.command {
            Commands::Insert { prefixes, triples } => {
                assert_eq!(prefixes.len(), 1);
                assert_eq!(triples.len(), 6);
                assert_eq!(triples[2], "\"c\"");
            }
            _ => panic!("expected insert"),
        }
    }

    #[test]
    fn test_endpoints_have_no_default() {
        if std::env::var_os("SPARQL_BRIDGE_QUERY_URL").is_some()
            || std::env::var_os("SPARQL_BRIDGE_UPDATE_URL").is_some()
        {
            return;
        }

        let err = Cli::try_parse_from(["sparql-bridge", "dump"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let cli = Cli::try_parse_from([
            "sparql-bridge",
            "--query-url",
            "http://store:3030/ds/sparql",
            "--update-url",
            "http://store:3030/ds/update",
            "dump",
        ])
        .unwrap();
        assert_eq!(cli.query_url, "http://store:3030/ds/sparql");
        assert_eq!(cli.update_url, "http://store:3030/ds/update");
    }

    #[test]
    fn test_csv_quoting() {
        assert_eq!(format_csv_value(None), "");
        assert_eq!(format_csv_value(Some("plain")), "plain");
        assert_eq!(format_csv_value(Some("a,\"b\"")), "\"a,\"\"b\"\"\"");
    }
}
