use clap::{Parser, Subcommand};
use namelookup_core::{Config, LookupOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "namelookup", about = "Biomedical name resolution over a Solr clique index")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/namelookup/config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level, including every Solr request body.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API.
    Serve {
        /// Listen address, overriding `server.bind`.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Look up a single search string and print the ranked results as JSON.
    Lookup {
        string: String,
        #[arg(long)]
        autocomplete: bool,
        #[arg(long)]
        offset: Option<i64>,
        #[arg(long)]
        limit: Option<i64>,
        /// Restrict to a biolink type; repeatable.
        #[arg(long = "biolink-type")]
        biolink_types: Vec<String>,
        /// Pipe-separated curie prefixes to keep.
        #[arg(long)]
        only_prefixes: Option<String>,
        /// Pipe-separated curie prefixes to drop.
        #[arg(long)]
        exclude_prefixes: Option<String>,
        /// Pipe-separated taxa to keep.
        #[arg(long)]
        only_taxa: Option<String>,
        #[arg(long)]
        highlighting: bool,
    },
    /// Print the clique for each curie as JSON.
    Synonyms {
        #[arg(required = true)]
        curies: Vec<String>,
    },
    /// Print index status as JSON.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    namelookup::init_tracing(cli.debug);

    let config = Config::load(cli.config.as_deref())?;
    let service = namelookup::service(&config)?;

    match cli.command {
        Command::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| config.server.bind.clone());
            namelookup::server::serve(service, &addr).await?;
        }
        Command::Lookup {
            string,
            autocomplete,
            offset,
            limit,
            biolink_types,
            only_prefixes,
            exclude_prefixes,
            only_taxa,
            highlighting,
        } => {
            let options = LookupOptions {
                autocomplete,
                offset,
                limit,
                biolink_types,
                only_prefixes,
                exclude_prefixes,
                only_taxa,
                highlighting,
            };
            let query = service.query(string, &options)?;
            let results = service.lookup(&query).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::Synonyms { curies } => {
            let records = service.reverse_lookup(&curies).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Command::Status => {
            let status = service.status().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(())
}
