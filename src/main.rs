use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use nflx::{Analysis, LoadOptions, NetflixData, OutputFormat, QueryContext, ReportFormatter};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nflx")]
#[command(about = "Descriptive analytics over a Netflix catalog export")]
struct Cli {
    /// Catalog file (delimited text)
    #[arg(long, env = "NFLX_DATA", global = true, default_value = "netflix_titles.csv")]
    data: PathBuf,

    /// The file has no header row; columns are read in the standard order
    #[arg(long, global = true)]
    no_header: bool,

    #[arg(long, global = true, default_value_t = ',')]
    delimiter: char,

    /// Abort on the first malformed release year or type
    #[arg(long, global = true)]
    strict: bool,

    /// Run against an empty catalog instead of failing
    #[arg(long, global = true)]
    allow_empty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available analyses
    List,

    /// Run analyses by number or slug, or `all`
    Run {
        #[arg(required = true)]
        analyses: Vec<String>,

        /// table, csv or vertical
        #[arg(short, long, default_value = "table", value_parser = parse_format)]
        format: OutputFormat,

        /// Reference year for the five-year genre window (defaults to today)
        #[arg(long)]
        current_year: Option<i32>,

        #[arg(long)]
        max_rows: Option<usize>,
    },
}

fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    OutputFormat::parse(s).ok_or_else(|| format!("unknown format {s:?}"))
}

fn resolve(names: &[String]) -> Result<Vec<Analysis>> {
    let mut analyses = Vec::new();
    for name in names {
        if name.eq_ignore_ascii_case("all") {
            analyses.extend(Analysis::ALL);
            continue;
        }
        match Analysis::parse(name) {
            Some(a) => analyses.push(a),
            None => bail!("unknown analysis {name:?}; see `nflx list`"),
        }
    }
    Ok(analyses)
}

fn delimiter_byte(c: char) -> Result<u8> {
    if !c.is_ascii() {
        bail!("delimiter must be a single ASCII character, got {c:?}");
    }
    Ok(c as u8)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            for a in Analysis::ALL {
                println!("{:>2}  {:<22} {}", a.number(), a.slug(), a.description());
            }
        }
        Commands::Run {
            analyses,
            format,
            current_year,
            max_rows,
        } => {
            let analyses = resolve(&analyses)?;

            let delimiter = delimiter_byte(cli.delimiter)?;
            let options = LoadOptions::default()
                .with_has_header(!cli.no_header)
                .with_delimiter(delimiter)
                .with_strict(cli.strict);

            let db = NetflixData::from_path(&cli.data, &options)
                .with_context(|| format!("loading {}", cli.data.display()))?;
            if !cli.allow_empty {
                db.require_non_empty()?;
            }

            let ctx = current_year.map_or_else(QueryContext::today, QueryContext::new);
            let mut formatter = ReportFormatter::new(format);
            if let Some(max) = max_rows {
                formatter = formatter.with_max_rows(max);
            }

            let start = Instant::now();
            for analysis in analyses {
                let report = analysis.run(&db, &ctx)?;
                formatter.print(&report)?;
            }
            info!(elapsed = ?start.elapsed(), "done");
        }
    }

    Ok(())
}
