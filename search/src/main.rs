use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use search::{QueryApp, QueryOutput};

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Query a built keyword index for the top matching documents", long_about = None)]
struct Cli {
    /// Index directory produced by the indexer
    #[arg(long, default_value = "./index")]
    index: String,
    /// The two query keywords; prompted for on stdin when omitted
    #[arg(value_name = "KEYWORD", num_args = 0..=2)]
    keywords: Vec<String>,
    /// Print the result as a JSON object instead of one document per line
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let app = QueryApp::open(&cli.index)?;
    let keywords = gather_keywords(cli.keywords)?;
    let results = app.query(&keywords[0], &keywords[1]);

    if cli.json {
        let output = QueryOutput {
            first: keywords[0].clone(),
            second: keywords[1].clone(),
            results,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if results.is_empty() {
        println!("(no matches)");
    } else {
        for document in &results {
            println!("{document}");
        }
    }
    Ok(())
}

/// Fills in up to two keywords from stdin prompts, driver style.
fn gather_keywords(given: Vec<String>) -> Result<Vec<String>> {
    let mut keywords = given;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while keywords.len() < 2 {
        let position = if keywords.is_empty() { "first" } else { "second" };
        print!("Enter the {position} keyword: ");
        io::stdout().flush()?;
        match lines.next() {
            Some(line) => {
                let line = line?;
                let word = line.trim();
                if !word.is_empty() {
                    keywords.push(word.to_string());
                }
            }
            None => bail!("two keywords are required"),
        }
    }
    Ok(keywords)
}
