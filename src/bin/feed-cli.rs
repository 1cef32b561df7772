use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "feed-cli")]
#[command(about = "Query a running Coolapk gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Value sent as X-Internal-Auth
    #[arg(short, long, env = "INTERNAL_AUTH_TOKEN", default_value = "")]
    token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch top headlines
    Headlines {
        #[arg(short, long)]
        page: Option<i64>,
    },
    /// Fetch the feed of a tag
    Tag {
        tag: String,
        #[arg(short, long)]
        page: Option<i64>,
    },
    /// Check that the gateway is up
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if !cli.token.is_empty() {
        headers.insert("x-internal-auth", HeaderValue::from_str(&cli.token)?);
    }

    let request = match cli.command {
        Commands::Headlines { page } => {
            let mut query = Vec::new();
            if let Some(page) = page {
                query.push(("page", page.to_string()));
            }
            client
                .get(format!("{}/api/headlines", cli.url))
                .query(&query)
        }
        Commands::Tag { tag, page } => {
            let mut query = vec![("tag", tag)];
            if let Some(page) = page {
                query.push(("page", page.to_string()));
            }
            client.get(format!("{}/api/tag", cli.url)).query(&query)
        }
        Commands::Health => client.get(format!("{}/health", cli.url)),
    };

    let res = request.headers(headers).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
