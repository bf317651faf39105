use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

#[derive(Parser)]
#[command(name = "products-cli")]
#[command(about = "Command-line client for the product store API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all products
    List,
    /// Show one product
    Get { id: String },
    /// Create a product
    Create { name: String, price: f64 },
    /// Update the name and/or price of a product
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
    },
    /// Delete a product
    Delete { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::List => client.get(format!("{}/products", base)).send().await?,
        Commands::Get { id } => client.get(format!("{}/products/{}", base, id)).send().await?,
        Commands::Create { name, price } => {
            client
                .post(format!("{}/products", base))
                .json(&serde_json::json!({ "name": name, "price": price }))
                .send()
                .await?
        }
        Commands::Update { id, name, price } => {
            let mut body = Map::new();
            if let Some(name) = name {
                body.insert("name".into(), Value::from(name));
            }
            if let Some(price) = price {
                body.insert("price".into(), Value::from(price));
            }
            client
                .put(format!("{}/products/{}", base, id))
                .json(&body)
                .send()
                .await?
        }
        Commands::Delete { id } => {
            client
                .delete(format!("{}/products/{}", base, id))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(false);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(true)
}
