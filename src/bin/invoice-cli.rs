use clap::{Parser, Subcommand};
use serde_json::Value;

use admin_gateway::http::invoice::ValidateRequest;
use admin_gateway::invoice;

#[derive(Parser)]
#[command(name = "invoice-cli")]
#[command(about = "Check invoice filenames locally or against a running gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a single filename
    Parse { filename: String },
    /// Split filenames into valid and invalid groups
    Validate { filenames: Vec<String> },
    /// Validate filenames through the gateway's API
    RemoteValidate { filenames: Vec<String> },
    /// List the gateway's route table
    Routes,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { filename } => match invoice::parse(&filename) {
            Some(parsed) => println!("{}", serde_json::to_string_pretty(&parsed)?),
            None => {
                eprintln!("Invalid invoice filename: {}", filename);
                std::process::exit(1);
            }
        },
        Commands::Validate { filenames } => {
            let result = invoice::batch_validate(filenames);
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.invalid.is_empty() {
                std::process::exit(1);
            }
        }
        Commands::RemoteValidate { filenames } => {
            let client = reqwest::Client::new();
            let res = client
                .post(format!("{}/api/invoices/validate", cli.url))
                .json(&ValidateRequest { filenames })
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Routes => {
            let res = reqwest::get(format!("{}/admin/routes", cli.url)).await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
