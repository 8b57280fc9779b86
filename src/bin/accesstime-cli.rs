use alloy::primitives::Address;
use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use accesstime_guard::auth::AccessTimeReader;
use accesstime_guard::blockchain::{AccessTimeContract, BlockchainClient, Wallet};
use accesstime_guard::config::load_config_or_default;
use accesstime_guard::http::{MESSAGE_HEADER, SIGNATURE_HEADER};

#[derive(Parser)]
#[command(name = "accesstime-cli")]
#[command(about = "Client tooling for AccessTime protected APIs", long_about = None)]
struct Cli {
    /// Chain ID attached to the signing wallet.
    #[arg(long, default_value_t = 1)]
    chain_id: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a message with ACCESSTIME_PRIVATE_KEY and print the auth headers
    Sign {
        /// Message to sign; defaults to a timestamped login message
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Send a signed GET request to a protected endpoint
    Request {
        #[arg(short, long, default_value = "http://localhost:8080/api/v1/access")]
        url: String,

        #[arg(short, long)]
        message: Option<String>,
    },
    /// Read the on-chain access time of an address
    Remaining {
        #[arg(short, long)]
        address: Address,

        #[arg(short, long, default_value = "accesstime.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sign { message } => {
            let wallet = Wallet::from_env(cli.chain_id)?;
            let message = message.unwrap_or_else(default_message);
            let signature = wallet.sign_message_hex(&message).await?;
            println!("# signer: {}", wallet.address());
            println!("{}: {}", SIGNATURE_HEADER, signature);
            println!("{}: {}", MESSAGE_HEADER, message);
        }
        Commands::Request { url, message } => {
            let wallet = Wallet::from_env(cli.chain_id)?;
            let message = message.unwrap_or_else(default_message);
            let signature = wallet.sign_message_hex(&message).await?;

            let mut headers = HeaderMap::new();
            headers.insert(SIGNATURE_HEADER, HeaderValue::from_str(&signature)?);
            headers.insert(MESSAGE_HEADER, HeaderValue::from_str(&message)?);

            let res = reqwest::Client::new().get(&url).headers(headers).send().await?;
            print_response(res).await?;
        }
        Commands::Remaining { address, config } => {
            let config = load_config_or_default(&config)?;
            let client = BlockchainClient::new(config.chain.clone()).await?;
            let contract = AccessTimeContract::from_address_str(client, &config.access_time.contract_address)?;

            let expiry = contract.access_time(address).await?;
            let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
            let remaining = i128::from(expiry) - i128::from(now);

            let out = serde_json::json!({
                "address": address,
                "accessTimeExpiry": expiry,
                "remainingTime": remaining.clamp(i64::MIN as i128, i64::MAX as i128) as i64,
                "minRemainingTime": config.access_time.min_remaining_time,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}

fn default_message() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("accesstime login {}", now)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
    } else {
        println!("Status: {}", status);
    }

    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
