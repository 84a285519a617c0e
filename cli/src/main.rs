// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! # Filecoin client CLI
//!
//! Converts token amounts to their smallest unit and queries a node.
//!
//! ## Usage:
//! ```bash
//! filecoin-client amount 1.5 --decimals 18
//! filecoin-client --network calibrationnet head
//! filecoin-client --endpoint http://localhost:1234/rpc/v1 balance f1...
//! ```
use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use filecoin_client_rpc::{Client, ClientConfig, Network};
use filecoin_client_utils::{Rounding, ScaleOptions, Tolerance, parse_scaled_amount_with};

#[derive(Parser, Debug)]
#[command(name = "filecoin-client", version, about)]
struct Cli {
    /// RPC endpoint, takes precedence over --network
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Well-known network to connect to
    #[arg(long, global = true)]
    network: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scale a decimal amount to an integer in the smallest unit
    Amount {
        amount: String,

        #[arg(long, default_value_t = 18)]
        decimals: u32,

        /// Accepted deviation of the truncated result, in percent
        #[arg(long, default_value_t = Tolerance::DEFAULT.percent())]
        tolerance: u32,

        #[arg(long, value_enum, default_value_t = RoundingArg::HalfEven)]
        rounding: RoundingArg,
    },
    /// Print the current chain head
    Head,
    /// Print the balance of an address
    Balance { address: String },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum RoundingArg {
    HalfEven,
    HalfUp,
    Down,
}

impl From<RoundingArg> for Rounding {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::HalfEven => Rounding::HalfEven,
            RoundingArg::HalfUp => Rounding::HalfUp,
            RoundingArg::Down => Rounding::Down,
        }
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

fn client_config(cli: &Cli) -> Result<ClientConfig> {
    if let Some(endpoint) = &cli.endpoint {
        return Ok(ClientConfig::with_env_overrides(endpoint.as_str())?);
    }
    if let Some(name) = &cli.network {
        let network = Network::by_name(name).ok_or_else(|| {
            anyhow!(
                "Unknown network '{}'. Available networks: {}",
                name,
                Network::names().join(", ")
            )
        })?;
        return Ok(ClientConfig::with_env_overrides(network.endpoint)?);
    }
    Ok(ClientConfig::from_env()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match &cli.command {
        Command::Amount {
            amount,
            decimals,
            tolerance,
            rounding,
        } => {
            let options = ScaleOptions {
                tolerance: Tolerance::from_percent(*tolerance),
                rounding: (*rounding).into(),
            };
            let scaled = parse_scaled_amount_with(amount, *decimals, &options)?;
            println!("{}", scaled);
        }
        Command::Head => {
            let config = client_config(&cli)?;
            log::info!("connecting to {}", config.endpoint);
            let client = Client::connect(&config)?;
            let head = client
                .chain_head()
                .await?
                .ok_or_else(|| anyhow!("node returned no chain head"))?;
            println!("height: {}", head.height);
            for cid in head.cids {
                println!("block: {}", cid);
            }
        }
        Command::Balance { address } => {
            let config = client_config(&cli)?;
            log::info!("connecting to {}", config.endpoint);
            let client = Client::connect(&config)?;
            let balance = client.wallet_balance(address).await?;
            println!("{} FIL ({} attoFIL)", balance.to_fil_string(), balance);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_args() {
        let cli = Cli::parse_from([
            "filecoin-client",
            "amount",
            "1.5",
            "--decimals",
            "0",
            "--rounding",
            "half-up",
        ]);
        match cli.command {
            Command::Amount {
                amount,
                decimals,
                tolerance,
                rounding,
            } => {
                assert_eq!(amount, "1.5");
                assert_eq!(decimals, 0);
                assert_eq!(tolerance, 10);
                assert_eq!(Rounding::from(rounding), Rounding::HalfUp);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_endpoint_takes_precedence() {
        let cli = Cli::parse_from([
            "filecoin-client",
            "--endpoint",
            "http://localhost:1234/rpc/v1",
            "--network",
            "filecoin",
            "head",
        ]);
        let config = client_config(&cli).unwrap();
        assert_eq!(config.endpoint, "http://localhost:1234/rpc/v1");
    }

    #[test]
    fn test_network_endpoint() {
        let cli = Cli::parse_from(["filecoin-client", "--network", "calibrationnet", "head"]);
        let config = client_config(&cli).unwrap();
        assert_eq!(
            config.endpoint,
            "https://filecoin-calibration.ipc.space/rpc/v1"
        );
    }

    #[test]
    fn test_unknown_network() {
        let cli = Cli::parse_from(["filecoin-client", "--network", "mainnet", "head"]);
        let err = client_config(&cli).unwrap_err();
        assert!(err.to_string().contains("calibrationnet, filecoin"));
    }
}
