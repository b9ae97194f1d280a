/* This file is part of Gegofi (https://gego.fi)
 *
 * Copyright (C) 2021-2026 Gegofi foundation
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::{process::exit, sync::Arc, time::Instant};

use simplelog::{ColorChoice, TermLogger, TerminalMode};
use structopt_toml::{serde::Deserialize, structopt::StructOpt, StructOptToml};
use url::Url;

use gegofi::{
    cli_desc,
    contract::{caller::RpcCaller, Address},
    net_config::{chain_config, ChainConfig, MAINNET_CHAIN_ID, TESTNET_CHAIN_ID},
    state::{analytics, farm, nft, sale, vault, Generation, Store},
    util::{
        cli::{get_log_config, get_log_level},
        file::{load_file, spawn_config},
        parse::{decode_base10, BALANCE_BASE10_DECIMALS},
        path::get_config_path,
    },
    Error, Result,
};

/// State rendering
mod view;

const CONFIG_FILE: &str = "gfi_config.toml";
const CONFIG_FILE_CONTENTS: &str = include_str!("../gfi_config.toml");

#[derive(Clone, Debug, Deserialize, StructOpt, StructOptToml)]
#[serde(default)]
#[structopt(name = "gfi", about = cli_desc!())]
struct Args {
    #[structopt(short, long)]
    /// Configuration file to use
    config: Option<String>,

    #[structopt(short, long, default_value = "tcp://127.0.0.1:11420")]
    /// gegod JSON-RPC gateway endpoint
    endpoint: Url,

    #[structopt(short, long, default_value = "mainnet")]
    /// Network to operate on (mainnet or testnet)
    network: String,

    #[structopt(subcommand)]
    /// Sub command to execute
    command: Subcmd,

    #[structopt(short, parse(from_occurrences))]
    /// Increase verbosity (-vvv supported)
    verbose: u8,
}

#[derive(Clone, Debug, Deserialize, StructOpt)]
enum Subcmd {
    /// Send a ping request to the gegod RPC endpoint
    Ping,

    /// Show the mining farm pools of both generations
    Farms {
        /// Owner account address
        owner: String,
    },

    /// Show the vault pools of both generations
    Vaults {
        /// Owner account address
        owner: String,
    },

    /// Gego item operations
    Gego(GegoSubcmd),

    /// Token sale operations
    Sale(SaleSubcmd),

    /// Show the token burn history
    Burns,

    /// Show governance proposals
    Proposals,
}

#[derive(Clone, Debug, Deserialize, StructOpt)]
enum GegoSubcmd {
    /// List owned and staked items of a collection
    List {
        /// Owner account address
        owner: String,

        #[structopt(long)]
        /// Query the signature collection instead of the standard one
        signature: bool,
    },

    /// Mint a new item backed by a token amount
    Mint {
        /// Token amount backing the item
        amount: String,
    },

    /// Stake items into a mine generation
    Stake {
        /// Item ids
        ids: Vec<String>,

        #[structopt(long)]
        /// Target the legacy mine instead of the current one
        legacy: bool,

        #[structopt(long)]
        /// The items belong to the signature collection
        signature: bool,
    },

    /// Withdraw items from a mine generation
    Unstake {
        /// Item ids
        ids: Vec<String>,

        #[structopt(long)]
        /// Target the legacy mine instead of the current one
        legacy: bool,

        #[structopt(long)]
        /// The items belong to the signature collection
        signature: bool,
    },
}

#[derive(Clone, Debug, Deserialize, StructOpt)]
enum SaleSubcmd {
    /// Show the active sale round
    Info {
        /// Owner account address
        owner: String,
    },

    /// Buy into the active sale round
    Buy {
        /// Amount to buy
        amount: String,
    },
}

/// CLI-util structure
struct Gfi {
    /// Gateway handle for contract reads and writes
    caller: RpcCaller,
    /// Address table of the selected network
    chain: &'static ChainConfig,
    /// Session state store
    store: Store,
}

impl Gfi {
    /// Auxiliary function to ping the configured gegod gateway for liveness.
    async fn ping(&self) -> Result<()> {
        eprintln!("Executing ping request to gegod...");
        let latency = Instant::now();
        let rep = self.caller.ping().await?;
        let latency = latency.elapsed();
        eprintln!("Got reply: {rep:?}");
        eprintln!("Latency: {latency:?}");
        Ok(())
    }

    async fn farms(&mut self, owner: &str) -> Result<()> {
        let owner: Address = owner.parse()?;
        let pools = farm::fetch_pools(&self.caller, self.chain, &owner).await?;
        self.store.farm.apply(pools);

        if let Some(pools) = &self.store.farm.pools {
            view::render_farm_pools(pools);
        }

        Ok(())
    }

    async fn vaults(&mut self, owner: &str) -> Result<()> {
        let owner: Address = owner.parse()?;
        let vaults = vault::fetch_vaults(&self.caller, self.chain, &owner).await?;
        self.store.vault.apply(vaults);

        if let Some(vaults) = &self.store.vault.vaults {
            view::render_vaults(vaults);
        }

        Ok(())
    }

    async fn gego_list(&mut self, owner: &str, signature: bool) -> Result<()> {
        let owner: Address = owner.parse()?;
        let collection = self.collection(signature)?;
        let views = nft::fetch_gegos(&self.caller, self.chain, &collection, &owner).await?;
        self.store.nft.apply(views);

        if let Some(views) = &self.store.nft.views {
            view::render_gegos(views, &self.chain.collections()?);
        }

        Ok(())
    }

    async fn gego_mint(&self, amount: &str) -> Result<()> {
        let amount = decode_base10(amount, BALANCE_BASE10_DECIMALS, true)?;
        let outcome = nft::mint(&self.caller, self.chain, &amount).await?;

        println!("Minted in transaction: {}", outcome.receipt.tx_hash);
        match outcome.gego_id {
            Some(id) => println!("New gego id: {id}"),
            None => println!("New gego id was not reported by the chain"),
        }

        Ok(())
    }

    async fn gego_stake(&mut self, ids: &[String], legacy: bool, signature: bool) -> Result<()> {
        let collection = self.collection(signature)?;
        let generation = if legacy { Generation::Legacy } else { Generation::Current };

        // One transaction per selected item, strictly sequential
        for id in self.select(ids) {
            let receipt = nft::stake(&self.caller, self.chain, generation, &collection, &id).await?;
            println!("Staked gego {id} in transaction: {}", receipt.tx_hash);
        }

        Ok(())
    }

    async fn gego_unstake(&mut self, ids: &[String], legacy: bool, signature: bool) -> Result<()> {
        let collection = self.collection(signature)?;
        let generation = if legacy { Generation::Legacy } else { Generation::Current };

        for id in self.select(ids) {
            let receipt =
                nft::unstake(&self.caller, self.chain, generation, &collection, &id).await?;
            println!("Unstaked gego {id} in transaction: {}", receipt.tx_hash);
        }

        Ok(())
    }

    /// Load the given ids into the selection slice, dropping duplicates
    /// while keeping the given order.
    fn select(&mut self, ids: &[String]) -> Vec<String> {
        self.store.selection.clear();
        ids.iter().filter(|id| self.store.selection.insert(id)).cloned().collect()
    }

    async fn sale_info(&mut self, owner: &str) -> Result<()> {
        let owner: Address = owner.parse()?;
        let info = sale::fetch_sale(&self.caller, self.chain, &owner).await?;
        self.store.sale.apply(info);

        if let Some(info) = &self.store.sale.info {
            view::render_sale(info);
        }

        Ok(())
    }

    async fn sale_buy(&self, amount: &str) -> Result<()> {
        let amount = decode_base10(amount, BALANCE_BASE10_DECIMALS, true)?;
        let receipt = sale::buy(&self.caller, self.chain, &amount).await?;
        println!("Bought in transaction: {}", receipt.tx_hash);
        Ok(())
    }

    async fn burns(&mut self) -> Result<()> {
        let burns = analytics::fetch_burn_history(&self.caller, self.chain).await?;
        self.store.analytics.apply_burns(burns);

        if let Some(burns) = &self.store.analytics.burns {
            view::render_burns(burns);
        }

        Ok(())
    }

    async fn proposals(&mut self) -> Result<()> {
        let proposals = analytics::fetch_proposals(&self.caller, self.chain).await?;
        self.store.analytics.apply_proposals(proposals);

        if let Some(proposals) = &self.store.analytics.proposals {
            view::render_proposals(proposals);
        }

        Ok(())
    }

    fn collection(&self, signature: bool) -> Result<Address> {
        let collection = if signature {
            self.chain.gego_signature_token()
        } else {
            self.chain.gego_token()
        };

        collection.ok_or(Error::FeatureUnavailable)
    }
}

async fn realmain(args: Args, ex: Arc<smol::Executor<'static>>) -> Result<()> {
    let chain = match args.network.as_str() {
        "mainnet" => chain_config(MAINNET_CHAIN_ID)?,
        "testnet" => chain_config(TESTNET_CHAIN_ID)?,
        other => {
            eprintln!("Error: Unknown network \"{other}\"");
            exit(2);
        }
    };

    let caller = RpcCaller::new(args.endpoint, ex).await?;
    let mut gfi = Gfi { caller, chain, store: Store::new() };

    let result = match args.command {
        Subcmd::Ping => gfi.ping().await,
        Subcmd::Farms { owner } => gfi.farms(&owner).await,
        Subcmd::Vaults { owner } => gfi.vaults(&owner).await,

        Subcmd::Gego(subcmd) => match subcmd {
            GegoSubcmd::List { owner, signature } => gfi.gego_list(&owner, signature).await,
            GegoSubcmd::Mint { amount } => gfi.gego_mint(&amount).await,
            GegoSubcmd::Stake { ids, legacy, signature } => {
                gfi.gego_stake(&ids, legacy, signature).await
            }
            GegoSubcmd::Unstake { ids, legacy, signature } => {
                gfi.gego_unstake(&ids, legacy, signature).await
            }
        },

        Subcmd::Sale(subcmd) => match subcmd {
            SaleSubcmd::Info { owner } => gfi.sale_info(&owner).await,
            SaleSubcmd::Buy { amount } => gfi.sale_buy(&amount).await,
        },

        Subcmd::Burns => gfi.burns().await,
        Subcmd::Proposals => gfi.proposals().await,
    };

    gfi.caller.stop().await;
    result
}

fn main() {
    // First pass grabs a possible custom config location
    let args = match Args::from_args_with_toml("") {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error parsing arguments: {e}");
            exit(1);
        }
    };

    let cfg_path = match get_config_path(args.config.clone(), CONFIG_FILE) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error resolving configuration path: {e}");
            exit(1);
        }
    };

    if let Err(e) = spawn_config(&cfg_path, CONFIG_FILE_CONTENTS) {
        eprintln!("Error initializing configuration file: {e}");
        exit(1);
    }

    // Second pass merges the configuration file
    let args = match load_file(&cfg_path).and_then(|c| {
        Args::from_args_with_toml(&c).map_err(|e| Error::Custom(e.to_string()))
    }) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error parsing configuration: {e}");
            exit(1);
        }
    };

    let log_level = get_log_level(args.verbose);
    let log_config = get_log_config(args.verbose);
    if let Err(e) = TermLogger::init(log_level, log_config, TerminalMode::Mixed, ColorChoice::Auto)
    {
        eprintln!("Error initializing logger: {e}");
        exit(1);
    }

    let ex = Arc::new(smol::Executor::new());
    let result = smol::block_on(ex.clone().run(realmain(args, ex.clone())));

    if let Err(e) = result {
        match e {
            Error::TxFailed(ref tx) => eprintln!("{tx}"),
            ref e => {
                eprintln!("Error: {e}");
                eprintln!("Check the gateway connection and try again.");
            }
        }
        exit(1);
    }
}
