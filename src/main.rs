use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ethers::types::Address;

use tax_token_sim::models::{Fees, TokenConfig};
use tax_token_sim::simulation::{actor_address, Scenario, Simulation};
use tax_token_sim::storage::{
    fee_read_gas, fee_update_gas, slots, u256_word, ConfigFlags, FeeLayout,
    StorageSnapshot,
};
use tax_token_sim::SimResult;

/// Tax token reference model - run scenarios and inspect the storage layout
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON scenario against a fresh token
    Run {
        #[arg(value_name = "SCENARIO")]
        path: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the packed storage layout and its gas cost
    Layout,
    /// Show the storage slots of an account (address or scenario label)
    Slot {
        #[arg(value_name = "ACCOUNT")]
        account: String,
    },
}

fn main() {
    let args = Args::parse();

    // Setup logging
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("tax_token_sim=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("tax_token_sim=info")
            .init();
    }

    let outcome = match args.command {
        Command::Run { path, json } => run(path, json),
        Command::Layout => {
            print_layout();
            Ok(true)
        }
        Command::Slot { account } => print_slots(&account).map(|_| true),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    }
}

fn run(path: PathBuf, json: bool) -> SimResult<bool> {
    let scenario = Scenario::from_file(&path)?;
    let report = Simulation::new(scenario)?.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(report.passed())
}

fn print_layout() {
    println!("\n📦 Storage layout");
    println!("================================\n");
    println!("slot {:>2}  balances            mapping(address => uint256)", slots::BALANCES);
    println!("slot {:>2}  allowances          mapping(address => mapping(address => uint256))", slots::ALLOWANCES);
    println!("slot {:>2}  totalSupply         uint256", slots::TOTAL_SUPPLY);
    println!("slot {:>2}  fee config          uint16 buy | uint16 sell | uint16 transfer | flags", slots::FEE_CONFIG);
    println!("slot {:>2}  trade limits        uint128 maxBuy | uint128 maxSell", slots::TRADE_LIMITS);
    println!("slot {:>2}  wallet limit        uint128 maxWallet | uint64 lastSwapBackBlock", slots::WALLET_LIMIT);
    println!("slot {:>2}  swap threshold      uint256", slots::SWAP_THRESHOLD);
    println!("slot {:>2}  account flags       mapping(address => limits | tax | blocked)", slots::ACCOUNT_FLAGS);
    println!("slot {:>2}  nonces              mapping(address => uint256)", slots::NONCES);

    let config = TokenConfig::default();
    let flags = ConfigFlags { limits_enabled: true, taxes_enabled: true, launched: false };
    let zero = Fees::default();
    let no_flags = ConfigFlags::default();

    println!("\n⛽ Fee configuration gas");
    println!("--------------------------------");
    for layout in [FeeLayout::Unpacked, FeeLayout::Packed] {
        let read = fee_read_gas(layout);
        let write = fee_update_gas(layout, (&zero, &no_flags), (&config.fees, &flags));
        println!(
            "{:<30} {} slot(s): cold read {:>6} gas, first write {:>6} gas",
            layout.name(), read.slots, read.gas, write.gas
        );
    }
    println!();
}

fn print_slots(account: &str) -> SimResult<()> {
    let address: Address = actor_address(account)?;

    println!("\n🎯 Account: {:?}", address);
    println!("balance slot:       0x{}", hex::encode(u256_word(StorageSnapshot::balance_slot(address))));
    println!("account flags slot: 0x{}", hex::encode(u256_word(StorageSnapshot::account_flags_slot(address))));
    println!("nonce slot:         0x{}", hex::encode(u256_word(StorageSnapshot::nonce_slot(address))));
    Ok(())
}
