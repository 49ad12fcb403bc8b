use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use common::from_hex;
use log::info;
use ovm::{ExecutionContext, OvmConfig, OvmTranscoder};
use serde_json::json;
use transaction::{SignerKind, Transaction};

#[derive(Parser)]
#[command(name = "ovm-tx")]
#[command(about = "Decode a raw rollup transaction and show its OVM rewrites")]
#[command(version)]
struct Args {
    /// Hex encoded wire transaction (0x... or hex)
    raw: String,

    /// Chain id the transaction was signed for
    #[arg(long, default_value_t = 420)]
    chain_id: u64,

    /// JSON file with the OVM contract addresses; enables the rewrites
    #[arg(long)]
    config: Option<PathBuf>,

    /// Block timestamp passed to the execution manager
    #[arg(long, default_value_t = 0)]
    timestamp: u64,

    /// Block number passed to the execution manager
    #[arg(long, default_value_t = 0)]
    block_number: u64,
}

fn run(args: &Args) -> Result<String, Box<dyn Error>> {
    let raw = from_hex(args.raw.trim())?;
    let tx = Transaction::decode_rlp(&raw)?;
    let signer = SignerKind::Ovm { chain_id: args.chain_id }.signer();
    let sender = tx.sender(signer.as_ref())?;
    info!("decoded {:?} from {:?}", tx.hash(), sender);

    let mut report = json!({
        "transaction": tx,
        "hash": tx.hash(),
        "sender": sender,
        "message": tx.as_message(signer.as_ref())?,
    });

    if let Some(path) = &args.config {
        let transcoder = OvmTranscoder::new(OvmConfig::from_file(path)?);
        let context = ExecutionContext::new(args.timestamp, args.block_number);
        let message = transcoder.as_ovm_message(&tx, signer.as_ref())?;
        let run = transcoder.to_execution_manager_run(&message, &context)?;
        report["ovmMessage"] = serde_json::to_value(&message)?;
        report["executionManagerRun"] = serde_json::to_value(&run)?;
    }
    Ok(serde_json::to_string_pretty(&report)?)
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(report) => println!("{}", report),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
