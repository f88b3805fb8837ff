use std::{path::PathBuf, str::FromStr};

use ckb_cell_model::{Cell, RpcClient, config::Config, config::get_data_dir};
use ckb_jsonrpc_types::OutPoint;
use ckb_types::H256;
use color_eyre::{Result, eyre::eyre};
use serde_json::json;
use tracing::info;

mod cli;
mod errors;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    errors::install_hooks()?;

    let args = cli::Args::parse_args();

    let data_dir = args
        .data_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(get_data_dir);
    let log_path = logging::init(&data_dir)?;

    let config = Config::new(&args.network, args.rpc_url.as_deref());
    let rpc = RpcClient::new(config);

    let tx_hash = H256::from_str(args.tx_hash.trim_start_matches("0x"))
        .map_err(|e| eyre!("invalid tx hash {}: {:?}", args.tx_hash, e))?;
    let out_point = OutPoint {
        tx_hash,
        index: args.index.into(),
    };

    info!(
        "inspecting {}:{} on {} ({}), log at {}",
        args.tx_hash,
        args.index,
        rpc.rpc_url(),
        args.network,
        log_path.display()
    );
    let cell = Cell::load_from_blockchain(&rpc, out_point).await?;

    let validation = match cell.validate() {
        Ok(_) => "ok".to_string(),
        Err(e) => e.to_string(),
    };

    let report = json!({
        "out_point": cell.out_point,
        "output": cell.serialize_json(),
        "data": cell.get_hex_data(),
        "text": cell.get_data().ok(),
        "data_hash": format!("{:#x}", cell.data_hash()?),
        "lock_hash": format!("{:#x}", cell.lock_hash()),
        "capacity": cell.capacity.to_string(),
        "size": cell.size()?,
        "occupied_capacity": cell.occupied_capacity()?.to_string(),
        "validation": validation,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
