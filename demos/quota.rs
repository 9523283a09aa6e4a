//! Example: Inspect and change a volume's quota
//!
//! Usage:
//!   cargo run --example quota -- [CONNECTION] --volume NAME
//!   cargo run --example quota -- [CONNECTION] --volume NAME --set BYTES
//!   cargo run --example quota -- [CONNECTION] --volume NAME --update BYTES
//!   cargo run --example quota -- [CONNECTION] --volume NAME --clear

mod cli;

use cli::{config_from_parser, connect, init_tracing, usage_and_exit, ArgParser};

const USAGE: &str = "Usage: cargo run --example quota -- [--endpoint URL --username USER --password PASS] [--insecure] --volume NAME [--set BYTES | --update BYTES | --clear]";

fn parse_size(value: &str) -> i64 {
    value.parse().unwrap_or_else(|_| usage_and_exit(USAGE))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let mut parser = ArgParser::new(USAGE);
    let config = config_from_parser(&mut parser, USAGE);
    let volume = parser
        .take_value(&["--volume"])
        .unwrap_or_else(|| usage_and_exit(USAGE));
    let set = parser.take_value(&["--set"]);
    let update = parser.take_value(&["--update"]);
    let clear = parser.take_flag(&["--clear"]);
    if !parser.remaining().is_empty() {
        usage_and_exit(USAGE);
    }

    let client = connect(config).await;

    if let Some(size) = set {
        client.set_quota_size(&volume, parse_size(&size)).await?;
        println!("Set hard limit of {} to {} bytes", volume, size);
    } else if let Some(size) = update {
        client.update_quota_size(&volume, parse_size(&size)).await?;
        println!("Updated hard limit of {} to {} bytes", volume, size);
    } else if clear {
        client.clear_quota(&volume).await?;
        println!("Cleared quota on {}", volume);
    }

    match client.get_quota(&volume).await {
        Ok(quota) => {
            let limit = |v: Option<i64>| v.map_or("-".to_string(), |b| b.to_string());
            println!("\nQuota {} ({})", quota.id, quota.path);
            println!("  advisory: {}", limit(quota.thresholds.advisory));
            println!("  soft:     {}", limit(quota.thresholds.soft));
            println!("  hard:     {}", limit(quota.thresholds.hard));
            println!(
                "  usage:    {} logical / {} physical bytes, {} inodes",
                quota.usage.logical, quota.usage.physical, quota.usage.inodes
            );
        }
        Err(e) if e.is_not_found() => println!("\n{} has no quota", volume),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
