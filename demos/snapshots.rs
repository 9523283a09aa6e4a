//! Example: Snapshot a volume and restore snapshots
//!
//! Usage:
//!   cargo run --example snapshots -- [CONNECTION] list [VOLUME]
//!   cargo run --example snapshots -- [CONNECTION] create <VOLUME> <SNAPSHOT>
//!   cargo run --example snapshots -- [CONNECTION] restore <SNAPSHOT> <NEW_VOLUME>
//!   cargo run --example snapshots -- [CONNECTION] remove <SNAPSHOT>

mod cli;

use cli::{config_from_parser, connect, init_tracing, usage_and_exit, ArgParser};

const USAGE: &str = "Usage: cargo run --example snapshots -- [--endpoint URL --username USER --password PASS] [--insecure] <list|create|restore|remove> [ARGS]";

/// Snapshots are addressed by numeric id or by name.
fn id_or_name(arg: &str) -> (i64, &str) {
    match arg.parse::<i64>() {
        Ok(id) => (id, ""),
        Err(_) => (0, arg),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let mut parser = ArgParser::new(USAGE);
    let config = config_from_parser(&mut parser, USAGE);
    let args = parser.remaining();

    let client = connect(config).await;

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["list"] => print_snapshots(&client.get_snapshots().await?),
        ["list", volume] => print_snapshots(&client.get_snapshots_by_path(volume).await?),
        ["create", volume, name] => {
            let snapshot = client.create_snapshot(volume, name).await?;
            println!("Created snapshot {} ({}) of {}", snapshot.name, snapshot.id, snapshot.path);
        }
        ["restore", snapshot, destination] => {
            let (id, name) = id_or_name(snapshot);
            let volume = client.copy_snapshot(id, name, destination).await?;
            println!("Restored {} into {}", snapshot, client.path(&volume.name));
        }
        ["remove", snapshot] => {
            let (id, name) = id_or_name(snapshot);
            client.remove_snapshot(id, name).await?;
            println!("Removed snapshot {}", snapshot);
        }
        _ => usage_and_exit(USAGE),
    }

    Ok(())
}

fn print_snapshots(snapshots: &[isilon::Snapshot]) {
    if snapshots.is_empty() {
        println!("  (no snapshots)");
    }
    for s in snapshots {
        println!(
            "  {:>6}  {:<32} {:<10} {:>12}  {}",
            s.id, s.name, s.state, s.size, s.path
        );
    }
}
