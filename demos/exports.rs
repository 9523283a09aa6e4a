//! Example: Manage NFS exports of volumes
//!
//! Usage:
//!   cargo run --example exports -- [CONNECTION] list
//!   cargo run --example exports -- [CONNECTION] export <NAME>
//!   cargo run --example exports -- [CONNECTION] clients <NAME> [CLIENT...]
//!   cargo run --example exports -- [CONNECTION] unexport <NAME>

mod cli;

use cli::{config_from_parser, connect, init_tracing, usage_and_exit, ArgParser};

const USAGE: &str = "Usage: cargo run --example exports -- [--endpoint URL --username USER --password PASS] [--insecure] <list|export|clients|unexport> [ARGS]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let mut parser = ArgParser::new(USAGE);
    let config = config_from_parser(&mut parser, USAGE);
    let args = parser.remaining();
    if args.is_empty() {
        usage_and_exit(USAGE);
    }

    let client = connect(config).await;

    match (args[0].as_str(), &args[1..]) {
        ("list", []) => {
            for entry in client.get_volume_exports().await? {
                let clients = if entry.clients.is_empty() {
                    "*".to_string()
                } else {
                    entry.clients.join(",")
                };
                println!("  {} -> {}", entry.export_path, clients);
            }
        }
        ("export", [name]) => {
            client.export_volume(name).await?;
            println!("Exported {}", client.path(name));
        }
        ("clients", [name]) => match client.get_export_clients(name).await? {
            Some(clients) if clients.is_empty() => println!("{}: open to all clients", name),
            Some(clients) => println!("{}: {}", name, clients.join(", ")),
            None => println!("{} is not exported", name),
        },
        ("clients", [name, clients @ ..]) => {
            client.set_export_clients(name, clients).await?;
            println!("Restricted {} to {}", name, clients.join(", "));
        }
        ("unexport", [name]) => {
            client.unexport_volume(name).await?;
            println!("Unexported {}", client.path(name));
        }
        _ => usage_and_exit(USAGE),
    }

    Ok(())
}
