//! Example: Manage volumes
//!
//! Usage:
//!   cargo run --example volumes -- [CONNECTION] list
//!   cargo run --example volumes -- [CONNECTION] create <NAME>
//!   cargo run --example volumes -- [CONNECTION] show <NAME>
//!   cargo run --example volumes -- [CONNECTION] copy <SOURCE> <DESTINATION>
//!   cargo run --example volumes -- [CONNECTION] delete <NAME>
//!
//! CONNECTION is `--endpoint URL --username USER --password PASS [--group G]
//! [--volume-path P] [--insecure]`, or the matching `ISILON_*` variables.

mod cli;

use cli::{config_from_parser, connect, init_tracing, usage_and_exit, ArgParser};

const USAGE: &str = "Usage: cargo run --example volumes -- [--endpoint URL --username USER --password PASS] [--insecure] <list|create|show|copy|delete> [ARGS]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let mut parser = ArgParser::new(USAGE);
    let config = config_from_parser(&mut parser, USAGE);
    let args = parser.remaining();

    let client = connect(config).await;
    println!("Connected (platform API v{})", client.api_version());

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["list"] => {
            let volumes = client.get_volumes().await?;
            if volumes.is_empty() {
                println!("  (no volumes)");
            }
            for volume in volumes {
                println!("  {}", client.path(&volume.name));
            }
        }
        ["create", name] => {
            client.create_volume(name).await?;
            println!("Created {}", client.path(name));
        }
        ["show", name] => {
            let volume = client.get_volume("", name).await?;
            println!("{}", client.path(&volume.name));
            for attr in &volume.attributes {
                println!("  {:<24} {}", attr.name, attr.value);
            }
        }
        ["copy", source, destination] => {
            let volume = client.copy_volume(source, destination).await?;
            println!("Copied {} -> {}", source, client.path(&volume.name));
        }
        ["delete", name] => {
            client.delete_volume(name).await?;
            println!("Deleted {}", client.path(name));
        }
        _ => usage_and_exit(USAGE),
    }

    Ok(())
}
