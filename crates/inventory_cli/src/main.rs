//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire `inventory_core` through its container, as an app composition root would.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `inventory_cli [--db <path>] [--log-dir <abs path>] [--log-level <level>]
//! <list | add <name> <price> <quantity> | version>`

use futures_util::StreamExt;
use inventory_core::{
    default_log_level, init_logging, AppContainer, AppDataContainer, DatabaseConfig, Item,
};
use std::process::ExitCode;

enum Command {
    List,
    Add {
        name: String,
        price: f64,
        quantity: i64,
    },
    Version,
}

struct Invocation {
    config: DatabaseConfig,
    log_dir: Option<String>,
    log_level: Option<String>,
    command: Command,
}

const USAGE: &str = "usage: inventory_cli [--db <path>] [--log-dir <abs path>] [--log-level <level>] \
<list | add <name> <price> <quantity> | version>";

#[tokio::main]
async fn main() -> ExitCode {
    let invocation = match parse_args(std::env::args().skip(1).collect()) {
        Ok(invocation) => invocation,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(invocation).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(invocation: Invocation) -> Result<(), String> {
    if let Some(log_dir) = invocation.log_dir.as_deref() {
        let level = invocation.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| err.to_string())?;
    }

    if let Command::Version = invocation.command {
        println!("inventory_core version={}", inventory_core::core_version());
        return Ok(());
    }

    let container = AppDataContainer::new(invocation.config);
    let repository = container
        .items_repository()
        .await
        .map_err(|err| err.to_string())?;

    if let Command::Add {
        name,
        price,
        quantity,
    } = invocation.command
    {
        match repository
            .insert_item(&Item::new(name, price, quantity))
            .await
            .map_err(|err| err.to_string())?
        {
            Some(id) => println!("added id={id}"),
            None => println!("skipped duplicate"),
        }
    }

    let items = repository
        .get_all_items_stream()
        .next()
        .await
        .ok_or_else(|| "item stream closed before first snapshot".to_string())?
        .map_err(|err| err.to_string())?;
    for item in &items {
        println!(
            "{}\t{}\t{:.2}\t{}",
            item.id, item.name, item.price, item.quantity
        );
    }
    println!("total={}", items.len());
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<Invocation, String> {
    let mut args = args.into_iter();
    let mut config = DatabaseConfig::in_memory();
    let mut log_dir = None;
    let mut log_level = None;
    let mut rest = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                let path = args.next().ok_or("--db requires a path")?;
                config = DatabaseConfig::file(path);
            }
            "--log-dir" => log_dir = Some(args.next().ok_or("--log-dir requires a path")?),
            "--log-level" => {
                log_level = Some(args.next().ok_or("--log-level requires a level")?);
            }
            _ => rest.push(arg),
        }
    }

    if log_level.is_some() && log_dir.is_none() {
        return Err("--log-level requires --log-dir".to_string());
    }

    let command = match rest.as_slice() {
        [] => return Err("missing command".to_string()),
        [cmd] if cmd == "list" => Command::List,
        [cmd] if cmd == "version" => Command::Version,
        [cmd, name, price, quantity] if cmd == "add" => Command::Add {
            name: name.clone(),
            price: price
                .parse()
                .map_err(|err| format!("invalid price `{price}`: {err}"))?,
            quantity: quantity
                .parse()
                .map_err(|err| format!("invalid quantity `{quantity}`: {err}"))?,
        },
        [cmd, ..] => return Err(format!("unknown or malformed command `{cmd}`")),
    };

    Ok(Invocation {
        config,
        log_dir,
        log_level,
        command,
    })
}
