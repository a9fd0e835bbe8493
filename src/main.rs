// card-ledger - counts your cards so you don't have to
//
// This is the main entry point. Parses CLI args, opens the store and hands it
// to whichever front end the command asks for.

use anyhow::{bail, Context};
use card_ledger_lib::{
    core::{Searcher, Updater},
    logging,
    shell::{render, Session},
    Config, InventoryStore, LedgerError,
};
use std::env;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();

    // Grab whatever the user typed
    let args: Vec<String> = env::args().skip(1).collect();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> anyhow::Result<()> {
    let (config, rest) = Config::from_args(args).map_err(user_facing)?;
    let command = rest.first().map(String::as_str).unwrap_or("shell");
    let command_args = rest.get(1..).unwrap_or(&[]);

    match command {
        "version" | "-v" | "--version" => {
            println!("card-ledger v{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        "help" | "-h" | "--help" => {
            print_usage();
            return Ok(());
        }
        _ => {}
    }

    // Store first, then whatever front end uses it
    let data_file = config.resolve_data_file().map_err(user_facing)?;
    let store = InventoryStore::open(&data_file, config.store_options())
        .map_err(user_facing)
        .with_context(|| format!("could not open {}", data_file.display()))?;

    match command {
        "list" | "ls" => handle_list(&store, &config),
        "add" | "update" => handle_add(store, command_args),
        "search" | "find" => handle_search(&store, command_args, &config),
        "stats" | "status" => handle_stats(&store, &config),
        "shell" => handle_shell(store),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            bail!("unknown command '{}'", command)
        }
    }
}

fn handle_list(store: &InventoryStore, config: &Config) -> anyhow::Result<()> {
    let records = store.list();

    if config.json {
        println!("{}", render::to_json(records)?);
    } else {
        println!("{}", render::format_inventory(records));
    }

    Ok(())
}

fn handle_add(mut store: InventoryStore, args: &[String]) -> anyhow::Result<()> {
    // Last word is the count, everything before it is the name
    let (name, count_text) = match args.split_last() {
        Some((count, name)) if !name.is_empty() => (name.join(" "), count.as_str()),
        _ => bail!("usage: card-ledger add <name> <count>"),
    };

    let updater = Updater::new();
    let count = updater
        .apply(&mut store, &name, count_text)
        .map_err(user_facing)?;
    store.flush().map_err(user_facing)?;

    println!("Updated {} (now {}).", name.trim(), count);
    Ok(())
}

fn handle_search(store: &InventoryStore, args: &[String], config: &Config) -> anyhow::Result<()> {
    if args.is_empty() {
        bail!("no search query provided");
    }

    let query = args.join(" ");
    let searcher = Searcher::new();
    let results = searcher.search(store, &query);

    if config.json {
        println!("{}", render::to_json(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("{}", render::format_no_matches(&query));
        if let Some(line) = render::format_suggestions(&searcher.suggest(store, &query, 3)) {
            println!("{}", line);
        }
    } else {
        println!("{}", render::format_records(&results));
    }

    Ok(())
}

fn handle_stats(store: &InventoryStore, config: &Config) -> anyhow::Result<()> {
    let stats = store.stats();

    if config.json {
        println!("{}", render::stats_to_json(&stats)?);
    } else {
        println!("{}", render::format_stats(&stats));
    }

    Ok(())
}

fn handle_shell(store: InventoryStore) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut session = Session::new(store, stdin.lock(), stdout.lock());
    session.run().map_err(user_facing)?;

    Ok(())
}

// LedgerError's Display is for logs; people get user_message()
fn user_facing(e: LedgerError) -> anyhow::Error {
    anyhow::anyhow!(e.user_message())
}

fn print_usage() {
    println!(
        r#"card-ledger v{} - Keeps count of your cards

USAGE:
    card-ledger [OPTIONS] <COMMAND>

COMMANDS:
    shell                  Interactive session (default)
    list                   Show every card
    add <name> <count>     Add <count> to a card (negative to remove)
    search <text>          Show cards whose name contains <text>
    stats                  Show file and totals
    version                Show version
    help                   Show this help

OPTIONS:
    -f, --file <path>      Card list to use (default: ~/.card-ledger/CardList.csv)
    --strict               Refuse to load a card list with broken rows
    --deferred             Only write the card list on exit
    --json                 Print list/search/stats as JSON

EXAMPLES:
    card-ledger add "Blue-Eyes White Dragon" 3
    card-ledger add ﾌﾞﾙｰｱｲｽﾞ 1
    card-ledger search Magician
    card-ledger --file ./CardList.csv list

Names are compared after NFKC normalization, so full-width and half-width
spellings of the same name count as one card.
"#,
        env!("CARGO_PKG_VERSION")
    );
}
