use anyhow::Result;
use clap::Parser;
use deskpad::cli::{Cli, Command};
use deskpad::commands::{self, Context};
use deskpad::config::Config;
use deskpad::logging;

fn main() -> Result<()> {
    let args = Cli::parse();
    let config = Config::load(args.config.as_deref())?;
    let command = args.command.unwrap_or(Command::Tui);
    let log_level = args.log_level.as_deref();
    if let Command::Tui = command {
        let location = config.store_location(args.data_dir.as_deref());
        let log_dir = location
            .notes
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default();
        logging::init_file(log_level, &log_dir)?;
    } else {
        logging::init_stderr(log_level);
    }

    let ctx = Context {
        config,
        data_dir: args.data_dir,
    };
    match command {
        Command::Tui => commands::tui(&ctx),
        Command::Month { year, month } => commands::month(&ctx, year, month),
        Command::List => commands::list(&ctx),
        Command::Note { date, message } => commands::note(&ctx, date, message),
        Command::Add { text } => commands::add(&ctx, text),
        Command::Toggle { index } => commands::toggle(&ctx, index),
        Command::Remove { index } => commands::remove(&ctx, index),
    }
}
