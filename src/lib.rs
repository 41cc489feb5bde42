//! hourledger library root.
//! Monthly hour-allocation ledger: exposes the CLI parser, the high-level
//! run() function and the ledger modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use cli::{Caller, Context};
use config::Config;
use errors::AppResult;
use models::role::Role;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, ctx: &Context) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, ctx),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, ctx),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, ctx),
        Commands::Overview { .. } => cli::commands::overview::handle(&cli.command, ctx),
        Commands::Allocate { .. } => cli::commands::allocate::handle(&cli.command, ctx),
        Commands::Transfer { .. } => cli::commands::transfer::handle(&cli.command, ctx),
        Commands::Worked { .. } => cli::commands::worked::handle(&cli.command, ctx),
        Commands::Allocations { .. } => cli::commands::allocations::handle(&cli.command, ctx),
        Commands::Hours { action } => cli::commands::hours::handle(action, ctx),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, ctx),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ command-line overrides
    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_db_path(custom_db)
            .to_string_lossy()
            .to_string();
    }

    let role = Role::from_name(cli.role.as_deref().unwrap_or(&cfg.default_role))?;
    let user_id = cli.user.unwrap_or(cfg.default_user);

    let ctx = Context {
        cfg,
        caller: Caller { role, user_id },
    };

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &ctx)
}
