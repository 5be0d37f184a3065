// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use paperledger::{cli, commands, db};

const LOG_ENV: &str = "PAPERLEDGER_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = match matches.get_one::<String>("db") {
        Some(p) => db::open_at(Path::new(p))?,
        None => db::open_or_init()?,
    };

    match matches.subcommand() {
        Some(("init", sub)) => commands::init::handle(&mut conn, sub)?,
        Some(("catalog", sub)) => commands::catalog::handle(&conn, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub)?,
        Some(("stock", sub)) => commands::stock::handle(&conn, sub)?,
        Some(("delivery", sub)) => commands::delivery::handle(sub)?,
        Some(("cash", sub)) => commands::reports::cash(&conn, sub)?,
        Some(("report", sub)) => commands::reports::report(&conn, sub)?,
        Some(("quotes", sub)) => commands::quotes::handle(&mut conn, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("desk", sub)) => commands::desk::handle(&conn, sub)?,
        Some(("simulate", sub)) => commands::simulate::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
