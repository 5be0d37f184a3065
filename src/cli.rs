// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn date_arg(required: bool) -> Arg {
    let a = Arg::new("date")
        .long("date")
        .value_name("YYYY-MM-DD")
        .help("As-of date (inclusive)");
    if required { a.required(true) } else { a }
}

pub fn build_cli() -> Command {
    Command::new("paperledger")
        .version(clap::crate_version!())
        .about("Inventory, quoting and sales ledger for a paper supply company")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("SQLite file to use instead of the platform data dir"),
        )
        .subcommand(
            Command::new("init")
                .about("Create the schema and seed catalog, cash and starting stock")
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .default_value("137"),
                )
                .arg(
                    Arg::new("coverage")
                        .long("coverage")
                        .value_parser(value_parser!(f64))
                        .default_value("0.4")
                        .help("Share of the catalog stocked at opening"),
                )
                .arg(Arg::new("initial_balance").long("initial-balance").default_value("50000"))
                .arg(
                    Arg::new("opening_date")
                        .long("opening-date")
                        .value_name("YYYY-MM-DD")
                        .default_value("2025-01-01"),
                ),
        )
        .subcommand(
            Command::new("catalog")
                .about("Price list")
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("tx")
                .about("Ledger transactions")
                .subcommand(
                    Command::new("add")
                        .about("Append a sale or stock purchase")
                        .arg(Arg::new("item").long("item").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("sale | purchase"),
                        )
                        .arg(
                            Arg::new("quantity")
                                .long("quantity")
                                .required(true)
                                .allow_negative_numbers(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("price")
                                .long("price")
                                .required(true)
                                .allow_negative_numbers(true)
                                .help("Unit price"),
                        )
                        .arg(date_arg(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("item").long("item"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("since").long("since").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("until").long("until").value_name("YYYY-MM-DD"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("stock")
                .about("Derived stock levels")
                .subcommand(
                    Command::new("level")
                        .arg(Arg::new("item").long("item").required(true))
                        .arg(date_arg(true)),
                )
                .subcommand(json_flags(
                    Command::new("all").arg(date_arg(true)).arg(
                        Arg::new("available")
                            .long("available")
                            .action(ArgAction::SetTrue)
                            .help("Only items with positive stock"),
                    ),
                )),
        )
        .subcommand(
            Command::new("delivery")
                .about("Estimate supplier delivery date")
                .arg(
                    Arg::new("quantity")
                        .long("quantity")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(date_arg(true)),
        )
        .subcommand(
            Command::new("cash")
                .about("Cash balance as of a date")
                .arg(date_arg(true)),
        )
        .subcommand(json_flags(
            Command::new("report")
                .about("Financial report as of a date")
                .arg(date_arg(false)),
        ))
        .subcommand(
            Command::new("quotes")
                .about("Historical quotes")
                .subcommand(json_flags(
                    Command::new("search")
                        .arg(Arg::new("terms").required(true).num_args(1..))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .default_value("5"),
                        ),
                ))
                .subcommand(
                    Command::new("import")
                        .arg(Arg::new("quotes").long("quotes").required(true))
                        .arg(Arg::new("requests").long("requests").required(true)),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import CSV data")
                .subcommand(
                    Command::new("transactions").arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export the ledger")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv | json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("desk")
                .about("Process one customer order")
                .arg(Arg::new("item").long("item").required(true))
                .arg(
                    Arg::new("quantity")
                        .long("quantity")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(date_arg(true))
                .arg(Arg::new("need_by").long("need-by").value_name("YYYY-MM-DD")),
        )
        .subcommand(
            Command::new("simulate")
                .about("Replay a CSV feed of customer requests")
                .arg(Arg::new("path").long("path").required(true))
                .arg(
                    Arg::new("out")
                        .long("out")
                        .default_value("test_results.csv")
                        .help("Results log"),
                ),
        )
        .subcommand(Command::new("doctor").about("Check ledger consistency"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }
}
