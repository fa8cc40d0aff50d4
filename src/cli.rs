// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

fn output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("coinflow")
        .version(crate_version!())
        .about("Personal income/expense tracking, budgets, savings goals, and reports")
        .arg(
            Arg::new("profile")
                .long("profile")
                .global(true)
                .value_name("NAME")
                .help("Profile to operate on (defaults to the stored profile)"),
        )
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("profile")
                .about("Manage profiles")
                .subcommand(
                    Command::new("add")
                        .about("Add a profile")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("list").about("List profiles"))
                .subcommand(
                    Command::new("use")
                        .about("Set the default profile")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Add a transaction")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_negative_numbers(true),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("notes").long("notes"))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue)
                                .help("Mark as recurring"),
                        )
                        .arg(
                            Arg::new("every")
                                .long("every")
                                .value_name("FREQ")
                                .help("daily|weekly|monthly|yearly (with --recurring)"),
                        ),
                )
                .subcommand(output_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64)))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("notes").long("notes"))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(Arg::new("every").long("every").value_name("FREQ"))
                        .arg(
                            Arg::new("once")
                                .long("once")
                                .action(ArgAction::SetTrue)
                                .help("Clear the recurrence flag"),
                        ),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage category budgets")
                .subcommand(
                    Command::new("add")
                        .about("Create a budget")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .default_value("monthly")
                                .help("monthly or yearly"),
                        )
                        .arg(Arg::new("start").long("start").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("end").long("end").help("YYYY-MM-DD, default start + period")),
                )
                .subcommand(output_flags(
                    Command::new("list")
                        .about("List budgets with live consumption")
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .help("Include paused budgets"),
                        ),
                ))
                .subcommand(
                    Command::new("delete")
                        .about("Delete a budget")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                )
                .subcommand(
                    Command::new("pause")
                        .about("Deactivate a budget")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                )
                .subcommand(
                    Command::new("resume")
                        .about("Reactivate a budget")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Create a savings goal")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("by").long("by").required(true).help("Target date YYYY-MM-DD"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(output_flags(
                    Command::new("list").about("List goals with live progress"),
                ))
                .subcommand(
                    Command::new("delete")
                        .about("Delete a goal")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Period-bounded reports and exports")
                .subcommand(output_flags(
                    Command::new("summary")
                        .about("Summary, monthly trend, budgets, and goals")
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD")),
                ))
                .subcommand(
                    Command::new("export")
                        .about("Export transactions")
                        .arg(Arg::new("out").long("out").required(true).value_name("FILE"))
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv or json"),
                        )
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD")),
                ),
        )
}
