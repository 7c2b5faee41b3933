//! Clap command tree.

use clap::{Arg, ArgAction, Command};

fn field_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("first").long("first").help("First name"))
        .arg(Arg::new("last").long("last").help("Last name"))
        .arg(Arg::new("avatar").long("avatar").help("Avatar URL"))
        .arg(Arg::new("twitter").long("twitter").help("Twitter handle"))
        .arg(Arg::new("notes").long("notes").help("Notes"))
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Contact identifier")
}

/// Build the `rolodex` command.
pub fn build_cli() -> Command {
    Command::new("rolodex")
        .about("Contacts from the terminal, backed by a Rolodex server")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("url")
                .long("url")
                .global(true)
                .env("ROLODEX_URL")
                .default_value(rolodex_client::DEFAULT_BASE_URL)
                .help("Server base URL"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print JSON instead of text"),
        )
        .subcommand(
            Command::new("list")
                .about("List contacts, optionally filtered by name")
                .arg(Arg::new("query").help("Fuzzy match on first or last name")),
        )
        .subcommand(Command::new("show").about("Show one contact").arg(id_arg()))
        .subcommand(
            field_args(Command::new("add").about("Create a contact")).arg(
                Arg::new("favorite")
                    .long("favorite")
                    .action(ArgAction::SetTrue)
                    .help("Mark as favorite"),
            ),
        )
        .subcommand(
            field_args(Command::new("edit").about("Change fields of a contact"))
                .arg(id_arg())
                .arg(
                    Arg::new("clear")
                        .long("clear")
                        .action(ArgAction::Append)
                        .value_parser(["first", "last", "avatar", "twitter", "notes"])
                        .help("Remove a field (repeatable)"),
                ),
        )
        .subcommand(
            Command::new("favorite")
                .about("Mark a contact as favorite")
                .arg(id_arg())
                .arg(
                    Arg::new("off")
                        .long("off")
                        .action(ArgAction::SetTrue)
                        .help("Unmark instead"),
                ),
        )
        .subcommand(Command::new("remove").about("Delete a contact").arg(id_arg()))
}
