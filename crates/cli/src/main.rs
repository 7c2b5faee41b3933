//! Rolodex CLI: contacts from the terminal.
//!
//! ```text
//! rolodex [--url URL] [--json] list [QUERY]
//! rolodex show ID
//! rolodex add --first Ada --last Lovelace [--favorite]
//! rolodex edit ID --notes "..." [--clear twitter]
//! rolodex favorite ID [--off]
//! rolodex remove ID
//! ```
//!
//! Exit codes: 0 success, 1 error, 2 contact not found.

mod commands;
mod format;
mod parse;

use std::process;

use rolodex_client::{ClientConfig, ContactId, ContactsClient};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_contact, format_contacts, format_error, format_not_found, OutputMode};
use parse::{matches_to_action, CliAction};

const EXIT_OK: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_NOT_FOUND: i32 = 2;

fn main() {
    // Quiet unless RUST_LOG asks otherwise; failures are reported on stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();
    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let url = matches
        .get_one::<String>("url")
        .cloned()
        .unwrap_or_else(|| rolodex_client::DEFAULT_BASE_URL.to_string());
    let client = ContactsClient::new(ClientConfig::new(url));

    let exit_code = match matches_to_action(&matches) {
        Ok(action) => run(&client, action, output_mode),
        Err(e) => {
            eprintln!("(error) {}", e);
            EXIT_ERROR
        }
    };
    process::exit(exit_code);
}

fn run(client: &ContactsClient, action: CliAction, mode: OutputMode) -> i32 {
    let result = match action {
        CliAction::List { query } => client
            .list_contacts(query.as_deref())
            .map(|contacts| Some(format_contacts(&contacts, mode))),
        CliAction::Add(draft) => client
            .create_contact(draft)
            .map(|c| Some(format_contact(&c, mode))),
        CliAction::Show { id } => found(&id, client.get_contact(&id), mode),
        CliAction::Edit { id, patch } => found(&id, client.update_contact(&id, patch), mode),
        CliAction::Remove { id } => found(&id, client.delete_contact(&id), mode),
    };

    match result {
        Ok(Some(formatted)) => {
            println!("{}", formatted);
            EXIT_OK
        }
        Ok(None) => EXIT_NOT_FOUND,
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            EXIT_ERROR
        }
    }
}

/// Print the record, or report it missing and yield `None`
fn found(
    id: &ContactId,
    result: rolodex_client::Result<Option<rolodex_client::Contact>>,
    mode: OutputMode,
) -> rolodex_client::Result<Option<String>> {
    match result? {
        Some(contact) => Ok(Some(format_contact(&contact, mode))),
        None => {
            eprintln!("{}", format_not_found(id.as_str(), mode));
            Ok(None)
        }
    }
}
