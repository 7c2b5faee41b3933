//! ArgMatches → CliAction conversion.

use clap::ArgMatches;
use rolodex_client::{ContactDraft, ContactId, ContactPatch};

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    List { query: Option<String> },
    Show { id: ContactId },
    Add(ContactDraft),
    Edit { id: ContactId, patch: ContactPatch },
    Remove { id: ContactId },
}

fn string(matches: &ArgMatches, name: &str) -> Option<String> {
    matches.get_one::<String>(name).cloned()
}

fn id(matches: &ArgMatches) -> Result<ContactId, String> {
    let raw = string(matches, "id").ok_or("Missing contact identifier")?;
    ContactId::new(raw).map_err(|e| e.to_string())
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, m) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "list" => Ok(CliAction::List {
            query: string(m, "query"),
        }),
        "show" => Ok(CliAction::Show { id: id(m)? }),
        "add" => Ok(CliAction::Add(ContactDraft {
            first: string(m, "first"),
            last: string(m, "last"),
            avatar: string(m, "avatar"),
            twitter: string(m, "twitter"),
            notes: string(m, "notes"),
            favorite: m.get_flag("favorite").then_some(true),
        })),
        "edit" => parse_edit(m),
        "favorite" => Ok(CliAction::Edit {
            id: id(m)?,
            patch: ContactPatch::new().favorite(!m.get_flag("off")),
        }),
        "remove" => Ok(CliAction::Remove { id: id(m)? }),
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn parse_edit(m: &ArgMatches) -> Result<CliAction, String> {
    let mut patch = ContactPatch::new();
    if let Some(v) = string(m, "first") {
        patch = patch.first(v);
    }
    if let Some(v) = string(m, "last") {
        patch = patch.last(v);
    }
    if let Some(v) = string(m, "avatar") {
        patch = patch.avatar(v);
    }
    if let Some(v) = string(m, "twitter") {
        patch = patch.twitter(v);
    }
    if let Some(v) = string(m, "notes") {
        patch = patch.notes(v);
    }

    for field in m.get_many::<String>("clear").into_iter().flatten() {
        match field.as_str() {
            "first" => patch.first = Some(None),
            "last" => patch.last = Some(None),
            "avatar" => patch.avatar = Some(None),
            "twitter" => patch.twitter = Some(None),
            "notes" => patch.notes = Some(None),
            other => return Err(format!("Cannot clear `{}`", other)),
        }
    }

    if patch.is_empty() {
        return Err("Nothing to change; pass a field flag or --clear".into());
    }
    Ok(CliAction::Edit { id: id(m)?, patch })
}
