//! Output formatting for the CLI.

use rolodex_client::{Contact, Error};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

fn display_name(contact: &Contact) -> String {
    contact.full_name().unwrap_or_else(|| "No Name".to_string())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("(error) {}", e))
}

/// Format a listing.
pub fn format_contacts(contacts: &[Contact], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(contacts),
        OutputMode::Human => {
            if contacts.is_empty() {
                return "(no contacts)".to_string();
            }
            contacts
                .iter()
                .map(|c| {
                    format!(
                        "{} {:<28} {:<18} {}",
                        if c.is_favorite() { "★" } else { " " },
                        display_name(c),
                        c.twitter.as_deref().unwrap_or(""),
                        c.object_id
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// Format a single contact as a card.
pub fn format_contact(contact: &Contact, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(contact),
        OutputMode::Human => {
            let mut lines = vec![format!(
                "{}{}",
                display_name(contact),
                if contact.is_favorite() { " ★" } else { "" }
            )];
            lines.push(format!("  id:       {}", contact.object_id));
            if let Some(twitter) = &contact.twitter {
                lines.push(format!("  twitter:  {}", twitter));
            }
            if let Some(avatar) = &contact.avatar {
                lines.push(format!("  avatar:   {}", avatar));
            }
            if let Some(created) = contact.created_at {
                lines.push(format!("  created:  {}", created));
            }
            if let Some(notes) = &contact.notes {
                lines.push(format!("  notes:    {}", notes));
            }
            lines.join("\n")
        }
    }
}

/// Format a missing-record message.
pub fn format_not_found(id: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::json!({"error": "Item not found", "id": id}).to_string(),
        OutputMode::Human => format!("(error) No contact with id {}", id),
    }
}

/// Format an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    let message = err.server_message().unwrap_or_else(|| err.to_string());
    match mode {
        OutputMode::Json => serde_json::json!({ "error": message }).to_string(),
        OutputMode::Human => format!("(error) {}", message),
    }
}
