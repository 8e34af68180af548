use contacts_core::{AppViewModel, Msg, Selection};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  list              show the contact list and editor again
  search [text]     filter by name or email (no text clears the filter)
  select <n>        edit contact number n from the list
  new               start a new contact
  first [name]      set the first name
  last [name]       set the last name
  email [text]      type into the email input (not added yet)
  add               add the typed email if it is valid
  rm <n>            remove email number n from the editor
  save              create or update the contact
  delete            delete the contact being edited
  cancel            discard the current edit
  refresh           fetch the list from the server again
  ok                dismiss the current notification
  help              show this text
  quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    Select(usize),
    New,
    First(String),
    Last(String),
    Email(String),
    Add,
    Remove(usize),
    Save,
    Delete,
    Cancel,
    Refresh,
    Dismiss,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}, try 'help'")]
    Unknown(String),
    #[error("'{0}' needs a number")]
    MissingNumber(&'static str),
    #[error("{0:?} is not a row number")]
    BadNumber(String),
    #[error("there is no contact {0} in the list")]
    NoSuchContact(usize),
    #[error("there is no email {0} in the editor")]
    NoSuchEmail(usize),
    #[error("no contact is being edited")]
    NothingSelected,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "search" | "find" => Command::Search(rest.to_string()),
        "select" | "sel" => Command::Select(row_number("select", rest)?),
        "new" => Command::New,
        "first" => Command::First(rest.to_string()),
        "last" => Command::Last(rest.to_string()),
        "email" => Command::Email(rest.to_string()),
        "add" => Command::Add,
        "rm" | "remove" => Command::Remove(row_number("rm", rest)?),
        "save" => Command::Save,
        "delete" | "del" => Command::Delete,
        "cancel" => Command::Cancel,
        "refresh" => Command::Refresh,
        "ok" | "dismiss" => Command::Dismiss,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn row_number(command: &'static str, text: &str) -> Result<usize, CommandError> {
    if text.is_empty() {
        return Err(CommandError::MissingNumber(command));
    }
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::BadNumber(text.to_string())),
    }
}

/// Translates a command into core messages, resolving 1-based row numbers
/// against what was last shown.
///
/// `List`, `Help` and `Quit` are handled by the shell and map to nothing.
pub fn to_msgs(command: &Command, view: &AppViewModel) -> Result<Vec<Msg>, CommandError> {
    let msgs = match command {
        Command::List | Command::Help | Command::Quit => Vec::new(),
        Command::Search(query) => vec![Msg::SearchChanged(query.clone())],
        Command::Select(n) => {
            let row = view
                .contacts
                .get(n - 1)
                .ok_or(CommandError::NoSuchContact(*n))?;
            vec![Msg::ContactSelected(row.id)]
        }
        Command::New => vec![Msg::NewContactClicked],
        Command::First(name) => {
            require_editor(view)?;
            vec![Msg::FirstNameChanged(name.clone())]
        }
        Command::Last(name) => {
            require_editor(view)?;
            vec![Msg::LastNameChanged(name.clone())]
        }
        Command::Email(text) => {
            let editor = view.editor.as_ref().ok_or(CommandError::NothingSelected)?;
            let mut msgs = Vec::with_capacity(2);
            if !editor.adding_email {
                msgs.push(Msg::AddEmailClicked);
            }
            msgs.push(Msg::PendingEmailChanged(text.clone()));
            msgs
        }
        Command::Add => {
            require_editor(view)?;
            vec![Msg::PendingEmailSubmitted]
        }
        Command::Remove(n) => {
            let editor = view.editor.as_ref().ok_or(CommandError::NothingSelected)?;
            let row = editor
                .emails
                .get(n - 1)
                .ok_or(CommandError::NoSuchEmail(*n))?;
            vec![Msg::EmailRemoved(row.id)]
        }
        Command::Save => {
            require_editor(view)?;
            vec![Msg::SaveClicked]
        }
        Command::Delete => match view.selection {
            Selection::Existing(id) => vec![Msg::DeleteRequested(id)],
            _ => return Err(CommandError::NothingSelected),
        },
        Command::Cancel => vec![Msg::CancelClicked],
        Command::Refresh => vec![Msg::RefreshRequested],
        Command::Dismiss => vec![Msg::NotificationDismissed],
    };
    Ok(msgs)
}

fn require_editor(view: &AppViewModel) -> Result<(), CommandError> {
    if view.editor.is_some() {
        Ok(())
    } else {
        Err(CommandError::NothingSelected)
    }
}
