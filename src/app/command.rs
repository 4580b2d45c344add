// SPDX-License-Identifier: MPL-2.0
//! Line commands for interactive mode.

use super::Event;
use crate::ui::form::Field;
use std::path::PathBuf;

pub const USAGE: &str = "\
Commands:
  text <content>        set the QR content (regenerates after a pause)
  set <field> <value>   change an option, e.g. `set qr-size 400`
  icon <path>           load a center icon
  generate              render the QR code
  download              save the current QR code as PNG
  lang <en|ar>          switch the interface language
  show                  print the current page
  help                  print this list
  quit                  exit
Fields: qr-size margin error-correction foreground-color background-color
        border-style border-width border-color border-radius shadow icon-size
";

/// Parses one input line. Blank lines yield `None`.
#[must_use]
pub fn parse_command(line: &str) -> Option<Event> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let event = match word.to_ascii_lowercase().as_str() {
        "text" => Event::SetField(Field::Text, rest.to_string()),
        "set" => {
            let (id, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            match Field::from_id(id) {
                Some(field) => Event::SetField(field, value.trim().to_string()),
                None => Event::UnknownCommand(line.to_string()),
            }
        }
        "icon" if !rest.is_empty() => Event::UploadIcon(PathBuf::from(rest)),
        "generate" => Event::Generate,
        "download" => Event::Download,
        "lang" => Event::SwitchLanguage(rest.to_string()),
        "show" => Event::Show,
        "help" | "?" => Event::Help,
        "quit" | "exit" => Event::Quit,
        _ => Event::UnknownCommand(line.to_string()),
    };
    Some(event)
}
