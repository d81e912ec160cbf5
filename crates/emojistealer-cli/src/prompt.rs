//! The interactive selection prompt.
//!
//! Reads one line at a time, applies it to a [`SelectionEngine`] and, once
//! the user confirms, asks for a final yes/no before handing the selection
//! back. Answering no returns to the prompt with the selection intact.

use std::io::{self, BufRead, Write};

use emojistealer_core::selection::{is_affirmative, SelectionEngine, Step};
use emojistealer_core::{Catalog, Emoji};
use tracing::{info, warn};

use crate::logging::bold;

const HELP: &[&str] = &[
    "Select emoji to download:",
    " <name> or emoji:<name> - selects an emoji",
    " pack:<name> - selects an entire category",
    " unselect <name> or unselect pack:<name> - unselects an emoji/pack",
    " all - selects all emoji",
    " none - unselects all emoji",
    " confirm - confirms your selection",
    " quit - quits the program",
];

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Confirmed(Vec<Emoji>),
    Quit,
}

/// Print every category with its shortcodes.
pub fn print_listing(catalog: &Catalog) {
    info!("Available emoji:\n");
    for (category, emoji) in catalog.categories() {
        info!("{}:", bold(category));
        let shortcodes: Vec<&str> = emoji.iter().map(|e| e.shortcode.as_str()).collect();
        info!(" {}", shortcodes.join(" "));
    }
    info!("\n");
}

pub fn print_help() {
    for line in HELP {
        info!("{}", line);
    }
}

/// Run the selection loop until the user confirms or quits.
///
/// End of input counts as quitting.
pub fn run<R: BufRead, W: Write>(
    catalog: &Catalog,
    input: &mut R,
    output: &mut W,
) -> io::Result<Outcome> {
    let mut engine = SelectionEngine::new(catalog);

    loop {
        loop {
            let Some(line) = read_line(input, output, "> ")? else {
                return Ok(Outcome::Quit);
            };
            let outcome = engine.apply_line(&line);
            for warning in &outcome.warnings {
                warn!("{}", warning);
            }
            match outcome.step {
                Step::Quit => return Ok(Outcome::Quit),
                Step::Confirm => break,
                Step::Continue if outcome.report => {
                    info!("{} emoji selected.", engine.len());
                }
                Step::Continue => {}
            }
        }

        info!("\nYour selection:");
        info!("{}", engine.shortcodes().collect::<Vec<_>>().join(" "));

        let Some(answer) = read_line(input, output, "\nIs this correct? [Y]/N > ")? else {
            return Ok(Outcome::Quit);
        };
        if is_affirmative(&answer) {
            return Ok(Outcome::Confirmed(engine.into_selected()));
        }
    }
}

/// Show `prompt` and read a line. `None` at end of input.
fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
