//! Console command parsing.

use crate::domains::catalog::ProductId;

/// Help text printed by the `help` command.
pub const HELP: &str = "\
Commands:
  list           Show all products
  new            Create a product
  edit <id>      Edit a product
  delete <id>    Delete a product
  help           Show this help
  quit           Leave the console
";

/// A parsed console command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    New,
    Edit(ProductId),
    Delete(ProductId),
    Help,
    Quit,
    /// Blank input line.
    Nothing,
}

impl Command {
    /// Parse one input line. The error is the message to show the user.
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Self::Nothing);
        };
        let argument = words.next();
        if words.next().is_some() {
            return Err(format!("Too many arguments for '{}'", name));
        }

        let command = match name.to_lowercase().as_str() {
            "list" | "ls" => Self::List,
            "new" | "create" => Self::New,
            "edit" => Self::Edit(parse_id(name, argument)?),
            "delete" | "rm" => Self::Delete(parse_id(name, argument)?),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
        };

        if argument.is_some() && !matches!(command, Self::Edit(_) | Self::Delete(_)) {
            return Err(format!("'{}' takes no arguments", name));
        }
        Ok(command)
    }
}

fn parse_id(command: &str, argument: Option<&str>) -> Result<ProductId, String> {
    let raw = argument.ok_or_else(|| format!("Usage: {} <id>", command))?;
    raw.parse()
        .map_err(|_| format!("'{}' is not a product id", raw))
}
