//! Parsing of console input lines.

/// Target of a `remove` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    /// A participant name, matched ignoring case.
    Name(String),
    /// A 1-based roster position, written `#n`.
    Position(usize),
}

/// One console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add <name>`: validate and add a name. The raw text is kept untrimmed.
    Add(String),
    /// `remove <name>` or `remove #n`.
    Remove(RemoveTarget),
    /// `draw`: reveal the next secret friend.
    Draw,
    /// `again`: start a new cycle with the same roster.
    Again,
    /// `reset`: clear everything.
    Reset,
    /// `status`: show progress.
    Status,
    /// `list`: show the roster.
    List,
    /// `help`: show the command list.
    Help,
    /// `quit` / `exit`.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line was blank.
    #[error("type a command, or `help` for the list")]
    Blank,
    /// The first word is not a command.
    #[error("unknown command `{0}`; type `help` for the list")]
    Unknown(String),
    /// `remove` without a target, or with `#0` / `#abc`.
    #[error("usage: remove <name> | remove #<position>")]
    BadRemoveTarget,
}

impl Command {
    /// Parses one input line.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for blank lines, unknown commands and malformed
    /// `remove` targets. `add` with no name is accepted so the validator can
    /// report it.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (line.trim_end(), ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Err(ParseError::Blank),
            "add" | "a" => Ok(Self::Add(rest.to_string())),
            "remove" | "rm" => parse_remove_target(rest).map(Self::Remove),
            "draw" | "d" => Ok(Self::Draw),
            "again" => Ok(Self::Again),
            "reset" => Ok(Self::Reset),
            "status" | "s" => Ok(Self::Status),
            "list" | "ls" => Ok(Self::List),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

fn parse_remove_target(rest: &str) -> Result<RemoveTarget, ParseError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(ParseError::BadRemoveTarget);
    }
    match rest.strip_prefix('#') {
        Some(digits) => match digits.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(RemoveTarget::Position(n)),
            _ => Err(ParseError::BadRemoveTarget),
        },
        None => Ok(RemoveTarget::Name(rest.to_string())),
    }
}

/// Returns `true` if a confirmation answer means yes.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    )
}
