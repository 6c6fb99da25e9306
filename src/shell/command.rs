/// Commands accepted at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    // Browse controller
    More,
    Reload,
    Reset,
    List,
    Search(String),
    Show(u32),

    // Favorites
    Favorite(u32),
    Favorites,
    ClearFavorites,

    Help,
    Quit,
}

/// Why a line could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    BadNumber(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty command"),
            ParseError::Unknown(word) => write!(f, "unknown command '{word}' (try 'help')"),
            ParseError::MissingArgument(what) => write!(f, "missing {what}"),
            ParseError::BadNumber(raw) => write!(f, "'{raw}' is not a number"),
        }
    }
}

impl std::error::Error for ParseError {}

fn number(raw: Option<&str>) -> Result<u32, ParseError> {
    let raw = raw.ok_or(ParseError::MissingArgument("number"))?;
    raw.trim_start_matches('#')
        .parse()
        .map_err(|_| ParseError::BadNumber(raw.to_string()))
}

/// Parses one input line.
pub fn parse(line: &str) -> Result<ShellCommand, ParseError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then_some(rest);

    match word.to_lowercase().as_str() {
        "" => Err(ParseError::Empty),
        "more" | "m" | "next" => Ok(ShellCommand::More),
        "reload" | "r" => Ok(ShellCommand::Reload),
        "reset" => Ok(ShellCommand::Reset),
        "list" | "ls" => Ok(ShellCommand::List),
        "search" | "s" | "find" => arg
            .map(|q| ShellCommand::Search(q.to_string()))
            .ok_or(ParseError::MissingArgument("name or number")),
        "show" | "d" => number(arg).map(ShellCommand::Show),
        "fav" | "f" => number(arg).map(ShellCommand::Favorite),
        "favs" | "favorites" => Ok(ShellCommand::Favorites),
        "clear" => Ok(ShellCommand::ClearFavorites),
        "help" | "h" | "?" => Ok(ShellCommand::Help),
        "quit" | "q" | "exit" => Ok(ShellCommand::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

pub const HELP: &str = "\
Commands:
  more            load the next page
  reload          reset and load the first page
  reset           clear the list without loading
  list            print the loaded entries
  search <q>      look up by name or number
  show <n>        show details for entry #n
  fav <n>         toggle entry #n as a favorite
  favs            list favorites
  clear           remove all favorites
  quit            exit";
