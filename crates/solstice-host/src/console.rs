//! Debug console commands.
//!
//! Two commands are understood: `help [command]` and `solstice-day [day]`.
//! Input lines are parsed into a [`ConsoleCommand`]; running it is up to the
//! host integration, which owns the seasonal cycle.

/// Name of the forced-day command.
pub const SOLSTICE_DAY_COMMAND: &str = "solstice-day";

/// Name of the help command.
pub const HELP_COMMAND: &str = "help";

/// Name, usage and description of every command, in help order.
pub const COMMANDS: [(&str, &str, &str); 2] = [
    (
        SOLSTICE_DAY_COMMAND,
        "solstice-day [day]",
        "Pin the seasonal cycle to a day. Without a day (or with a negative one) the cycle follows the calendar again",
    ),
    (HELP_COMMAND, "help [command]", "List commands, or show usage for one"),
];

/// A recognised console command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Pin the cycle to a day, or clear the pin with `None`.
    SolsticeDay(Option<i64>),
    /// Show help, optionally for a single command.
    Help(Option<String>),
}

impl ConsoleCommand {
    /// Parse an input line.
    ///
    /// `Ok(None)` for a blank line. Unknown commands and bad arguments come
    /// back as the message to print.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = parts.collect();

        match name {
            SOLSTICE_DAY_COMMAND => parse_day_argument(&args).map(|day| Some(Self::SolsticeDay(day))),
            HELP_COMMAND => Ok(Some(Self::Help(args.first().map(|s| (*s).to_string())))),
            other => Err(format!("Unknown command: {other}")),
        }
    }
}

/// Parse the optional day argument of `solstice-day`.
///
/// No argument clears the forced day; one integer sets it.
pub fn parse_day_argument(args: &[&str]) -> Result<Option<i64>, String> {
    match args {
        [] => Ok(None),
        [day] => day
            .parse::<i64>()
            .map(Some)
            .map_err(|_| format!("Expected an integer day, got '{day}'")),
        _ => Err(format!("Usage: {SOLSTICE_DAY_COMMAND} [day]")),
    }
}

/// Outcome of a console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command did what was asked.
    pub success: bool,
    /// Text for the console, possibly multi-line.
    pub message: String,
}

impl CommandResult {
    /// Successful result.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Failed result.
    #[must_use]
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Help text for all commands, or for `topic` alone.
#[must_use]
pub fn help(topic: Option<&str>) -> CommandResult {
    match topic {
        Some(topic) => match COMMANDS.iter().find(|(name, _, _)| *name == topic) {
            Some((_, usage, description)) => {
                CommandResult::ok(format!("{usage}\n  {description}"))
            },
            None => CommandResult::err(format!("Unknown command: {topic}")),
        },
        None => {
            let listing: Vec<String> = COMMANDS
                .iter()
                .map(|(_, usage, description)| format!("{usage} - {description}"))
                .collect();
            CommandResult::ok(listing.join("\n"))
        },
    }
}
