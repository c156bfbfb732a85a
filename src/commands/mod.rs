//! Operator command parsing.


/// Script run for a start action.
pub const START_SCRIPT: &str = "start.sh";
/// Script run for a stop action.
pub const STOP_SCRIPT: &str = "stop.sh";

const STOP_KEYWORD: &str = "stop";

/// Known operator commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the language picker.
    Start,
    /// List registered services.
    Help,
    /// `/stop <service>`. `None` when the service name is missing or does
    /// not directly follow a single space.
    Stop(Option<String>),
    /// Any other command is a service to start.
    Launch(String),
}

impl Command {
    /// Parse operator input. Returns `None` for text that is not a slash
    /// command.
    ///
    /// Everything after the slash is lowercased before matching, so service
    /// names are compared against the lowercased text.
    pub fn parse(text: &str) -> Option<Self> {
        let body = text.strip_prefix('/')?.to_lowercase();
        let cmd = match body.as_str() {
            "start" => Self::Start,
            "help" => Self::Help,
            other => match other.strip_prefix(STOP_KEYWORD) {
                Some(rest) => Self::Stop(
                    rest.strip_prefix(' ')
                        .filter(|name| {
                            !name.is_empty() && !name.starts_with(char::is_whitespace)
                        })
                        .map(str::to_string),
                ),
                None => Self::Launch(other.to_string()),
            },
        };
        Some(cmd)
    }
}

/// A start or stop request for a registered service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Start,
    Stop,
}

impl ServiceAction {
    pub fn script(self) -> &'static str {
        match self {
            Self::Start => START_SCRIPT,
            Self::Stop => STOP_SCRIPT,
        }
    }
}
