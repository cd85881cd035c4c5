use crate::controller::AppController;
use crate::error::{AppError, Result};
use crate::localization::Language;
use crate::state::Tab;

pub const HELP: &str = "\
commands:
  tab <home|livemap|routes|green|lostfound|feedback>
  online                 toggle connectivity indicator
  voice                  toggle spoken announcements
  lang <english|hindi|telugu|tamil>
  award <points>
  sos
  track <route name or id>
  chat <open|close>
  feedback <text>        replace the feedback draft
  submit                 submit the feedback draft
  show | help | quit";

/// One line typed into the shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Tab(Tab),
    ToggleOnline,
    ToggleVoice,
    Language(Language),
    Award(i64),
    Sos,
    Track(String),
    OpenChat,
    CloseChat,
    Feedback(String),
    Submit,
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        let cmd = match word.to_lowercase().as_str() {
            "tab" => Command::Tab(required(rest, "tab")?.parse()?),
            "online" => Command::ToggleOnline,
            "voice" => Command::ToggleVoice,
            "lang" | "language" => Command::Language(required(rest, "lang")?.parse()?),
            "award" => {
                let raw = required(rest, "award")?;
                let amount = raw.parse().map_err(|_| {
                    AppError::InvalidCommand(format!("'{}' is not a whole number", raw))
                })?;
                Command::Award(amount)
            }
            "sos" => Command::Sos,
            "track" => Command::Track(required(rest, "track")?.to_string()),
            "chat" => match required(rest, "chat")? {
                "open" => Command::OpenChat,
                "close" => Command::CloseChat,
                other => {
                    return Err(AppError::InvalidCommand(format!(
                        "chat expects open or close, got '{}'",
                        other
                    )));
                }
            },
            "feedback" => Command::Feedback(rest.to_string()),
            "submit" => Command::Submit,
            "" | "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(AppError::InvalidCommand(format!("unknown command '{}'", other))),
        };
        Ok(cmd)
    }

    /// Apply to the controller. Returns a message for the user, if any.
    pub fn apply(self, app: &mut AppController) -> Result<Option<String>> {
        let note = match self {
            Command::Tab(tab) => {
                app.select_tab(tab);
                None
            }
            Command::ToggleOnline => {
                let online = app.toggle_connectivity();
                Some(if online { "Online" } else { "Offline" }.to_string())
            }
            Command::ToggleVoice => {
                let on = app.toggle_voice();
                Some(format!("Voice {}", if on { "on" } else { "off" }))
            }
            Command::Language(language) => {
                app.set_language(language);
                Some(format!("Language: {}", language.display_name()))
            }
            Command::Award(amount) => {
                let total = app.award_points(amount)?;
                Some(format!("You earned {} points! Total: {}", amount, total))
            }
            Command::Sos => {
                app.trigger_sos()?;
                None
            }
            Command::Track(query) => {
                let name = app
                    .data()
                    .find_route(&query)
                    .map(|r| r.name.clone())
                    .ok_or(AppError::UnknownRoute(query))?;
                app.track_route(&name);
                None
            }
            Command::OpenChat => {
                app.open_chat();
                None
            }
            Command::CloseChat => {
                app.close_chat();
                None
            }
            Command::Feedback(text) => {
                app.edit_feedback(&text);
                None
            }
            Command::Submit => {
                let receipt = app.submit_feedback()?;
                Some(format!(
                    "Thanks! Feedback received at {}",
                    receipt.submitted_at.format("%H:%M:%S")
                ))
            }
            Command::Show | Command::Quit => None,
            Command::Help => Some(HELP.to_string()),
        };
        Ok(note)
    }
}

fn required<'a>(rest: &'a str, cmd: &str) -> Result<&'a str> {
    if rest.is_empty() {
        return Err(AppError::InvalidCommand(format!("{} needs an argument", cmd)));
    }
    Ok(rest)
}
