//! Pure renderers: each view turns the session and the sample data into a
//! [`Screen`] without touching either.

mod feedback;
mod green;
mod home;
mod live_map;
mod lost_found;
mod overlays;
mod routes;

pub use feedback::render_feedback;
pub use green::render_green;
pub use home::render_home;
pub use live_map::render_live_map;
pub use lost_found::render_lost_found;
pub use overlays::{CHAT_GREETING, render_chat_panel, render_emergency};
pub use routes::render_routes;

use crate::state::{SessionState, Tab};
use crate::static_data::SampleData;
use compact_str::CompactString;
use std::fmt;

/// A gesture the presentation layer can offer on a screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SelectTab(Tab),
    TrackRoute(CompactString),
    TriggerSos,
    SubmitFeedback,
    CloseChat,
    ToggleVoice,
    ToggleConnectivity,
    OpenChat,
}

impl Action {
    pub fn label(&self) -> String {
        match self {
            Action::SelectTab(tab) => tab.label().to_string(),
            Action::TrackRoute(route) => format!("Track Live ({})", route),
            Action::TriggerSos => "EMERGENCY SOS".to_string(),
            Action::SubmitFeedback => "Submit Feedback".to_string(),
            Action::CloseChat => "Close".to_string(),
            Action::ToggleVoice => "Voice".to_string(),
            Action::ToggleConnectivity => "Wifi".to_string(),
            Action::OpenChat => "Chat".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    pub tab: Tab,
    pub title: &'static str,
    pub lines: Vec<String>,
    pub actions: Vec<Action>,
}

impl Screen {
    fn new(tab: Tab, title: &'static str) -> Self {
        Self {
            tab,
            title,
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

/// Full-screen or floating layers drawn above the active screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlay {
    pub title: &'static str,
    pub lines: Vec<String>,
    pub actions: Vec<Action>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub title: &'static str,
    pub voice_enabled: bool,
    pub online: bool,
    pub language: &'static str,
    pub actions: Vec<Action>,
}

/// One complete render of the app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub header: Header,
    pub body: Screen,
    pub emergency: Option<Overlay>,
    pub chat: Option<Overlay>,
}

pub fn render_header(session: &SessionState) -> Header {
    Header {
        title: "SmartTransit",
        voice_enabled: session.voice_enabled,
        online: session.online,
        language: session.language.display_name(),
        actions: vec![Action::ToggleVoice, Action::ToggleConnectivity, Action::OpenChat],
    }
}

/// Render whichever screen `session.active_tab` names. Exactly one view runs.
pub fn render_active(session: &SessionState, data: &SampleData, feedback_draft: &str) -> Screen {
    match session.active_tab {
        Tab::Home => render_home(session, data),
        Tab::LiveMap => render_live_map(session, data),
        Tab::Routes => render_routes(session, data),
        Tab::Green => render_green(session, data),
        Tab::LostFound => render_lost_found(session, data),
        Tab::Feedback => render_feedback(session, data, feedback_draft),
    }
}

pub fn render_frame(session: &SessionState, data: &SampleData, feedback_draft: &str) -> Frame {
    Frame {
        header: render_header(session),
        body: render_active(session, data, feedback_draft),
        emergency: session.emergency_active.then(render_emergency),
        chat: session.chat_panel_open.then(render_chat_panel),
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "== {} ==  [voice {}] [{}] [{}] [chat]",
            self.title,
            if self.voice_enabled { "on" } else { "off" },
            if self.online { "wifi" } else { "no wifi" },
            self.language
        )
    }
}

fn write_actions(f: &mut fmt::Formatter<'_>, actions: &[Action]) -> fmt::Result {
    for action in actions {
        writeln!(f, "  [ {} ]", action.label())?;
    }
    Ok(())
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-- {} --", self.title)?;
        for line in &self.lines {
            writeln!(f, "  {}", line)?;
        }
        write_actions(f, &self.actions)
    }
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**** {} ****", self.title)?;
        for line in &self.lines {
            writeln!(f, "  {}", line)?;
        }
        write_actions(f, &self.actions)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The emergency overlay covers the whole screen.
        if let Some(emergency) = &self.emergency {
            return write!(f, "{}", emergency);
        }
        writeln!(f, "{}", self.header)?;
        write!(f, "{}", self.body)?;
        if let Some(chat) = &self.chat {
            write!(f, "{}", chat)?;
        }
        Ok(())
    }
}
