use crate::error::AppError;
use crate::localization::Language;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const INITIAL_POINTS: u64 = 450;
pub const INITIAL_LEVEL: u32 = 3;
pub const INITIAL_ROUTE: &str = "Route 1";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Home,
    LiveMap,
    Routes,
    Green,
    LostFound,
    Feedback,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Home,
        Tab::LiveMap,
        Tab::Routes,
        Tab::Green,
        Tab::LostFound,
        Tab::Feedback,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::LiveMap => "livemap",
            Tab::Routes => "routes",
            Tab::Green => "green",
            Tab::LostFound => "lostfound",
            Tab::Feedback => "feedback",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::LiveMap => "Live Buses",
            Tab::Routes => "Routes",
            Tab::Green => "Green Impact",
            Tab::LostFound => "Lost & Found",
            Tab::Feedback => "Feedback",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Tab {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Tab::ALL
            .into_iter()
            .find(|t| t.key() == wanted)
            .ok_or_else(|| AppError::UnknownTab(s.to_string()))
    }
}

/// Everything the screen shows that can change during a session. Nothing here
/// outlives the process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub active_tab: Tab,
    pub online: bool,
    pub voice_enabled: bool,
    pub language: Language,
    pub points: u64,
    pub level: u32,
    pub emergency_active: bool,
    pub selected_route: CompactString,
    pub chat_panel_open: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            active_tab: Tab::Home,
            online: true,
            voice_enabled: false,
            language: Language::English,
            points: INITIAL_POINTS,
            level: INITIAL_LEVEL,
            emergency_active: false,
            selected_route: CompactString::from(INITIAL_ROUTE),
            chat_panel_open: false,
        }
    }
}

impl SessionState {
    pub fn with_voice(mut self, enabled: bool) -> Self {
        self.voice_enabled = enabled;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_launch() {
        let s = SessionState::default();
        assert_eq!(s.active_tab, Tab::Home);
        assert!(s.online);
        assert!(!s.voice_enabled);
        assert_eq!(s.points, 450);
        assert_eq!(s.level, 3);
        assert_eq!(s.selected_route, "Route 1");
        assert!(!s.emergency_active && !s.chat_panel_open);
    }

    #[test]
    fn tab_keys_round_trip_through_parse() {
        for tab in Tab::ALL {
            assert_eq!(tab.key().parse::<Tab>().unwrap(), tab);
        }
        assert!(matches!("map".parse::<Tab>(), Err(AppError::UnknownTab(_))));
    }
}
