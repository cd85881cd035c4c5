use crate::localization::Language;
use crate::speech::{CommandSpeech, LogSpeech, SpeechBackend};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SpeechKind {
    /// No speech capability on this host.
    None,
    /// Write announcements to the log.
    Log,
    /// Run an external text-to-speech program.
    Command,
}

#[derive(Debug, Parser)]
#[command(name = "smart-transit", about = "SmartTransit companion in the terminal")]
pub struct Config {
    /// Announcement language.
    #[arg(long, env = "SMART_TRANSIT_LANGUAGE", default_value = "english")]
    pub language: Language,

    /// Start with spoken announcements enabled.
    #[arg(long, env = "SMART_TRANSIT_VOICE")]
    pub voice: bool,

    #[arg(long, value_enum, env = "SMART_TRANSIT_SPEECH", default_value = "log")]
    pub speech: SpeechKind,

    /// Program used by `--speech command`; called as `<program> -v <locale> <text>`.
    #[arg(long, env = "SMART_TRANSIT_SPEECH_COMMAND", default_value = "espeak-ng")]
    pub speech_command: String,

    /// JSON file replacing the built-in routes, buses, lost items and trips.
    #[arg(long, env = "SMART_TRANSIT_SAMPLE_DATA")]
    pub sample_data: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn speech_backend(&self) -> Option<Arc<dyn SpeechBackend>> {
        match self.speech {
            SpeechKind::None => None,
            SpeechKind::Log => Some(Arc::new(LogSpeech)),
            SpeechKind::Command => Some(Arc::new(CommandSpeech::new(self.speech_command.clone()))),
        }
    }
}
