use crate::events::{Transition, TransitionObserver};
use crate::state::{SessionState, Tab};
use std::process::Stdio;
use std::sync::Arc;

pub const SOS_ANNOUNCEMENT: &str = "Emergency SOS activated. Authorities have been notified.";

/// Host text-to-speech capability. Implementations submit and return; they
/// must never block the caller or report failure.
pub trait SpeechBackend: Send + Sync {
    fn speak(&self, text: &str, locale: &str);

    fn is_available(&self) -> bool {
        true
    }
}

/// Writes utterances to the log instead of an audio device.
#[derive(Debug, Default)]
pub struct LogSpeech;

impl SpeechBackend for LogSpeech {
    fn speak(&self, text: &str, locale: &str) {
        tracing::info!(locale, "🔊 {}", text);
    }
}

/// Runs an external TTS program (`<program> -v <locale> <text>`), e.g. espeak-ng.
#[derive(Debug, Clone)]
pub struct CommandSpeech {
    program: String,
}

impl CommandSpeech {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SpeechBackend for CommandSpeech {
    fn speak(&self, text: &str, locale: &str) {
        // The child is reaped on the runtime; without one there is nowhere to run it.
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("No runtime available for speech, dropping: {}", text);
            return;
        };

        let spawned = tokio::process::Command::new(&self.program)
            .arg("-v")
            .arg(locale)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut child) => {
                handle.spawn(async move {
                    if let Err(e) = child.wait().await {
                        tracing::debug!("Speech process failed: {}", e);
                    }
                });
            }
            Err(e) => tracing::debug!(program = %self.program, "Speech unavailable: {}", e),
        }
    }

    fn is_available(&self) -> bool {
        tokio::runtime::Handle::try_current().is_ok()
    }
}

/// Turns controller transitions into spoken status messages.
pub struct SpeechAnnouncer {
    backend: Option<Arc<dyn SpeechBackend>>,
}

impl SpeechAnnouncer {
    pub fn new(backend: Option<Arc<dyn SpeechBackend>>) -> Self {
        Self { backend }
    }

    pub fn silent() -> Self {
        Self { backend: None }
    }

    pub fn announce(&self, text: &str, session: &SessionState) {
        if !session.voice_enabled {
            return;
        }
        let Some(backend) = self.backend.as_ref().filter(|b| b.is_available()) else {
            return;
        };
        let locale = session.language.locale_code();
        tracing::debug!(locale, "Announcing: {}", text);
        backend.speak(text, locale);
    }
}

/// Announcement for a transition, if it has one.
pub fn announcement_for(transition: &Transition) -> Option<String> {
    match transition {
        Transition::TabSelected(Tab::LiveMap) => Some("Live buses selected".to_string()),
        Transition::TabSelected(Tab::Routes) => Some("Routes selected".to_string()),
        Transition::PointsAwarded { amount, .. } => Some(format!("You earned {} points!", amount)),
        Transition::SosTriggered => Some(SOS_ANNOUNCEMENT.to_string()),
        _ => None,
    }
}

impl TransitionObserver for SpeechAnnouncer {
    fn on_transition(&self, transition: &Transition, session: &SessionState) {
        if let Some(text) = announcement_for(transition) {
            self.announce(&text, session);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::localization::Language;
    use parking_lot::Mutex;

    #[derive(Default)]
    pub(crate) struct RecordingSpeech {
        pub spoken: Mutex<Vec<(String, String)>>,
    }

    impl SpeechBackend for RecordingSpeech {
        fn speak(&self, text: &str, locale: &str) {
            self.spoken.lock().push((text.to_string(), locale.to_string()));
        }
    }

    struct Unavailable;

    impl SpeechBackend for Unavailable {
        fn speak(&self, _text: &str, _locale: &str) {
            panic!("speak called on unavailable backend");
        }

        fn is_available(&self) -> bool {
            false
        }
    }

    #[test]
    fn disabled_voice_never_reaches_backend() {
        let rec = Arc::new(RecordingSpeech::default());
        let announcer = SpeechAnnouncer::new(Some(rec.clone()));
        let session = SessionState::default();
        announcer.announce("hello", &session);
        assert!(rec.spoken.lock().is_empty());
    }

    #[test]
    fn uses_locale_of_current_language() {
        let rec = Arc::new(RecordingSpeech::default());
        let announcer = SpeechAnnouncer::new(Some(rec.clone()));
        let session = SessionState::default()
            .with_voice(true)
            .with_language(Language::Telugu);
        announcer.on_transition(&Transition::SosTriggered, &session);
        assert_eq!(
            rec.spoken.lock().as_slice(),
            &[(SOS_ANNOUNCEMENT.to_string(), "te".to_string())]
        );
    }

    #[test]
    fn missing_or_unavailable_backend_is_silent() {
        let session = SessionState::default().with_voice(true);
        SpeechAnnouncer::silent().announce("nobody hears this", &session);
        SpeechAnnouncer::new(Some(Arc::new(Unavailable))).announce("nor this", &session);
    }

    #[test]
    fn only_selected_transitions_are_spoken() {
        assert_eq!(
            announcement_for(&Transition::PointsAwarded { amount: 15, total: 465 }).as_deref(),
            Some("You earned 15 points!")
        );
        assert_eq!(
            announcement_for(&Transition::TabSelected(Tab::Routes)).as_deref(),
            Some("Routes selected")
        );
        assert!(announcement_for(&Transition::TabSelected(Tab::Green)).is_none());
        assert!(announcement_for(&Transition::ChatOpened).is_none());
    }

    #[test]
    fn command_speech_without_runtime_is_unavailable() {
        let speech = CommandSpeech::new("espeak-ng");
        assert!(!speech.is_available());
        speech.speak("ignored", "en");
    }
}
