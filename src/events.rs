use crate::localization::Language;
use crate::state::{SessionState, Tab};
use compact_str::CompactString;

/// A completed state change, published after the controller has applied it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    TabSelected(Tab),
    ConnectivityToggled { online: bool },
    VoiceToggled { enabled: bool },
    LanguageChanged(Language),
    PointsAwarded { amount: u64, total: u64 },
    SosTriggered,
    RouteSelected(CompactString),
    ChatOpened,
    ChatClosed,
    FeedbackSubmitted,
}

/// Side-effect hook for transitions. Observers see the session as it is after
/// the transition and must not block.
pub trait TransitionObserver: Send + Sync {
    fn on_transition(&self, transition: &Transition, session: &SessionState);
}
