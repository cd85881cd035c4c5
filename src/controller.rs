use crate::error::{AppError, Result};
use crate::events::{Transition, TransitionObserver};
use crate::localization::Language;
use crate::state::{SessionState, Tab};
use crate::static_data::SampleData;
use crate::views::{self, Action, Frame};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long the emergency overlay stays up after the last SOS.
pub const SOS_DURATION: Duration = Duration::from_millis(5000);

struct Shared {
    session: SessionState,
    // Bumped on every SOS; a reset only applies to the activation that armed it.
    sos_generation: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackReceipt {
    pub text: String,
    pub submitted_at: DateTime<Utc>,
}

/// Owns the session and applies every user-triggered operation to it.
///
/// Operations run to completion before returning. The only deferred work is the
/// SOS reset, which runs as a Tokio task; [`AppController::trigger_sos`] refuses
/// to raise the overlay when no runtime is available to clear it.
pub struct AppController {
    shared: Arc<Mutex<Shared>>,
    data: Arc<SampleData>,
    feedback_draft: String,
    sos_reset: Option<JoinHandle<()>>,
    observers: Vec<Arc<dyn TransitionObserver>>,
}

impl AppController {
    pub fn new(session: SessionState, data: Arc<SampleData>) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                session,
                sos_generation: 0,
            })),
            data,
            feedback_draft: String::new(),
            sos_reset: None,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Arc<dyn TransitionObserver>) {
        self.observers.push(observer);
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> SessionState {
        self.shared.lock().session.clone()
    }

    pub fn data(&self) -> &SampleData {
        &self.data
    }

    pub fn feedback_draft(&self) -> &str {
        &self.feedback_draft
    }

    pub fn frame(&self) -> Frame {
        views::render_frame(&self.session(), &self.data, &self.feedback_draft)
    }

    pub fn select_tab(&mut self, tab: Tab) {
        let previous = self.update(|s| std::mem::replace(&mut s.active_tab, tab));
        if previous == Tab::Feedback && tab != Tab::Feedback && !self.feedback_draft.is_empty() {
            tracing::debug!("Discarding unsubmitted feedback");
            self.feedback_draft.clear();
        }
        tracing::info!(from = %previous, to = %tab, "Tab selected");
        self.publish(Transition::TabSelected(tab));
    }

    pub fn toggle_connectivity(&mut self) -> bool {
        let online = self.update(|s| {
            s.online = !s.online;
            s.online
        });
        tracing::info!(online, "Connectivity toggled");
        self.publish(Transition::ConnectivityToggled { online });
        online
    }

    pub fn toggle_voice(&mut self) -> bool {
        let enabled = self.update(|s| {
            s.voice_enabled = !s.voice_enabled;
            s.voice_enabled
        });
        tracing::info!(enabled, "Voice toggled");
        self.publish(Transition::VoiceToggled { enabled });
        enabled
    }

    pub fn set_language(&mut self, language: Language) {
        self.update(|s| s.language = language);
        tracing::info!(%language, "Language changed");
        self.publish(Transition::LanguageChanged(language));
    }

    /// Add `amount` green points and return the new total. Negative awards are
    /// rejected and leave the total untouched.
    pub fn award_points(&mut self, amount: i64) -> Result<u64> {
        let amount = u64::try_from(amount).map_err(|_| {
            tracing::warn!(amount, "Rejected negative point award");
            AppError::NegativeAward(amount)
        })?;
        let total = self.update(|s| {
            s.points = s.points.saturating_add(amount);
            s.points
        });
        tracing::info!(amount, total, "Points awarded");
        self.publish(Transition::PointsAwarded { amount, total });
        Ok(total)
    }

    /// Raise the emergency overlay and (re)start its reset countdown. A repeat
    /// while active cancels the pending reset, so the overlay stays up for a
    /// full [`SOS_DURATION`] after the latest call.
    pub fn trigger_sos(&mut self) -> Result<()> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("Rejected SOS: no runtime to schedule the reset");
            return Err(AppError::NoRuntime);
        };

        let generation = {
            let mut shared = self.shared.lock();
            shared.session.emergency_active = true;
            shared.sos_generation += 1;
            shared.sos_generation
        };

        if let Some(stale) = self.sos_reset.take() {
            stale.abort();
        }

        let shared = self.shared.clone();
        self.sos_reset = Some(runtime.spawn(async move {
            tokio::time::sleep(SOS_DURATION).await;
            let mut guard = shared.lock();
            if guard.sos_generation == generation {
                guard.session.emergency_active = false;
                tracing::info!("Emergency overlay cleared");
            }
        }));

        tracing::warn!(generation, "Emergency SOS triggered");
        self.publish(Transition::SosTriggered);
        Ok(())
    }

    pub fn select_route(&mut self, route_name: &str) {
        self.update(|s| s.selected_route = route_name.into());
        tracing::info!(route = route_name, "Route selected");
        self.publish(Transition::RouteSelected(route_name.into()));
    }

    /// "Track Live" from the routes list.
    pub fn track_route(&mut self, route_name: &str) {
        self.select_route(route_name);
        self.select_tab(Tab::LiveMap);
    }

    pub fn open_chat(&mut self) {
        self.update(|s| s.chat_panel_open = true);
        self.publish(Transition::ChatOpened);
    }

    pub fn close_chat(&mut self) {
        self.update(|s| s.chat_panel_open = false);
        self.publish(Transition::ChatClosed);
    }

    pub fn edit_feedback(&mut self, text: &str) {
        self.feedback_draft = text.to_string();
    }

    /// Accept the current draft. There is no feedback service; the text is
    /// logged and the draft cleared.
    pub fn submit_feedback(&mut self) -> Result<FeedbackReceipt> {
        let text = self.feedback_draft.trim();
        if text.is_empty() {
            return Err(AppError::EmptyFeedback);
        }
        let receipt = FeedbackReceipt {
            text: text.to_string(),
            submitted_at: Utc::now(),
        };
        self.feedback_draft.clear();
        tracing::info!(
            at = %receipt.submitted_at.to_rfc3339(),
            "Feedback submitted: {}",
            receipt.text
        );
        self.publish(Transition::FeedbackSubmitted);
        Ok(receipt)
    }

    /// Run the operation behind a screen action.
    pub fn perform(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::SelectTab(tab) => self.select_tab(*tab),
            Action::TrackRoute(route) => self.track_route(route),
            Action::TriggerSos => self.trigger_sos()?,
            Action::SubmitFeedback => {
                self.submit_feedback()?;
            }
            Action::CloseChat => self.close_chat(),
            Action::ToggleVoice => {
                self.toggle_voice();
            }
            Action::ToggleConnectivity => {
                self.toggle_connectivity();
            }
            Action::OpenChat => self.open_chat(),
        }
        Ok(())
    }

    fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        f(&mut self.shared.lock().session)
    }

    fn publish(&self, transition: Transition) {
        let session = self.session();
        for observer in &self.observers {
            observer.on_transition(&transition, &session);
        }
    }
}

impl Drop for AppController {
    fn drop(&mut self) {
        if let Some(pending) = self.sos_reset.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::tests::RecordingSpeech;
    use crate::speech::{SOS_ANNOUNCEMENT, SpeechAnnouncer};
    use crate::views::CHAT_GREETING;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<Transition>>,
    }

    impl TransitionObserver for Recorder {
        fn on_transition(&self, transition: &Transition, _session: &SessionState) {
            self.seen.lock().push(transition.clone());
        }
    }

    fn controller() -> AppController {
        AppController::new(SessionState::default(), Arc::new(SampleData::builtin()))
    }

    #[test]
    fn awards_accumulate_and_negative_is_rejected() {
        let mut app = controller();
        assert_eq!(app.award_points(15).unwrap(), 465);
        assert_eq!(app.award_points(12).unwrap(), 477);
        assert!(matches!(app.award_points(-5), Err(AppError::NegativeAward(-5))));
        assert_eq!(app.session().points, 477);
    }

    #[test]
    fn rejected_award_publishes_nothing() {
        let mut app = controller();
        let rec = Arc::new(Recorder::default());
        app.subscribe(rec.clone());
        let _ = app.award_points(-1);
        assert!(rec.seen.lock().is_empty());
    }

    #[test]
    fn toggles_are_involutions() {
        let mut app = controller();
        let before = app.session();
        app.toggle_voice();
        app.toggle_voice();
        app.toggle_connectivity();
        app.toggle_connectivity();
        assert_eq!(app.session(), before);
    }

    #[test]
    fn track_route_selects_then_navigates() {
        let mut app = controller();
        let rec = Arc::new(Recorder::default());
        app.subscribe(rec.clone());
        app.track_route("Route 3");

        let s = app.session();
        assert_eq!(s.selected_route, "Route 3");
        assert_eq!(s.active_tab, Tab::LiveMap);
        assert_eq!(
            rec.seen.lock().as_slice(),
            &[
                Transition::RouteSelected("Route 3".into()),
                Transition::TabSelected(Tab::LiveMap),
            ]
        );
    }

    #[test]
    fn leaving_feedback_discards_draft() {
        let mut app = controller();
        app.select_tab(Tab::Feedback);
        app.edit_feedback("seats were dirty");
        app.select_tab(Tab::Feedback);
        assert_eq!(app.feedback_draft(), "seats were dirty");
        app.select_tab(Tab::Home);
        assert_eq!(app.feedback_draft(), "");
    }

    #[test]
    fn submit_feedback_requires_text() {
        let mut app = controller();
        app.edit_feedback("   ");
        assert!(matches!(app.submit_feedback(), Err(AppError::EmptyFeedback)));
        app.edit_feedback(" More buses on Route 8 ");
        let receipt = app.submit_feedback().unwrap();
        assert_eq!(receipt.text, "More buses on Route 8");
        assert_eq!(app.feedback_draft(), "");
    }

    #[test]
    fn sos_without_runtime_is_rejected_and_state_untouched() {
        let mut app = controller();
        let rec = Arc::new(Recorder::default());
        app.subscribe(rec.clone());

        assert!(matches!(app.trigger_sos(), Err(AppError::NoRuntime)));
        assert!(!app.session().emergency_active);
        assert!(app.frame().emergency.is_none());
        assert!(rec.seen.lock().is_empty());
    }

    #[test]
    fn header_actions_reach_toggles_and_chat() {
        let mut app = controller();
        let actions = app.frame().header.actions;
        assert_eq!(
            actions,
            vec![Action::ToggleVoice, Action::ToggleConnectivity, Action::OpenChat]
        );
        for action in &actions {
            app.perform(action).unwrap();
        }
        let s = app.session();
        assert!(s.voice_enabled);
        assert!(!s.online);
        assert!(s.chat_panel_open);
    }

    #[test]
    fn chat_panel_open_close() {
        let mut app = controller();
        app.open_chat();
        let chat = app.frame().chat.unwrap();
        assert_eq!(chat.title, "SmartBot");
        assert!(chat.lines.iter().any(|l| l == CHAT_GREETING));
        assert!(chat.lines.iter().any(|l| l.contains("Type your message...")));
        app.perform(&Action::CloseChat).unwrap();
        assert!(!app.session().chat_panel_open);
    }

    #[test]
    fn announcements_follow_voice_and_language() {
        let rec = Arc::new(RecordingSpeech::default());
        let mut app = controller();
        app.subscribe(Arc::new(SpeechAnnouncer::new(Some(rec.clone()))));

        app.select_tab(Tab::Routes);
        assert!(rec.spoken.lock().is_empty());

        app.toggle_voice();
        app.set_language(Language::Hindi);
        app.select_tab(Tab::Routes);
        app.select_tab(Tab::Green);
        app.award_points(15).unwrap();

        assert_eq!(
            rec.spoken.lock().as_slice(),
            &[
                ("Routes selected".to_string(), "hi".to_string()),
                ("You earned 15 points!".to_string(), "hi".to_string()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn sos_clears_after_five_seconds() {
        let rec = Arc::new(RecordingSpeech::default());
        let mut app = AppController::new(
            SessionState::default().with_voice(true),
            Arc::new(SampleData::builtin()),
        );
        app.subscribe(Arc::new(SpeechAnnouncer::new(Some(rec.clone()))));

        app.trigger_sos().unwrap();
        assert!(app.session().emergency_active);
        assert_eq!(rec.spoken.lock()[0].0, SOS_ANNOUNCEMENT);

        tokio::time::sleep(Duration::from_millis(4_999)).await;
        assert!(app.session().emergency_active);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!app.session().emergency_active);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_sos_restarts_window() {
        let mut app = controller();
        app.trigger_sos().unwrap();
        tokio::time::sleep(Duration::from_millis(3_000)).await;
        app.trigger_sos().unwrap();

        // First activation's deadline passes; the overlay must stay up.
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        assert!(app.session().emergency_active);

        tokio::time::sleep(Duration::from_millis(2_499)).await;
        assert!(app.session().emergency_active);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!app.session().emergency_active);
    }

    #[tokio::test(start_paused = true)]
    async fn other_events_flow_while_sos_pending() {
        let mut app = controller();
        app.trigger_sos().unwrap();
        app.select_tab(Tab::LostFound);
        app.toggle_connectivity();
        assert!(app.frame().emergency.is_some());

        tokio::time::sleep(SOS_DURATION + Duration::from_millis(1)).await;
        let frame = app.frame();
        assert!(frame.emergency.is_none());
        assert_eq!(frame.body.tab, Tab::LostFound);
    }
}
