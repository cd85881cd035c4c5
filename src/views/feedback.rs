use super::{Action, Screen};
use crate::state::{SessionState, Tab};
use crate::static_data::SampleData;

pub const FEEDBACK_PLACEHOLDER: &str = "Give your feedback...";

pub fn render_feedback(_session: &SessionState, _data: &SampleData, draft: &str) -> Screen {
    let mut screen = Screen::new(Tab::Feedback, "Feedback");
    if draft.trim().is_empty() {
        screen.line(format!("> {}", FEEDBACK_PLACEHOLDER));
    } else {
        screen.line(format!("> {}", draft));
    }
    screen.actions.push(Action::SubmitFeedback);
    screen
}
