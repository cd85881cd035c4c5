use super::Screen;
use crate::state::{SessionState, Tab};
use crate::static_data::SampleData;

pub fn render_green(session: &SessionState, _data: &SampleData) -> Screen {
    let mut screen = Screen::new(Tab::Green, "Green Impact");
    screen.line(format!("🌿 {} points saved", session.points));
    screen.line(format!("Level {}", session.level));
    screen
}
