use super::{Action, Screen};
use crate::state::{SessionState, Tab};
use crate::static_data::SampleData;

pub fn render_home(session: &SessionState, data: &SampleData) -> Screen {
    let mut screen = Screen::new(Tab::Home, "Home");

    // Status bar
    let status = if session.online { "● Online" } else { "○ Offline" };
    screen.line(format!("{}    🏆 {} points", status, session.points));

    // Recent trips
    screen.line("Recent Trips");
    for trip in &data.trips {
        screen.line(format!(
            "  {} → {}    +{} points",
            trip.route_name, trip.destination, trip.points_awarded
        ));
    }

    screen.actions = vec![
        Action::SelectTab(Tab::LiveMap),
        Action::SelectTab(Tab::Routes),
        Action::TriggerSos,
    ];
    screen
}
