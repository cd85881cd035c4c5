use super::{Action, Screen};
use crate::state::{SessionState, Tab};
use crate::static_data::SampleData;

pub fn render_live_map(session: &SessionState, data: &SampleData) -> Screen {
    let mut screen = Screen::new(Tab::LiveMap, "Live Buses");
    screen.line("[ Map Placeholder ]");
    screen.line(format!("Tracking: {}", session.selected_route));

    let mut any = false;
    for bus in data.buses_on_route(&session.selected_route) {
        any = true;
        screen.line(format!(
            "  {}  {}/{} passengers ({}% full)",
            bus.id,
            bus.passenger_count,
            bus.capacity,
            bus.occupancy_percent()
        ));
    }
    if !any {
        screen.line(format!("  No live buses for {}", session.selected_route));
    }

    screen.actions.push(Action::SelectTab(Tab::Routes));
    screen
}
