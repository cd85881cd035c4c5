use super::{Action, Screen};
use crate::state::{SessionState, Tab};
use crate::static_data::SampleData;

pub fn render_routes(_session: &SessionState, data: &SampleData) -> Screen {
    let mut screen = Screen::new(Tab::Routes, "Routes");
    for route in &data.routes {
        screen.line(format!("{}    [{}]", route.name, route.next_arrival_label));
        screen.line(format!("  {} → {}", route.origin, route.destination));
        screen.line(format!("  🚌 {} buses active", route.active_bus_count));
        screen.actions.push(Action::TrackRoute(route.name.clone()));
    }
    screen
}
