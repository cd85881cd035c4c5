use super::Screen;
use crate::state::{SessionState, Tab};
use crate::static_data::SampleData;

pub fn render_lost_found(_session: &SessionState, data: &SampleData) -> Screen {
    let mut screen = Screen::new(Tab::LostFound, "Lost & Found");
    for item in &data.lost_items {
        screen.line(format!("{}    {}", item.description, item.status.badge()));
        screen.line(format!("  {} | {}", item.location, item.date.format("%Y-%m-%d")));
    }
    screen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_items_with_badges() {
        let screen = render_lost_found(&SessionState::default(), &SampleData::builtin());
        assert!(screen.contains("Blue Backpack    FOUND"));
        assert!(screen.contains("Mobile Phone    CLAIMED"));
        assert!(screen.contains("Central Station | 2025-09-10"));
        assert!(screen.actions.is_empty());
    }
}
