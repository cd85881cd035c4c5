use super::{Action, Overlay};

pub const CHAT_GREETING: &str = "Hello! How can I help you?";

pub fn render_emergency() -> Overlay {
    Overlay {
        title: "EMERGENCY SOS ACTIVATED",
        lines: vec!["Authorities have been notified. Help is on the way.".to_string()],
        actions: Vec::new(),
    }
}

// Sending is not wired to any chat backend.
pub fn render_chat_panel() -> Overlay {
    Overlay {
        title: "SmartBot",
        lines: vec![CHAT_GREETING.to_string(), "> Type your message...".to_string()],
        actions: vec![Action::CloseChat],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_panel_has_greeting_input_and_close() {
        let panel = render_chat_panel();
        assert_eq!(panel.title, "SmartBot");
        assert_eq!(
            panel.lines,
            vec![CHAT_GREETING.to_string(), "> Type your message...".to_string()]
        );
        assert_eq!(panel.actions, vec![Action::CloseChat]);
    }

    #[test]
    fn emergency_overlay_text() {
        let overlay = render_emergency();
        assert_eq!(overlay.title, "EMERGENCY SOS ACTIVATED");
        assert!(overlay.lines[0].contains("Help is on the way."));
    }
}
