//! Keys bar: bottom line with the current mode and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::ComponentId;
use crate::theme::{C_MUTED, C_SECONDARY};

fn keys_for(focused: Option<ComponentId>) -> &'static str {
    match focused {
        Some(ComponentId::RecipePanels) => {
            " ←→/hl panel  x/Del dismiss  c reset  r reload  v view  u case  Tab list  K keys  ? help  q quit"
        }
        _ => {
            " ↑↓/jk move  Enter/Space show/hide  c reset  r reload  v view  u case  Tab panels  K keys  ? help  q quit"
        }
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, focused: Option<ComponentId>) {
    let label = match focused {
        Some(ComponentId::RecipePanels) => "PANELS",
        _ => "LIST",
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            Style::default().fg(C_SECONDARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys_for(focused), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
