//! Header component: one-row top bar.
//!
//! App name, active panel count, current view and the upper-case flag.
//! Not focusable.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use cocktail_core::selection::MAX_ACTIVE;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{style_title, C_ACCENT, C_ACTIVE, C_MUTED, C_SECONDARY},
};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }
}

fn build_line(state: &AppState) -> Line<'static> {
    let options = state.options();
    let active = state.selection.active().len();
    let count_color = if state.selection.is_full() {
        C_ACCENT
    } else if active > 0 {
        C_ACTIVE
    } else {
        C_MUTED
    };

    let mut spans = vec![
        Span::styled(" cocktails", style_title()),
        Span::styled("  │  ", Style::default().fg(C_MUTED)),
        Span::styled(
            format!("{}/{} shown", active, MAX_ACTIVE),
            Style::default().fg(count_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  │  view: ", Style::default().fg(C_MUTED)),
        Span::styled(options.view.label(), Style::default().fg(C_SECONDARY)),
    ];
    if options.uppercase {
        spans.push(Span::styled("  │  ", Style::default().fg(C_MUTED)));
        spans.push(Span::styled("ABC", Style::default().fg(C_SECONDARY)));
    }
    if let Some(reason) = &state.load_error {
        spans.push(Span::styled("  │  ", Style::default().fg(C_MUTED)));
        spans.push(Span::styled(
            format!("catalog unavailable: {}", reason),
            Style::default().fg(C_ACCENT),
        ));
    }
    Line::from(spans)
}

impl Component for Header {
    fn id(&self) -> ComponentId {
        ComponentId::CocktailList
    }

    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        frame.render_widget(Paragraph::new(build_line(state)), area);
    }
}
