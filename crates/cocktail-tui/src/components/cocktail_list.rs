//! CocktailList component: the left pane of selectors, in catalog order.
//!
//! A selector's look (active marker, slot number) is derived from the
//! selection on every draw; the list itself only owns the cursor.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use cocktail_core::recipe::RecipeId;
use cocktail_core::selection::MAX_ACTIVE;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_ACTIVE, C_MUTED, C_NUMBER_HINT, C_PRIMARY, C_SECONDARY, C_SELECTION_BG},
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ScrollableList,
    },
};

pub struct CocktailList {
    pub list: ScrollableList<RecipeId>,
    list_state: ListState,
}

impl CocktailList {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(),
            list_state: ListState::default(),
        }
    }

    /// Rebuild the rows from the catalog.
    pub fn sync(&mut self, state: &AppState) {
        let ids = state.selection.catalog().iter().map(|(id, _)| id).collect();
        self.list.set_items(ids);
    }

    pub fn selected_recipe(&self) -> Option<RecipeId> {
        self.list.selected_item().copied()
    }

    fn render_item(&self, id: RecipeId, is_cursor: bool, state: &AppState) -> ListItem<'static> {
        let title = state.recipe(id).map(|r| r.title.as_str()).unwrap_or("");
        let title = if state.options().uppercase {
            title.to_uppercase()
        } else {
            title.to_string()
        };

        let (marker, slot, name_color) = match state.slot_label(id) {
            Some(slot) => ("●", format!("{} ", slot), C_ACTIVE),
            None if is_cursor => ("○", "  ".to_string(), C_PRIMARY),
            None => ("○", "  ".to_string(), C_SECONDARY),
        };
        let marker_color = if state.selection.is_active(id) {
            C_ACTIVE
        } else {
            C_MUTED
        };
        let name_style = if is_cursor || state.selection.is_active(id) {
            Style::default().fg(name_color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(name_color)
        };

        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(marker, Style::default().fg(marker_color)),
            Span::raw(" "),
            Span::styled(slot, Style::default().fg(C_NUMBER_HINT)),
            Span::styled(title, name_style),
        ]);
        let bg = if is_cursor {
            Style::default().bg(C_SELECTION_BG)
        } else {
            Style::default()
        };
        ListItem::new(line).style(bg)
    }
}

impl Component for CocktailList {
    fn id(&self) -> ComponentId {
        ComponentId::CocktailList
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(step),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = self.selected_recipe() {
                    return vec![Action::Toggle(id)];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                // +1 for the top border
                if event.row <= area.y {
                    return vec![];
                }
                let rel_row = (event.row - area.y - 1) as usize;
                if let Some(&id) = self.list.handle_click(rel_row) {
                    return vec![Action::Toggle(id)];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, state: &AppState) {
        if *action == Action::ReloadCatalog {
            self.sync(state);
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let active = state.selection.active().len();
        let badge = Badge {
            text: format!("{}/{}", active, MAX_ACTIVE),
            color: if active == MAX_ACTIVE { C_ACCENT } else { C_ACTIVE },
        };
        let block = pane_chrome("cocktails", Some('1'), focused, Some(badge));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.list.is_empty() {
            let mut lines = vec![Line::from(Span::styled(
                if state.load_error.is_some() {
                    "  no cocktails loaded"
                } else {
                    "  no cocktails available"
                },
                Style::default().fg(C_MUTED),
            ))];
            if let Some(reason) = &state.load_error {
                lines.push(Line::from(Span::styled(
                    format!("  {}", reason),
                    Style::default().fg(C_ACCENT),
                )));
            }
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
            return;
        }

        let height = inner.height as usize;
        self.list.ensure_visible(height);
        let cursor = self.list.selected;
        let items: Vec<ListItem> = self
            .list
            .visible_items(height)
            .into_iter()
            .map(|(idx, &id)| self.render_item(id, idx == cursor, state))
            .collect();

        self.list_state
            .select(Some(cursor.saturating_sub(self.list.scroll_offset)));
        frame.render_stateful_widget(List::new(items), inner, &mut self.list_state);
    }
}
