//! RecipePanels component: up to four recipe detail panels in a grid.
//!
//! Panels appear in activation order. Clicking a panel (or pressing `x` on
//! the focused one) dismisses it, which also deactivates its selector.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use cocktail_core::assets::ImageResolver;
use cocktail_core::format::DetailLine;
use cocktail_core::recipe::{Field, RecipeId};
use cocktail_core::selection::Panel;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{style_dosage, style_muted, style_secondary, C_GLASS_ART, C_PRIMARY},
    widgets::pane_chrome::pane_chrome,
};

const LABEL_WIDTH: usize = 9;

pub struct RecipePanels {
    images: Box<dyn ImageResolver>,
    /// Slot of the panel keyboard actions apply to.
    pub focused_slot: usize,
    /// Last-drawn rect of every panel, for click hit-testing.
    panel_areas: Vec<(RecipeId, Rect)>,
}

impl RecipePanels {
    pub fn new(images: Box<dyn ImageResolver>) -> Self {
        Self {
            images,
            focused_slot: 0,
            panel_areas: Vec::new(),
        }
    }

    fn clamp_focus(&mut self, panel_count: usize) {
        self.focused_slot = self.focused_slot.min(panel_count.saturating_sub(1));
    }

    fn panel_at(&self, col: u16, row: u16) -> Option<(usize, RecipeId)> {
        self.panel_areas
            .iter()
            .enumerate()
            .find(|(_, (_, r))| {
                col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
            })
            .map(|(slot, (id, _))| (slot, *id))
    }

    fn body_lines<'a>(&'a self, panel: &'a Panel) -> Vec<Line<'a>> {
        let mut out = Vec::with_capacity(panel.lines.len() + 8);
        for line in panel.lines.iter().filter(|l| l.field != Field::Title) {
            if line.field == Field::Image {
                out.push(Line::from(""));
                match self.images.resolve(&line.text) {
                    Some(art) => out.extend(art.lines().map(|l| {
                        Line::from(Span::styled(format!(" {}", l), Style::default().fg(C_GLASS_ART)))
                    })),
                    None => out.push(Line::from(Span::styled(
                        format!(" no image for {}", line.text),
                        style_muted(),
                    ))),
                }
                continue;
            }
            out.push(detail_line(line));
        }
        out
    }

    fn draw_panel(&self, frame: &mut Frame, area: Rect, slot: usize, focused: bool, panel: &Panel) {
        let title = panel
            .lines
            .iter()
            .find(|l| l.field == Field::Title)
            .map(|l| l.text.as_str())
            .unwrap_or("");
        let key = char::from_digit(slot as u32 + 1, 10);
        let block = pane_chrome(title, key, focused, None);
        frame.render_widget(
            Paragraph::new(self.body_lines(panel))
                .block(block)
                .wrap(Wrap { trim: false }),
            area,
        );
    }
}

/// `  label    before(50ml)after` with the dosage span emphasised.
fn detail_line(line: &DetailLine) -> Line<'_> {
    let (before, dosage, after) = line.split_highlight();
    let mut spans = vec![Span::styled(
        format!(" {:<width$}", line.field.label(), width = LABEL_WIDTH),
        style_secondary(),
    )];
    spans.push(Span::styled(before, Style::default().fg(C_PRIMARY)));
    if !dosage.is_empty() {
        spans.push(Span::styled(dosage, style_dosage()));
    }
    if !after.is_empty() {
        spans.push(Span::styled(after, Style::default().fg(C_PRIMARY)));
    }
    Line::from(spans)
}

/// Split `area` into one rect per panel: a single full pane, two columns,
/// or a 2×2 grid.
pub fn grid(area: Rect, count: usize) -> Vec<Rect> {
    let halves = |r: Rect, dir: Direction| {
        Layout::default()
            .direction(dir)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(r)
    };
    match count {
        0 => Vec::new(),
        1 => vec![area],
        2 => halves(area, Direction::Horizontal).to_vec(),
        _ => {
            let rows = halves(area, Direction::Vertical);
            let mut cells = halves(rows[0], Direction::Horizontal).to_vec();
            cells.extend(halves(rows[1], Direction::Horizontal).iter().copied());
            cells.truncate(count);
            cells
        }
    }
}

impl Component for RecipePanels {
    fn id(&self) -> ComponentId {
        ComponentId::RecipePanels
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || state.panels.is_empty() {
            return vec![];
        }
        let count = state.panels.len();
        self.clamp_focus(count);
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.focused_slot = self.focused_slot.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.focused_slot = (self.focused_slot + 1).min(count - 1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.focused_slot = self.focused_slot.saturating_sub(2);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.focused_slot + 2 < count {
                    self.focused_slot += 2;
                }
            }
            KeyCode::Char(c @ '1'..='4') => {
                let slot = c as usize - '1' as usize;
                if slot < count {
                    self.focused_slot = slot;
                }
            }
            KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace | KeyCode::Enter => {
                return vec![Action::Dismiss(state.panels[self.focused_slot].recipe)];
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if let MouseEventKind::Down(MouseButton::Left) = event.kind {
            if let Some((slot, id)) = self.panel_at(event.column, event.row) {
                self.focused_slot = slot;
                return vec![Action::Dismiss(id)];
            }
        }
        vec![]
    }

    fn on_action(&mut self, _action: &Action, state: &AppState) {
        self.clamp_focus(state.panels.len());
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.clamp_focus(state.panels.len());
        let cells = grid(area, state.panels.len());
        self.panel_areas = state
            .panels
            .iter()
            .zip(cells.iter())
            .map(|(p, r)| (p.recipe, *r))
            .collect();

        if state.panels.is_empty() {
            let block = pane_chrome("recipes", Some('2'), focused, None);
            let hint = if state.selection.catalog().is_empty() {
                "  nothing to show"
            } else {
                "  pick a cocktail to see its recipe (up to 4 at once)"
            };
            frame.render_widget(
                Paragraph::new(Span::styled(hint, style_muted())).block(block),
                area,
            );
            return;
        }

        for (slot, (panel, cell)) in state.panels.iter().zip(cells).enumerate() {
            let panel_focused = focused && slot == self.focused_slot;
            self.draw_panel(frame, cell, slot, panel_focused, panel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cocktail_core::assets::BundledImages;
    use cocktail_core::catalog::Catalog;
    use cocktail_core::format::FormatOptions;
    use cocktail_core::selection::SelectionController;
    use ratatui::crossterm::event::KeyModifiers;

    fn state_with_panels(n: usize) -> AppState {
        let catalog = Catalog::from_json_str(
            r#"[
                {"title": "A", "base": "Gin", "glass": "Rocks"},
                {"title": "B", "base": "Rum", "glass": "Coupe"},
                {"title": "C", "base": "Vodka", "glass": "Highball"},
                {"title": "D", "base": "Pisco", "glass": "Coupe"}
            ]"#,
        )
        .unwrap();
        let mut s = AppState::new(
            SelectionController::new(catalog, FormatOptions::default()),
            None,
        );
        for i in 0..n {
            let instruction = s.selection.toggle(RecipeId(i));
            s.apply(instruction);
        }
        s
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_grid_shapes() {
        let area = Rect::new(0, 0, 80, 40);
        assert!(grid(area, 0).is_empty());
        assert_eq!(grid(area, 1), vec![area]);
        let two = grid(area, 2);
        assert_eq!(two.len(), 2);
        assert_eq!(two[0].height, 40);
        let three = grid(area, 3);
        assert_eq!(three.len(), 3);
        assert_eq!(three[2].y, 20);
        assert_eq!(grid(area, 4).len(), 4);
    }

    #[test]
    fn test_x_dismisses_focused_panel() {
        let s = state_with_panels(3);
        let mut panels = RecipePanels::new(Box::new(BundledImages));
        panels.handle_key(key(KeyCode::Char('l')), &s);
        assert_eq!(
            panels.handle_key(key(KeyCode::Char('x')), &s),
            vec![Action::Dismiss(RecipeId(1))]
        );
        panels.handle_key(key(KeyCode::Char('3')), &s);
        assert_eq!(
            panels.handle_key(key(KeyCode::Delete), &s),
            vec![Action::Dismiss(RecipeId(2))]
        );
    }

    #[test]
    fn test_focus_is_clamped_after_removal() {
        let mut s = state_with_panels(3);
        let mut panels = RecipePanels::new(Box::new(BundledImages));
        panels.focused_slot = 2;
        let instruction = s.selection.dismiss(RecipeId(2));
        s.apply(instruction);
        panels.on_action(&Action::Dismiss(RecipeId(2)), &s);
        assert_eq!(panels.focused_slot, 1);
    }

    #[test]
    fn test_keys_without_panels_do_nothing() {
        let s = state_with_panels(0);
        let mut panels = RecipePanels::new(Box::new(BundledImages));
        assert!(panels.handle_key(key(KeyCode::Char('x')), &s).is_empty());
    }

    #[test]
    fn test_detail_line_spans() {
        let line = DetailLine {
            field: Field::Liqueur1,
            text: "Rum (50ml) neat".to_string(),
            highlight: Some(4..10),
        };
        let rendered = detail_line(&line);
        let texts: Vec<&str> = rendered.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec![" liqueur  ", "Rum ", "(50ml)", " neat"]);
        assert_eq!(rendered.spans[2].style, style_dosage());
    }
}
