//! App: component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A blocking task reads terminal events and forwards them over a `tokio::mpsc` channel.
//! - The event loop draws a frame, then awaits the next message or toast tick.
//! - Components return `Vec<Action>`; App dispatches each Action to the
//!   selection controller and applies the returned `RenderInstruction`.

use std::io::{self, Stdout};
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use cocktail_core::assets::{BundledAssets, BundledImages};
use cocktail_core::selection::MAX_ACTIVE;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{
        cocktail_list::CocktailList, header::Header, help_overlay::HelpOverlay,
        recipe_panels::RecipePanels,
    },
    layout::LayoutManager,
    theme::C_BG,
    widgets::{status_bar, toast::ToastManager},
};

/// Messages flowing into the event loop.
#[derive(Debug)]
pub enum AppMessage {
    Event(Event),
}

/// Last-drawn rect of every clickable pane.
#[derive(Debug, Default, Clone, Copy)]
struct PaneAreas {
    cocktail_list: Rect,
    recipe_panels: Rect,
}

fn hit(r: Rect, col: u16, row: u16) -> bool {
    r.width > 0 && r.height > 0 && col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

pub struct App {
    state: AppState,
    header: Header,
    cocktail_list: CocktailList,
    recipe_panels: RecipePanels,
    help_overlay: HelpOverlay,
    layout: LayoutManager,
    toast: ToastManager,
    pane_areas: PaneAreas,
    should_quit: bool,
}

impl App {
    pub fn new(state: AppState, show_keys_bar: bool) -> Self {
        let mut app = Self {
            state,
            header: Header::new(),
            cocktail_list: CocktailList::new(),
            recipe_panels: RecipePanels::new(Box::new(BundledImages)),
            help_overlay: HelpOverlay::new(),
            layout: LayoutManager::new(show_keys_bar),
            toast: ToastManager::new(),
            pane_areas: PaneAreas::default(),
            should_quit: false,
        };
        app.cocktail_list.sync(&app.state);

        if let Some(reason) = &app.state.load_error {
            app.toast.error(format!("Failed to load cocktails: {}", reason));
        } else if app.state.selection.catalog().is_empty() {
            app.toast.warning("No cocktails available.");
        }
        app
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard/mouse events ────────────────────────────
        // Polls so the task notices a closed channel and exits after quit.
        tokio::task::spawn_blocking(move || loop {
            if tx.is_closed() {
                break;
            }
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if tx.blocking_send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                Ok(false) => {}
                Err(_) => break,
            }
        });

        let result = self.event_loop(&mut terminal, &mut rx).await;

        // ── Teardown ──────────────────────────────────────────────────────────
        drop(rx);
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;
        info!("cocktails exiting");

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        rx: &mut mpsc::Receiver<AppMessage>,
    ) -> anyhow::Result<()> {
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                return Ok(());
            }

            tokio::select! {
                msg = rx.recv() => match msg {
                    Some(msg) => {
                        self.handle_message(msg);
                        needs_redraw = true;
                    }
                    // Event reader stopped; nothing more can arrive.
                    None => return Ok(()),
                },

                _ = toast_tick.tick() => {
                    needs_redraw = self.toast.tick();
                }
            }
        }
    }

    fn handle_message(&mut self, msg: AppMessage) {
        let actions = match msg {
            AppMessage::Event(Event::Key(key)) => self.handle_key(key),
            AppMessage::Event(Event::Mouse(mouse)) => self.handle_mouse(mouse),
            AppMessage::Event(_) => vec![],
        };
        for action in actions {
            self.dispatch(action);
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        // Global keys, always active regardless of focus
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::Quit];
            }
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            _ => {}
        }

        // Help overlay captures all keys when visible
        if self.layout.show_help {
            let actions = self.help_overlay.handle_key(key, &self.state);
            if !actions.is_empty() {
                return actions;
            }
            // Any other key closes the overlay
            return vec![Action::ToggleHelp];
        }

        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            KeyCode::Char('c') => return vec![Action::ResetAll],
            KeyCode::Char('r') => return vec![Action::ReloadCatalog],
            KeyCode::Char('v') => return vec![Action::CycleView],
            KeyCode::Char('u') => return vec![Action::ToggleUppercase],
            KeyCode::Char('K') => return vec![Action::ToggleKeys],
            _ => {}
        }

        // Dispatch to the focused component
        let s = &self.state;
        match self.layout.focused() {
            Some(ComponentId::CocktailList) => self.cocktail_list.handle_key(key, s),
            Some(ComponentId::RecipePanels) => self.recipe_panels.handle_key(key, s),
            Some(ComponentId::HelpOverlay) => self.help_overlay.handle_key(key, s),
            None => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let relevant = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !relevant {
            return vec![];
        }
        if self.layout.show_help {
            if matches!(event.kind, MouseEventKind::Down(_)) {
                return vec![Action::ToggleHelp];
            }
            return vec![];
        }

        let (col, row) = (event.column, event.row);
        let areas = self.pane_areas;
        let s = &self.state;

        // Focus follows the click.
        macro_rules! click_pane {
            ($id:expr, $component:expr, $area:expr) => {{
                let mut actions = $component.handle_mouse(event, $area, s);
                if self.layout.focused() != Some($id) {
                    actions.insert(0, Action::FocusPane($id));
                }
                return actions;
            }};
        }

        if hit(areas.cocktail_list, col, row) {
            click_pane!(ComponentId::CocktailList, self.cocktail_list, areas.cocktail_list);
        }
        if hit(areas.recipe_panels, col, row) {
            click_pane!(ComponentId::RecipePanels, self.recipe_panels, areas.recipe_panels);
        }
        vec![]
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        self.apply_action(&action);

        // Let components react to the new state (cursor clamps, overlay toggles).
        let s = &self.state;
        self.cocktail_list.on_action(&action, s);
        self.recipe_panels.on_action(&action, s);
        self.help_overlay.on_action(&action, s);
    }

    fn apply_action(&mut self, action: &Action) {
        debug!("apply_action: {:?}", action);
        match *action {
            // ── Selection ─────────────────────────────────────────────────────
            Action::Toggle(id) => {
                let blocked = self.state.selection.is_full() && !self.state.selection.is_active(id);
                let instruction = self.state.selection.toggle(id);
                if blocked && instruction.is_noop() {
                    self.toast
                        .info(format!("{} cocktails already shown", MAX_ACTIVE));
                }
                self.state.apply(instruction);
            }
            Action::Dismiss(id) => {
                let instruction = self.state.selection.dismiss(id);
                self.state.apply(instruction);
            }
            Action::ResetAll => {
                let instruction = self.state.selection.reset_all();
                self.state.apply(instruction);
            }
            Action::ReloadCatalog => {
                let instruction = self.state.selection.reset_all();
                self.state.apply(instruction);
                match self.state.selection.reload_catalog(&BundledAssets) {
                    Ok(()) => {
                        self.state.load_error = None;
                        let n = self.state.selection.catalog().len();
                        info!("catalog reloaded: {} recipes", n);
                        if n == 0 {
                            self.toast.warning("No cocktails available.");
                        } else {
                            self.toast.info(format!("Reloaded {} cocktails", n));
                        }
                    }
                    Err(e) => {
                        warn!("catalog reload failed: {}", e);
                        self.toast.error(format!("Failed to load cocktails: {}", e.reason()));
                        self.state.load_error = Some(e.reason());
                    }
                }
            }

            // ── Presentation ──────────────────────────────────────────────────
            Action::CycleView => {
                let mut options = self.state.options();
                options.view = options.view.next();
                let instruction = self.state.selection.set_options(options);
                self.state.apply(instruction);
                self.toast.info(format!("view: {}", options.view.label()));
            }
            Action::ToggleUppercase => {
                let mut options = self.state.options();
                options.uppercase = !options.uppercase;
                let instruction = self.state.selection.set_options(options);
                self.state.apply(instruction);
            }

            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.layout.focus_next();
            }
            Action::FocusPrev => {
                self.layout.focus_prev();
            }
            Action::FocusPane(id) => self.layout.focus_set(id),

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleHelp => self.layout.show_help = !self.layout.show_help,
            Action::ToggleKeys => self.layout.show_keys_bar = !self.layout.show_keys_bar,

            Action::Quit => self.should_quit = true,
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let status_h = if self.layout.show_keys_bar { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(status_h),
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(outer[1]);

        self.header.draw(frame, outer[0], false, &self.state);

        let focused = self.layout.focused();
        let focus = &self.layout.focus;
        self.cocktail_list.draw(
            frame,
            body[0],
            focus.is_focused(ComponentId::CocktailList),
            &self.state,
        );
        self.recipe_panels.draw(
            frame,
            body[1],
            focus.is_focused(ComponentId::RecipePanels),
            &self.state,
        );
        self.pane_areas = PaneAreas {
            cocktail_list: body[0],
            recipe_panels: body[1],
        };

        if self.layout.show_keys_bar {
            status_bar::draw_keys_bar(frame, outer[2], focused);
        }

        // ── Help overlay (on top of everything) ──────────────────────────────
        if self.layout.show_help {
            self.help_overlay.draw(frame, area, false, &self.state);
        }

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cocktail_core::catalog::Catalog;
    use cocktail_core::format::{FormatOptions, ViewMode};
    use cocktail_core::recipe::RecipeId;
    use cocktail_core::selection::SelectionController;
    use ratatui::backend::TestBackend;
    use ratatui::crossterm::event::MouseButton;

    const SIX: &str = r#"[
        {"title": "Margarita", "base": "Tequila", "liqueur1": "Triple sec (20ml)", "glass": "Coupe", "image": "coupe"},
        {"title": "Mojito", "base": "Rum", "glass": "Highball"},
        {"title": "Negroni", "base": "Gin", "glass": "Rocks"},
        {"title": "Paloma", "base": "Tequila", "glass": "Highball"},
        {"title": "Bellini", "base": "Prosecco", "glass": "Flute"},
        {"title": "Gimlet", "base": "Gin", "glass": "Coupe"}
    ]"#;

    fn app() -> App {
        let catalog = Catalog::from_json_str(SIX).unwrap();
        let state = AppState::new(
            SelectionController::new(catalog, FormatOptions::default()),
            None,
        );
        App::new(state, true)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, code: KeyCode) {
        let actions = app.handle_key(key(code));
        for action in actions {
            app.dispatch(action);
        }
    }

    fn click(app: &mut App, column: u16, row: u16) {
        let actions = app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
        for action in actions {
            app.dispatch(action);
        }
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn toasts(app: &App) -> Vec<String> {
        app.toast.messages().map(|(_, m)| m.to_string()).collect()
    }

    #[test]
    fn test_fifth_toggle_shows_cap_notice() {
        let mut a = app();
        for i in 0..4 {
            a.dispatch(Action::Toggle(RecipeId(i)));
        }
        assert!(toasts(&a).is_empty());
        a.dispatch(Action::Toggle(RecipeId(4)));
        assert_eq!(a.state.selection.active().len(), MAX_ACTIVE);
        assert_eq!(a.state.panels.len(), MAX_ACTIVE);
        assert_eq!(toasts(&a), vec!["4 cocktails already shown".to_string()]);

        // Deactivating still works at the cap.
        a.dispatch(Action::Toggle(RecipeId(0)));
        assert_eq!(a.state.panels.len(), 3);
    }

    #[test]
    fn test_enter_on_list_toggles_cursor_row() {
        let mut a = app();
        press(&mut a, KeyCode::Char('j'));
        press(&mut a, KeyCode::Enter);
        assert_eq!(a.state.selection.active(), &[RecipeId(1)]);
        press(&mut a, KeyCode::Char(' '));
        assert!(a.state.selection.active().is_empty());
    }

    #[test]
    fn test_reset_key_clears_panels() {
        let mut a = app();
        a.dispatch(Action::Toggle(RecipeId(2)));
        a.dispatch(Action::Toggle(RecipeId(5)));
        press(&mut a, KeyCode::Char('c'));
        assert!(a.state.selection.active().is_empty());
        assert!(a.state.panels.is_empty());
    }

    #[test]
    fn test_view_and_case_redraw_panels() {
        let mut a = app();
        a.dispatch(Action::Toggle(RecipeId(0)));
        press(&mut a, KeyCode::Char('v'));
        assert_eq!(a.state.options().view, ViewMode::Image);
        assert_eq!(a.state.panels[0].lines.last().unwrap().text, "coupe");

        press(&mut a, KeyCode::Char('u'));
        assert!(a.state.options().uppercase);
        assert_eq!(a.state.panels[0].lines[0].text, "MARGARITA");
        assert_eq!(a.state.selection.active(), &[RecipeId(0)]);
    }

    #[test]
    fn test_panels_focus_then_dismiss() {
        let mut a = app();
        a.dispatch(Action::Toggle(RecipeId(3)));
        a.dispatch(Action::Toggle(RecipeId(1)));
        press(&mut a, KeyCode::Tab);
        assert_eq!(a.layout.focused(), Some(ComponentId::RecipePanels));
        press(&mut a, KeyCode::Right);
        press(&mut a, KeyCode::Char('x'));
        assert_eq!(a.state.selection.active(), &[RecipeId(3)]);
        assert_eq!(a.recipe_panels.focused_slot, 0);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut a = app();
        press(&mut a, KeyCode::Char('?'));
        assert!(a.layout.show_help);
        assert!(a.help_overlay.visible);
        press(&mut a, KeyCode::Enter);
        assert!(!a.layout.show_help);
        assert!(!a.help_overlay.visible);
        assert!(a.state.selection.active().is_empty());
    }

    #[test]
    fn test_reload_replaces_catalog_and_clears_selection() {
        let mut a = app();
        a.dispatch(Action::Toggle(RecipeId(1)));
        press(&mut a, KeyCode::Char('r'));
        assert!(a.state.panels.is_empty());
        assert!(a.state.selection.active().is_empty());
        assert_eq!(
            a.cocktail_list.list.len(),
            a.state.selection.catalog().len()
        );
        assert!(a.state.recipe(RecipeId(0)).is_some());
        assert_eq!(toasts(&a)[0], format!("Reloaded {} cocktails", a.state.selection.catalog().len()));
    }

    #[test]
    fn test_quit_keys() {
        let mut a = app();
        assert_eq!(a.handle_key(key(KeyCode::Char('q'))), vec![Action::Quit]);
        assert_eq!(
            a.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            vec![Action::Quit]
        );
    }

    #[test]
    fn test_clicks_toggle_rows_and_dismiss_panels() {
        let mut a = app();
        render(&mut a);
        let list = a.pane_areas.cocktail_list;
        // Second row inside the list border.
        click(&mut a, list.x + 2, list.y + 2);
        assert_eq!(a.state.selection.active(), &[RecipeId(1)]);

        render(&mut a);
        let panels = a.pane_areas.recipe_panels;
        click(&mut a, panels.x + 3, panels.y + 3);
        assert!(a.state.selection.active().is_empty());
        assert_eq!(a.layout.focused(), Some(ComponentId::RecipePanels));
    }

    #[test]
    fn test_render_shows_active_recipe() {
        let mut a = app();
        a.dispatch(Action::Toggle(RecipeId(0)));
        let screen = render(&mut a);
        assert!(screen.contains("Margarita"));
        assert!(screen.contains("(20ml)"));
        assert!(screen.contains("1/4"));
    }

    #[test]
    fn test_load_failure_and_empty_catalog_notices() {
        let state = AppState::new(
            SelectionController::new(Catalog::default(), FormatOptions::default()),
            Some("catalog resource is empty".to_string()),
        );
        let a = App::new(state, false);
        assert_eq!(
            toasts(&a),
            vec!["Failed to load cocktails: catalog resource is empty".to_string()]
        );

        let state = AppState::new(
            SelectionController::new(Catalog::default(), FormatOptions::default()),
            None,
        );
        let a = App::new(state, false);
        assert_eq!(toasts(&a), vec!["No cocktails available.".to_string()]);
    }
}
