//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use topoview_core::{
    PopupGeometry, RefreshInterval, Scene, SelectionTarget, Theme, TopologyData, ViewMode,
};

use crate::action::Action;
use crate::component::Component;
use crate::data_bridge::{TopologySource, send_snapshot, spawn_data_bridge};
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::{create_screens, graph};
use crate::theme;
use crate::tui::Tui;
use crate::widgets::camera::viewport_for;

/// Startup parameters, already resolved from flags, profile and config.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub source: TopologySource,
    pub view: ViewMode,
    pub theme: Theme,
    pub refresh: RefreshInterval,
    pub popup: PopupGeometry,
}

/// Split the terminal into [content] [tab bar] [status bar].
fn split(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area)
}

/// Top-level application state and event loop.
pub struct App {
    active_screen: ScreenId,
    previous_screen: Option<ScreenId>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,

    source: TopologySource,
    data: Option<Arc<TopologyData>>,
    view: ViewMode,
    theme: Theme,
    refresh: RefreshInterval,
    /// Cancels the running auto-refresh task, if any.
    refresh_cancel: Option<CancellationToken>,
    /// Area the active screen draws into; sizes the layout viewport.
    content_area: Rect,
    selection_label: Option<String>,
    last_error: Option<String>,

    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(options: AppOptions) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(options.popup).into_iter().collect();
        let [content_area, _, _] = split(Rect::new(0, 0, 80, 24));

        Self {
            active_screen: ScreenId::Graph,
            previous_screen: None,
            screens,
            running: true,
            help_visible: false,
            source: options.source,
            data: None,
            view: options.view,
            theme: options.theme,
            refresh: options.refresh,
            refresh_cancel: None,
            content_area,
            selection_label: None,
            last_error: None,
            action_tx,
            action_rx,
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop until quit.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        let [content, _, _] = split(tui.area()?);
        self.content_area = content;
        self.init_screens()?;

        self.reload();
        self.restart_refresh();

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!(source = %self.source, view = %self.view, theme = %self.theme, "TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        self.stop_refresh();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys win; everything else goes
    /// to the active screen, including Esc.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (KeyModifiers::NONE, KeyCode::Char('q')) => {
                return Ok(Some(Action::Quit));
            }
            (_, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                let n = u8::try_from(c).map_or(0, |b| b - b'0');
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (_, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }
            (KeyModifiers::NONE, KeyCode::Char('v')) => return Ok(Some(Action::ToggleView)),
            (KeyModifiers::NONE, KeyCode::Char('t')) => return Ok(Some(Action::ToggleTheme)),
            (KeyModifiers::NONE, KeyCode::Char('a')) => return Ok(Some(Action::CycleRefresh)),
            (KeyModifiers::NONE, KeyCode::Char('r')) => return Ok(Some(Action::Reload)),
            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return Ok(None);
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_mouse_event(mouse);
        }
        Ok(None)
    }

    /// Update app state for `action`, then propagate it to the screens.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                let [content, _, _] = split(Rect::new(0, 0, *w, *h));
                if content != self.content_area {
                    self.content_area = content;
                    self.rebuild_scene()?;
                }
            }

            Action::SwitchScreen(target) => self.switch_screen(*target),

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::ToggleView => {
                self.view = self.view.toggle();
                debug!(view = %self.view, "view toggled");
                self.rebuild_scene()?;
            }

            Action::ToggleTheme => {
                self.theme = self.theme.toggle();
                debug!(theme = %self.theme, "theme toggled");
                self.rebuild_scene()?;
            }

            Action::CycleRefresh => {
                self.refresh = self.refresh.cycle();
                info!(refresh = %self.refresh, "auto-refresh changed");
                self.restart_refresh();
            }

            Action::Reload => self.reload(),

            Action::TopologyLoaded(data) => {
                self.data = Some(Arc::clone(data));
                self.last_error = None;
                self.broadcast(action)?;
                self.rebuild_scene()?;
            }

            Action::LoadFailed(message) => {
                self.last_error = Some(message.clone());
            }

            Action::Selected(target) => {
                self.selection_label = Some(self.describe(target));
                self.broadcast(action)?;
            }

            Action::SelectionCleared => {
                self.selection_label = None;
                self.broadcast(action)?;
            }

            Action::FocusNode(_) => {
                self.switch_screen(ScreenId::Graph);
                if let Some(screen) = self.screens.get_mut(&ScreenId::Graph) {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            Action::SceneReady(_) => self.broadcast(action)?,

            // Render is handled in the main loop.
            Action::Render | Action::Tick => {}
        }

        Ok(())
    }

    fn switch_screen(&mut self, target: ScreenId) {
        if target == self.active_screen {
            return;
        }
        debug!("switching screen: {} → {}", self.active_screen, target);
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        self.previous_screen = Some(self.active_screen);
        self.active_screen = target;
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
            debug!(component = screen.id(), "focused");
        }
    }

    /// Every screen sees data, scene and selection changes, focused or not.
    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Prepare a scene for the current data, view, theme and canvas size.
    fn rebuild_scene(&mut self) -> Result<()> {
        let Some(data) = &self.data else {
            return Ok(());
        };
        let viewport = viewport_for(graph::canvas_area(self.content_area));
        let scene = Scene::prepare(data, self.view, self.theme, viewport);
        self.action_tx.send(Action::SceneReady(Arc::new(scene)))?;
        Ok(())
    }

    fn reload(&self) {
        let source = self.source.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move { send_snapshot(&source, &tx).await });
    }

    fn stop_refresh(&mut self) {
        if let Some(cancel) = self.refresh_cancel.take() {
            cancel.cancel();
        }
    }

    /// Replace the auto-refresh task to match `self.refresh`.
    fn restart_refresh(&mut self) {
        self.stop_refresh();
        let Some(period) = self.refresh.duration() else {
            return;
        };
        let cancel = CancellationToken::new();
        tokio::spawn(spawn_data_bridge(
            self.source.clone(),
            period,
            self.action_tx.clone(),
            cancel.clone(),
        ));
        self.refresh_cancel = Some(cancel);
    }

    fn describe(&self, target: &SelectionTarget) -> String {
        match target {
            SelectionTarget::Node(id) => self
                .data
                .as_ref()
                .and_then(|d| d.nodes.iter().find(|n| &n.id == id))
                .map_or_else(|| id.clone(), |n| n.label.clone()),
            SelectionTarget::Link(id) => format!("link {id}"),
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [content_area, tab_area, status_area] = split(area);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::background(self.theme))),
            area,
        );

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.render(frame, content_area);
        }

        self.render_tab_bar(frame, tab_area);
        self.render_status_bar(frame, status_area);

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active(self.theme)
                } else {
                    theme::tab_inactive(self.theme)
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint(self.theme)))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Source, view parameters, selection and any load error.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let t = self.theme;
        let sep = Span::styled(" │ ", theme::muted(t));

        let source = match &self.last_error {
            Some(err) => Span::styled(
                format!("✗ {}: {err}", self.source),
                Style::default().fg(theme::ERROR_RED),
            ),
            None if self.data.is_some() => Span::styled(
                format!("● {}", self.source),
                Style::default().fg(theme::OK_GREEN),
            ),
            None => Span::styled(
                format!("◐ {}", self.source),
                Style::default().fg(theme::WARN_AMBER),
            ),
        };

        let mut spans = vec![
            Span::raw(" "),
            source,
            sep.clone(),
            Span::styled(self.view.to_string(), theme::text(t)),
            sep.clone(),
            Span::styled(self.theme.to_string(), theme::text(t)),
            sep.clone(),
            Span::styled(format!("refresh {}", self.refresh), theme::text(t)),
        ];
        if let Some(label) = &self.selection_label {
            spans.push(sep.clone());
            spans.push(Span::styled(format!("▸ {label}"), theme::title_style(t)));
        }
        spans.push(sep);
        spans.push(Span::styled("? help  q quit", theme::key_hint(t)));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let t = self.theme;
        let help_width = 56u16.min(area.width.saturating_sub(4));
        let help_height = 22u16.min(area.height.saturating_sub(4));
        let help_area = Rect::new(
            area.x + area.width.saturating_sub(help_width) / 2,
            area.y + area.height.saturating_sub(help_height) / 2,
            help_width,
            help_height,
        );

        frame.render_widget(Clear, help_area);
        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style(t))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused(t))
            .style(theme::overlay(t));
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let entry = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key(t)),
                Span::styled(what, theme::key_hint(t)),
            ])
        };
        let heading = |title: &'static str| Line::from(Span::styled(format!("  {title}"), theme::title_style(t)));

        let help_text = vec![
            heading("Global"),
            entry("1-3 Tab", "Switch screen"),
            entry("v", "Physical / logical view"),
            entry("t", "Light / dark theme"),
            entry("a", "Cycle auto-refresh"),
            entry("r", "Reload now"),
            entry("q", "Quit"),
            Line::from(""),
            heading("Graph"),
            entry("click", "Select node or link"),
            entry("drag", "Pin node (physical)"),
            entry("n/N e/E", "Next/prev node, link"),
            entry("hjkl +/-", "Pan, zoom (0 fits)"),
            entry("p", "Clear pins"),
            entry("Esc", "Deselect / back"),
            Line::from(""),
            heading("Tree & Inventory"),
            entry("j/k ←/→", "Move, collapse/expand"),
            entry("Enter g", "Toggle / show on graph"),
            Line::from(""),
            Line::from(Span::styled("  Esc or ? to close", theme::key_hint(t))),
        ];
        frame.render_widget(Paragraph::new(help_text), inner);
    }
}
