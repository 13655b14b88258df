//! Inventory screen: every node of the snapshot in one table.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use topoview_core::{Scene, SelectionTarget, Theme};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::details::node_status_color;

pub struct InventoryScreen {
    focused: bool,
    scene: Option<Arc<Scene>>,
    table_state: TableState,
}

impl InventoryScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            scene: None,
            table_state: TableState::default(),
        }
    }

    fn len(&self) -> usize {
        self.scene.as_ref().map_or(0, |s| s.graph.len())
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let len = self.len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(idx.min(len - 1)));
        }
    }

    fn selected_id(&self) -> Option<String> {
        let scene = self.scene.as_ref()?;
        let idx = self.table_state.selected()?;
        scene.graph.nodes().get(idx).map(|n| n.id.clone())
    }

    fn theme(&self) -> Theme {
        self.scene.as_ref().map(|s| s.theme).unwrap_or_default()
    }

    fn rows(scene: &Scene) -> Vec<Row<'static>> {
        let theme = scene.theme;
        scene
            .graph
            .nodes()
            .iter()
            .map(|node| {
                let swatch = scene
                    .attributes
                    .nodes
                    .get(&node.id)
                    .map_or_else(|| theme::muted(theme), |a| Style::default().fg(theme::rgb(a.color)));
                Row::new(vec![
                    Cell::from("●").style(Style::default().fg(node_status_color(node.status))),
                    Cell::from(node.label.clone()).style(theme::text(theme)),
                    Cell::from(node.node_type.to_string()).style(theme::muted(theme)),
                    Cell::from(node.ip.clone().unwrap_or_default()).style(theme::text(theme)),
                    Cell::from(node.vlan.map(|v| v.to_string()).unwrap_or_default())
                        .style(theme::muted(theme)),
                    Cell::from(node.effective_layer().to_string()).style(theme::muted(theme)),
                    Cell::from("■■").style(swatch),
                ])
            })
            .collect()
    }
}

impl Component for InventoryScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.select(self.selected_index() + 1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select(self.selected_index().saturating_sub(1));
            }
            KeyCode::Home | KeyCode::Char('g') => self.select(0),
            KeyCode::End | KeyCode::Char('G') => self.select(usize::MAX),
            KeyCode::Enter => return Ok(self.selected_id().map(Action::FocusNode)),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SceneReady(scene) => {
                let keep = self.selected_id();
                self.scene = Some(Arc::clone(scene));
                let idx = keep.and_then(|id| scene.graph.nodes().iter().position(|n| n.id == id));
                self.select(idx.unwrap_or(0));
            }
            Action::Selected(SelectionTarget::Node(id)) => {
                if let Some(idx) = self
                    .scene
                    .as_ref()
                    .and_then(|s| s.graph.nodes().iter().position(|n| &n.id == id))
                {
                    self.select(idx);
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let theme = self.theme();
        let block = Block::default()
            .title(format!(" Inventory ({}) ", self.len()))
            .title_style(theme::title_style(theme))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(theme, self.focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [body, hints] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        match self.scene.as_deref() {
            Some(scene) if !scene.graph.is_empty() => {
                let header = Row::new(
                    ["", "Name", "Type", "IP Address", "VLAN", "Layer", "Color"]
                        .map(|h| Cell::from(h).style(theme::table_header(theme))),
                );
                let widths = [
                    Constraint::Length(2),
                    Constraint::Fill(2),
                    Constraint::Length(11),
                    Constraint::Length(16),
                    Constraint::Length(5),
                    Constraint::Length(6),
                    Constraint::Length(5),
                ];
                let table = Table::new(Self::rows(scene), widths)
                    .header(header)
                    .row_highlight_style(theme::table_selected(theme));
                frame.render_stateful_widget(table, body, &mut self.table_state);
            }
            _ => frame.render_widget(
                Paragraph::new("No topology data")
                    .style(theme::muted(theme))
                    .alignment(Alignment::Center),
                body,
            ),
        }

        let line = Line::from(vec![
            Span::styled(" j/k ", theme::key_hint_key(theme)),
            Span::styled("navigate  ", theme::key_hint(theme)),
            Span::styled("Enter ", theme::key_hint_key(theme)),
            Span::styled("show on graph", theme::key_hint(theme)),
        ]);
        frame.render_widget(Paragraph::new(line), hints);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Inventory"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use topoview_core::{TopologyData, ViewMode, Viewport, demo_topology};

    use super::*;

    fn loaded(data: &TopologyData) -> InventoryScreen {
        let mut screen = InventoryScreen::new();
        let scene = Scene::prepare(data, ViewMode::Physical, Theme::Dark, Viewport::default());
        screen.update(&Action::SceneReady(Arc::new(scene))).unwrap();
        screen
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn draw(screen: &mut InventoryScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                screen.render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn lists_every_node() {
        let data = demo_topology();
        let mut screen = loaded(&data);
        let text = draw(&mut screen);
        assert!(text.contains(&format!("Inventory ({})", data.nodes.len())));
        assert!(text.contains("Spine 1"));
        assert!(text.contains("10.0.1.1"));
    }

    #[test]
    fn navigation_clamps_to_the_table() {
        let mut screen = loaded(&demo_topology());
        screen.handle_key_event(key(KeyCode::Up)).unwrap();
        assert_eq!(screen.table_state.selected(), Some(0));
        screen.handle_key_event(key(KeyCode::Char('G'))).unwrap();
        assert_eq!(screen.table_state.selected(), Some(screen.len() - 1));
        screen.handle_key_event(key(KeyCode::Down)).unwrap();
        assert_eq!(screen.table_state.selected(), Some(screen.len() - 1));
    }

    #[test]
    fn enter_focuses_the_row_on_the_graph() {
        let mut screen = loaded(&demo_topology());
        screen.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        let action = screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        let Some(Action::FocusNode(id)) = action else {
            panic!("expected FocusNode, got {action:?}");
        };
        assert_eq!(id, "spine-2");
    }

    #[test]
    fn graph_selection_moves_the_cursor() {
        let mut screen = loaded(&demo_topology());
        screen
            .update(&Action::Selected(SelectionTarget::Node("db-01".into())))
            .unwrap();
        assert_eq!(screen.selected_id().as_deref(), Some("db-01"));
    }

    #[test]
    fn empty_snapshot_shows_placeholder() {
        let mut screen = loaded(&TopologyData::default());
        assert_eq!(screen.table_state.selected(), None);
        assert!(draw(&mut screen).contains("No topology data"));
    }
}
