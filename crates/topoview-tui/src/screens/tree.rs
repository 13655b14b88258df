//! Tree screen: the physical or logical hierarchy as a collapsible tree.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tracing::warn;
use tui_tree_widget::{Tree, TreeItem, TreeState};

use topoview_core::{Theme, TreeNode, ViewMode};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::details::node_status_color;

fn item_text(node: &TreeNode, theme: Theme) -> Line<'static> {
    let mut spans = vec![
        Span::styled("● ", Style::default().fg(node_status_color(node.status))),
        Span::styled(node.label.clone(), theme::text(theme)),
        Span::styled(format!("  {}", node.node_type), theme::muted(theme)),
    ];
    if let Some(role) = node.role {
        spans.push(Span::styled(format!(" {role}"), theme::muted(theme)));
    }
    if let Some(ip) = &node.ip {
        spans.push(Span::styled(format!("  {ip}"), theme::muted(theme)));
    }
    if let Some(bw) = &node.bandwidth_label {
        spans.push(Span::styled(format!("  {bw}"), theme::muted(theme)));
    }
    Line::from(spans)
}

/// Convert a hierarchy into widget items. A subtree the widget rejects
/// (duplicate sibling ids) is shown as a leaf.
pub fn build_items(node: &TreeNode, theme: Theme) -> TreeItem<'static, String> {
    let text = item_text(node, theme);
    if node.children.is_empty() {
        return TreeItem::new_leaf(node.id.clone(), text);
    }
    let children = node.children.iter().map(|c| build_items(c, theme)).collect();
    match TreeItem::new(node.id.clone(), text.clone(), children) {
        Ok(item) => item,
        Err(e) => {
            warn!(node = %node.id, error = %e, "tree children rejected");
            TreeItem::new_leaf(node.id.clone(), text)
        }
    }
}

pub struct TreeScreen {
    focused: bool,
    theme: Theme,
    view: ViewMode,
    items: Vec<TreeItem<'static, String>>,
    state: TreeState<String>,
}

impl TreeScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            theme: Theme::default(),
            view: ViewMode::default(),
            items: Vec::new(),
            state: TreeState::default(),
        }
    }

    fn selected_id(&self) -> Option<String> {
        self.state.selected().last().cloned()
    }
}

impl Component for TreeScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.key_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.key_down();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.state.key_left();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.state.key_right();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.state.toggle_selected();
            }
            KeyCode::Char('g') => return Ok(self.selected_id().map(Action::FocusNode)),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::SceneReady(scene) = action {
            let view_changed = scene.view_mode != self.view;
            self.theme = scene.theme;
            self.view = scene.view_mode;
            self.items = scene
                .tree
                .as_ref()
                .map(|root| vec![build_items(root, scene.theme)])
                .unwrap_or_default();
            if view_changed {
                self.state = TreeState::default();
            }
            if let Some(root) = &scene.tree {
                if self.state.selected().is_empty() {
                    self.state.open(vec![root.id.clone()]);
                    self.state.select(vec![root.id.clone()]);
                }
            }
        }
        Ok(None)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let theme = self.theme;
        let block = Block::default()
            .title(format!(" Tree · {} ", self.view))
            .title_style(theme::title_style(theme))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(theme, self.focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [body, hints] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        if self.items.is_empty() {
            frame.render_widget(
                Paragraph::new("No topology data")
                    .style(theme::muted(theme))
                    .alignment(Alignment::Center),
                body,
            );
        } else {
            match Tree::new(&self.items) {
                Ok(tree) => {
                    let tree = tree
                        .highlight_style(theme::table_selected(theme).add_modifier(Modifier::BOLD))
                        .highlight_symbol("▸ ");
                    frame.render_stateful_widget(tree, body, &mut self.state);
                }
                Err(e) => warn!(error = %e, "tree widget rejected items"),
            }
        }

        let key = theme::key_hint_key(theme);
        let hint = theme::key_hint(theme);
        let line = Line::from(vec![
            Span::styled(" ↑↓ ", key),
            Span::styled("move  ", hint),
            Span::styled("←→ ", key),
            Span::styled("collapse/expand  ", hint),
            Span::styled("Enter ", key),
            Span::styled("toggle  ", hint),
            Span::styled("g ", key),
            Span::styled("show on graph", hint),
        ]);
        frame.render_widget(Paragraph::new(line), hints);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Tree"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use topoview_core::{Scene, TopologyData, Viewport, build_physical_tree, demo_topology};

    use super::*;

    fn ready(data: &TopologyData, mode: ViewMode) -> Action {
        Action::SceneReady(Arc::new(Scene::prepare(
            data,
            mode,
            Theme::Dark,
            Viewport::default(),
        )))
    }

    fn draw(screen: &mut TreeScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
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
    fn items_mirror_the_hierarchy() {
        let root = build_physical_tree(&demo_topology()).unwrap();
        let item = build_items(&root, Theme::Dark);
        assert_eq!(item.identifier(), &root.id);
        assert_eq!(item.children().len(), root.children.len());
    }

    #[test]
    fn root_starts_open_and_selected() {
        let mut screen = TreeScreen::new();
        screen
            .update(&ready(&demo_topology(), ViewMode::Physical))
            .unwrap();
        assert_eq!(screen.selected_id().as_deref(), Some("root"));

        let text = draw(&mut screen);
        assert!(text.contains("Network"));
        assert!(text.contains("Spine 1"));
    }

    #[test]
    fn logical_view_shows_vlan_buckets() {
        let mut screen = TreeScreen::new();
        screen
            .update(&ready(&demo_topology(), ViewMode::Logical))
            .unwrap();
        let text = draw(&mut screen);
        assert!(text.contains("Infrastructure"));
        assert!(text.contains("VLAN 100"));
    }

    #[test]
    fn empty_data_shows_placeholder() {
        let mut screen = TreeScreen::new();
        screen
            .update(&ready(&TopologyData::default(), ViewMode::Physical))
            .unwrap();
        assert!(draw(&mut screen).contains("No topology data"));
    }

    #[test]
    fn g_jumps_to_the_graph() {
        let mut screen = TreeScreen::new();
        screen
            .update(&ready(&demo_topology(), ViewMode::Physical))
            .unwrap();
        // Relative movement walks the rows of the last draw.
        draw(&mut screen);
        screen
            .handle_key_event(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE))
            .unwrap();
        let action = screen
            .handle_key_event(KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE))
            .unwrap();
        let Some(Action::FocusNode(id)) = action else {
            panic!("expected FocusNode, got {action:?}");
        };
        assert_ne!(id, "root");
    }
}
