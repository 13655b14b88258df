//! Graph screen: the topology on a braille canvas with pan/zoom,
//! click-to-select detail popups, and drag-to-pin in physical view.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Context, Line as Segment};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use topoview_core::geometry::Rect as Bounds;
use topoview_core::{
    ForceSimulation, InteractionEvent, LayoutError, LayoutSession, Point, PopupGeometry,
    RenderError, Scene, SelectCallback, SelectionState, SelectionTarget, Theme,
    TopologyRenderer, ViewMode,
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::camera::{CELL_HEIGHT, Camera, view_to_cells};
use crate::widgets::details::selection_details;
use crate::widgets::shapes::{
    dash_segments, edges, offset_segment, outline, segment_distance, stroke_offsets,
};

/// Canvas area inside the screen's border, above the key-hint row.
pub fn canvas_area(area: Rect) -> Rect {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    Rect {
        height: inner.height.saturating_sub(1),
        ..inner
    }
}

/// A node being dragged with the left button held.
#[derive(Debug, Clone, Copy)]
struct Drag {
    index: usize,
    moved: bool,
}

pub struct GraphScreen {
    focused: bool,
    scene: Option<Scene>,
    /// Node positions in layout units, indexed like `scene.graph.nodes()`.
    positions: Vec<Point>,
    session: LayoutSession,
    camera: Camera,
    selection: SelectionState,
    on_select: Option<SelectCallback>,
    drag: Option<Drag>,
    canvas: Rect,
    layout_error: Option<String>,
}

impl GraphScreen {
    pub fn new(popup: PopupGeometry) -> Self {
        Self {
            focused: false,
            scene: None,
            positions: Vec::new(),
            session: LayoutSession::default(),
            camera: Camera::fit(topoview_core::Viewport::default()),
            selection: SelectionState::new(popup),
            on_select: None,
            drag: None,
            canvas: Rect::default(),
            layout_error: None,
        }
    }

    fn theme(&self) -> Theme {
        self.scene.as_ref().map(|s| s.theme).unwrap_or_default()
    }

    // ── Layout ──────────────────────────────────────────────────────

    /// Recompute positions from the session's plan. On failure the last
    /// good positions stay, or the seed circle if the node set changed.
    fn relayout(&mut self) -> Result<(), LayoutError> {
        let Some(scene) = self.scene.as_ref() else {
            return Ok(());
        };
        let plan = self.session.plan(&scene.graph, scene.viewport);
        let result = match plan.mode {
            ViewMode::Physical => Ok(scene
                .graph
                .nodes()
                .iter()
                .map(|n| {
                    plan.hint(&n.id)
                        .and_then(topoview_core::LayoutHint::position)
                        .unwrap_or_else(|| scene.viewport.center())
                })
                .collect()),
            ViewMode::Logical => ForceSimulation::settle(&scene.graph, &plan, scene.viewport),
        };

        match result {
            Ok(positions) => {
                self.positions = positions;
                self.layout_error = None;
                Ok(())
            }
            Err(e) => {
                if self.positions.len() != scene.graph.len() {
                    self.positions = ForceSimulation::seed(&scene.graph, &plan, scene.viewport)
                        .positions()
                        .to_vec();
                }
                self.layout_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    // ── Hit testing ─────────────────────────────────────────────────

    fn node_radius(&self, index: usize) -> f64 {
        let size = self.scene.as_ref().and_then(|s| {
            let id = &s.graph.nodes().get(index)?.id;
            s.attributes.nodes.get(id).map(|a| a.size)
        });
        size.unwrap_or(24.0) / 2.0
    }

    /// Closest node whose outline (plus one cell of slack) contains `p`.
    fn hit_node(&self, p: Point) -> Option<usize> {
        let slack = self.camera.cell_span();
        self.positions
            .iter()
            .enumerate()
            .map(|(i, pos)| (i, pos.distance_to(p)))
            .filter(|&(i, d)| d <= self.node_radius(i) + slack)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    fn hit_link(&self, p: Point) -> Option<usize> {
        let scene = self.scene.as_ref()?;
        let slack = self.camera.cell_span();
        scene
            .graph
            .edges()
            .iter()
            .enumerate()
            .filter_map(|(i, e)| {
                let a = *self.positions.get(e.source)?;
                let b = *self.positions.get(e.target)?;
                Some((i, segment_distance(p, a, b)))
            })
            .filter(|&(_, d)| d <= slack)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    // ── Selection ───────────────────────────────────────────────────

    fn select(&mut self, target: SelectionTarget, at: Point) {
        let Some(viewport) = self.scene.as_ref().map(|s| s.viewport) else {
            return;
        };
        let anchor = self.camera.world_to_view(viewport, at);
        let container = Bounds::sized(viewport.width, viewport.height);
        let event = match &target {
            SelectionTarget::Node(id) => InteractionEvent::SelectNode {
                id: id.clone(),
                anchor,
                container,
            },
            SelectionTarget::Link(id) => InteractionEvent::SelectLink {
                id: id.clone(),
                anchor,
                container,
            },
        };
        self.selection.apply(&event);
        debug!(selected = target.id(), "selection made");
        if let Some(callback) = self.on_select.as_mut() {
            callback(&target);
        }
    }

    fn select_node(&mut self, index: usize) {
        let Some(id) = self
            .scene
            .as_ref()
            .and_then(|s| s.graph.nodes().get(index))
            .map(|n| n.id.clone())
        else {
            return;
        };
        if let Some(at) = self.positions.get(index).copied() {
            self.select(SelectionTarget::Node(id), at);
        }
    }

    fn select_link(&mut self, index: usize) {
        let Some((id, a, b)) = self.scene.as_ref().and_then(|s| {
            let edge = s.graph.edges().get(index)?;
            Some((
                edge.link.id.clone(),
                *self.positions.get(edge.source)?,
                *self.positions.get(edge.target)?,
            ))
        }) else {
            return;
        };
        let mid = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        self.select(SelectionTarget::Link(id), mid);
    }

    /// Step through nodes (`links == false`) or links in graph order.
    fn cycle(&mut self, links: bool, forward: bool) {
        let Some(scene) = self.scene.as_ref() else {
            return;
        };
        let count = if links {
            scene.graph.edges().len()
        } else {
            scene.graph.len()
        };
        if count == 0 {
            return;
        }
        let current = self.selection.current().and_then(|s| match (&s.target, links) {
            (SelectionTarget::Node(id), false) => scene.graph.index_of(id),
            (SelectionTarget::Link(id), true) => {
                scene.graph.edges().iter().position(|e| e.link.id == *id)
            }
            _ => None,
        });
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        if links {
            self.select_link(next);
        } else {
            self.select_node(next);
        }
    }

    /// Apply a clearing event; report the change to the app.
    fn clear_with(&mut self, event: &InteractionEvent) -> Option<Action> {
        self.selection
            .apply(event)
            .then_some(Action::SelectionCleared)
    }

    fn pan(&mut self, dx: f64, dy: f64) -> Option<Action> {
        let viewport = self.scene.as_ref()?.viewport;
        self.camera.pan(dx, dy, viewport);
        self.clear_with(&InteractionEvent::Pan)
    }

    // ── Drawing ─────────────────────────────────────────────────────

    fn paint(&self, ctx: &mut Context<'_>, scene: &Scene) {
        let theme = scene.theme;
        let plot = |ctx: &mut Context<'_>, a: Point, b: Point, color| {
            ctx.draw(&Segment {
                x1: a.x,
                y1: -a.y,
                x2: b.x,
                y2: -b.y,
                color,
            });
        };

        for edge in scene.graph.edges() {
            let (Some(&a), Some(&b)) = (self.positions.get(edge.source), self.positions.get(edge.target))
            else {
                continue;
            };
            let Some(attrs) = scene.attributes.links.get(&edge.link.id) else {
                continue;
            };
            let color = if self.selection.is_selected(&edge.link.id) {
                theme::rgb(topoview_core::ThemePalette::for_theme(theme).highlight)
            } else {
                theme::rgb(attrs.color)
            };
            for &offset in stroke_offsets(attrs.width) {
                let (a, b) = offset_segment(a, b, offset);
                for (from, to) in dash_segments(a, b, attrs.dash) {
                    plot(ctx, from, to, color);
                }
            }
        }

        ctx.layer();

        let highlight = theme::rgb(topoview_core::ThemePalette::for_theme(theme).highlight);
        for (i, node) in scene.graph.nodes().iter().enumerate() {
            let (Some(&center), Some(attrs)) =
                (self.positions.get(i), scene.attributes.nodes.get(&node.id))
            else {
                continue;
            };
            let r = attrs.size / 2.0;
            let border = outline(attrs.shape, center, r);
            for (a, b) in edges(&border) {
                plot(ctx, a, b, theme::rgb(attrs.border));
            }
            let fill = outline(attrs.shape, center, r * 0.55);
            for (a, b) in edges(&fill) {
                plot(ctx, a, b, theme::rgb(attrs.color));
            }
            if self.selection.is_selected(&node.id) {
                let ring = outline(attrs.shape, center, r + self.camera.cell_span() / 2.0);
                for (a, b) in edges(&ring) {
                    plot(ctx, a, b, highlight);
                }
            }
        }

        ctx.layer();

        let span = self.camera.cell_span();
        let below = CELL_HEIGHT / self.camera.zoom() * 0.75;
        for (i, node) in scene.graph.nodes().iter().enumerate() {
            let (Some(&center), Some(attrs)) =
                (self.positions.get(i), scene.attributes.nodes.get(&node.id))
            else {
                continue;
            };
            let label = attrs.label.replace('\n', " ");
            #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
            let half = label.chars().count() as f64 * span / 2.0;
            ctx.print(
                center.x - half,
                -(center.y + attrs.size / 2.0 + below),
                Span::styled(label, theme::text(theme)),
            );
        }
    }

    fn render_popup(&self, frame: &mut Frame, scene: &Scene) {
        let Some(selection) = self.selection.current() else {
            return;
        };
        let Some((title, body)) = selection_details(scene, &selection.target) else {
            return;
        };
        let bounds = selection.placement.bounds(self.selection.geometry());
        let rect = view_to_cells(bounds, scene.viewport, self.canvas);
        if rect.width < 4 || rect.height < 3 {
            return;
        }
        let theme = scene.theme;
        let block = Block::default()
            .title(format!(" {title} "))
            .title_style(theme::title_style(theme))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused(theme))
            .style(theme::overlay(theme));
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(body).block(block).wrap(Wrap { trim: true }),
            rect,
        );
    }

    fn title(&self) -> String {
        let Some(scene) = self.scene.as_ref() else {
            return " Topology ".into();
        };
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::as_conversions
        )]
        let zoom = (self.camera.zoom() * 100.0).round() as u32;
        let mut title = format!(
            " Topology · {} · {} nodes · zoom {zoom}% ",
            scene.view_mode,
            scene.graph.len()
        );
        if let Some(err) = &self.layout_error {
            title.push_str(&format!("· layout kept: {err} "));
        }
        title
    }
}

// ── Renderer binding ────────────────────────────────────────────────

impl TopologyRenderer for GraphScreen {
    fn render(&mut self, scene: &Scene) -> Result<(), RenderError> {
        let resized = self
            .scene
            .as_ref()
            .is_none_or(|s| s.viewport != scene.viewport);
        self.session.set_mode(scene.view_mode);
        self.scene = Some(scene.clone());
        if resized {
            self.camera = Camera::fit(scene.viewport);
        }
        if scene.is_empty() {
            self.positions.clear();
            return Err(RenderError::Empty);
        }
        self.relayout()?;
        Ok(())
    }

    fn on_select(&mut self, callback: SelectCallback) {
        self.on_select = Some(callback);
    }

    fn format(&self) -> &'static str {
        "terminal"
    }
}

impl Component for GraphScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.on_select(Box::new(move |target| {
            let _ = action_tx.send(Action::Selected(target.clone()));
        }));
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.pan(-1.0, 0.0),
            KeyCode::Right | KeyCode::Char('l') => self.pan(1.0, 0.0),
            KeyCode::Up | KeyCode::Char('k') => self.pan(0.0, -1.0),
            KeyCode::Down | KeyCode::Char('j') => self.pan(0.0, 1.0),
            KeyCode::Char('+' | '=') => {
                self.camera.zoom_in();
                self.clear_with(&InteractionEvent::Zoom)
            }
            KeyCode::Char('-') => {
                self.camera.zoom_out();
                self.clear_with(&InteractionEvent::Zoom)
            }
            KeyCode::Char('0') => {
                if let Some(viewport) = self.scene.as_ref().map(|s| s.viewport) {
                    self.camera = Camera::fit(viewport);
                }
                self.clear_with(&InteractionEvent::Zoom)
            }
            KeyCode::Char('n') => {
                self.cycle(false, true);
                None
            }
            KeyCode::Char('N') => {
                self.cycle(false, false);
                None
            }
            KeyCode::Char('e') => {
                self.cycle(true, true);
                None
            }
            KeyCode::Char('E') => {
                self.cycle(true, false);
                None
            }
            KeyCode::Char('p') => {
                self.session.clear_pins();
                if let Err(e) = self.relayout() {
                    warn!(error = %e, "layout failed after clearing pins");
                }
                None
            }
            KeyCode::Esc => {
                if self.selection.current().is_some() {
                    self.clear_with(&InteractionEvent::Deselect)
                } else {
                    Some(Action::GoBack)
                }
            }
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let Some(viewport) = self.scene.as_ref().map(|s| s.viewport) else {
            return Ok(None);
        };
        let world = self
            .camera
            .cell_to_world(viewport, self.canvas, mouse.column, mouse.row);

        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(p) = world else {
                    return Ok(None);
                };
                if let Some(index) = self.hit_node(p) {
                    // Selection waits for the release: a drag pins instead.
                    self.drag = Some(Drag {
                        index,
                        moved: false,
                    });
                    None
                } else if let Some(index) = self.hit_link(p) {
                    self.select_link(index);
                    None
                } else {
                    self.clear_with(&InteractionEvent::BackgroundClick)
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let (Some(drag), Some(p)) = (self.drag.as_mut(), world) {
                    drag.moved = true;
                    if let Some(pos) = self.positions.get_mut(drag.index) {
                        *pos = p;
                    }
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(drag) = self.drag.take() else {
                    return Ok(None);
                };
                if drag.moved {
                    let id = self
                        .scene
                        .as_ref()
                        .and_then(|s| s.graph.nodes().get(drag.index))
                        .map(|n| n.id.clone());
                    let at = world.or_else(|| self.positions.get(drag.index).copied());
                    if let (Some(id), Some(at)) = (id, at) {
                        self.session.drag_release(&id, at);
                        debug!(node = %id, pinned = self.session.manual_pin(&id).is_some(), "drag released");
                    }
                    if let Err(e) = self.relayout() {
                        warn!(error = %e, "layout failed after drag");
                    }
                    self.clear_with(&InteractionEvent::Deselect)
                } else {
                    self.select_node(drag.index);
                    None
                }
            }
            MouseEventKind::ScrollUp => {
                self.camera.zoom_in();
                self.clear_with(&InteractionEvent::Zoom)
            }
            MouseEventKind::ScrollDown => {
                self.camera.zoom_out();
                self.clear_with(&InteractionEvent::Zoom)
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SceneReady(scene) => {
                let mode_changed = self
                    .scene
                    .as_ref()
                    .is_some_and(|s| s.view_mode != scene.view_mode);
                match TopologyRenderer::render(self, scene) {
                    Ok(()) | Err(RenderError::Empty) => {}
                    Err(e) => warn!(error = %e, "keeping last good positions"),
                }
                if mode_changed {
                    return Ok(self.clear_with(&InteractionEvent::Deselect));
                }
            }
            Action::TopologyLoaded(data) => {
                return Ok(self.clear_with(&InteractionEvent::DataRefreshed((**data).clone())));
            }
            Action::FocusNode(id) => {
                if let Some(index) = self.scene.as_ref().and_then(|s| s.graph.index_of(id)) {
                    self.select_node(index);
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let theme = self.theme();
        let block = Block::default()
            .title(self.title())
            .title_style(theme::title_style(theme))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(theme, self.focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.canvas = canvas_area(area);
        let hints_area = Rect {
            y: inner.y + inner.height.saturating_sub(1),
            height: inner.height.min(1),
            ..inner
        };

        match self.scene.as_ref() {
            Some(scene) if !scene.is_empty() => {
                let (x_bounds, y_bounds) = self.camera.canvas_bounds(scene.viewport);
                let canvas = Canvas::default()
                    .marker(Marker::Braille)
                    .background_color(theme::background(theme))
                    .x_bounds(x_bounds)
                    .y_bounds(y_bounds)
                    .paint(|ctx| self.paint(ctx, scene));
                frame.render_widget(canvas, self.canvas);
                self.render_popup(frame, scene);
            }
            _ => {
                let empty = Paragraph::new("No topology data")
                    .style(theme::muted(theme))
                    .alignment(Alignment::Center);
                let middle = Rect {
                    y: self.canvas.y + self.canvas.height / 2,
                    height: self.canvas.height.min(1),
                    ..self.canvas
                };
                frame.render_widget(empty, middle);
            }
        }

        let key = theme::key_hint_key(theme);
        let hint = theme::key_hint(theme);
        let mut hints = vec![
            Span::styled(" ←→↑↓ ", key),
            Span::styled("pan  ", hint),
            Span::styled("+/- ", key),
            Span::styled("zoom  ", hint),
            Span::styled("0 ", key),
            Span::styled("fit  ", hint),
            Span::styled("n/e ", key),
            Span::styled("next node/link  ", hint),
            Span::styled("click ", key),
            Span::styled("details", hint),
        ];
        if self.session.mode() == ViewMode::Physical {
            hints.push(Span::styled("  drag ", key));
            hints.push(Span::styled("pin  ", hint));
            hints.push(Span::styled("p ", key));
            hints.push(Span::styled("unpin", hint));
        }
        frame.render_widget(Paragraph::new(Line::from(hints)), hints_area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Graph"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyModifiers, MouseEvent};
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc;
    use topoview_core::{TopologyData, demo_topology};

    use super::*;
    use crate::widgets::camera::viewport_for;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 40,
    };

    fn scene(data: &TopologyData, mode: ViewMode) -> Arc<Scene> {
        Arc::new(Scene::prepare(
            data,
            mode,
            Theme::Dark,
            viewport_for(canvas_area(SCREEN)),
        ))
    }

    fn screen(mode: ViewMode) -> (GraphScreen, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut screen = GraphScreen::new(PopupGeometry::default());
        screen.init(tx).unwrap();
        screen
            .update(&Action::SceneReady(scene(&demo_topology(), mode)))
            .unwrap();
        (screen, rx)
    }

    fn draw(screen: &mut GraphScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(SCREEN.width, SCREEN.height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                Component::render(screen, f, area);
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

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, (column, row): (u16, u16)) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Terminal cell over a layout point, for an unzoomed camera.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::as_conversions
    )]
    fn cell_of(screen: &GraphScreen, p: Point) -> (u16, u16) {
        let vp = screen.scene.as_ref().unwrap().viewport;
        let area = screen.canvas;
        let col = (p.x / vp.width * f64::from(area.width)).floor() as u16;
        let row = (p.y / vp.height * f64::from(area.height)).floor() as u16;
        (area.x + col, area.y + row)
    }

    #[test]
    fn empty_scene_says_so() {
        let mut screen = GraphScreen::new(PopupGeometry::default());
        screen
            .update(&Action::SceneReady(scene(&TopologyData::default(), ViewMode::Physical)))
            .unwrap();
        assert!(screen.positions.is_empty());
        assert!(draw(&mut screen).contains("No topology data"));
    }

    #[test]
    fn physical_positions_follow_the_layer_hints() {
        let (screen, _rx) = screen(ViewMode::Physical);
        let scene = screen.scene.as_ref().unwrap();
        let plan = screen.session.plan(&scene.graph, scene.viewport);
        assert_eq!(screen.positions.len(), scene.graph.len());
        for (node, pos) in scene.graph.nodes().iter().zip(&screen.positions) {
            assert_eq!(plan.hint(&node.id).unwrap().position(), Some(*pos));
        }
    }

    #[test]
    fn logical_positions_are_simulated_and_finite() {
        let (screen, _rx) = screen(ViewMode::Logical);
        assert_eq!(screen.positions.len(), demo_topology().nodes.len());
        assert!(screen.positions.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn cycling_selects_and_reports_through_the_callback() {
        let (mut screen, mut rx) = screen(ViewMode::Physical);
        screen.handle_key_event(key(KeyCode::Char('n'))).unwrap();
        let first = screen.scene.as_ref().unwrap().graph.nodes()[0].id.clone();
        assert!(screen.selection.is_selected(&first));
        assert!(matches!(
            rx.try_recv(),
            Ok(Action::Selected(SelectionTarget::Node(id))) if id == first
        ));

        let text = draw(&mut screen);
        assert!(text.contains("Type"));
    }

    #[test]
    fn panning_clears_the_selection() {
        let (mut screen, _rx) = screen(ViewMode::Physical);
        screen.handle_key_event(key(KeyCode::Char('e'))).unwrap();
        assert!(screen.selection.current().is_some());
        let action = screen.handle_key_event(key(KeyCode::Left)).unwrap();
        assert!(matches!(action, Some(Action::SelectionCleared)));
        assert!(screen.selection.current().is_none());
    }

    #[test]
    fn escape_deselects_before_going_back() {
        let (mut screen, _rx) = screen(ViewMode::Physical);
        screen.handle_key_event(key(KeyCode::Char('n'))).unwrap();
        let first = screen.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(matches!(first, Some(Action::SelectionCleared)));
        let second = screen.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(matches!(second, Some(Action::GoBack)));
    }

    #[test]
    fn clicking_a_node_selects_it() {
        let (mut screen, _rx) = screen(ViewMode::Physical);
        draw(&mut screen);
        let target = screen.positions[0];
        let at = cell_of(&screen, target);
        screen
            .handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), at))
            .unwrap();
        screen
            .handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), at))
            .unwrap();

        let selected = screen.selection.current().unwrap();
        let hit = screen.hit_node(target).unwrap();
        let id = &screen.scene.as_ref().unwrap().graph.nodes()[hit].id;
        assert_eq!(selected.target, SelectionTarget::Node(id.clone()));
    }

    #[test]
    fn dragging_pins_in_physical_view() {
        let (mut screen, _rx) = screen(ViewMode::Physical);
        draw(&mut screen);
        let start = cell_of(&screen, screen.positions[0]);
        let index = screen
            .hit_node(screen.camera.cell_to_world(
                screen.scene.as_ref().unwrap().viewport,
                screen.canvas,
                start.0,
                start.1,
            )
            .unwrap())
            .unwrap();
        let end = (screen.canvas.x + 2, screen.canvas.bottom() - 2);

        screen
            .handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), start))
            .unwrap();
        screen
            .handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), end))
            .unwrap();
        screen
            .handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), end))
            .unwrap();

        let id = screen.scene.as_ref().unwrap().graph.nodes()[index].id.clone();
        let pin = screen.session.manual_pin(&id).unwrap();
        assert_eq!(screen.positions[index], pin);

        screen.handle_key_event(key(KeyCode::Char('p'))).unwrap();
        assert!(screen.session.manual_pin(&id).is_none());
    }

    #[test]
    fn refresh_without_the_selected_node_clears_it() {
        let (mut screen, _rx) = screen(ViewMode::Physical);
        screen.handle_key_event(key(KeyCode::Char('n'))).unwrap();
        let action = screen
            .update(&Action::TopologyLoaded(Arc::new(TopologyData::default())))
            .unwrap();
        assert!(matches!(action, Some(Action::SelectionCleared)));
    }

    #[test]
    fn focus_selects_by_id() {
        let (mut screen, _rx) = screen(ViewMode::Physical);
        screen.update(&Action::FocusNode("db-01".into())).unwrap();
        assert!(screen.selection.is_selected("db-01"));
    }

    #[test]
    fn backend_reports_its_format() {
        let screen = GraphScreen::new(PopupGeometry::default());
        assert_eq!(screen.format(), "terminal");
    }
}
