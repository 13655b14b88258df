//! Component trait — the building block for every screen.

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;

/// A screen mounted in the tab bar.
///
/// Input reaches only the active screen. Data, scene and selection actions
/// are broadcast to every screen through `update`, so a hidden screen is
/// current when it is switched to.
///
/// `render` takes `&mut self`: screens drive stateful widgets and remember
/// the area they last drew into for mouse hit-testing.
pub trait Component: Send {
    /// Called once before the first event. Screens that report selections
    /// out of band keep a clone of the sender.
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    fn handle_mouse_event(&mut self, _mouse: MouseEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// React to a dispatched action. A returned action is queued.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect);

    fn set_focused(&mut self, _focused: bool) {}

    /// Name used in logs.
    fn id(&self) -> &str;
}
