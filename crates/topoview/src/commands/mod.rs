//! Command dispatch: resolves the topology session, then hands off to
//! the matching handler.

pub mod attrs;
pub mod config_cmd;
pub mod device;
pub mod layout;
pub mod popup;
pub mod tree;
pub mod validate;

use crate::cli::{Command, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;

/// Dispatch a topology-bound command.
pub async fn dispatch(cmd: Command, session: Session, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Tree(args) => tree::handle(&session, &args, global),
        Command::Layout(args) => layout::handle(&session, &args, global),
        Command::Attrs(args) => attrs::handle(&session, &args, global),
        Command::Validate => validate::handle(&session, global),
        Command::Device(args) => device::handle(session, args, global).await,
        // Handled before a session is loaded
        Command::Popup(_) | Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
