//! Messages crossing into the game loop thread.

use arena_core::commands::ClientCommand;

/// Commands sent from the transport side to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A client command to apply to the engine immediately.
    Client(ClientCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}
