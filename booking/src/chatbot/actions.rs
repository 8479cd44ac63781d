//! Actions for the booking assistant widget.

use quickcourt_macros::Action;

/// Everything the assistant widget reacts to
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum ChatbotAction {
    /// Show the widget
    #[command]
    Open,

    /// Hide the widget; a reply still being typed is dropped
    #[command]
    Close,

    /// Start the conversation over
    #[command]
    Reset,

    /// The user sent text (typed or a quick reply)
    #[command]
    SendMessage {
        /// What the user wrote
        text: String,
    },

    /// The typing delay for a turn elapsed
    #[event]
    ReplyReady {
        /// Turn whose reply is due
        turn: u64,
    },
}
