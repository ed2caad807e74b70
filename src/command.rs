//! Out-of-band navigation commands.
//!
//! Deep-link handlers, notification taps and bridge methods address
//! navigators by id. Commands are plain data so they can cross threads (via
//! [`CommandSender`]) and processes (via the socket bridge); only the UI
//! thread executes them.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavCommand {
    Navigate {
        navigator_id: String,
        screen_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<String>,
        /// Route to the configured fullscreen navigator instead.
        #[serde(default)]
        fullscreen: bool,
    },
    NavigatePush {
        navigator_id: String,
        screen_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<String>,
    },
    Back {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        navigator_id: Option<String>,
    },
    PopToTop {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        navigator_id: Option<String>,
    },
}

impl NavCommand {
    pub fn navigate(navigator_id: impl Into<String>, screen_type: impl Into<String>) -> Self {
        NavCommand::Navigate {
            navigator_id: navigator_id.into(),
            screen_type: screen_type.into(),
            options: None,
            fullscreen: false,
        }
    }

    pub fn navigate_push(navigator_id: impl Into<String>, screen_type: impl Into<String>) -> Self {
        NavCommand::NavigatePush {
            navigator_id: navigator_id.into(),
            screen_type: screen_type.into(),
            options: None,
        }
    }

    pub fn back() -> Self {
        NavCommand::Back { navigator_id: None }
    }

    pub fn pop_to_top() -> Self {
        NavCommand::PopToTop { navigator_id: None }
    }

    /// Attach an options payload to a navigate-family command.
    pub fn with_options(mut self, payload: impl Into<String>) -> Self {
        match &mut self {
            NavCommand::Navigate { options, .. } | NavCommand::NavigatePush { options, .. } => {
                *options = Some(payload.into());
            }
            NavCommand::Back { .. } | NavCommand::PopToTop { .. } => {}
        }
        self
    }

    pub fn name(&self) -> &'static str {
        match self {
            NavCommand::Navigate { .. } => "navigate",
            NavCommand::NavigatePush { .. } => "navigate_push",
            NavCommand::Back { .. } => "back",
            NavCommand::PopToTop { .. } => "pop_to_top",
        }
    }
}

/// Thread-safe handle for queueing commands onto the UI thread.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<NavCommand>,
}

impl CommandSender {
    /// Queue `command`. Returns `false` once the owning context is gone.
    pub fn send(&self, command: NavCommand) -> bool {
        self.tx.send(command).is_ok()
    }
}

#[derive(Debug)]
pub(crate) struct CommandQueue {
    tx: Sender<NavCommand>,
    rx: Receiver<NavCommand>,
}

impl CommandQueue {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub(crate) fn sender(&self) -> CommandSender {
        CommandSender {
            tx: self.tx.clone(),
        }
    }

    pub(crate) fn try_next(&self) -> Option<NavCommand> {
        self.rx.try_recv().ok()
    }
}
