use thiserror::Error;

use crate::logging::LoggingError;

/// Unified result type for the navigation core.
pub type Result<T> = std::result::Result<T, NavError>;

/// Recoverable failures surfaced by the navigation core.
///
/// Everything here is either a best-effort miss (the caller may ignore it) or a
/// failure of an outer surface such as the command bridge configuration.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("navigator `{0}` is not registered")]
    UnknownNavigator(String),
    #[error("navigator `{0}` is busy handling another transition")]
    NavigatorBusy(String),
    #[error("navigator `{navigator}` cannot take `{command}`: {reason}")]
    NotNavigable {
        navigator: String,
        command: &'static str,
        reason: &'static str,
    },
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("log sink error: {0}")]
    Logging(#[from] LoggingError),
}

/// Structural misuse of the navigation API.
///
/// These indicate a caller bug and are never returned as values: they are
/// handed to [`fail_fast`], which panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Misuse {
    #[error("navigator `{0}` set content before its first bind_views")]
    ContentBeforeBind(String),
    #[error("navigator `{navigator}` received `{operation}` before its first bind_views")]
    NavigateBeforeBind {
        navigator: String,
        operation: &'static str,
    },
    #[error("tab navigator `{0}` cannot navigate; target one of its tabs instead")]
    NavigateOnTabNavigator(String),
    #[error("tab navigator `{0}` is finalized; tabs cannot be added")]
    TabsFinalized(String),
    #[error("tab navigator `{0}` was finalized without any tabs")]
    NoTabs(String),
    #[error("tab navigator `{0}` was bound before done_adding_tabs")]
    TabsNotFinalized(String),
    #[error("tab navigator `{navigator}` has no selectable tab at index {index}")]
    InvalidTab { navigator: String, index: usize },
    #[error("screen instance `{0}` was bound after it was destroyed")]
    BindDestroyedInstance(String),
    #[error("navigation state touched off the UI thread")]
    OffUiThread,
}

/// Abort on a structural misuse of the API.
#[track_caller]
pub fn fail_fast(misuse: Misuse) -> ! {
    panic!("navigation misuse: {misuse}")
}
