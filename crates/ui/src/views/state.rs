use dioxus::prelude::*;
use services::ProgressServiceError;

/// Failure shown in place of a view's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// Saved progress or history could not be read.
    Storage,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Storage => "Something went wrong loading your progress. Please try again.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<ProgressServiceError> for ViewError {
    fn from(err: ProgressServiceError) -> Self {
        tracing::warn!(error = %err, "progress unavailable");
        match err {
            ProgressServiceError::Storage(_) => ViewError::Storage,
            _ => ViewError::Unknown,
        }
    }
}

/// Render-friendly view of a `use_resource` result.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
        UseResourceState::Ready => resource
            .value()
            .read()
            .as_ref()
            .map_or(ViewState::Error(ViewError::Unknown), |result| match result {
                Ok(data) => ViewState::Ready(data.clone()),
                Err(err) => ViewState::Error(*err),
            }),
    }
}
