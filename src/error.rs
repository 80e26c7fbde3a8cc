use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("task {0} not found")]
    TaskNotFound(u64),

    #[error("task description must not be empty")]
    EmptyDescription,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TodoError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TaskNotFound(_) => "task_not_found",
            Self::EmptyDescription => "empty_description",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;
