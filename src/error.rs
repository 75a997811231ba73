use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path} has no column '{column}'")]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("bad record in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to draw {path}: {message}")]
    Draw { path: PathBuf, message: String },
    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
