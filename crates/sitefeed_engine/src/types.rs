use std::fmt;
use std::path::PathBuf;

use sitefeed_core::SiteError;

use crate::loader::SiteLoadError;
use crate::writer::WriteError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    /// Where the page was served from after redirects.
    pub final_url: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: u64 },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large ({actual} bytes, max {max_bytes})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Why a site produced no feed file.
#[derive(Debug, thiserror::Error)]
pub enum SiteFailure {
    #[error("config: {0}")]
    Config(#[from] SiteLoadError),
    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Scrape(#[from] SiteError),
    #[error("write: {0}")]
    Write(#[from] WriteError),
}

#[derive(Debug)]
pub enum SiteStatus {
    Written { path: PathBuf, items: usize },
    Skipped(SiteFailure),
}

#[derive(Debug)]
pub struct SiteReport {
    /// Config file name the site came from.
    pub label: String,
    pub site_name: String,
    pub status: SiteStatus,
}

impl SiteReport {
    pub fn is_written(&self) -> bool {
        matches!(self.status, SiteStatus::Written { .. })
    }
}

impl fmt::Display for SiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            SiteStatus::Written { path, items } => {
                write!(f, "{}: wrote {} ({} items)", self.site_name, path.display(), items)
            }
            SiteStatus::Skipped(reason) => write!(f, "{}: skipped ({})", self.site_name, reason),
        }
    }
}

/// Per-site reports in the order the sites were loaded.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<SiteReport>,
}

impl RunSummary {
    pub fn written(&self) -> usize {
        self.reports.iter().filter(|r| r.is_written()).count()
    }

    pub fn skipped(&self) -> usize {
        self.reports.len() - self.written()
    }
}
