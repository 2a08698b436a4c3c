use std::io;
use std::time::Duration;

use crate::config::Config;
use crate::error::{DeskError, Result};

/// Anything that can hand back the HTML behind a URL
///
/// The search runner only sees this trait, so tests can feed fixed pages.
pub trait PageSource {
    fn fetch_html(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP fetcher (ureq) with a bounded per-request wait
pub struct HttpSource {
    agent: ureq::Agent,
    user_agent: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            agent,
            user_agent: user_agent.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Duration::from_secs(config.timeout_secs), config.user_agent.clone())
    }
}

impl PageSource for HttpSource {
    fn fetch_html(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "GET");
        let response = self
            .agent
            .get(url)
            .header("User-Agent", &self.user_agent)
            .call()
            .map_err(|e| classify(e, url, self.timeout))?;

        response
            .into_body()
            .read_to_string()
            .map_err(|e| classify(e, url, self.timeout))
    }
}

/// Separate timeouts from other failures, the caller treats them differently
fn classify(err: ureq::Error, url: &str, timeout: Duration) -> DeskError {
    match err {
        ureq::Error::Timeout(_) => timed_out(url, timeout),
        ureq::Error::Io(ref e) if e.kind() == io::ErrorKind::TimedOut => timed_out(url, timeout),
        other => DeskError::HttpError(other),
    }
}

fn timed_out(url: &str, timeout: Duration) -> DeskError {
    DeskError::Timeout(format!("{} (no answer within {}s)", url, timeout.as_secs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_timeout() {
        let err = classify(
            ureq::Error::Io(io::Error::new(io::ErrorKind::TimedOut, "slow")),
            "https://oscar.sprzedajemy.pl/szukaj",
            Duration::from_secs(8),
        );
        assert!(err.is_timeout());
        assert!(err.to_string().contains("8s"));
    }

    #[test]
    fn test_classify_other_errors() {
        let err = classify(
            ureq::Error::Io(io::Error::new(io::ErrorKind::ConnectionRefused, "nope")),
            "https://oscar.sprzedajemy.pl/szukaj",
            Duration::from_secs(8),
        );
        assert!(!err.is_timeout());
        assert!(matches!(err, DeskError::HttpError(_)));
    }
}
