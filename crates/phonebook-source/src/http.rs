use crate::source::TextSource;
use crate::{Result, SourceError};

#[cfg(feature = "http-source")]
mod imp {
    use super::{Result, SourceError, TextSource};
    use chrono::Utc;
    use reqwest::blocking::Client;
    use reqwest::StatusCode;
    use std::time::Duration;
    use tracing::debug;
    use url::Url;

    const CACHE_BUSTER_PARAM: &str = "t";

    #[derive(Debug, Clone)]
    pub struct HttpSource {
        url: String,
        user_agent: Option<String>,
    }

    impl HttpSource {
        pub fn new(url: String, user_agent: Option<String>) -> Self {
            Self { url, user_agent }
        }
    }

    impl TextSource for HttpSource {
        fn source_name(&self) -> &'static str {
            "http"
        }

        fn fetch_text(&self) -> Result<String> {
            fetch_text(&self.url, self.user_agent.as_deref())
        }
    }

    pub fn fetch_text(raw_url: &str, user_agent: Option<&str>) -> Result<String> {
        let url = request_url(raw_url, Utc::now().timestamp_millis())?;
        let client = Client::builder()
            .user_agent(user_agent.unwrap_or("phonebook"))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| SourceError::Unavailable(err.to_string()))?;

        let response = client
            .get(url)
            .send()
            .map_err(|err| SourceError::Unavailable(format!("{}: {}", raw_url, err)))?;

        if let Some(err) = status_error(raw_url, response.status()) {
            return Err(err);
        }

        let text = response
            .text()
            .map_err(|err| SourceError::Unavailable(format!("{}: {}", raw_url, err)))?;
        debug!(url = raw_url, bytes = text.len(), "source fetched");
        Ok(text)
    }

    /// 404 is `NotFound`; any other non-success status is `Unavailable`.
    pub fn status_error(raw_url: &str, status: StatusCode) -> Option<SourceError> {
        if status == StatusCode::NOT_FOUND {
            return Some(SourceError::NotFound(format!(
                "{} (status {})",
                raw_url,
                status.as_u16()
            )));
        }
        if !status.is_success() {
            return Some(SourceError::Unavailable(format!(
                "{} responded with status {}",
                raw_url,
                status.as_u16()
            )));
        }
        None
    }

    /// Validates the URL and appends the `t=<millis>` cache-busting parameter.
    pub fn request_url(raw_url: &str, now_millis: i64) -> Result<Url> {
        let mut url = Url::parse(raw_url)
            .map_err(|err| SourceError::InvalidLocation(format!("{}: {}", raw_url, err)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SourceError::InvalidLocation(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }
        url.query_pairs_mut()
            .append_pair(CACHE_BUSTER_PARAM, &now_millis.to_string());
        Ok(url)
    }

    #[cfg(test)]
    mod tests {
        use super::{request_url, status_error};
        use crate::SourceError;
        use reqwest::StatusCode;

        const URL: &str = "https://intranet.example/PhoneBook.json";

        #[test]
        fn success_status_is_not_an_error() {
            assert!(status_error(URL, StatusCode::OK).is_none());
        }

        #[test]
        fn missing_document_is_not_found() {
            let err = status_error(URL, StatusCode::NOT_FOUND).expect("error");
            assert!(matches!(err, SourceError::NotFound(_)));
            assert!(err.to_string().contains("404"));
        }

        #[test]
        fn server_errors_are_unavailable_with_status() {
            let err = status_error(URL, StatusCode::SERVICE_UNAVAILABLE).expect("error");
            assert!(matches!(err, SourceError::Unavailable(_)));
            assert!(err.to_string().contains("responded with status 503"));
            assert!(err.is_unavailable());

            let err = status_error(URL, StatusCode::FORBIDDEN).expect("error");
            assert!(err.to_string().contains("403"));
        }

        #[test]
        fn cache_buster_is_appended() {
            let url = request_url("https://intranet.example/PhoneBook.json", 1_700_000_000_000)
                .expect("url");
            assert_eq!(
                url.as_str(),
                "https://intranet.example/PhoneBook.json?t=1700000000000"
            );
        }

        #[test]
        fn existing_query_is_kept() {
            let url = request_url("http://intranet.example/list.csv?rev=3", 5).expect("url");
            assert_eq!(url.as_str(), "http://intranet.example/list.csv?rev=3&t=5");
        }

        #[test]
        fn non_http_schemes_are_rejected() {
            assert!(request_url("ftp://intranet.example/list.csv", 5).is_err());
            assert!(request_url("not a url", 5).is_err());
        }
    }
}

#[cfg(not(feature = "http-source"))]
mod imp {
    use super::{Result, SourceError, TextSource};

    #[derive(Debug, Clone)]
    pub struct HttpSource {
        url: String,
        user_agent: Option<String>,
    }

    impl HttpSource {
        pub fn new(url: String, user_agent: Option<String>) -> Self {
            Self { url, user_agent }
        }
    }

    impl TextSource for HttpSource {
        fn source_name(&self) -> &'static str {
            "http"
        }

        fn fetch_text(&self) -> Result<String> {
            let _ = (&self.url, &self.user_agent);
            Err(SourceError::Unavailable(
                "http sources require the http-source feature".to_string(),
            ))
        }
    }

    pub fn fetch_text(_raw_url: &str, _user_agent: Option<&str>) -> Result<String> {
        Err(SourceError::Unavailable(
            "http sources require the http-source feature".to_string(),
        ))
    }
}

pub use imp::{fetch_text, HttpSource};
