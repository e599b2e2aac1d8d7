use crate::source::LeadSource;
use crate::{Result, SourceError};

#[cfg(feature = "http-source")]
mod imp {
    use super::{LeadSource, Result, SourceError};
    use reqwest::blocking::Client;
    use std::time::Duration;
    use url::Url;

    #[derive(Debug, Clone)]
    pub struct HttpSource {
        url: String,
    }

    impl HttpSource {
        pub fn new(url: String) -> Self {
            Self { url }
        }
    }

    impl LeadSource for HttpSource {
        fn source_name(&self) -> &'static str {
            "http"
        }

        fn describe(&self) -> String {
            self.url.clone()
        }

        fn fetch_json(&self) -> Result<String> {
            fetch_json(&self.url)
        }
    }

    /// One GET, no retries. Non-2xx responses are reported with their status.
    pub fn fetch_json(location: &str) -> Result<String> {
        let url =
            Url::parse(location).map_err(|err| SourceError::InvalidUrl(err.to_string()))?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(SourceError::InvalidUrl(format!(
                "unsupported scheme {}",
                url.scheme()
            )));
        }
        let client = Client::builder()
            .user_agent(concat!("leadboard/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(transport)?;

        let response = client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }
        response.text().map_err(transport)
    }

    fn transport(err: reqwest::Error) -> SourceError {
        SourceError::Transport(err.to_string())
    }

    #[cfg(test)]
    mod tests {
        use super::fetch_json;
        use crate::SourceError;

        #[test]
        fn rejects_unparseable_and_non_http_urls() {
            assert!(matches!(
                fetch_json("not a url"),
                Err(SourceError::InvalidUrl(_))
            ));
            assert!(matches!(
                fetch_json("ftp://leads.test/leads.json"),
                Err(SourceError::InvalidUrl(_))
            ));
        }
    }
}

#[cfg(not(feature = "http-source"))]
mod imp {
    use super::{LeadSource, Result, SourceError};

    #[derive(Debug, Clone)]
    pub struct HttpSource {
        url: String,
    }

    impl HttpSource {
        pub fn new(url: String) -> Self {
            Self { url }
        }
    }

    impl LeadSource for HttpSource {
        fn source_name(&self) -> &'static str {
            "http"
        }

        fn describe(&self) -> String {
            self.url.clone()
        }

        fn fetch_json(&self) -> Result<String> {
            fetch_json(&self.url)
        }
    }

    pub fn fetch_json(_location: &str) -> Result<String> {
        Err(SourceError::Unavailable(
            "HTTP sources require the http-source feature".to_string(),
        ))
    }
}

pub use imp::{fetch_json, HttpSource};
