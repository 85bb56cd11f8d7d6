//! Input client implementation

use crate::error::FetchError;
use reqwest::header::{HeaderValue, USER_AGENT};
use tracing::debug;
use zeroize::Zeroize;

/// Where inputs come from unless a builder says otherwise
pub const DEFAULT_BASE_URL: &str = "https://adventofcode.com";

const AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Blocking client for `GET {base}/{year}/day/{day}/input`
///
/// # Example
///
/// ```no_run
/// use sleigh_http::InputClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = InputClient::builder()
///     .base_url("http://localhost:1234")?
///     .build()?;
/// let input = client.get_input(2018, 22, "session")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct InputClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
}

impl InputClient {
    /// Create a client against the default site with rustls and no redirects
    ///
    /// # Errors
    ///
    /// Returns `FetchError::ClientInit` if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, FetchError> {
        Self::builder().build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> InputClientBuilder {
        InputClientBuilder::new()
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Build the cookie header, marked sensitive, wiping the temporary string.
    fn create_cookie_header(session: &str) -> Result<HeaderValue, FetchError> {
        let mut cookie_string = format!("session={}", session);
        let header_value = HeaderValue::from_bytes(cookie_string.as_bytes())
            .map_err(|_| FetchError::ClientInit("Invalid session cookie format".to_string()));
        cookie_string.zeroize();

        let mut header_value = header_value?;
        header_value.set_sensitive(true);
        Ok(header_value)
    }

    /// Fetch the puzzle input for a year and day
    ///
    /// # Errors
    ///
    /// * `FetchError::Request` - Network error
    /// * `FetchError::InvalidStatus` - Any non-2xx answer, redirects included
    /// * `FetchError::Encoding` - Response is not valid UTF-8
    pub fn get_input(&self, year: u16, day: u8, session: &str) -> Result<String, FetchError> {
        let cookie_header = Self::create_cookie_header(session)?;

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::ClientInit("Cannot modify base URL path".to_string()))?
            .clear()
            .extend(&[&year.to_string(), "day", &day.to_string(), "input"]);

        debug!(%url, "fetching puzzle input");
        let response = self
            .client
            .get(url)
            .header("Cookie", cookie_header)
            .send()?;

        if !response.status().is_success() {
            return Err(FetchError::InvalidStatus {
                status: response.status(),
            });
        }

        response.text().map_err(|_| FetchError::Encoding)
    }
}

/// Builder for an [`InputClient`]
///
/// The redirect policy is always forced to `Policy::none()` and a user agent
/// naming this crate is set, whatever client builder is supplied.
#[derive(Debug)]
pub struct InputClientBuilder {
    base_url: Option<reqwest::Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl InputClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            client_builder: None,
        }
    }

    /// Point the client somewhere else, typically a mock server.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, FetchError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Use a custom reqwest client builder (timeouts, proxies and so on)
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    pub fn build(self) -> Result<InputClient, FetchError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| FetchError::ClientInit(e.to_string()))?,
        };

        let builder = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls());

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(AGENT));

        let client = builder
            .redirect(reqwest::redirect::Policy::none())
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::ClientInit(e.to_string()))?;

        Ok(InputClient { client, base_url })
    }
}

impl Default for InputClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::time::Duration;

    fn client_for(server: &mockito::Server) -> InputClient {
        InputClient::builder()
            .base_url(server.url())
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_base_url() {
        let client = InputClient::builder().build().unwrap();
        assert_eq!(client.base_url().as_str(), "https://adventofcode.com/");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(InputClient::builder().base_url("not a valid url").is_err());
    }

    #[test]
    fn test_custom_client_builder() {
        let builder = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .use_rustls_tls();
        assert!(InputClient::builder().client_builder(builder).build().is_ok());
    }

    #[test]
    fn test_sends_session_cookie_and_agent() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2018/day/9/input")
            .match_header("cookie", "session=abc123")
            .match_header("user-agent", AGENT)
            .with_status(200)
            .with_body("9 players; last marble is worth 25 points\n")
            .expect(1)
            .create();

        let input = client_for(&server).get_input(2018, 9, "abc123").unwrap();
        assert_eq!(input, "9 players; last marble is worth 25 points\n");
        mock.assert();
    }

    #[test]
    fn test_redirect_is_not_followed() {
        let mut server = mockito::Server::new();
        let home = server.mock("GET", "/").with_status(200).expect(0).create();
        let input = server
            .mock("GET", "/2018/day/22/input")
            .with_status(302)
            .with_header("location", "/")
            .expect(1)
            .create();

        let err = client_for(&server).get_input(2018, 22, "stale").unwrap_err();
        assert!(err.is_session_rejected());
        home.assert();
        input.assert();
    }

    #[test]
    fn test_session_with_newline_is_rejected() {
        let server = mockito::Server::new();
        let err = client_for(&server).get_input(2018, 1, "bad\nsession").unwrap_err();
        assert!(matches!(err, FetchError::ClientInit(_)));
    }

    // **Feature: input-client, Property 1: Input URL construction**
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_input_url_construction(
            year in 2015u16..2030u16,
            day in 1u8..=25u8,
            session in "[a-f0-9]{32,128}",
        ) {
            let mut server = mockito::Server::new();
            let mock = server
                .mock("GET", format!("/{}/day/{}/input", year, day).as_str())
                .with_status(200)
                .with_body("input")
                .expect(1)
                .create();

            let result = client_for(&server).get_input(year, day, &session);
            mock.assert();
            prop_assert_eq!(result.unwrap(), "input");
        }
    }

    // **Feature: input-client, Property 2: Non-success statuses become errors**
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_non_success_status(
            status_code in prop::sample::select(vec![400usize, 401, 403, 404, 429, 500, 503]),
        ) {
            let mut server = mockito::Server::new();
            let mock = server
                .mock("GET", "/2018/day/7/input")
                .with_status(status_code)
                .expect(1)
                .create();

            let result = client_for(&server).get_input(2018, 7, "session");
            mock.assert();
            match result {
                Err(FetchError::InvalidStatus { status }) => {
                    prop_assert_eq!(status.as_u16() as usize, status_code);
                }
                other => prop_assert!(false, "expected InvalidStatus, got {:?}", other),
            }
        }
    }
}
