use super::StoreApi;
use crate::helpers::{get_default_middleware, USER_AGENT_STRING};
use crate::types::HttpClient;
use std::sync::{Arc, RwLock};
use reqwest::cookie::Jar;

const DEFAULT_LANGUAGE: &str = "english";

/// Builder for constructing a [`StoreApi`].
#[derive(Debug, Clone)]
pub struct StoreApiBuilder {
    /// The language for store pages.
    pub(crate) language: String,
    /// Request cookies.
    pub(crate) cookie_jar: Option<Arc<Jar>>,
    /// Client to use for requests. Remember to also include the cookies
    /// connected to this client.
    pub(crate) client: Option<HttpClient>,
    /// User agent for requests.
    pub(crate) user_agent: &'static str,
}

impl Default for StoreApiBuilder {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.into(),
            cookie_jar: None,
            client: None,
            user_agent: USER_AGENT_STRING,
        }
    }
}

impl StoreApiBuilder {
    /// Creates a new [`StoreApiBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The language for store pages.
    pub fn language<T>(mut self, language: T) -> Self
    where
        T: Into<String>,
    {
        self.language = language.into();
        self
    }

    /// The cookie jar to use for requests.
    pub fn cookie_jar(mut self, cookie_jar: Arc<Jar>) -> Self {
        self.cookie_jar = Some(cookie_jar);
        self
    }

    /// Client to use for requests. Remember to also include the cookies
    /// connected to this client.
    pub fn client(mut self, client: HttpClient, cookie_jar: Arc<Jar>) -> Self {
        self.client = Some(client);
        self.cookie_jar = Some(cookie_jar);
        self
    }

    /// The user agent for requests.
    pub fn user_agent(mut self, user_agent: &'static str) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Builds the [`StoreApi`].
    pub fn build(self) -> StoreApi {
        self.into()
    }
}

impl From<StoreApiBuilder> for StoreApi {
    fn from(builder: StoreApiBuilder) -> Self {
        let cookies = builder.cookie_jar
            .unwrap_or_else(|| Arc::new(Jar::default()));
        let client = builder.client
            .unwrap_or_else(|| get_default_middleware(
                Arc::clone(&cookies),
                builder.user_agent,
            ));

        Self {
            client,
            cookies,
            language: builder.language,
            sessionid: Arc::new(RwLock::new(None)),
        }
    }
}
