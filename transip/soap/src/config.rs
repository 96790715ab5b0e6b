use std::time::Duration;

use crate::constants::{
    API_HOST, API_NAMESPACE, CLIENT_VERSION, REQUEST_TIMEOUT, SOAP_PATH, USER_AGENT,
};

/**
    Endpoint settings of a [`SoapClient`](crate::SoapClient).

    The defaults target the production API. `host` is also the value signed as
    `__hostname`, so it must be the host name the remote end knows itself by.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub scheme: String,
    pub host: String,
    pub namespace: String,
    pub timeout: Duration,
    pub client_version: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scheme: "https".into(),
            host: API_HOST.into(),
            namespace: API_NAMESPACE.into(),
            timeout: REQUEST_TIMEOUT,
            client_version: CLIENT_VERSION.into(),
            user_agent: USER_AGENT.into(),
        }
    }
}

impl ClientConfig {
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_client_version(mut self, client_version: impl Into<String>) -> Self {
        self.client_version = client_version.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /**
        Endpoint URL for `service`, e.g. `https://api.transip.nl/soap/?service=DomainService`.
    */
    pub fn endpoint(&self, service: &str) -> String {
        format!(
            "{}://{}{SOAP_PATH}?service={service}",
            self.scheme, self.host
        )
    }
}
