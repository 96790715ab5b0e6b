use reqwest::header::{CONNECTION, CONTENT_TYPE, COOKIE};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::constants;
use crate::credentials::Credentials;
use crate::decode::{decode, expect_element};
use crate::envelope::build_envelope;
use crate::error::{SoapError, SoapResult};
use crate::request::Request;
use crate::signature::{sign, signed_params};
use crate::stamp::RequestStamp;

/**
    Signs and sends SOAP requests to the TransIP API.

    Every call builds its own stamp, signature and connection. Nothing is
    pooled, cached or retried. A `SoapClient` holds no per-request state and
    can be shared between tasks.
*/
#[derive(Debug, Clone)]
pub struct SoapClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl SoapClient {
    /**
        Create a client with the given endpoint settings.
    */
    pub fn new(config: ClientConfig) -> SoapResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| SoapError::HttpClient(e.to_string()))?;
        Ok(Self { http, config })
    }

    /**
        Create a client for the production API.
    */
    pub fn production() -> SoapResult<Self> {
        Self::new(ClientConfig::default())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /**
        Send `request` and decode its `return` payload into `T`.

        `T::default()` is returned when the response has no `return` element.
    */
    pub async fn call<T>(&self, credentials: &Credentials, request: &Request) -> SoapResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let raw = self.lookup(credentials, request).await?;
        decode(&raw)
    }

    /**
        Send `request` and require an element named `response_element` in the reply.
    */
    pub async fn call_expecting(
        &self,
        credentials: &Credentials,
        request: &Request,
        response_element: &str,
    ) -> SoapResult<()> {
        let raw = self.lookup(credentials, request).await?;
        expect_element(&raw, response_element)
    }

    /**
        Send `request` with a fresh stamp and return the raw response body.
    */
    pub async fn lookup(&self, credentials: &Credentials, request: &Request) -> SoapResult<Vec<u8>> {
        self.lookup_with_stamp(credentials, request, &RequestStamp::now())
            .await
    }

    /**
        Send `request` with the given stamp and return the raw response body.

        The HTTP status is not inspected: faults arrive with a 500 and are
        handled by the decoder. An empty body is an error.
    */
    pub async fn lookup_with_stamp(
        &self,
        credentials: &Credentials,
        request: &Request,
        stamp: &RequestStamp,
    ) -> SoapResult<Vec<u8>> {
        let envelope = build_envelope(&self.config.namespace, &request.body);
        let cookies = self.cookie_header(credentials, request, stamp)?;
        let url = self.config.endpoint(&request.service);

        tracing::debug!(
            url = %url,
            service = %request.service,
            method = %request.method,
            params = request.params.len(),
            "sending SOAP request"
        );

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, constants::CONTENT_TYPE)
            .header(CONNECTION, "close")
            .header(COOKIE, cookies)
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(
            status = status.as_u16(),
            bytes = body.len(),
            method = %request.method,
            "received SOAP response"
        );

        if body.is_empty() {
            return Err(SoapError::EmptyResponse);
        }
        Ok(body.to_vec())
    }

    /**
        `Cookie` header value carrying login, mode, stamp, client version and signature.
    */
    fn cookie_header(
        &self,
        credentials: &Credentials,
        request: &Request,
        stamp: &RequestStamp,
    ) -> SoapResult<String> {
        let params = signed_params(
            &request.params,
            &request.method,
            &request.service,
            &self.config.host,
            stamp,
        );
        let signature = sign(credentials.private_key(), &params)?;
        let timestamp = stamp.timestamp.to_string();

        let cookies = [
            ("login", credentials.login()),
            ("mode", credentials.mode()),
            ("timestamp", timestamp.as_str()),
            ("nonce", stamp.nonce.as_str()),
            ("clientVersion", self.config.client_version.as_str()),
            ("signature", signature.as_str()),
        ];

        let mut header = String::new();
        for (name, value) in cookies {
            if !value.bytes().all(is_cookie_octet) {
                return Err(SoapError::InvalidCookie(name));
            }
            if !header.is_empty() {
                header.push_str("; ");
            }
            header.push_str(name);
            header.push('=');
            header.push_str(value);
        }
        Ok(header)
    }
}

/**
    RFC 6265 `cookie-octet`: printable ASCII except space, `"`, `,`, `;` and `\`.
*/
fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2b | 0x2d..=0x3a | 0x3c..=0x5b | 0x5d..=0x7e)
}
