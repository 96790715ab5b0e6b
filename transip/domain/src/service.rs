use transip_soap::{Credentials, MethodCall, Request, SoapClient, SoapError, SoapResult, Value};

use crate::types::{Availability, DnsEntry, Domain, DomainArray, StringArray, StringReturn};

/**
    Remote service name, sent as the `service` query parameter and signed as `__service`.
*/
pub const DOMAIN_SERVICE: &str = "DomainService";

/**
    Client for the TransIP `DomainService`.

    Methods map one-to-one onto remote methods. Each call is signed with the
    held credentials and sent on its own connection.
*/
#[derive(Debug, Clone)]
pub struct DomainService {
    client: SoapClient,
    credentials: Credentials,
}

impl DomainService {
    /**
        Create a service client for the production API.
    */
    pub fn new(credentials: Credentials) -> SoapResult<Self> {
        Ok(Self::with_client(SoapClient::production()?, credentials))
    }

    pub fn with_client(client: SoapClient, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /**
        Names of all domains in the account (`getDomainNames`).
    */
    pub async fn domain_names(&self) -> SoapResult<Vec<String>> {
        let names: StringArray = self.call(domain_names_request()).await?;
        Ok(names.items)
    }

    /**
        Full information for one domain (`getInfo`).
    */
    pub async fn domain(&self, name: &str) -> SoapResult<Domain> {
        self.call(domain_request(name)).await
    }

    /**
        Full information for several domains in one call (`batchGetInfo`).
    */
    pub async fn domains<I, S>(&self, names: I) -> SoapResult<Vec<Domain>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let domains: DomainArray = self.call(domains_request(names)).await?;
        Ok(domains.items)
    }

    /**
        Registration status of a domain name (`checkAvailability`).
    */
    pub async fn check_availability(&self, name: &str) -> SoapResult<Availability> {
        let status: StringReturn = self.call(availability_request(name)).await?;
        status
            .value
            .parse()
            .map_err(|e: crate::ParseError| SoapError::Deserialize(e.to_string()))
    }

    /**
        Replace all DNS entries of `domain` (`setDnsEntries`). Requires read-write credentials.
    */
    pub async fn set_dns_entries(&self, domain: &str, entries: &[DnsEntry]) -> SoapResult<()> {
        if !self.credentials.read_write() {
            tracing::warn!(domain, "setDnsEntries with read-only credentials");
        }
        let request = set_dns_entries_request(domain, entries);
        self.client
            .call_expecting(&self.credentials, &request, "setDnsEntriesResponse")
            .await
    }

    async fn call<T>(&self, request: Request) -> SoapResult<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        self.client.call(&self.credentials, &request).await
    }
}

// ── Request builders ─────────────────────────────────────────────────

fn domain_names_request() -> Request {
    MethodCall::new("getDomainNames").into_request(DOMAIN_SERVICE)
}

fn domain_request(name: &str) -> Request {
    MethodCall::new("getInfo")
        .arg("domainName", Value::string(name))
        .into_request(DOMAIN_SERVICE)
}

fn domains_request<I, S>(names: I) -> Request
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    MethodCall::new("batchGetInfo")
        .arg("domainNames", Value::string_array(names))
        .into_request(DOMAIN_SERVICE)
}

fn availability_request(name: &str) -> Request {
    MethodCall::new("checkAvailability")
        .arg("domainName", Value::string(name))
        .into_request(DOMAIN_SERVICE)
}

fn set_dns_entries_request(domain: &str, entries: &[DnsEntry]) -> Request {
    MethodCall::new("setDnsEntries")
        .arg("domainName", Value::string(domain))
        .arg(
            "dnsEntries",
            Value::object_array("DnsEntry", entries.iter().map(DnsEntry::to_value).collect()),
        )
        .into_request(DOMAIN_SERVICE)
}
