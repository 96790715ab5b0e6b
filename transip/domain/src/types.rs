use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use transip_soap::Value;

use crate::error::ParseError;

/**
    A registered domain, as returned by `getInfo` and `batchGetInfo`.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Domain {
    pub name: String,
    #[serde(deserialize_with = "soap_array")]
    pub nameservers: Vec<Nameserver>,
    #[serde(deserialize_with = "soap_array")]
    pub contacts: Vec<Contact>,
    #[serde(rename = "dnsEntries", deserialize_with = "soap_array")]
    pub dns_entries: Vec<DnsEntry>,
    pub auth_code: String,
    pub is_locked: bool,
    pub registration_date: String,
    pub renewal_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Nameserver {
    pub hostname: String,
    pub ipv4: String,
    pub ipv6: String,
}

/**
    WHOIS contact attached to a domain (registrant, administrative or technical).
*/
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    #[serde(rename = "type")]
    pub contact_type: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub company_name: String,
    pub company_kvk: String,
    pub company_type: String,
    pub street: String,
    pub number: String,
    pub postal_code: String,
    pub city: String,
    pub phone_number: String,
    pub fax_number: String,
    pub email: String,
    pub country: String,
}

/**
    One DNS record of a domain.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DnsEntry {
    pub name: String,
    /// TTL in seconds.
    pub expire: i64,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub content: String,
}

impl DnsEntry {
    pub fn new(
        name: impl Into<String>,
        expire: i64,
        entry_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            expire,
            entry_type: entry_type.into(),
            content: content.into(),
        }
    }

    /**
        `ns1:DnsEntry` argument value. Field order is part of the signed parameters.
    */
    pub(crate) fn to_value(&self) -> Value {
        Value::object(
            "DnsEntry",
            vec![
                ("name", Value::string(self.name.as_str())),
                ("expire", Value::int(self.expire)),
                ("type", Value::string(self.entry_type.as_str())),
                ("content", Value::string(self.content.as_str())),
            ],
        )
    }
}

/**
    Result of `checkAvailability`.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    /// Can be registered.
    Free,
    /// Registered elsewhere.
    NotFree,
    /// Already in this account.
    InYourAccount,
    /// Cannot be registered (reserved or unsupported TLD).
    Unavailable,
    /// In another TransIP account, can be pulled.
    InternalPull,
    /// In another TransIP account, owner can push.
    InternalPush,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::NotFree => "notfree",
            Self::InYourAccount => "inyouraccount",
            Self::Unavailable => "unavailable",
            Self::InternalPull => "internalpull",
            Self::InternalPush => "internalpush",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "free" => Ok(Self::Free),
            "notfree" => Ok(Self::NotFree),
            "inyouraccount" => Ok(Self::InYourAccount),
            "unavailable" => Ok(Self::Unavailable),
            "internalpull" => Ok(Self::InternalPull),
            "internalpush" => Ok(Self::InternalPush),
            other => Err(ParseError {
                kind: "availability",
                value: other.to_string(),
            }),
        }
    }
}

// ── Response payloads ────────────────────────────────────────────────

/**
    `ArrayOfString` payload of `getDomainNames`.
*/
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StringArray {
    #[serde(rename = "item", default)]
    pub items: Vec<String>,
}

/**
    `ArrayOfDomain` payload of `batchGetInfo`.
*/
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DomainArray {
    #[serde(rename = "item", default)]
    pub items: Vec<Domain>,
}

/**
    `xsd:string` payload of `checkAvailability`.
*/
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StringReturn {
    #[serde(rename = "$text", default)]
    pub value: String,
}

/**
    Deserialize a SOAP-encoded array (`<x><item/>...</x>`) into its items.
*/
fn soap_array<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    struct Items<T> {
        #[serde(rename = "item", default = "Vec::new")]
        item: Vec<T>,
    }

    Ok(Items::<T>::deserialize(deserializer)?.item)
}
