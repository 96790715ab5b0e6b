mod error;
mod service;
mod types;

pub use transip_soap::{ClientConfig, Credentials, SoapClient, SoapError, SoapFault, SoapResult};

pub use self::error::ParseError;
pub use self::service::{DOMAIN_SERVICE, DomainService};
pub use self::types::{Availability, Contact, DnsEntry, Domain, Nameserver};
