#![allow(clippy::doc_overindented_list_items)]

mod call;
mod client;
mod config;
mod credentials;
mod envelope;
mod error;
mod fault;
mod request;
mod stamp;

pub mod constants;
pub mod decode;
pub mod params;
pub mod signature;

pub use self::call::{MethodCall, Value};
pub use self::client::SoapClient;
pub use self::config::ClientConfig;
pub use self::credentials::Credentials;
pub use self::decode::{decode, decode_optional, expect_element};
pub use self::envelope::build_envelope;
pub use self::error::{SoapError, SoapResult};
pub use self::fault::SoapFault;
pub use self::params::{Param, ParamList, canonicalize};
pub use self::request::Request;
pub use self::signature::sign;
pub use self::stamp::RequestStamp;
