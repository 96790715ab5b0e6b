/*!
    TransIP SOAP protocol constants.

    - API host and SOAP path
    - Envelope namespaces (SOAP 1.1, encoding, XML schema)
    - ASN.1 DigestInfo header for SHA-512
    - Client identification sent with every request
*/

use std::time::Duration;

use hex_literal::hex;

/**
    Production API host. Also signed as `__hostname`.
*/
pub const API_HOST: &str = "api.transip.nl";

/**
    Path of the SOAP endpoint. The service name goes in the `service` query parameter.
*/
pub const SOAP_PATH: &str = "/soap/";

/**
    Method namespace, bound to the `ns1` prefix in every envelope.
*/
pub const API_NAMESPACE: &str = "http://www.transip.nl/soap";

pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const SOAP_ENC_NS: &str = "http://schemas.xmlsoap.org/soap/encoding/";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/**
    Value of the `clientVersion` cookie.
*/
pub const CLIENT_VERSION: &str = "0.1";

pub const USER_AGENT: &str = "mpdroog/soapclient";

pub const CONTENT_TYPE: &str = "text/xml; charset=\"utf-8\"";

/**
    Upper bound for one request, connect to last body byte.
*/
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/**
    DER `DigestInfo` header for SHA-512, prepended to the raw digest before
    PKCS#1 v1.5 signing:

    ```text
    SEQUENCE (0x51) {
      SEQUENCE (0x0d) { OID 2.16.840.1.101.3.4.2.3, NULL }
      OCTET STRING (0x40) <digest>
    }
    ```
*/
pub const SHA512_DIGEST_INFO: [u8; 19] = hex!(
    "3051"
    "300d"
    "0609" "608648016503040203"
    "0500"
    "0440"
);
