/*!
    SOAP 1.1 request envelope.

    ```xml
    <?xml version="1.0" encoding="UTF-8"?>
    <SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/"
        xmlns:ns1="http://www.transip.nl/soap" xmlns:xsd="..." xmlns:xsi="..."
        xmlns:SOAP-ENC="http://schemas.xmlsoap.org/soap/encoding/"
        SOAP-ENV:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
      <SOAP-ENV:Body><!-- method fragment --></SOAP-ENV:Body>
    </SOAP-ENV:Envelope>
    ```

    The body fragment is inserted verbatim. It is not validated or escaped
    here; values must already be escaped by whoever built the fragment
    (see [`MethodCall`](crate::MethodCall)).
*/

use crate::constants::{SOAP_ENC_NS, SOAP_ENV_NS, XSD_NS, XSI_NS};

/**
    Wraps `body` in the fixed envelope, binding `namespace` to the `ns1` prefix.
*/
pub fn build_envelope(namespace: &str, body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<SOAP-ENV:Envelope xmlns:SOAP-ENV=\"{soap_env}\" \
xmlns:ns1=\"{namespace}\" \
xmlns:xsd=\"{xsd}\" \
xmlns:xsi=\"{xsi}\" \
xmlns:SOAP-ENC=\"{soap_enc}\" \
SOAP-ENV:encodingStyle=\"{soap_enc}\">\
<SOAP-ENV:Body>{body}</SOAP-ENV:Body>\
</SOAP-ENV:Envelope>",
        soap_env = SOAP_ENV_NS,
        xsd = XSD_NS,
        xsi = XSI_NS,
        soap_enc = SOAP_ENC_NS,
    )
}
