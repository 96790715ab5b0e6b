/*!
    Fault-aware decoding of SOAP responses.

    The response is scanned forward, token by token, and the scan stops at
    the first element of interest:

    - `return` (any namespace): its subtree is deserialized into the caller's type.
    - `Fault` in the SOAP envelope namespace: deserialized into [`SoapFault`]
      and returned as [`SoapError::Fault`].

    Running out of input without seeing either is not an error for
    [`decode`], which then yields `T::default()`. Use [`decode_optional`] to
    tell that case apart.

    Element prefixes and attributes (`xsi:type`, `SOAP-ENC:arrayType`) inside
    the payload are ignored; SOAP arrays arrive as repeated `<item>` children.
*/

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use serde::de::DeserializeOwned;

use crate::constants::SOAP_ENV_NS;
use crate::error::{SoapError, SoapResult};
use crate::fault::SoapFault;

const RETURN_ELEMENT: &str = "return";
const FAULT_ELEMENT: &[u8] = b"Fault";
const ERROR_EXCERPT_CHARS: usize = 256;

/**
    Decode the `return` payload of `raw` into `T`.

    Returns `T::default()` when the response has neither `return` nor `Fault`.
*/
pub fn decode<T>(raw: &[u8]) -> SoapResult<T>
where
    T: DeserializeOwned + Default,
{
    Ok(decode_optional(raw)?.unwrap_or_default())
}

/**
    Like [`decode`], but `None` when there is no `return` element.
*/
pub fn decode_optional<T>(raw: &[u8]) -> SoapResult<Option<T>>
where
    T: DeserializeOwned,
{
    match find_element(raw, RETURN_ELEMENT)? {
        Some(xml) => Ok(Some(quick_xml::de::from_str(&xml)?)),
        None => {
            tracing::debug!("response has no return element");
            Ok(None)
        }
    }
}

/**
    Succeeds if `raw` contains an element named `local_name`.

    For methods that answer with an empty `<ns1:methodResponse/>`.
*/
pub fn expect_element(raw: &[u8], local_name: &str) -> SoapResult<()> {
    match find_element(raw, local_name)? {
        Some(_) => Ok(()),
        None => {
            let body = String::from_utf8_lossy(raw);
            tracing::debug!(body = %body, "response is missing <{local_name}>");
            Err(SoapError::UnexpectedResponse(format!(
                "missing <{local_name}>: {}",
                excerpt(&body)
            )))
        }
    }
}

/**
    First `ERROR_EXCERPT_CHARS` characters of `body`, marked when cut.
*/
fn excerpt(body: &str) -> String {
    match body.char_indices().nth(ERROR_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}... ({} bytes)", &body[..cut], body.len()),
        None => body.to_string(),
    }
}

/**
    Scan for the first `local_name` element and return it as a standalone
    document, or fail on a SOAP fault.
*/
fn find_element(raw: &[u8], local_name: &str) -> SoapResult<Option<String>> {
    let mut reader = NsReader::from_reader(raw);

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        let fault = match &event {
            Event::Start(e) | Event::Empty(e) => is_soap_fault(&ns, e),
            _ => false,
        };

        match event {
            Event::Start(e) => {
                if fault {
                    let xml = read_subtree(&mut reader, raw, &e, "Fault")?;
                    return Err(fault_error(&xml));
                }
                if e.local_name().as_ref() == local_name.as_bytes() {
                    return read_subtree(&mut reader, raw, &e, local_name).map(Some);
                }
            }
            Event::Empty(e) => {
                if fault {
                    return Err(fault_error("<Fault/>"));
                }
                if e.local_name().as_ref() == local_name.as_bytes() {
                    return Ok(Some(format!("<{local_name}/>")));
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

fn is_soap_fault(ns: &ResolveResult, start: &BytesStart) -> bool {
    start.local_name().as_ref() == FAULT_ELEMENT
        && *ns == ResolveResult::Bound(Namespace(SOAP_ENV_NS.as_bytes()))
}

/**
    Consume the rest of `start` and rebuild it as `<tag>...</tag>`.

    The original start tag's prefix and attributes are dropped.
*/
fn read_subtree(
    reader: &mut NsReader<&[u8]>,
    raw: &[u8],
    start: &BytesStart,
    tag: &str,
) -> SoapResult<String> {
    let span = reader.read_to_end(start.name())?;
    let inner = raw
        .get(span.start as usize..span.end as usize)
        .ok_or_else(|| SoapError::InvalidXml("element span out of range".into()))?;
    let inner = std::str::from_utf8(inner).map_err(|e| SoapError::InvalidXml(e.to_string()))?;
    Ok(format!("<{tag}>{inner}</{tag}>"))
}

fn fault_error(xml: &str) -> SoapError {
    match quick_xml::de::from_str::<SoapFault>(xml) {
        Ok(fault) => {
            tracing::warn!(code = %fault.code, message = %fault.message, "SOAP fault");
            SoapError::Fault(fault)
        }
        Err(e) => SoapError::Deserialize(format!("malformed SOAP fault: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Record {
        #[serde(default)]
        name: String,
        #[serde(default)]
        expire: i64,
        #[serde(default)]
        is_locked: bool,
        #[serde(default)]
        nested: Nested,
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Nested {
        #[serde(rename = "item", default)]
        items: Vec<String>,
    }

    fn envelope(body: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<SOAP-ENV:Envelope xmlns:SOAP-ENV=\"http://schemas.xmlsoap.org/soap/envelope/\" \
xmlns:ns1=\"http://www.transip.nl/soap\" \
xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\" \
xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
xmlns:SOAP-ENC=\"http://schemas.xmlsoap.org/soap/encoding/\" \
SOAP-ENV:encodingStyle=\"http://schemas.xmlsoap.org/soap/encoding/\">\
<SOAP-ENV:Body>{body}</SOAP-ENV:Body></SOAP-ENV:Envelope>"
        )
    }

    const RECORD_RESPONSE: &str = "<ns1:getInfoResponse>\
<return xsi:type=\"ns1:Record\">\
<name xsi:type=\"xsd:string\">example.com</name>\
<expire xsi:type=\"xsd:int\">86400</expire>\
<isLocked xsi:type=\"xsd:boolean\">true</isLocked>\
<nested SOAP-ENC:arrayType=\"xsd:string[2]\" xsi:type=\"ns1:ArrayOfString\">\
<item xsi:type=\"xsd:string\">a</item>\
<item xsi:type=\"xsd:string\">b &amp; c</item>\
</nested>\
</return>\
</ns1:getInfoResponse>";

    const FAULT_RESPONSE: &str = "<SOAP-ENV:Fault>\
<faultcode>100</faultcode>\
<faultstring>Domain not found</faultstring>\
<faultactor>DomainService</faultactor>\
<detail>no such domain</detail>\
</SOAP-ENV:Fault>";

    #[test]
    fn decodes_nested_return() {
        let xml = envelope(RECORD_RESPONSE);
        let record: Record = decode(xml.as_bytes()).unwrap();
        assert_eq!(
            record,
            Record {
                name: "example.com".into(),
                expire: 86400,
                is_locked: true,
                nested: Nested {
                    items: vec!["a".into(), "b & c".into()],
                },
            }
        );
    }

    #[test]
    fn fault_is_error() {
        let xml = envelope(FAULT_RESPONSE);
        let err = decode::<Record>(xml.as_bytes()).unwrap_err();
        let fault = err.fault().expect("fault");
        assert_eq!(fault.code, "100");
        assert_eq!(fault.message, "Domain not found");
        assert_eq!(fault.actor, "DomainService");
        assert_eq!(fault.detail, "no such domain");
        assert_eq!(err.to_string(), "SOAP fault: Domain not found");
    }

    #[test]
    fn fault_with_minimal_fields() {
        let xml = envelope(
            "<SOAP-ENV:Fault><faultcode>SOAP-ENV:Server</faultcode>\
<faultstring>Invalid signature</faultstring></SOAP-ENV:Fault>",
        );
        let err = decode::<Record>(xml.as_bytes()).unwrap_err();
        let fault = err.fault().expect("fault");
        assert_eq!(fault.message, "Invalid signature");
        assert!(fault.actor.is_empty());
        assert!(fault.detail.is_empty());
    }

    #[test]
    fn fault_outside_soap_namespace_is_ignored() {
        let xml = envelope("<ns1:resp><Fault><faultstring>x</faultstring></Fault></ns1:resp>");
        let record: Option<Record> = decode_optional(xml.as_bytes()).unwrap();
        assert!(record.is_none());
    }

    #[test]
    fn missing_return_is_empty_success() {
        let xml = envelope("<ns1:setDnsEntriesResponse/>");
        let record: Record = decode(xml.as_bytes()).unwrap();
        assert_eq!(record, Record::default());

        let record: Option<Record> = decode_optional(xml.as_bytes()).unwrap();
        assert!(record.is_none());
    }

    #[test]
    fn first_return_wins() {
        let xml = envelope(
            "<ns1:r><return><name>first</name></return><return><name>second</name></return></ns1:r>",
        );
        let record: Record = decode(xml.as_bytes()).unwrap();
        assert_eq!(record.name, "first");
    }

    #[test]
    fn empty_return_element() {
        let xml = envelope("<ns1:r><return/></ns1:r>");
        let record: Option<Record> = decode_optional(xml.as_bytes()).unwrap();
        assert_eq!(record, Some(Record::default()));
    }

    #[test]
    fn malformed_xml_is_error() {
        let xml = envelope("<ns1:r><return><name>x</nam></return></ns1:r>");
        let err = decode::<Record>(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, SoapError::InvalidXml(_)));
    }

    #[test]
    fn payload_type_mismatch_is_deserialize_error() {
        let xml = envelope("<ns1:r><return><expire>soon</expire></return></ns1:r>");
        let err = decode::<Record>(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, SoapError::Deserialize(_)));
    }

    #[test]
    fn expect_element_present() {
        let xml = envelope("<ns1:setDnsEntriesResponse/>");
        expect_element(xml.as_bytes(), "setDnsEntriesResponse").unwrap();
    }

    #[test]
    fn expect_element_missing() {
        let xml = envelope("<ns1:somethingElse/>");
        let err = expect_element(xml.as_bytes(), "setDnsEntriesResponse").unwrap_err();
        assert!(matches!(err, SoapError::UnexpectedResponse(_)));
    }

    #[test]
    fn expect_element_error_is_truncated() {
        let filler = "é".repeat(10_000);
        let xml = envelope(&format!("<ns1:other>{filler}</ns1:other>"));
        let err = expect_element(xml.as_bytes(), "setDnsEntriesResponse").unwrap_err();
        let SoapError::UnexpectedResponse(message) = err else {
            panic!("expected UnexpectedResponse, got {err:?}");
        };
        assert!(message.starts_with("missing <setDnsEntriesResponse>: <?xml"));
        assert!(message.ends_with(&format!("... ({} bytes)", xml.len())));
        assert!(message.len() < 1024);
    }

    #[test]
    fn excerpt_keeps_short_bodies() {
        assert_eq!(excerpt("<a/>"), "<a/>");
        assert_eq!(excerpt(&"x".repeat(ERROR_EXCERPT_CHARS)).len(), ERROR_EXCERPT_CHARS);
    }

    #[test]
    fn expect_element_fault() {
        let xml = envelope(FAULT_RESPONSE);
        let err = expect_element(xml.as_bytes(), "setDnsEntriesResponse").unwrap_err();
        assert!(err.is_fault());
    }
}
