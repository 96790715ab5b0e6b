/*!
    Typed method arguments, encoded to both the SOAP body fragment and the
    signed parameter list in one pass.

    Positional keys mirror the XML nesting:

    ```text
    arg 0, string          → 0
    arg 0, string array    → 0[0], 0[1], ...
    arg 1, struct array    → 1[0][name], 1[0][expire], ...
    ```

    Text and attribute values are XML-escaped when written into the fragment.
    Parameter values stay raw; the canonical encoding escapes them.
*/

use quick_xml::escape::escape;

use crate::params::ParamList;
use crate::request::Request;

/**
    One argument value of a SOAP-encoded method call.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// `xsd:string`
    String(String),
    /// `xsd:int`
    Int(i64),
    /// SOAP-ENC array of `items`, each written as `<item>`.
    Array {
        /// Element type, e.g. `xsd:string` or `ns1:DnsEntry`.
        element_type: String,
        /// Array type, e.g. `ns1:ArrayOfString`.
        array_type: String,
        items: Vec<Value>,
    },
    /// Complex type with ordered fields.
    Struct {
        /// Qualified type, e.g. `ns1:DnsEntry`.
        type_name: String,
        fields: Vec<(String, Value)>,
    },
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn int(value: i64) -> Self {
        Self::Int(value)
    }

    /**
        `ns1:ArrayOfString` of `xsd:string` items.
    */
    pub fn string_array<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Array {
            element_type: "xsd:string".into(),
            array_type: "ns1:ArrayOfString".into(),
            items: items.into_iter().map(Self::string).collect(),
        }
    }

    /**
        A struct of type `ns1:{type_name}`.
    */
    pub fn object(type_name: &str, fields: Vec<(&str, Value)>) -> Self {
        Self::Struct {
            type_name: format!("ns1:{type_name}"),
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }

    /**
        `ns1:ArrayOf{type_name}` of `ns1:{type_name}` structs.
    */
    pub fn object_array(type_name: &str, items: Vec<Value>) -> Self {
        Self::Array {
            element_type: format!("ns1:{type_name}"),
            array_type: format!("ns1:ArrayOf{type_name}"),
            items,
        }
    }

    fn xsi_type(&self) -> &str {
        match self {
            Self::String(_) => "xsd:string",
            Self::Int(_) => "xsd:int",
            Self::Array { array_type, .. } => array_type,
            Self::Struct { type_name, .. } => type_name,
        }
    }

    /**
        Writes `<tag ...>` for this value into `xml` and its leaves into
        `params`, under the positional `key`.
    */
    fn encode(&self, tag: &str, key: &str, xml: &mut String, params: &mut ParamList) {
        let xsi_type = escape(self.xsi_type());
        match self {
            Self::String(s) => {
                xml.push_str(&format!(
                    "<{tag} xsi:type=\"{xsi_type}\">{}</{tag}>",
                    escape(s.as_str())
                ));
                params.push(key, s.as_str());
            }
            Self::Int(n) => {
                xml.push_str(&format!("<{tag} xsi:type=\"{xsi_type}\">{n}</{tag}>"));
                params.push(key, n.to_string());
            }
            Self::Array {
                element_type,
                items,
                ..
            } => {
                xml.push_str(&format!(
                    "<{tag} SOAP-ENC:arrayType=\"{}[{}]\" xsi:type=\"{xsi_type}\">",
                    escape(element_type.as_str()),
                    items.len()
                ));
                for (idx, item) in items.iter().enumerate() {
                    item.encode("item", &format!("{key}[{idx}]"), xml, params);
                }
                xml.push_str(&format!("</{tag}>"));
            }
            Self::Struct { fields, .. } => {
                xml.push_str(&format!("<{tag} xsi:type=\"{xsi_type}\">"));
                for (name, value) in fields {
                    value.encode(name, &format!("{key}[{name}]"), xml, params);
                }
                xml.push_str(&format!("</{tag}>"));
            }
        }
    }
}

/**
    Builder for one remote method invocation.

    ```rust,ignore
    let request = MethodCall::new("getInfo")
        .arg("domainName", Value::string("example.com"))
        .into_request("DomainService");
    ```
*/
#[derive(Debug, Clone)]
pub struct MethodCall {
    method: String,
    args: Vec<(String, Value)>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            args: Vec::new(),
        }
    }

    /**
        Appends a positional argument. `name` is only used as the XML element name.
    */
    pub fn arg(mut self, name: impl Into<String>, value: Value) -> Self {
        self.args.push((name.into(), value));
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /**
        Encodes the `<ns1:method>` fragment and its parameter list.
    */
    pub fn encode(&self) -> (String, ParamList) {
        let mut params = ParamList::new();
        if self.args.is_empty() {
            return (format!("<ns1:{}/>", self.method), params);
        }

        let mut xml = format!("<ns1:{}>", self.method);
        for (position, (name, value)) in self.args.iter().enumerate() {
            value.encode(name, &position.to_string(), &mut xml, &mut params);
        }
        xml.push_str(&format!("</ns1:{}>", self.method));
        (xml, params)
    }

    pub fn into_request(self, service: impl Into<String>) -> Request {
        let (body, params) = self.encode();
        Request {
            service: service.into(),
            method: self.method,
            body,
            params,
        }
    }
}
