use std::fmt;

use serde::Deserialize;

/**
    A SOAP 1.1 `Fault`, as returned in place of a `return` payload.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SoapFault {
    #[serde(rename = "faultcode", default)]
    pub code: String,
    #[serde(rename = "faultstring", default)]
    pub message: String,
    #[serde(rename = "faultactor", default)]
    pub actor: String,
    #[serde(default, deserialize_with = "detail_text")]
    pub detail: String,
}

impl fmt::Display for SoapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/**
    `detail` may hold text or arbitrary child elements. Only text is kept.
*/
fn detail_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Detail {
        #[serde(rename = "$text", default)]
        text: String,
    }

    Ok(Detail::deserialize(deserializer)?.text)
}
