/*!
    Ordered request parameters and their canonical encoding.

    The canonical form is what gets signed:

    ```text
    key1=value1&key2=value2&...
    ```

    - Entries keep insertion order. Nothing is sorted or deduplicated.
    - Keys are written as-is; values are percent-encoded.
    - Only `A-Z a-z 0-9 - _ . ~` pass through unescaped, so a space
      becomes `%20` (never `+`).
*/

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/**
    Characters escaped in canonical parameter values and in the signature cookie.
*/
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/**
    A single `(key, value)` pair of a signed request.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub key: String,
    pub value: String,
}

impl Param {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/**
    Ordered list of request parameters.

    Insertion order is the order used for signing and must match the
    positional order the remote service expects.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.push(Param::new(key, value));
    }

    /**
        Appends all entries of `other`, keeping their order.
    */
    pub fn extend(&mut self, other: ParamList) {
        self.params.extend(other.params);
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.params.iter()
    }

    pub fn as_slice(&self) -> &[Param] {
        &self.params
    }

    /**
        Canonical bytes of this list, see [`canonicalize`].
    */
    pub fn canonical_bytes(&self) -> Vec<u8> {
        canonicalize(&self.params)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().map(|(k, v)| Param::new(k, v)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ParamList {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

/**
    Joins `key=escaped(value)` pairs with `&`, in list order.

    An empty list yields an empty byte string.
*/
pub fn canonicalize(params: &[Param]) -> Vec<u8> {
    let mut out = String::new();
    for param in params {
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(&param.key);
        out.push('=');
        out.push_str(&query_escape(&param.value));
    }
    out.into_bytes()
}

/**
    Percent-encodes `value` with the canonical escape set.
*/
pub fn query_escape(value: &str) -> String {
    utf8_percent_encode(value, QUERY_ESCAPE).to_string()
}
