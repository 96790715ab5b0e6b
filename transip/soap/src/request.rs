use crate::params::ParamList;

/**
    A single SOAP call, built fresh for every request.

    `body` is the method fragment placed inside `SOAP-ENV:Body`. `params` must
    list the same arguments in the positional form the remote end signs
    (see [`MethodCall`](crate::MethodCall), which builds both together).
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Remote service, e.g. `DomainService`.
    pub service: String,
    /// Remote method, e.g. `getInfo`.
    pub method: String,
    /// Method XML fragment.
    pub body: String,
    /// Caller parameters, signed ahead of the authentication parameters.
    pub params: ParamList,
}

impl Request {
    pub fn new(
        service: impl Into<String>,
        method: impl Into<String>,
        body: impl Into<String>,
        params: ParamList,
    ) -> Self {
        Self {
            service: service.into(),
            method: method.into(),
            body: body.into(),
            params,
        }
    }
}
