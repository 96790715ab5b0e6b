/*!
    Request signature carried in the `signature` cookie.

    - canonical = canonicalize(caller params ++ auth params)
    - block     = SHA512_DIGEST_INFO || SHA512(canonical)
    - signature = RSASSA-PKCS1-v1_5 over `block` as-is (no second hash)
    - cookie    = percent-encode(base64(signature))

    The DigestInfo header is prepended by hand and the padding is applied with
    an unprefixed PKCS#1 v1.5 scheme. The remote verifier expects exactly this
    encoding.
*/

use data_encoding::BASE64;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha2::{Digest, Sha512};

use crate::constants::SHA512_DIGEST_INFO;
use crate::error::{SoapError, SoapResult};
use crate::params::{ParamList, query_escape};
use crate::stamp::RequestStamp;

/**
    Builds the full parameter list that gets signed: caller parameters first,
    in their original order, then `__method`, `__service`, `__hostname`,
    `__timestamp` and `__nonce`.
*/
pub fn signed_params(
    params: &ParamList,
    method: &str,
    service: &str,
    hostname: &str,
    stamp: &RequestStamp,
) -> ParamList {
    let mut all = params.clone();
    all.push("__method", method);
    all.push("__service", service);
    all.push("__hostname", hostname);
    all.push("__timestamp", stamp.timestamp.to_string());
    all.push("__nonce", stamp.nonce.as_str());
    all
}

/**
    SHA-512 digest of `data`, prefixed with its DER `DigestInfo` header.
*/
pub fn sha512_digest_info(data: &[u8]) -> Vec<u8> {
    let digest = Sha512::digest(data);
    let mut block = Vec::with_capacity(SHA512_DIGEST_INFO.len() + digest.len());
    block.extend_from_slice(&SHA512_DIGEST_INFO);
    block.extend_from_slice(&digest);
    block
}

/**
    Signs `params` and returns the cookie-ready signature string.

    Deterministic: the same key and parameter list always produce the same output.
*/
pub fn sign(private_key: &RsaPrivateKey, params: &ParamList) -> SoapResult<String> {
    let canonical = params.canonical_bytes();
    tracing::trace!(
        canonical = %String::from_utf8_lossy(&canonical),
        "signing parameters"
    );

    let block = sha512_digest_info(&canonical);
    let signature = private_key
        .sign(Pkcs1v15Sign::new_unprefixed(), &block)
        .map_err(|e| SoapError::Signing(e.to_string()))?;

    Ok(query_escape(&BASE64.encode(&signature)))
}

#[cfg(test)]
mod tests {
    use rsa::pkcs8::DecodePrivateKey;
    use rsa::traits::PublicKeyParts;
    use rsa::{BigUint, RsaPublicKey};

    use super::*;

    const TEST_KEY: &str = include_str!("../testfiles/test_key.pem");

    /// Signature of `GOLDEN_CANONICAL` with `testfiles/test_key.pem`.
    const GOLDEN_SIGNATURE: &str = "ZixV2E7jOKHbIjZ0M6jdun8C7OTf0k4H5ke5kGvDSr7MYZ39VsIAz8tDKuEFyTrQuJUIPla90U4HOM%2FToHEWZCRIbQgbZSN10xP3yOMos6ZbAjlqM21bwm3CmTjbeaee%2FGC5avXLuCZSf60XtvKoLgic84mB%2B95UseR%2BgpKwVx7%2BYfNs2H69mRY6phb3gTgTdq%2BZMZBDUeGR1y2%2BQwXXWoWZrSwD6Xx14ae14DEGQocovFBlnLhBI7wlPJCGZZNA7cXiNNpfXMpVMXBayLMOslWCRERCOQDQQs1Wskqlz25PTC2aU2nGg89VEl%2BHbHWU3TiEaqYsKuJdGwaEj3r85w%3D%3D";

    const GOLDEN_CANONICAL: &str = "__method=getInfo&__service=DomainService&__hostname=api.transip.nl&__timestamp=1500000000&__nonce=59682f000a1b212345678";

    /// Same request with a caller parameter `0=example.com` in front.
    const GOLDEN_SIGNATURE_WITH_ARG: &str = "Hi%2FuBcSJPrig%2BQrx%2B4y1yPyIMHizpe%2B4DB4zAJL94aQcPZZ4QJ7RIA4vn8RO2a2FDijxfmSk2RKApsOT8w5ZPASVT2AdeFbWZ%2BqTbIYjuq0wf7WqI0zNhZnfJ0yoiY95I4zw7PmsddXyVFcmcRwsQwUCjl%2FqBIonkSbwdAXKHOx%2FQuHiW6g66C%2FzMIQKRUeCTiEWImTHy2IVFZMFqs65jsr951n24W6VyUdESj3le4VBg1brJkfz39TJG3SuJZVIT1aPLvG2eySAQU3NOnb7qWb0DEi2X4eV25yOsTfu125Uo6oiTpgaCORJqDNbBaW5Saq1H%2F%2Bqic6quu7brusE9g%3D%3D";

    fn test_key() -> RsaPrivateKey {
        RsaPrivateKey::from_pkcs8_pem(TEST_KEY).unwrap()
    }

    fn golden_stamp() -> RequestStamp {
        RequestStamp::new(1_500_000_000, "59682f000a1b212345678")
    }

    fn golden_params(caller: ParamList) -> ParamList {
        signed_params(
            &caller,
            "getInfo",
            "DomainService",
            "api.transip.nl",
            &golden_stamp(),
        )
    }

    #[test]
    fn digest_info_layout() {
        let block = sha512_digest_info(b"abc");
        assert_eq!(block.len(), 19 + 64);
        assert_eq!(&block[..19], &SHA512_DIGEST_INFO);
        assert_eq!(&block[19..], Sha512::digest(b"abc").as_slice());
    }

    #[test]
    fn auth_params_follow_caller_params() {
        let caller: ParamList = [("0", "example.com")].into_iter().collect();
        let params = golden_params(caller);
        let keys: Vec<&str> = params.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(
            keys,
            [
                "0",
                "__method",
                "__service",
                "__hostname",
                "__timestamp",
                "__nonce"
            ]
        );
    }

    #[test]
    fn golden_signature() {
        let params = golden_params(ParamList::new());
        assert_eq!(params.canonical_bytes(), GOLDEN_CANONICAL.as_bytes());
        assert_eq!(sign(&test_key(), &params).unwrap(), GOLDEN_SIGNATURE);
    }

    #[test]
    fn golden_signature_with_caller_param() {
        let caller: ParamList = [("0", "example.com")].into_iter().collect();
        let params = golden_params(caller);
        assert_eq!(sign(&test_key(), &params).unwrap(), GOLDEN_SIGNATURE_WITH_ARG);
    }

    #[test]
    fn signing_is_deterministic() {
        let key = test_key();
        let params: ParamList = [("a", "b c"), ("d", "e")].into_iter().collect();
        assert_eq!(sign(&key, &params).unwrap(), sign(&key, &params).unwrap());
    }

    #[test]
    fn reordered_params_sign_differently() {
        let key = test_key();
        let a: ParamList = [("0", "x"), ("1", "y")].into_iter().collect();
        let b: ParamList = [("1", "y"), ("0", "x")].into_iter().collect();
        assert_ne!(sign(&key, &a).unwrap(), sign(&key, &b).unwrap());
    }

    #[test]
    fn signature_recovers_digest_info() {
        let key = test_key();
        let params = golden_params(ParamList::new());
        let cookie = sign(&key, &params).unwrap();

        let b64 = cookie
            .replace("%2B", "+")
            .replace("%2F", "/")
            .replace("%3D", "=");
        let sig = BASE64.decode(b64.as_bytes()).unwrap();

        // s^e mod n yields the PKCS#1 v1.5 block: 00 01 ff.. 00 || DigestInfo
        let public = RsaPublicKey::from(&key);
        let m = BigUint::from_bytes_be(&sig).modpow(public.e(), public.n());
        let em = m.to_bytes_be();
        let expected = sha512_digest_info(&params.canonical_bytes());
        assert_eq!(em[0], 0x01);
        assert!(em.ends_with(&expected));
    }

    #[test]
    fn cookie_value_is_fully_escaped() {
        let params: ParamList = [("x", "y")].into_iter().collect();
        let cookie = sign(&test_key(), &params).unwrap();
        assert!(!cookie.contains('+'));
        assert!(!cookie.contains('/'));
        assert!(!cookie.contains('='));
    }
}
