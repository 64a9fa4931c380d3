//! Structural JWT decoding.
//!
//! Splits a compact token into its three segments and decodes the header and
//! payload into JSON objects. Signatures, `exp`/`nbf` and the algorithm are
//! never checked: a decoded token is not a trusted token.

use base64::Engine;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::base64_codec::LENIENT;
use crate::json::kind_name;

/// Claims or header parameters, in the order they appear in the token.
pub type Claims = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Header,
    Payload,
}

impl Segment {
    pub fn as_str(self) -> &'static str {
        match self {
            Segment::Header => "header",
            Segment::Payload => "payload",
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single segment failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentFault {
    #[error("it is not valid Base64URL")]
    Base64,
    #[error("the decoded bytes are not UTF-8 text")]
    Utf8,
    #[error("it is not valid JSON")]
    Json,
    #[error("expected a JSON object but found {0}")]
    NotAnObject(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtDecodeError {
    /// Nothing to decode; render the idle state.
    #[error("No token")]
    Empty,
    #[error("Invalid JWT format: expected 3 segments separated by dots, found {found}")]
    MalformedStructure { found: usize },
    #[error("Could not decode the {segment} segment: {reason}")]
    SegmentDecodeFailure {
        segment: Segment,
        reason: SegmentFault,
    },
}

impl JwtDecodeError {
    pub fn is_idle(&self) -> bool {
        matches!(self, JwtDecodeError::Empty)
    }
}

/// The three segments exactly as they appeared in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSegments {
    pub header: String,
    pub payload: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedJwt {
    pub header: Claims,
    pub payload: Claims,
    /// Third segment, untouched. May be empty.
    pub signature: String,
    pub raw: RawSegments,
}

impl DecodedJwt {
    pub fn alg(&self) -> Option<&str> {
        self.header.get("alg").and_then(Value::as_str)
    }

    pub fn header_pretty(&self) -> String {
        pretty(&self.header)
    }

    pub fn payload_pretty(&self) -> String {
        pretty(&self.payload)
    }
}

fn pretty(map: &Claims) -> String {
    // A map of JSON values always serializes.
    serde_json::to_string_pretty(map).unwrap_or_default()
}

/// Decode a compact-serialized token. The input is taken verbatim; only the
/// empty string is the idle state.
pub fn decode(token: &str) -> Result<DecodedJwt, JwtDecodeError> {
    if token.is_empty() {
        return Err(JwtDecodeError::Empty);
    }

    let parts: Vec<&str> = token.split('.').collect();
    let [header_seg, payload_seg, signature_seg] = parts.as_slice() else {
        return Err(JwtDecodeError::MalformedStructure { found: parts.len() });
    };

    let header = decode_segment(header_seg).map_err(|reason| {
        JwtDecodeError::SegmentDecodeFailure {
            segment: Segment::Header,
            reason,
        }
    })?;
    let payload = decode_segment(payload_seg).map_err(|reason| {
        JwtDecodeError::SegmentDecodeFailure {
            segment: Segment::Payload,
            reason,
        }
    })?;

    Ok(DecodedJwt {
        header,
        payload,
        signature: signature_seg.to_string(),
        raw: RawSegments {
            header: header_seg.to_string(),
            payload: payload_seg.to_string(),
            signature: signature_seg.to_string(),
        },
    })
}

fn decode_segment(segment: &str) -> Result<Claims, SegmentFault> {
    let translated: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    let bytes = LENIENT
        .decode(translated.as_bytes())
        .map_err(|_| SegmentFault::Base64)?;
    let text = String::from_utf8(bytes).map_err(|_| SegmentFault::Utf8)?;
    match serde_json::from_str::<Value>(&text).map_err(|_| SegmentFault::Json)? {
        Value::Object(map) => Ok(map),
        other => Err(SegmentFault::NotAnObject(kind_name(&other))),
    }
}

/// Human-readable signing input for the header's `alg`, shown next to the
/// (unverified) signature.
pub fn signing_formula(alg: Option<&str>) -> String {
    let Some(alg) = alg else {
        return "No \"alg\" header parameter: signing algorithm unknown".to_string();
    };
    if alg.eq_ignore_ascii_case("none") {
        return "Unsecured JWT (alg: none): no signature expected".to_string();
    }

    let bits = alg.get(2..).unwrap_or_default();
    let (func, key) = match alg.get(..2) {
        Some("HS") => (format!("HMACSHA{bits}"), "secret"),
        Some("RS") => (format!("RSASHA{bits}"), "privateKey"),
        Some("ES") => (format!("ECDSASHA{bits}"), "privateKey"),
        Some("PS") => (format!("RSAPSSSHA{bits}"), "privateKey"),
        _ => (alg.to_string(), "key"),
    };
    format!("{func}(\n  base64UrlEncode(header) + \".\" +\n  base64UrlEncode(payload),\n  {key}\n)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use serde_json::json;

    fn segment(v: &Value) -> String {
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(v).unwrap())
    }

    fn token(header: &Value, payload: &Value, sig: &str) -> String {
        format!("{}.{}.{}", segment(header), segment(payload), sig)
    }

    fn segment_failure(result: Result<DecodedJwt, JwtDecodeError>) -> (Segment, SegmentFault) {
        match result {
            Err(JwtDecodeError::SegmentDecodeFailure { segment, reason }) => (segment, reason),
            other => panic!("expected a segment failure, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_is_idle() {
        let err = decode("").unwrap_err();
        assert_eq!(err, JwtDecodeError::Empty);
        assert!(err.is_idle());
    }

    #[test]
    fn whitespace_only_input_is_malformed() {
        let err = decode("   ").unwrap_err();
        assert_eq!(err, JwtDecodeError::MalformedStructure { found: 1 });
        assert!(!err.is_idle());
    }

    #[test]
    fn wrong_segment_count_is_malformed() {
        let err = decode("abc.def").unwrap_err();
        assert_eq!(err, JwtDecodeError::MalformedStructure { found: 2 });
        let msg = err.to_string();
        assert!(msg.contains('3') && msg.contains('2'), "{msg}");
        assert!(!err.is_idle());

        assert_eq!(
            decode("a.b.c.d").unwrap_err(),
            JwtDecodeError::MalformedStructure { found: 4 }
        );
        assert_eq!(
            decode("a.b.c.d.e").unwrap_err(),
            JwtDecodeError::MalformedStructure { found: 5 }
        );
        assert_eq!(
            decode("nodots").unwrap_err(),
            JwtDecodeError::MalformedStructure { found: 1 }
        );
    }

    #[test]
    fn invalid_base64_header_names_header() {
        let (segment, reason) = segment_failure(decode("not-base64!!.eyJhIjoxfQ.sig"));
        assert_eq!(segment, Segment::Header);
        assert_eq!(reason, SegmentFault::Base64);

        let msg = decode("not-base64!!.eyJhIjoxfQ.sig").unwrap_err().to_string();
        assert!(msg.contains("header"), "{msg}");
    }

    #[test]
    fn invalid_payload_names_payload() {
        let (segment, reason) = segment_failure(decode("eyJhIjoxfQ.%%%.sig"));
        assert_eq!(segment, Segment::Payload);
        assert_eq!(reason, SegmentFault::Base64);
    }

    #[test]
    fn decodes_standard_token() {
        let header = json!({"alg": "HS256", "typ": "JWT"});
        let payload = json!({"sub": "1234567890", "name": "John Doe", "iat": 1516239022});
        let input = token(&header, &payload, "dummySig");

        let decoded = decode(&input).unwrap();
        assert_eq!(Value::Object(decoded.header.clone()), header);
        assert_eq!(Value::Object(decoded.payload.clone()), payload);
        assert_eq!(decoded.signature, "dummySig");

        let parts: Vec<&str> = input.split('.').collect();
        assert_eq!(decoded.raw.header, parts[0]);
        assert_eq!(decoded.raw.payload, parts[1]);
        assert_eq!(decoded.raw.signature, "dummySig");
        assert_eq!(decoded.alg(), Some("HS256"));
    }

    #[test]
    fn decodes_well_known_literal_token() {
        let decoded = decode(
            "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
             eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ.\
             SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c",
        )
        .unwrap();
        assert_eq!(decoded.payload["name"], json!("John Doe"));
        assert_eq!(decoded.payload["iat"], json!(1516239022));
        assert_eq!(decoded.signature, "SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c");
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let header = json!({"alg": "HS256"});
        let input = token(&header, &json!(["a", "b"]), "sig");
        let (segment, reason) = segment_failure(decode(&input));
        assert_eq!(segment, Segment::Payload);
        assert_eq!(reason, SegmentFault::NotAnObject("array"));

        // "just a string"
        let (segment, reason) = segment_failure(decode("Imp1c3QgYSBzdHJpbmci.eyJhIjoxfQ.sig"));
        assert_eq!(segment, Segment::Header);
        assert_eq!(reason, SegmentFault::NotAnObject("string"));

        let input = token(&header, &Value::Null, "sig");
        assert_eq!(segment_failure(decode(&input)).1, SegmentFault::NotAnObject("null"));
    }

    #[test]
    fn unpadded_segments_decode() {
        let payload_seg = "eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ";
        assert_ne!(payload_seg.len() % 4, 0);
        assert_eq!(
            decode(&format!("eyJhIjoxfQ.{payload_seg}.x"))
                .unwrap()
                .payload["sub"],
            json!("1234567890")
        );
    }

    #[test]
    fn padded_segments_still_decode() {
        let decoded = decode("eyJhIjoxfQ==.eyJhIjoxfQ==.sig").unwrap();
        assert_eq!(decoded.header["a"], json!(1));
    }

    #[test]
    fn url_safe_alphabet_is_translated() {
        // {"q":"??>"} and {"v":"ÿÿ"}
        let decoded = decode("eyJxIjoiPz8-In0.eyJ2Ijoiw7_DvyJ9.").unwrap();
        assert_eq!(decoded.header["q"], json!("??>"));
        assert_eq!(decoded.payload["v"], json!("ÿÿ"));
    }

    #[test]
    fn empty_signature_is_valid() {
        let decoded = decode("eyJhbGciOiJub25lIn0.eyJhIjoxfQ.").unwrap();
        assert_eq!(decoded.signature, "");
        assert_eq!(decoded.raw.signature, "");
        assert_eq!(decoded.alg(), Some("none"));
    }

    #[test]
    fn expired_token_with_garbage_signature_still_decodes() {
        let header = json!({"alg": "RS256", "typ": "JWT"});
        let payload = json!({"sub": "abc", "exp": 1_000_000_000, "nbf": 4_000_000_000u64});
        let input = token(&header, &payload, "!!garbage-signature!!");

        let decoded = decode(&input).unwrap();
        assert_eq!(decoded.payload["exp"], json!(1_000_000_000));
        assert_eq!(decoded.signature, "!!garbage-signature!!");
    }

    #[test]
    fn non_utf8_and_non_json_segments_fail() {
        // 0xFF
        assert_eq!(
            segment_failure(decode("_w.eyJhIjoxfQ.sig")),
            (Segment::Header, SegmentFault::Utf8)
        );
        // "hello"
        assert_eq!(
            segment_failure(decode("eyJhIjoxfQ.aGVsbG8.sig")),
            (Segment::Payload, SegmentFault::Json)
        );
        assert_eq!(
            segment_failure(decode(".eyJhIjoxfQ.sig")),
            (Segment::Header, SegmentFault::Json)
        );
    }

    #[test]
    fn header_failure_wins_over_payload_failure() {
        assert_eq!(segment_failure(decode("!!.!!.sig")).0, Segment::Header);
    }

    #[test]
    fn surrounding_whitespace_stays_in_the_segments() {
        let decoded = decode("eyJhIjoxfQ.eyJhIjoxfQ.sig \n").unwrap();
        assert_eq!(decoded.raw.header, "eyJhIjoxfQ");
        assert_eq!(decoded.raw.signature, "sig \n");
        assert_eq!(decoded.signature, "sig \n");

        assert_eq!(
            segment_failure(decode(" eyJhIjoxfQ.eyJhIjoxfQ.sig ")),
            (Segment::Header, SegmentFault::Base64)
        );
    }

    #[test]
    fn claim_order_is_preserved() {
        let payload = json!({"zeta": 1, "alpha": 2, "mid": 3});
        let decoded = decode(&token(&json!({"alg": "HS256"}), &payload, "s")).unwrap();
        let keys: Vec<&str> = decoded.payload.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert!(decoded.payload_pretty().find("zeta") < decoded.payload_pretty().find("alpha"));
    }

    #[test]
    fn signing_formula_follows_alg() {
        assert!(signing_formula(Some("HS256")).starts_with("HMACSHA256("));
        assert!(signing_formula(Some("HS256")).contains("secret"));
        assert!(signing_formula(Some("RS512")).starts_with("RSASHA512("));
        assert!(signing_formula(Some("ES384")).starts_with("ECDSASHA384("));
        assert!(signing_formula(Some("PS256")).starts_with("RSAPSSSHA256("));
        assert!(signing_formula(Some("EdDSA")).starts_with("EdDSA("));
        assert!(signing_formula(Some("none")).contains("Unsecured"));
        assert!(signing_formula(None).contains("unknown"));
    }
}
