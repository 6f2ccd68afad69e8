//! Challenge-response session login against `login_sid.lua`.
//!
//! The router answers every request to that endpoint with a small XML
//! document carrying the current session id and a one-time challenge. An
//! all-zero session id means "not authenticated", in which case the client
//! derives a response from challenge and password (the AVM scheme: MD5
//! over the UTF-16LE encoding) and retries once.

use std::fmt::{self, Write as _};

use md5::{Digest, Md5};

use crate::error::{AppError, AuthError};

use super::client::FritzClient;

pub(crate) const LOGIN_PATH: &str = "/login_sid.lua";
pub(crate) const LOGOUT_PATH: &str = "/index.lua";

/// A session token as issued by the router: 16 hex characters. The
/// all-zero value is the router's sentinel for "no session".
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sid(String);

impl Sid {
    pub(crate) const BLANK: &'static str = "0000000000000000";

    pub(crate) fn parse(value: &str) -> Result<Self, AuthError> {
        if value.len() != 16 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AuthError::InvalidSid {
                value: value.to_string(),
            });
        }
        Ok(Self(value.to_string()))
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.0 == Self::BLANK
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The parts of the `login_sid.lua` document the client cares about.
#[derive(Debug)]
struct LoginResponse {
    sid: Sid,
    challenge: Option<String>,
}

impl LoginResponse {
    fn parse(xml: &str) -> Result<Self, AuthError> {
        let doc = roxmltree::Document::parse(xml)?;
        let text_of = |tag: &str| {
            doc.descendants()
                .find(|node| node.has_tag_name(tag))
                .and_then(|node| node.text())
                .map(str::trim)
                .filter(|text| !text.is_empty())
        };
        let sid = text_of("SID").ok_or(AuthError::MalformedLogin { element: "SID" })?;
        let challenge = text_of("Challenge").map(str::to_string);
        Ok(Self {
            sid: Sid::parse(sid)?,
            challenge,
        })
    }
}

fn utf16le(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// Derive the login response for a challenge: `challenge` + `-` + the hex
/// MD5 of `challenge-password` in UTF-16LE.
pub(crate) fn challenge_response(challenge: &str, password: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(utf16le(challenge));
    hasher.update(utf16le("-"));
    hasher.update(utf16le(password));
    let digest = hasher.finalize();

    let mut response = String::with_capacity(challenge.len() + 33);
    response.push_str(challenge);
    response.push('-');
    for byte in digest {
        let _ = write!(response, "{byte:02x}");
    }
    response
}

/// Establish a session. One round trip when the router already considers
/// this client authenticated, two otherwise.
pub(crate) fn authenticate(
    client: &FritzClient,
    user: &str,
    password: &str,
) -> Result<Sid, AppError> {
    let body = client.get(LOGIN_PATH, &[])?;
    let login = LoginResponse::parse(&body)?;
    if !login.sid.is_blank() {
        return Ok(login.sid);
    }

    let challenge = login
        .challenge
        .ok_or(AuthError::MalformedLogin { element: "Challenge" })?;
    let response = challenge_response(&challenge, password);
    let body = client.get(LOGIN_PATH, &[("username", user), ("response", &response)])?;
    let login = LoginResponse::parse(&body)?;
    if login.sid.is_blank() {
        return Err(AuthError::AccessDenied.into());
    }
    Ok(login.sid)
}

/// Release a session. Best effort; the caller decides how loudly a
/// failure here is reported.
pub(crate) fn logout(client: &FritzClient, sid: &Sid) -> Result<(), AppError> {
    client.get(LOGOUT_PATH, &[("sid", sid.as_str())])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16le_encodes_ascii_and_umlauts() {
        assert_eq!(utf16le("A-"), [0x41, 0x00, 0x2d, 0x00]);
        assert_eq!(utf16le("ä"), [0xe4, 0x00]);
    }

    #[test]
    fn challenge_response_known_vectors() {
        assert_eq!(
            challenge_response("abc123", "secret"),
            "abc123-00ef4924fa626d8d664908df1dd79c75"
        );
        // The vector from AVM's session documentation.
        assert_eq!(
            challenge_response("1234567z", "äbc"),
            "1234567z-9e224a41eeefa284df7bb0f26c2913e2"
        );
    }

    #[test]
    fn sid_rejects_bad_tokens() {
        assert!(Sid::parse("89ab3c4de1f50e07").is_ok());
        assert!(Sid::parse("89ab3c4de1f50e0").is_err());
        assert!(Sid::parse("89ab3c4de1f50e071").is_err());
        assert!(Sid::parse("89ab3c4de1f50g07").is_err());
    }

    #[test]
    fn blank_sid_is_recognized() {
        let sid = Sid::parse(Sid::BLANK).unwrap();
        assert!(sid.is_blank());
        let sid = Sid::parse("0000000000000001").unwrap();
        assert!(!sid.is_blank());
    }

    #[test]
    fn login_response_parses_the_avm_document() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<SessionInfo>
<SID>0000000000000000</SID>
<Challenge>1234567z</Challenge>
<BlockTime>0</BlockTime>
<Rights></Rights>
</SessionInfo>"#;
        let login = LoginResponse::parse(xml).unwrap();
        assert!(login.sid.is_blank());
        assert_eq!(login.challenge.as_deref(), Some("1234567z"));
    }

    #[test]
    fn login_response_without_challenge() {
        let xml = "<SessionInfo><SID>89ab3c4de1f50e07</SID></SessionInfo>";
        let login = LoginResponse::parse(xml).unwrap();
        assert_eq!(login.sid.as_str(), "89ab3c4de1f50e07");
        assert!(login.challenge.is_none());
    }

    #[test]
    fn login_response_requires_a_sid() {
        let err = LoginResponse::parse("<SessionInfo></SessionInfo>").unwrap_err();
        assert!(matches!(err, AuthError::MalformedLogin { element: "SID" }));
    }

    #[test]
    fn login_response_rejects_broken_xml() {
        let err = LoginResponse::parse("<SessionInfo><SID>").unwrap_err();
        assert!(matches!(err, AuthError::InvalidXml(_)));
    }
}
