use super::ApiError;
use crate::models::EnquiryPayload;

pub const DEFAULT_LIMIT: u64 = 100;
const MAX_LIMIT: u64 = 1000;
const MIN_LIMIT: u64 = 1;

pub fn validate_limit(limit: u64) -> Result<u64, ApiError> {
    if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        return Err(ApiError::validation(
            "limit",
            format!("must be between {MIN_LIMIT} and {MAX_LIMIT}"),
        ));
    }
    Ok(limit)
}

/// Decodes a raw request body into an enquiry payload.
///
/// Field rules are checked later by [`EnquiryPayload::validate`]; this only
/// rejects bodies that are not a JSON object of the expected field types.
pub fn parse_enquiry_body(body: &[u8]) -> Result<EnquiryPayload, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::validation("body", "request body is empty"));
    }

    serde_json::from_slice(body).map_err(|e| ApiError::validation("body", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_limit() {
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(DEFAULT_LIMIT).is_ok());
        assert!(validate_limit(1000).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(1001).is_err());
    }

    #[test]
    fn test_parse_enquiry_body() {
        let payload = parse_enquiry_body(br#"{"name": "Al", "consent": null}"#).unwrap();
        assert_eq!(payload.name.as_deref(), Some("Al"));
        assert!(payload.consent.is_none());

        assert!(parse_enquiry_body(b"").is_err());
        assert!(parse_enquiry_body(b"[1, 2]").is_err());
        assert!(parse_enquiry_body(br#"{"consent": "yes"}"#).is_err());
    }
}
