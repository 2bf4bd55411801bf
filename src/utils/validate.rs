use crate::api::types::ApiError;

/// Checks a scan target before submission: an IPv4 literal or a dotted
/// domain name. Anything else fails as a `ValidationError` without a server
/// round trip.
pub fn validate_target(target: &str) -> Result<(), ApiError> {
    if target.is_empty() {
        return Err(ApiError::validation("Target is required"));
    }
    if is_ipv4_literal(target) || is_domain_name(target) {
        Ok(())
    } else {
        Err(ApiError::validation(
            "Please enter a valid IP address or domain name",
        ))
    }
}

pub fn is_ipv4_literal(target: &str) -> bool {
    target.parse::<std::net::Ipv4Addr>().is_ok()
}

/// Domain grammar: a host label (alphanumeric ends, hyphens inside, 3 to 63
/// characters) followed by at least one all-alphabetic label of two or more
/// characters.
pub fn is_domain_name(target: &str) -> bool {
    let mut labels = target.split('.');
    let Some(host) = labels.next() else {
        return false;
    };
    if !is_host_label(host) {
        return false;
    }
    let mut rest = 0usize;
    for label in labels {
        if label.len() < 2 || !label.chars().all(|c| c.is_ascii_alphabetic()) {
            return false;
        }
        rest += 1;
    }
    rest > 0
}

fn is_host_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    if bytes.len() < 3 || bytes.len() > 63 {
        return false;
    }
    if !bytes[0].is_ascii_alphanumeric() || !bytes[bytes.len() - 1].is_ascii_alphanumeric() {
        return false;
    }
    bytes[1..bytes.len() - 1]
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || *b == b'-')
}
