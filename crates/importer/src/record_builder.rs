//! Assembly of insertable route and stop records.

use ratp_access_db::{NewRoute, NewStop};

use crate::accessibility::labels_for;
use crate::error::{ImportError, ImportResult};
use crate::normalizer::{RouteFields, StopFields};

/// Build a route from its normalized fields.
///
/// # Errors
/// [`ImportError::DataFormat`] when the stif code is not an integer, which
/// means the whole sheet cannot be trusted.
pub fn build_route(row: usize, fields: RouteFields) -> ImportResult<NewRoute> {
    let description = canonical_integer(&fields.stif_code).ok_or_else(|| ImportError::DataFormat {
        row,
        field: "stif_code",
        value: fields.stif_code.clone(),
    })?;

    Ok(NewRoute {
        name: fields.route_number.to_uppercase(),
        description,
        origin: fields.origin,
        destination: fields.destination,
        accessibility: labels_for(&fields.flags),
        stif_code: fields.stif_code,
    })
}

/// Integer value of `code` in canonical decimal form, without a size bound:
/// `"+007"` gives `"7"`, `"-1"` stays `"-1"`. `None` unless `code` is an
/// optionally signed run of ASCII digits.
fn canonical_integer(code: &str) -> Option<String> {
    let (negative, digits) = match code.as_bytes().first() {
        Some(b'-') => (true, &code[1..]),
        Some(b'+') => (false, &code[1..]),
        _ => (false, code),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits = digits.trim_start_matches('0');
    Some(match (digits.is_empty(), negative) {
        (true, _) => "0".to_string(),
        (false, true) => format!("-{}", digits),
        (false, false) => digits.to_string(),
    })
}

/// Build a stop from its normalized fields.
pub fn build_stop(fields: StopFields) -> NewStop {
    NewStop {
        accessibility: labels_for(&fields.flags),
        name: fields.name,
        direction: fields.direction,
        route_stif_code: fields.stif_code,
    }
}
