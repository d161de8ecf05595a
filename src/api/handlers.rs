// /api/dados handler module
// Validates query parameters and echoes them back as JSON

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::response::{bad_request, json_response};
use super::types::{DadosResponse, SUCCESS_MESSAGE, ValidationError};
use crate::http::{parse_int_prefix, parse_query};

/// Handle `GET /api/dados`
pub fn handle_dados(query: Option<&str>) -> Response<Full<Bytes>> {
    match validate(query) {
        Ok(payload) => json_response(StatusCode::OK, &payload),
        Err(e) => bad_request(e.message()),
    }
}

/// Run the validation sequence, short-circuiting on the first failure.
///
/// Order matters: presence of OLT/SLOT/PON is checked before any integer
/// conversion, and `debug` is only looked at once the required trio is
/// valid.
fn validate(query: Option<&str>) -> Result<DadosResponse, ValidationError> {
    let params = parse_query(query.unwrap_or(""));

    let olt = params.get("OLT").filter(|v| !v.is_empty());
    let slot = params.get("SLOT").filter(|v| !v.is_empty());
    let pon = params.get("PON").filter(|v| !v.is_empty());
    let (Some(olt), Some(slot), Some(pon)) = (olt, slot, pon) else {
        return Err(ValidationError::MissingParameters);
    };

    let (Some(slot), Some(pon)) = (parse_int_prefix(slot), parse_int_prefix(pon)) else {
        return Err(ValidationError::InvalidInteger);
    };

    let debug = match params.get("debug") {
        Some(raw) => Some(parse_int_prefix(raw).ok_or(ValidationError::InvalidDebugInteger)?),
        None => None,
    };

    Ok(DadosResponse {
        olt: olt.clone(),
        slot,
        pon,
        debug,
        message: SUCCESS_MESSAGE.to_string(),
    })
}
