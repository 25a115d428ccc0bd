//! Method-aware positional extraction of transfer parameters.
//!
//! `transfer(to, value)` carries no explicit sender; `transferFrom` and
//! `safeTransferFrom` are `(from, to, value, ...)`. Missing or non-string
//! parameter values yield the supplied fallback.

use safegate_primitives::DataDecoded;

const TRANSFER: &str = "transfer";
const TRANSFER_FROM: &str = "transferFrom";
const SAFE_TRANSFER_FROM: &str = "safeTransferFrom";

pub fn is_transfer_method(method: &str) -> bool {
    matches!(method, TRANSFER | TRANSFER_FROM | SAFE_TRANSFER_FROM)
}

pub fn from_param(decoded: &DataDecoded, fallback: &str) -> String {
    match decoded.method.as_str() {
        TRANSFER_FROM | SAFE_TRANSFER_FROM => decoded
            .parameter_str(0)
            .unwrap_or(fallback)
            .to_string(),
        _ => fallback.to_string(),
    }
}

pub fn to_param(decoded: &DataDecoded, fallback: &str) -> String {
    let index = match decoded.method.as_str() {
        TRANSFER => 0,
        TRANSFER_FROM | SAFE_TRANSFER_FROM => 1,
        _ => return fallback.to_string(),
    };
    decoded.parameter_str(index).unwrap_or(fallback).to_string()
}

pub fn value_param(decoded: &DataDecoded, fallback: &str) -> String {
    let index = match decoded.method.as_str() {
        TRANSFER => 1,
        TRANSFER_FROM | SAFE_TRANSFER_FROM => 2,
        _ => return fallback.to_string(),
    };
    decoded.parameter_str(index).unwrap_or(fallback).to_string()
}
