//! Custom assertion macros and utilities
//!
//! Provides enhanced assertion macros for better test output and
//! more descriptive error messages.

/// Assert that a result is ok and return the value
///
/// This macro unwraps a Result, providing a better error message
/// if the result is an error.
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a response carries the JSON error body for `$status`
///
/// Checks both the HTTP status and the `status` field of
/// `{"error": ..., "status": ...}`.
#[macro_export]
macro_rules! assert_api_error {
    ($response:expr, $status:expr) => {{
        let response = $response;
        response.assert_status($status);
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], $status.as_u16(), "unexpected error body: {}", body);
        assert!(body["error"].is_string(), "error message missing: {}", body);
        body
    }};
}
