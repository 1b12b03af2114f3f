use super::*;

#[test]
fn missing_credential_displays_message_verbatim() {
    let err = ProviderError::MissingCredential { message: "Missing STABILITY_API_KEY in environment.".into() };
    assert_eq!(err.to_string(), "Missing STABILITY_API_KEY in environment.");
    assert_eq!(err.error_code(), "E_MISSING_CREDENTIAL");
}

#[test]
fn rate_limit_and_server_errors_are_retryable() {
    assert!(ProviderError::ApiResponse { status: 429, body: String::new() }.retryable());
    assert!(ProviderError::ApiResponse { status: 503, body: String::new() }.retryable());
    assert!(ProviderError::ApiRequest("reset".into()).retryable());
}

#[test]
fn client_errors_are_not_retryable() {
    assert!(!ProviderError::ApiResponse { status: 400, body: String::new() }.retryable());
    assert!(!ProviderError::ApiParse("bad".into()).retryable());
    assert!(!ProviderError::ConfigParse("bad".into()).retryable());
}

#[test]
fn error_codes_are_distinct() {
    let codes = [
        ProviderError::ConfigParse(String::new()).error_code(),
        ProviderError::MissingCredential { message: String::new() }.error_code(),
        ProviderError::ApiRequest(String::new()).error_code(),
        ProviderError::ApiResponse { status: 500, body: String::new() }.error_code(),
        ProviderError::ApiParse(String::new()).error_code(),
        ProviderError::HttpClientBuild(String::new()).error_code(),
    ];
    let unique: std::collections::HashSet<_> = codes.iter().collect();
    assert_eq!(unique.len(), codes.len());
}
