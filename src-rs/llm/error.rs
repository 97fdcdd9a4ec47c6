use thiserror::Error;

/// Failures raised by the provider layer.
///
/// These travel inside `anyhow::Error`; callers that need to branch on the
/// kind use `err.downcast_ref::<ProviderError>()`.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Missing API credential: environment variable {var} is not set")]
    MissingCredential { var: String },

    #[error("{operation} is not implemented for provider {provider}")]
    Unimplemented {
        provider: String,
        operation: &'static str,
    },

    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} returned no candidates")]
    EmptyResponse { provider: String },
}
