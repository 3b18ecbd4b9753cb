use alloc::string::String;

/// Errors that may occur while decoding a [`JweHeader`](super::JweHeader)
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The header is not valid JSON.
    #[cfg_attr(feature = "std", error("the header is not valid JSON"))]
    #[cfg_attr(not(feature = "std"), error("the header is not valid JSON: {0}"))]
    Malformed(#[cfg_attr(feature = "std", source)] serde_json::Error),
    /// The header is valid JSON, but not a JSON object.
    #[error("the header must be a JSON object")]
    NotAnObject,
    /// A REQUIRED header parameter is missing (e.g. the `alg` header)
    #[error("the required header parameter `{0}` is missing")]
    MissingParameter(&'static str),
    /// A header parameter has the wrong JSON type.
    #[error("the header parameter `{0}` must be a string")]
    InvalidParameter(&'static str),
    /// The `alg` or `enc` header names an algorithm this implementation does
    /// not know or does not support.
    #[error("unsupported algorithm `{value}` in header parameter `{parameter}`")]
    UnsupportedAlgorithm {
        /// Either `alg` or `enc`.
        parameter: &'static str,
        /// The algorithm name found in the header.
        value: String,
    },
    /// A header parameter is present whose semantics are not implemented and
    /// must not be ignored (`zip`, `crit`).
    #[error("the header parameter `{0}` is not supported")]
    UnsupportedParameter(&'static str),
}
