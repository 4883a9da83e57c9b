use alloc::string::String;

/// Errors that may occur while working with a [`JwsHeader`](super::JwsHeader)
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A REQUIRED header parameter is missing (e.g. the `alg` header), or
    /// does not have the required type.
    #[error("required header parameter `{0}` is missing")]
    MissingParameter(String),
    /// The header bytes are not valid JSON.
    #[error("the header is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),
    /// The header is valid JSON but not a JSON object.
    #[error("the header is not a JSON object")]
    NotAnObject,
    /// A header parameter is present, but its value has the wrong type.
    #[error("header parameter `{name}` has an invalid value")]
    InvalidParameter {
        /// The name of the parameter.
        name: String,
        /// The reason why the value could not be read.
        #[source]
        source: serde_json::Error,
    },
}
