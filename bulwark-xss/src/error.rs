use thiserror::Error;

#[derive(Error, Debug)]
pub enum XssError {
    #[error("Potentially malicious content detected: {0}")]
    MaliciousContent(String),

    #[error("Invalid strip pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid sanitizer configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, XssError>;

/// A malformed encoded fragment found while decoding a value.
///
/// Never returned from `sanitize`: the decoders log it and keep the fragment
/// verbatim.
#[derive(Error, Debug)]
pub enum DecodeFragmentError {
    #[error("numeric entity `{fragment}` does not name a character")]
    NumericEntity { fragment: String },

    #[error("unicode escape `{fragment}` is an unpaired surrogate")]
    UnicodeEscape { fragment: String },

    #[error("base64 payload `{fragment}` could not be decoded: {source}")]
    Base64 {
        fragment: String,
        #[source]
        source: base64::DecodeError,
    },
}

impl DecodeFragmentError {
    /// The offending input text, truncated for log output.
    pub fn fragment(&self) -> &str {
        let fragment = match self {
            Self::NumericEntity { fragment }
            | Self::UnicodeEscape { fragment }
            | Self::Base64 { fragment, .. } => fragment.as_str(),
        };
        match fragment.char_indices().nth(64) {
            Some((idx, _)) => &fragment[..idx],
            None => fragment,
        }
    }

    pub(crate) fn log(&self) {
        tracing::warn!(fragment = %self.fragment(), error = %self, "Leaving malformed fragment in place");
    }
}
