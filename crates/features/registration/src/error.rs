use std::borrow::Cow;

/// Registration error type.
#[summit_derive::summit_error]
pub enum RegistrationError {
    #[error("Payload error{}: {source}", format_context(.context))]
    Payload { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[cfg(feature = "client")]
    #[error("Transport error{}: {source}", format_context(.context))]
    Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },

    #[cfg(feature = "client")]
    #[error("Invalid URL{}: {source}", format_context(.context))]
    Url { source: url::ParseError, context: Option<Cow<'static, str>> },

    #[error("Endpoint rejected the submission{}: HTTP {status}", format_context(.context))]
    Rejected { status: u16, context: Option<Cow<'static, str>> },

    #[error("Invalid registration configuration{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
