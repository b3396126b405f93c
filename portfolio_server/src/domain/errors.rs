use std::fmt;

// Failures raised by entry and blob store adapters.
#[derive(Debug)]
pub enum StoreError {
    Unavailable(String),
    Corrupt(String),
    // Conditional write lost against a concurrent writer.
    Conflict,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(reason) => write!(f, "store unavailable: {reason}"),
            StoreError::Corrupt(reason) => write!(f, "store data corrupt: {reason}"),
            StoreError::Conflict => write!(f, "store write conflict"),
        }
    }
}

impl std::error::Error for StoreError {}

// Which required field a guestbook submission failed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryField {
    Name,
    Email,
    Message,
}

impl EntryField {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryField::Name => "name",
            EntryField::Email => "email",
            EntryField::Message => "message",
        }
    }
}

// Domain-level errors for guestbook workflows.
#[derive(Debug)]
pub enum GuestbookError {
    MissingField(EntryField),
    FieldTooLong { field: EntryField, max: usize },
    MissingId,
    DeletionDisabled,
    InvalidSecret,
    NotFound,
    Storage(StoreError),
}

impl fmt::Display for GuestbookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuestbookError::MissingField(field) => write!(f, "{} is required", field.as_str()),
            GuestbookError::FieldTooLong { field, max } => {
                write!(f, "{} must be at most {max} characters", field.as_str())
            }
            GuestbookError::MissingId => write!(f, "id is required"),
            GuestbookError::DeletionDisabled => write!(f, "Guestbook deletion is disabled"),
            GuestbookError::InvalidSecret => write!(f, "Invalid secret"),
            GuestbookError::NotFound => write!(f, "Entry not found"),
            GuestbookError::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for GuestbookError {}

// Failures of the third-party read-through endpoints.
#[derive(Debug)]
pub enum ProxyError {
    MissingConfiguration(&'static str),
    TokenExchange,
    Upstream {
        status: u16,
        message: String,
        details: Option<String>,
    },
    Transport(String),
    Decode(String),
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::MissingConfiguration(message) => write!(f, "{message}"),
            ProxyError::TokenExchange => write!(f, "Failed to retrieve access token."),
            ProxyError::Upstream {
                status, message, ..
            } => write!(f, "upstream error {status}: {message}"),
            ProxyError::Transport(reason) => write!(f, "upstream transport error: {reason}"),
            ProxyError::Decode(reason) => write!(f, "upstream response decode error: {reason}"),
        }
    }
}

impl std::error::Error for ProxyError {}
