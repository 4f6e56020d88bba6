use thiserror::Error;

use crate::domain::id::MalformedReference;
use crate::domain::incident::Incident;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Failures reported by a store adapter, below any domain meaning.
///
/// Services translate these into their own vocabulary; callers of a
/// service never match on `StoreError` directly.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached or the operation did not complete.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// An insert completed without yielding the new record's identity.
    #[error("write completed without an acknowledged identity")]
    WriteUnacknowledged,

    /// A document could not be converted between its domain type and
    /// its stored representation.
    #[error("document conversion failed: {0}")]
    Decode(String),
}

/// Checkout failures, ordered roughly as the flow can produce them.
///
/// `PartialFailure` is the one variant that does not mean "nothing
/// happened": the purchase record exists and a reconciliation incident
/// has been journaled.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// The supplied reference is not a well-formed store identity.
    #[error("invalid reference: {0}")]
    InvalidReference(#[from] MalformedReference),

    #[error("quantity must be a strictly positive integer, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// For cancellation this covers both "no such order" and "order
    /// belongs to someone else"; the two are deliberately not
    /// distinguishable from the outside.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("vendors cannot purchase their own listing")]
    SelfPurchaseForbidden,

    #[error("insufficient stock to cover {requested} unit(s)")]
    InsufficientStock { requested: i64 },

    /// The purchase insert completed without an identity; no record was
    /// created and the inventory was never touched.
    #[error("purchase was not recorded")]
    WriteFailed,

    /// One store committed and the other could not be brought back into
    /// agreement. The payload is the journaled incident.
    #[error("purchase {} committed but inventory diverged: {}", .0.purchase_id, .0.cause)]
    PartialFailure(Box<Incident>),

    /// The caller asked for purchase history of a mailbox they do not own.
    #[error("caller identity does not match the requested mailbox")]
    Forbidden,

    /// Unexpected store failure surfaced to the caller.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

/// Catalog maintenance failures.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The supplied reference is not a well-formed store identity.
    #[error("invalid reference: {0}")]
    InvalidReference(#[from] MalformedReference),

    #[error("food item not found")]
    NotFound,

    /// The listing insert completed without an identity.
    #[error("listing was not recorded")]
    WriteFailed,

    /// Unexpected store failure surfaced to the caller.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for fallible store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
