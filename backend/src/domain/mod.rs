//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed entities for accounts and priced items, the
//! ports that adapters implement, and the services that orchestrate them.
//! Constructors validate their inputs so handlers and adapters only ever see
//! well-formed values.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — failure payload shared by every layer.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - User / Username / UserId — account identity.
//! - LoginCredentials / SignupCredentials — validated form payloads.
//! - Item / ItemDraft / Price — the priced items managed by the app.
//! - AccountService / ItemService — domain services behind the driving ports.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod item;
pub mod item_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN_LEN, PasswordValidationError,
    SignupCredentials, SignupValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::item::{
    ITEM_NAME_MAX, Item, ItemDraft, ItemDraftError, ItemId, ItemName, ItemNameError, Price,
    PriceError,
};
pub use self::item_service::ItemService;
pub use self::trace_id::TraceId;
pub use self::user::{PasswordHash, User, UserId, UserValidationError, Username};

/// Convenient result alias for handlers and services.
///
/// # Examples
/// ```
/// use pricebook::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u32> {
///     Err(Error::not_found("nope"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
