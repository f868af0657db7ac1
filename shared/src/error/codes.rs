//! Unified error codes for the restaurant backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 6xxx: Catalog errors (menu items, inventory)
//! - 7xxx: Reservation errors
//! - 8xxx: Account and review errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can switch on a
/// stable number instead of parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Too many requests
    TooManyRequests = 9,

    // ==================== 1xxx: Auth ====================
    /// Not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials
    InvalidCredentials = 1002,
    /// Token expired
    TokenExpired = 1003,
    /// Token invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Role required
    RoleRequired = 2002,
    /// Admin required
    AdminRequired = 2003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4007,
    /// Unknown order status
    OrderInvalidStatus = 4008,
    /// Status transition not allowed
    OrderInvalidTransition = 4009,
    /// Line item quantity must be positive
    OrderInvalidQuantity = 4010,
    /// Guest orders need contact details
    GuestContactRequired = 4011,

    // ==================== 6xxx: Catalog ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu item price invalid
    MenuItemInvalidPrice = 6002,
    /// Menu item not available for ordering
    MenuItemUnavailable = 6003,
    /// Menu item referenced by orders
    MenuItemInUse = 6004,
    /// Inventory item not found
    InventoryItemNotFound = 6101,
    /// Not enough stock to fulfil the order
    InsufficientStock = 6102,
    /// Inventory quantity invalid
    InventoryInvalidQuantity = 6103,
    /// Inventory row changed concurrently
    InventoryConflict = 6104,

    // ==================== 7xxx: Reservation ====================
    /// Reservation date or time invalid
    ReservationInvalidDateTime = 7002,
    /// Reservation party size invalid
    ReservationInvalidPartySize = 7003,

    // ==================== 8xxx: Account & Review ====================
    /// User not found
    UserNotFound = 8001,
    /// Email already registered
    EmailAlreadyRegistered = 8002,
    /// Password too short
    PasswordTooShort = 8003,
    /// Review not found
    ReviewNotFound = 8101,
    /// Review rating out of range
    ReviewInvalidRating = 8102,
    /// Order already reviewed by this user
    ReviewAlreadyExists = 8103,
    /// Unknown review status
    ReviewInvalidStatus = 8104,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::TooManyRequests => "Too many requests, try again later",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Required role is missing",
            ErrorCode::AdminRequired => "Administrator privileges required",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order must contain at least one item",
            ErrorCode::OrderInvalidStatus => "Unknown order status",
            ErrorCode::OrderInvalidTransition => "Order status transition is not allowed",
            ErrorCode::OrderInvalidQuantity => "Item quantity must be a positive integer",
            ErrorCode::GuestContactRequired => "Guest orders require a name and phone number",

            // Catalog
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemInvalidPrice => "Menu item price is invalid",
            ErrorCode::MenuItemUnavailable => "Menu item is not available",
            ErrorCode::MenuItemInUse => "Menu item is referenced by existing orders",
            ErrorCode::InventoryItemNotFound => "Inventory item not found",
            ErrorCode::InsufficientStock => "Insufficient stock",
            ErrorCode::InventoryInvalidQuantity => "Inventory quantity is invalid",
            ErrorCode::InventoryConflict => "Inventory changed concurrently, retry the request",

            // Reservation
            ErrorCode::ReservationInvalidDateTime => "Reservation date or time is invalid",
            ErrorCode::ReservationInvalidPartySize => "Reservation party size is invalid",

            // Account & Review
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailAlreadyRegistered => "Email is already registered",
            ErrorCode::PasswordTooShort => "Password is too short",
            ErrorCode::ReviewNotFound => "Review not found",
            ErrorCode::ReviewInvalidRating => "Rating must be between 1 and 5",
            ErrorCode::ReviewAlreadyExists => "This order has already been reviewed",
            ErrorCode::ReviewInvalidStatus => "Unknown review status",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            9 => Ok(ErrorCode::TooManyRequests),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::OrderInvalidStatus),
            4009 => Ok(ErrorCode::OrderInvalidTransition),
            4010 => Ok(ErrorCode::OrderInvalidQuantity),
            4011 => Ok(ErrorCode::GuestContactRequired),

            // Catalog
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6002 => Ok(ErrorCode::MenuItemInvalidPrice),
            6003 => Ok(ErrorCode::MenuItemUnavailable),
            6004 => Ok(ErrorCode::MenuItemInUse),
            6101 => Ok(ErrorCode::InventoryItemNotFound),
            6102 => Ok(ErrorCode::InsufficientStock),
            6103 => Ok(ErrorCode::InventoryInvalidQuantity),
            6104 => Ok(ErrorCode::InventoryConflict),

            // Reservation
            7002 => Ok(ErrorCode::ReservationInvalidDateTime),
            7003 => Ok(ErrorCode::ReservationInvalidPartySize),

            // Account & Review
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::EmailAlreadyRegistered),
            8003 => Ok(ErrorCode::PasswordTooShort),
            8101 => Ok(ErrorCode::ReviewNotFound),
            8102 => Ok(ErrorCode::ReviewInvalidRating),
            8103 => Ok(ErrorCode::ReviewAlreadyExists),
            8104 => Ok(ErrorCode::ReviewInvalidStatus),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
