//! Result type used throughout release-herald.
//!
//! All fallible functions in this crate return [`Result`], pairing values
//! with the [`HeraldError`](crate::error::HeraldError) taxonomy defined in
//! the `error` module. Errors that have no dedicated variant can be wrapped
//! with `.wrap_err()` from `color_eyre::eyre::Context` and land in the
//! transparent `Other` variant as they propagate.

use crate::error::HeraldError;

/// Standard result type for release-herald operations.
pub type Result<T> = std::result::Result<T, HeraldError>;
