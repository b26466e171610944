//! Pre-borrow checks owned by the entities themselves.

use crate::error::Result;

/// An entity that can veto a loan based on its own state
pub trait Validate {
    /// Check that the entity may take part in a new loan.
    ///
    /// # Errors
    ///
    /// Returns the [`crate::CatalogError`] that describes why it may not.
    fn validate(&self) -> Result<()>;
}
