use async_trait::async_trait;

use crate::person::{NewPerson, Person, PersonPatch};

use super::Result;

/// Repository for person record operations.
///
/// Implementations own id assignment and fiscal-code uniqueness. Each method
/// reads the full table at entry and, for mutations, rewrites it at exit;
/// validation happens before any mutation so domain errors never leave a
/// partial write behind.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Creates a new record, assigning the next free id.
    ///
    /// Fails with `DuplicateFiscalCode` if the fiscal code is already held
    /// by an existing record.
    async fn create(&self, new: NewPerson) -> Result<Person>;

    /// Returns every record in table order. An empty table yields an empty
    /// vector, not an error.
    async fn list(&self) -> Result<Vec<Person>>;

    /// Gets a record by its id.
    async fn get(&self, id: u64) -> Result<Person>;

    /// Applies a partial update to a record in place.
    ///
    /// Fails with `DuplicateFiscalCode` if the patch sets a fiscal code held
    /// by a different record; keeping one's own fiscal code is not a
    /// conflict.
    async fn update(&self, id: u64, patch: PersonPatch) -> Result<Person>;

    /// Deletes a record by its id.
    async fn delete(&self, id: u64) -> Result<()>;

    /// Returns the number of records.
    async fn count(&self) -> Result<u64>;
}
