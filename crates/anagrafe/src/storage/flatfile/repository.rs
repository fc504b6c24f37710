//! Flat-file repository implementation.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use anagrafe_core::person::{NewPerson, Person, PersonPatch};
use anagrafe_core::storage::{
    fiscal_code_taken, next_id, parse_table, position_of, render_table, PersonRepository,
    RepositoryError, Result, HEADER,
};

/// Flat-file backed person repository.
///
/// Every operation loads the whole table from disk and, for mutations,
/// rewrites it wholesale. A single mutex serializes the read-modify-persist
/// cycles so concurrent requests cannot interleave them; the rewrite itself
/// is not atomic. The file is created header-only on first access.
pub struct FlatFileRepository {
    path: PathBuf,
    /// Held for the duration of each read-modify-persist cycle.
    lock: Mutex<()>,
}

impl FlatFileRepository {
    /// Creates a repository over the table at `path`.
    ///
    /// The file itself is initialized lazily on first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Reads and parses the full table, creating it empty if absent.
    async fn load(&self) -> Result<Vec<Person>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => parse_table(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.write_contents(&format!("{HEADER}\n")).await?;
                Ok(Vec::new())
            }
            Err(e) => Err(RepositoryError::Io(e.to_string())),
        }
    }

    /// Rewrites the full table.
    async fn persist(&self, persons: &[Person]) -> Result<()> {
        let contents = render_table(persons)?;
        self.write_contents(&contents).await
    }

    async fn write_contents(&self, contents: &str) -> Result<()> {
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| RepositoryError::Io(e.to_string()))
    }
}

#[async_trait]
impl PersonRepository for FlatFileRepository {
    async fn create(&self, new: NewPerson) -> Result<Person> {
        let _guard = self.lock.lock().await;
        let mut persons = self.load().await?;

        if fiscal_code_taken(&persons, &new.codice_fiscale, None) {
            return Err(RepositoryError::DuplicateFiscalCode {
                codice_fiscale: new.codice_fiscale,
            });
        }

        let person = new.into_person(next_id(&persons));
        persons.push(person.clone());
        self.persist(&persons).await?;

        tracing::debug!(person_id = person.id, rows = persons.len(), "Appended row");

        Ok(person)
    }

    async fn list(&self) -> Result<Vec<Person>> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn get(&self, id: u64) -> Result<Person> {
        let _guard = self.lock.lock().await;
        let persons = self.load().await?;

        let index = position_of(&persons, id).ok_or(RepositoryError::NotFound { id })?;
        Ok(persons[index].clone())
    }

    async fn update(&self, id: u64, patch: PersonPatch) -> Result<Person> {
        let _guard = self.lock.lock().await;
        let mut persons = self.load().await?;

        let index = position_of(&persons, id).ok_or(RepositoryError::NotFound { id })?;

        // Validate the business key before touching the row, so a conflict
        // leaves the table untouched.
        if let Some(codice_fiscale) = patch.codice_fiscale.as_deref() {
            if fiscal_code_taken(&persons, codice_fiscale, Some(id)) {
                return Err(RepositoryError::DuplicateFiscalCode {
                    codice_fiscale: codice_fiscale.to_string(),
                });
            }
        }

        patch.apply_to(&mut persons[index]);
        self.persist(&persons).await?;

        Ok(persons[index].clone())
    }

    async fn delete(&self, id: u64) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut persons = self.load().await?;

        let index = position_of(&persons, id).ok_or(RepositoryError::NotFound { id })?;

        persons.remove(index);
        self.persist(&persons).await?;

        tracing::debug!(person_id = id, rows = persons.len(), "Removed row");

        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        let _guard = self.lock.lock().await;
        let persons = self.load().await?;
        Ok(persons.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn scratch_repo() -> (TempDir, FlatFileRepository) {
        let dir = TempDir::new().unwrap();
        let repo = FlatFileRepository::new(dir.path().join("data.csv"));
        (dir, repo)
    }

    fn new_person(nome: &str, cognome: &str, codice_fiscale: &str) -> NewPerson {
        NewPerson {
            nome: nome.to_string(),
            cognome: cognome.to_string(),
            codice_fiscale: codice_fiscale.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_on_fresh_table_is_empty_and_initializes_file() {
        let (dir, repo) = scratch_repo();

        let persons = repo.list().await.unwrap();
        assert!(persons.is_empty());

        let contents = std::fs::read_to_string(dir.path().join("data.csv")).unwrap();
        assert_eq!(contents, "id,nome,cognome,codice_fiscale\n");
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids_from_one() {
        let (_dir, repo) = scratch_repo();

        let first = repo
            .create(new_person("Mario", "Rossi", "RSSMRA80A01H501U"))
            .await
            .unwrap();
        let second = repo
            .create(new_person("Anna", "Verdi", "VRDNNA85M41F205X"))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let (_dir, repo) = scratch_repo();

        let created = repo
            .create(new_person("Mario", "Rossi", "RSSMRA80A01H501U"))
            .await
            .unwrap();

        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_duplicate_fiscal_code_leaves_table_unchanged() {
        let (dir, repo) = scratch_repo();

        repo.create(new_person("Mario", "Rossi", "RSSMRA80A01H501U"))
            .await
            .unwrap();
        let before = std::fs::read_to_string(dir.path().join("data.csv")).unwrap();

        let result = repo
            .create(new_person("Anna", "Verdi", "RSSMRA80A01H501U"))
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::DuplicateFiscalCode { .. })
        ));
        let after = std::fs::read_to_string(dir.path().join("data.csv")).unwrap();
        assert_eq!(after, before);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_id_is_max_plus_one_after_deleting_a_middle_row() {
        let (_dir, repo) = scratch_repo();

        for (nome, cf) in [
            ("Mario", "RSSMRA80A01H501U"),
            ("Anna", "VRDNNA85M41F205X"),
            ("Luca", "LCUBNC90T10F839M"),
        ] {
            repo.create(new_person(nome, "Rossi", cf)).await.unwrap();
        }
        repo.delete(2).await.unwrap();

        let created = repo
            .create(new_person("Paola", "Bianchi", "BNCPLA75S50L219A"))
            .await
            .unwrap();

        // Id 2 is never reused.
        assert_eq!(created.id, 4);
    }

    #[tokio::test]
    async fn test_get_nonexistent_is_not_found() {
        let (_dir, repo) = scratch_repo();

        let result = repo.get(1).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { id: 1 })));
    }

    #[tokio::test]
    async fn test_update_applies_only_supplied_fields_in_place() {
        let (_dir, repo) = scratch_repo();

        repo.create(new_person("Mario", "Rossi", "RSSMRA80A01H501U"))
            .await
            .unwrap();
        repo.create(new_person("Anna", "Verdi", "VRDNNA85M41F205X"))
            .await
            .unwrap();

        let patch = PersonPatch {
            cognome: Some("Bianchi".to_string()),
            ..Default::default()
        };
        let updated = repo.update(1, patch).await.unwrap();

        assert_eq!(updated.nome, "Mario");
        assert_eq!(updated.cognome, "Bianchi");
        assert_eq!(updated.codice_fiscale, "RSSMRA80A01H501U");

        // Row count and order are untouched.
        let persons = repo.list().await.unwrap();
        assert_eq!(persons.len(), 2);
        assert_eq!(persons[0].id, 1);
        assert_eq!(persons[1].id, 2);
    }

    #[tokio::test]
    async fn test_update_to_own_fiscal_code_is_not_a_conflict() {
        let (_dir, repo) = scratch_repo();

        repo.create(new_person("Mario", "Rossi", "RSSMRA80A01H501U"))
            .await
            .unwrap();

        let patch = PersonPatch {
            codice_fiscale: Some("RSSMRA80A01H501U".to_string()),
            ..Default::default()
        };

        let updated = repo.update(1, patch).await.unwrap();
        assert_eq!(updated.codice_fiscale, "RSSMRA80A01H501U");
    }

    #[tokio::test]
    async fn test_update_to_another_records_fiscal_code_is_rejected() {
        let (_dir, repo) = scratch_repo();

        repo.create(new_person("Mario", "Rossi", "RSSMRA80A01H501U"))
            .await
            .unwrap();
        repo.create(new_person("Anna", "Verdi", "VRDNNA85M41F205X"))
            .await
            .unwrap();

        let patch = PersonPatch {
            codice_fiscale: Some("RSSMRA80A01H501U".to_string()),
            ..Default::default()
        };
        let result = repo.update(2, patch).await;

        assert!(matches!(
            result,
            Err(RepositoryError::DuplicateFiscalCode { .. })
        ));

        let unchanged = repo.get(2).await.unwrap();
        assert_eq!(unchanged.codice_fiscale, "VRDNNA85M41F205X");
    }

    #[tokio::test]
    async fn test_update_with_empty_patch_returns_record_unchanged() {
        let (_dir, repo) = scratch_repo();

        let created = repo
            .create(new_person("Mario", "Rossi", "RSSMRA80A01H501U"))
            .await
            .unwrap();

        let updated = repo.update(1, PersonPatch::default()).await.unwrap();
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn test_update_nonexistent_is_not_found() {
        let (_dir, repo) = scratch_repo();

        let result = repo.update(9, PersonPatch::default()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { id: 9 })));
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_row() {
        let (_dir, repo) = scratch_repo();

        repo.create(new_person("Mario", "Rossi", "RSSMRA80A01H501U"))
            .await
            .unwrap();
        repo.create(new_person("Anna", "Verdi", "VRDNNA85M41F205X"))
            .await
            .unwrap();

        repo.delete(1).await.unwrap();

        assert!(matches!(
            repo.get(1).await,
            Err(RepositoryError::NotFound { .. })
        ));
        let persons = repo.list().await.unwrap();
        assert_eq!(persons.len(), 1);
        assert_eq!(persons[0].id, 2);
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_not_found_even_on_empty_table() {
        let (_dir, repo) = scratch_repo();

        let result = repo.delete(1).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { id: 1 })));
    }

    #[tokio::test]
    async fn test_count_tracks_creates_and_deletes() {
        let (_dir, repo) = scratch_repo();

        assert_eq!(repo.count().await.unwrap(), 0);

        repo.create(new_person("Mario", "Rossi", "RSSMRA80A01H501U"))
            .await
            .unwrap();
        repo.create(new_person("Anna", "Verdi", "VRDNNA85M41F205X"))
            .await
            .unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);

        repo.delete(1).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_records_survive_reopening_the_repository() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");

        let created = {
            let repo = FlatFileRepository::new(&path);
            repo.create(new_person("Mario", "Rossi", "RSSMRA80A01H501U"))
                .await
                .unwrap()
        };

        let reopened = FlatFileRepository::new(&path);
        let fetched = reopened.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_rejects_field_with_embedded_delimiter() {
        let (_dir, repo) = scratch_repo();

        let result = repo
            .create(new_person("Mario,Luigi", "Rossi", "RSSMRA80A01H501U"))
            .await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
