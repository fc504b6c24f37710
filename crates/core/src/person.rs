use serde::{Deserialize, Serialize};

/// A person record.
///
/// `id` is assigned by the store and immutable; `codice_fiscale` is the
/// business key and must stay unique across the whole table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub nome: String,
    pub cognome: String,
    pub codice_fiscale: String,
}

/// Request payload for creating a new person.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPerson {
    pub nome: String,
    pub cognome: String,
    pub codice_fiscale: String,
}

impl NewPerson {
    /// Converts the create request into a `Person` with the given id.
    pub fn into_person(self, id: u64) -> Person {
        Person {
            id,
            nome: self.nome,
            cognome: self.cognome,
            codice_fiscale: self.codice_fiscale,
        }
    }
}

/// Partial update for a person.
///
/// Each field is an explicit `Option`: absent (or `null`) means "leave
/// unchanged", while a supplied value replaces the field, so setting a field
/// to the empty string remains expressible. An all-`None` patch is valid and
/// leaves the record as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonPatch {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub cognome: Option<String>,
    #[serde(default)]
    pub codice_fiscale: Option<String>,
}

impl PersonPatch {
    /// Applies the supplied fields to an existing person.
    pub fn apply_to(self, person: &mut Person) {
        if let Some(nome) = self.nome {
            person.nome = nome;
        }
        if let Some(cognome) = self.cognome {
            person.cognome = cognome;
        }
        if let Some(codice_fiscale) = self.codice_fiscale {
            person.codice_fiscale = codice_fiscale;
        }
    }
}
