//! Pure functions over the flat-file person table.
//!
//! The persisted table is a delimited text file with the header row
//! `id,nome,cognome,codice_fiscale` and one data row per record. Row order
//! is insertion order. These functions implement parsing, rendering, and the
//! row-level lookups shared by storage backends; they perform no I/O.

use crate::person::Person;

use super::{RepositoryError, Result};

/// Header row of the persisted table.
pub const HEADER: &str = "id,nome,cognome,codice_fiscale";

/// Field delimiter. The format has no escaping, so field values must not
/// contain it.
const DELIMITER: char = ',';

/// Parses full table file contents into records, preserving row order.
///
/// The first line must be the header row. Blank lines are skipped.
pub fn parse_table(contents: &str) -> Result<Vec<Person>> {
    let mut lines = contents.lines();

    match lines.next() {
        Some(header) if header == HEADER => {}
        Some(other) => {
            return Err(RepositoryError::Corrupted(format!(
                "unexpected header row: {other:?}"
            )))
        }
        None => return Err(RepositoryError::Corrupted("missing header row".to_string())),
    }

    let mut persons = Vec::new();
    for (index, line) in lines.enumerate() {
        if line.is_empty() {
            continue;
        }
        let person = parse_row(line)
            .map_err(|e| RepositoryError::Corrupted(format!("row {}: {e}", index + 2)))?;
        persons.push(person);
    }

    Ok(persons)
}

fn parse_row(line: &str) -> std::result::Result<Person, String> {
    let mut fields = line.split(DELIMITER);
    let id = fields.next().ok_or("missing id field")?;
    let nome = fields.next().ok_or("missing nome field")?;
    let cognome = fields.next().ok_or("missing cognome field")?;
    let codice_fiscale = fields.next().ok_or("missing codice_fiscale field")?;
    if fields.next().is_some() {
        return Err("too many fields".to_string());
    }

    let id = id
        .parse::<u64>()
        .map_err(|e| format!("invalid id {id:?}: {e}"))?;

    Ok(Person {
        id,
        nome: nome.to_string(),
        cognome: cognome.to_string(),
        codice_fiscale: codice_fiscale.to_string(),
    })
}

/// Renders records back into full table file contents, one row per record
/// in slice order, ending with a trailing newline.
///
/// Fails with `InvalidData` if any field value contains the delimiter or a
/// line break, since the format cannot represent them.
pub fn render_table(persons: &[Person]) -> Result<String> {
    let mut contents = String::with_capacity(HEADER.len() + 1 + persons.len() * 48);
    contents.push_str(HEADER);
    contents.push('\n');

    for person in persons {
        for field in [&person.nome, &person.cognome, &person.codice_fiscale] {
            if field.contains(DELIMITER) || field.contains('\n') || field.contains('\r') {
                return Err(RepositoryError::InvalidData(format!(
                    "field value {field:?} contains a delimiter or line break"
                )));
            }
        }
        contents.push_str(&format!(
            "{},{},{},{}\n",
            person.id, person.nome, person.cognome, person.codice_fiscale
        ));
    }

    Ok(contents)
}

/// Next id to assign: max existing id plus one, or 1 for an empty table.
///
/// Ids below the current max are never reused, so deleting a non-max row
/// leaves a permanent gap.
pub fn next_id(persons: &[Person]) -> u64 {
    persons.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
}

/// Index of the record with the given id, if any.
pub fn position_of(persons: &[Person], id: u64) -> Option<usize> {
    persons.iter().position(|p| p.id == id)
}

/// True when `codice_fiscale` is already held by a record other than
/// `exclude`. Pass `exclude = Some(id)` on update so a record may keep its
/// own fiscal code.
pub fn fiscal_code_taken(persons: &[Person], codice_fiscale: &str, exclude: Option<u64>) -> bool {
    persons
        .iter()
        .any(|p| p.codice_fiscale == codice_fiscale && Some(p.id) != exclude)
}
