//! Person CRUD handlers.
//!
//! Thin layer over the repository trait object: extraction, logging, and
//! error mapping. All invariants live in the repository.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use anagrafe_core::person::{NewPerson, Person, PersonPatch};

use crate::{handlers::AppError, state::AppState};

/// Acknowledgment payload returned by deletes.
#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub message: &'static str,
}

/// Row-count payload.
#[derive(Debug, Serialize)]
pub struct RecordCount {
    pub count: u64,
}

/// Create a new person (POST /items/).
pub async fn create_person(
    State(state): State<AppState>,
    Json(payload): Json<NewPerson>,
) -> Result<Json<Person>, AppError> {
    tracing::debug!(payload = ?payload, "Received create request");

    let person = state.persons.create(payload).await?;

    tracing::info!(person_id = person.id, "Created person");

    Ok(Json(person))
}

/// List all persons in table order (GET /items/).
pub async fn list_persons(State(state): State<AppState>) -> Result<Json<Vec<Person>>, AppError> {
    let persons = state.persons.list().await?;
    Ok(Json(persons))
}

/// Get a single person by id (GET /items/{id}).
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Person>, AppError> {
    let person = state.persons.get(id).await?;
    Ok(Json(person))
}

/// Update a person by id (PUT /items/{id}).
///
/// Absent fields are left unchanged; an empty payload returns the record
/// as-is.
pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<PersonPatch>,
) -> Result<Json<Person>, AppError> {
    tracing::debug!(person_id = id, payload = ?payload, "Received update request");

    let person = state.persons.update(id, payload).await?;

    tracing::info!(person_id = id, "Updated person");

    Ok(Json(person))
}

/// Delete a person by id (DELETE /items/{id}).
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteAck>, AppError> {
    state.persons.delete(id).await?;

    tracing::info!(person_id = id, "Deleted person");

    Ok(Json(DeleteAck {
        message: "Item deleted successfully",
    }))
}

/// Count persons (GET /items/count).
pub async fn count_persons(State(state): State<AppState>) -> Result<Json<RecordCount>, AppError> {
    let count = state.persons.count().await?;
    Ok(Json(RecordCount { count }))
}
