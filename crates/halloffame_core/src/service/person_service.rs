//! Person use-case service.
//!
//! # Responsibility
//! - Provide list/get/create/update/delete entry points over the person store.
//! - Run validation, reconciliation and commit in a fixed order.
//!
//! # Invariants
//! - Validation runs before any storage access; an invalid request never
//!   touches storage.
//! - Each mutation commits at most once, at the end of the operation.
//! - Not-found and validation failures are returned as `ServiceOutcome`
//!   values; storage failures and cancellation are returned as `ServiceError`.

use crate::cancel::CancelToken;
use crate::model::dto::{CreateRequest, PersonSummary, UpdateRequest};
use crate::model::person::PersonId;
use crate::outcome::ServiceOutcome;
use crate::reconcile::reconcile;
use crate::repo::person_repo::{PersonRepository, RepoError};
use crate::validation::{validate_person_request, FieldError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Unexpected failure of a person service operation.
#[derive(Debug)]
pub enum ServiceError {
    /// Storage failure; needs operator attention.
    Repo(RepoError),
    /// Caller cancelled the operation before it committed.
    Cancelled,
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Cancelled => write!(f, "operation cancelled"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Cancelled => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type ServiceResult<T> = Result<ServiceOutcome<T>, ServiceError>;

/// Person service facade over a repository implementation.
pub struct PersonService<R: PersonRepository> {
    repo: R,
}

impl<R: PersonRepository> PersonService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gives the repository back, e.g. to inspect storage after a call.
    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Lists every person. Never produces a failure variant.
    pub fn get_all(&self, cancel: &CancelToken) -> ServiceResult<Vec<PersonSummary>> {
        checkpoint(cancel)?;
        let persons = self.repo.list_persons()?;
        Ok(ServiceOutcome::Success(
            persons.iter().map(PersonSummary::from).collect(),
        ))
    }

    /// Gets one person, or `ApiError(404, "No such person")`.
    pub fn get_by_id(&self, id: PersonId, cancel: &CancelToken) -> ServiceResult<PersonSummary> {
        checkpoint(cancel)?;
        match self.repo.get_person(id)? {
            Some(person) => Ok(ServiceOutcome::Success(PersonSummary::from(&person))),
            None => {
                info!("event=person_get module=service status=not_found id={id}");
                Ok(ServiceOutcome::not_found())
            }
        }
    }

    /// Creates a person with its initial skills.
    ///
    /// Acknowledges with the request itself; the assigned id is not returned.
    pub fn create(
        &mut self,
        request: CreateRequest,
        cancel: &CancelToken,
    ) -> ServiceResult<CreateRequest> {
        let errors = validate_person_request(&request);
        if !errors.is_empty() {
            return Ok(rejected("person_create", errors));
        }

        checkpoint(cancel)?;
        let id = self.repo.create_person(&request.to_new_person())?;
        info!(
            "event=person_create module=service status=ok id={id} skills={}",
            request.skills.as_ref().map_or(0, Vec::len)
        );
        Ok(ServiceOutcome::Success(request))
    }

    /// Overwrites name fields and reconciles skills by name.
    ///
    /// Validation precedes lookup: an invalid body for a missing id yields
    /// `ValidationFailure`, not `ApiError`.
    pub fn update(
        &mut self,
        id: PersonId,
        request: &UpdateRequest,
        cancel: &CancelToken,
    ) -> ServiceResult<PersonId> {
        let errors = validate_person_request(request);
        if !errors.is_empty() {
            return Ok(rejected("person_update", errors));
        }

        checkpoint(cancel)?;
        let Some(mut person) = self.repo.get_person(id)? else {
            info!("event=person_update module=service status=not_found id={id}");
            return Ok(ServiceOutcome::not_found());
        };

        person.name = request.name.clone();
        person.display_name = request.display_name.clone();
        let desired = request.desired_skills();
        let plan = reconcile(&person.skills, desired.as_deref());

        checkpoint(cancel)?;
        match self.repo.save_person(&person, &plan) {
            Ok(()) => {}
            Err(RepoError::NotFound(_)) => {
                info!("event=person_update module=service status=not_found id={id} stage=commit");
                return Ok(ServiceOutcome::not_found());
            }
            Err(err) => return Err(err.into()),
        }

        info!(
            "event=person_update module=service status=ok id={id} deleted={} updated={} inserted={}",
            plan.to_delete.len(),
            plan.to_update.len(),
            plan.to_insert.len()
        );
        Ok(ServiceOutcome::Success(id))
    }

    /// Deletes a person and, through storage cascade, all of its skills.
    pub fn delete(&mut self, id: PersonId, cancel: &CancelToken) -> ServiceResult<PersonId> {
        checkpoint(cancel)?;
        match self.repo.delete_person(id) {
            Ok(()) => {
                info!("event=person_delete module=service status=ok id={id}");
                Ok(ServiceOutcome::Success(id))
            }
            Err(RepoError::NotFound(_)) => {
                info!("event=person_delete module=service status=not_found id={id}");
                Ok(ServiceOutcome::not_found())
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn checkpoint(cancel: &CancelToken) -> Result<(), ServiceError> {
    if cancel.is_cancelled() {
        return Err(ServiceError::Cancelled);
    }
    Ok(())
}

fn rejected<T>(event: &str, errors: Vec<FieldError>) -> ServiceOutcome<T> {
    let fields = errors
        .iter()
        .map(|error| error.field.as_str())
        .collect::<Vec<_>>()
        .join(",");
    warn!(
        "event={event} module=service status=invalid error_count={} fields={fields}",
        errors.len()
    );
    ServiceOutcome::invalid(errors)
}
