//! Page-level coordinator: which dialog is open and what it targets.
//!
//! # Design
//! `Dashboard` owns the catalog, the sync service and the notifier, and
//! drives them in response to user actions. At most one modal is open; the
//! target id lives inside the modal state, so it cannot outlive the dialog
//! that references it.
//!
//! Opening a modal while another is open replaces it. Every confirm closes
//! the modal once the remote call has answered, success or not, except a
//! failed validation, which keeps the form open with its errors.

use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::error::{FetchError, Operation};
use crate::http::Transport;
use crate::notify::{Notification, Notifier};
use crate::service::MealService;
use crate::transform::PriceSource;
use crate::types::Meal;
use crate::validation::{FormState, ValidationErrors, ValidationRules};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    None,
    Add,
    Edit(String),
    DeleteConfirm(String),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::None)
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            ModalState::Edit(id) | ModalState::DeleteConfirm(id) => Some(id.as_str()),
            ModalState::None | ModalState::Add => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no meal with id {0:?}")]
    UnknownMeal(String),

    #[error("no matching dialog is open")]
    NoModal,
}

pub struct Dashboard<T, P, N> {
    service: MealService<T, P>,
    catalog: Catalog,
    rules: ValidationRules,
    modal: ModalState,
    form: Option<FormState>,
    notifier: N,
}

impl<T: Transport, P: PriceSource, N: Notifier> Dashboard<T, P, N> {
    pub fn new(service: MealService<T, P>, notifier: N) -> Self {
        Self {
            service,
            catalog: Catalog::new(),
            rules: ValidationRules::standard(),
            modal: ModalState::None,
            form: None,
            notifier,
        }
    }

    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        self.form.as_mut()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Reload the full collection.
    pub fn refresh(&mut self) -> Result<(), FetchError> {
        match self.service.list() {
            Ok(meals) => {
                info!(count = meals.len(), "catalog loaded");
                self.catalog.replace_all(meals);
                Ok(())
            }
            Err(err) => Err(self.report(err)),
        }
    }

    /// Set the search term and, when it is not blank, fetch matches.
    ///
    /// A failed search is not reported to the notifier. The results stay
    /// empty, so the view shows the no-matches state. The hosted store
    /// answers 404 when nothing matches.
    pub fn search(&mut self, term: &str) {
        if !self.catalog.set_search_term(term) {
            return;
        }
        match self.service.search(term) {
            Ok(meals) => self.catalog.set_search_results(meals),
            Err(err) => warn!(term = %term.trim(), error = %err, "search failed, showing no matches"),
        }
    }

    pub fn open_add(&mut self) {
        self.modal = ModalState::Add;
        self.form = Some(FormState::for_add());
    }

    pub fn open_edit(&mut self, id: &str) -> Result<(), DashboardError> {
        let meal = self.lookup(id)?;
        self.modal = ModalState::Edit(meal.id.clone());
        self.form = Some(FormState::for_edit(meal));
        Ok(())
    }

    pub fn open_delete(&mut self, id: &str) -> Result<(), DashboardError> {
        let meal = self.lookup(id)?;
        self.modal = ModalState::DeleteConfirm(meal.id);
        self.form = None;
        Ok(())
    }

    pub fn close(&mut self) {
        self.modal = ModalState::None;
        self.form = None;
    }

    /// Submit the open add or edit form.
    pub fn confirm_save(&mut self) -> Result<Meal, DashboardError> {
        let target = match &self.modal {
            ModalState::Add => None,
            ModalState::Edit(id) => Some(id.clone()),
            ModalState::None | ModalState::DeleteConfirm(_) => return Err(DashboardError::NoModal),
        };
        let form = self.form.as_mut().ok_or(DashboardError::NoModal)?;
        let draft = form.submit(&self.rules)?;

        let result = match &target {
            None => self.service.create(&draft),
            Some(id) => self.service.update(id, &draft),
        };
        self.close();

        let meal = result.map_err(|err| self.report(err))?;
        let operation = match target {
            None => {
                self.catalog.apply_created(meal.clone());
                Operation::Create
            }
            Some(_) => {
                self.catalog.apply_updated(meal.clone());
                Operation::Update
            }
        };
        info!(operation = operation.as_str(), id = %meal.id, "meal saved");
        self.confirm(operation);
        Ok(meal)
    }

    /// Delete the meal targeted by the open confirmation dialog.
    ///
    /// The meal stays listed, marked pending, until the store confirms.
    pub fn confirm_delete(&mut self) -> Result<(), DashboardError> {
        let ModalState::DeleteConfirm(id) = &self.modal else {
            return Err(DashboardError::NoModal);
        };
        let id = id.clone();

        self.catalog.mark_pending(&id);
        let result = self.service.delete(&id);
        self.close();

        match result {
            Ok(()) => {
                self.catalog.apply_deleted(&id);
                info!(id = %id, "meal deleted");
                self.confirm(Operation::Delete);
                Ok(())
            }
            Err(err) => {
                self.catalog.clear_pending(&id);
                Err(self.report(err).into())
            }
        }
    }

    fn lookup(&self, id: &str) -> Result<Meal, DashboardError> {
        self.catalog
            .find(id)
            .cloned()
            .ok_or_else(|| DashboardError::UnknownMeal(id.to_string()))
    }

    fn confirm(&mut self, operation: Operation) {
        if let Some(notification) = Notification::completed(operation) {
            self.notifier.notify(notification);
        }
    }

    fn report(&mut self, err: FetchError) -> FetchError {
        self.notifier.notify(Notification::failed(err.operation));
        err
    }
}
