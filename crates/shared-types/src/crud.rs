//! Generic state for the resource list views.
//!
//! A [`CrudView`] owns the fetched collection, the list query, the open
//! modal and the notice banner. It performs no I/O: operations that need
//! the backend hand back a [`Mutation`] for the caller to execute, and the
//! caller reports the outcome with [`CrudView::finish_mutation`].
//!
//! ```text
//! Idle -> Loading -> Ready | Error
//! Ready | Error -> Modal(Create | Edit | Delete) -> Ready | Error
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;

use crate::error::AppError;
use crate::listing::{ListPage, ListQuery, Searchable, Sortable, DEFAULT_PAGE_SIZE};

/// A backend collection managed through a list view.
pub trait Resource: Clone + PartialEq + DeserializeOwned + Searchable + Sortable {
    /// Editable fields, serialized as the create/update request body.
    type Form: Clone + Default + PartialEq + Serialize + std::fmt::Debug + 'static;

    /// Collection path below the API base, e.g. `patients`.
    const PATH: &'static str;
    /// Human noun for notices, e.g. `Patient`.
    const NOUN: &'static str;
    /// Whether deleting needs the acknowledgement checkbox on top of the
    /// confirm button.
    const DELETE_GATED: bool = false;

    fn id(&self) -> i64;

    /// Seed an edit form from the record.
    fn to_form(&self) -> Self::Form;

    /// Client-side checks run before any request is sent. `existing` is the
    /// loaded collection and `editing` the id of the record being edited.
    fn validate(form: &Self::Form, existing: &[Self], editing: Option<i64>)
        -> Result<(), AppError>;
}

/// Status changes applied through dedicated endpoints instead of a full
/// update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Approve,
    Reject,
    Complete,
}

impl Transition {
    /// Path segment appended to `/{resource}/{id}/`.
    pub fn segment(&self) -> &'static str {
        match self {
            Transition::Approve => "approve",
            Transition::Reject => "reject",
            Transition::Complete => "complete",
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            Transition::Approve => "approved",
            Transition::Reject => "rejected",
            Transition::Complete => "completed",
        }
    }
}

/// Resources that support [`Transition`]s.
pub trait Transitional: Resource {
    /// Whether the record is in a state the transition applies to.
    fn can_transition(&self, transition: Transition) -> bool;

    /// Local effect of a confirmed (or optimistically assumed) transition.
    fn apply_transition(&mut self, transition: Transition);
}

/// Records that carry a denormalized copy of a related record, filled in
/// from a lookup collection fetched alongside them.
pub trait LinksTo<L> {
    fn link(&mut self, lookup: &[L]);
}

pub fn link_all<R: LinksTo<L>, L>(records: &mut [R], lookup: &[L]) {
    for record in records.iter_mut() {
        record.link(lookup);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Error(AppError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeletePrompt {
    pub id: i64,
    /// The acknowledgement checkbox must be ticked before confirming.
    pub gated: bool,
    pub acknowledged: bool,
}

impl DeletePrompt {
    pub fn can_confirm(&self) -> bool {
        !self.gated || self.acknowledged
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modal<F> {
    Closed,
    Create(F),
    Edit { id: i64, form: F },
    Delete(DeletePrompt),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Dismissible banner shown above the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// A backend call requested by the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<F> {
    Create(F),
    Update { id: i64, form: F },
    Delete { id: i64 },
    Transition { id: i64, transition: Transition },
}

/// What the caller should do after reporting a mutation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    Nothing,
    Reload,
}

/// Identifies one `begin_load`; results carrying an older ticket are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct CrudView<R: Resource> {
    records: Vec<R>,
    state: LoadState,
    generation: u64,
    modal: Modal<R::Form>,
    notice: Option<Notice>,
    saving: bool,
    pending: HashSet<i64>,
    pub query: ListQuery<R::Column>,
}

impl<R: Resource> Default for CrudView<R> {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl<R: Resource> CrudView<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            state: LoadState::Idle,
            generation: 0,
            modal: Modal::Closed,
            notice: None,
            saving: false,
            pending: HashSet::new(),
            query: ListQuery::with_page_size(page_size),
        }
    }

    // ── Loading ──

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        LoadTicket(self.generation)
    }

    /// Store a fetch result. Returns `false` when the ticket is stale and
    /// the result was dropped.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<R>, AppError>) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        match result {
            Ok(records) => {
                self.records = records;
                self.state = LoadState::Ready;
            }
            Err(err) => {
                self.records.clear();
                self.notice = Some(Notice::error(err.friendly_message()));
                self.state = LoadState::Error(err);
            }
        }
        true
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Idle | LoadState::Loading)
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn find(&self, id: i64) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    // ── Listing ──

    pub fn page(&self) -> ListPage<'_, R> {
        self.query.apply(&self.records)
    }

    pub fn page_with(&self, keep: impl Fn(&R) -> bool) -> ListPage<'_, R> {
        self.query.apply_with(&self.records, keep)
    }

    /// All records passing the search and `keep`, across every page.
    pub fn matching_with(&self, keep: impl Fn(&R) -> bool) -> Vec<&R> {
        self.query.matching_with(&self.records, keep)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.set_term(term);
    }

    // ── Modals ──

    pub fn modal(&self) -> &Modal<R::Form> {
        &self.modal
    }

    /// Available in every load state, including `Error`.
    pub fn open_create(&mut self) {
        self.modal = Modal::Create(R::Form::default());
    }

    /// Open a create form with some fields already chosen.
    pub fn open_create_with(&mut self, form: R::Form) {
        self.modal = Modal::Create(form);
    }

    pub fn open_edit(&mut self, id: i64) -> bool {
        match self.find(id) {
            Some(record) => {
                self.modal = Modal::Edit {
                    id,
                    form: record.to_form(),
                };
                true
            }
            None => false,
        }
    }

    pub fn open_delete(&mut self, id: i64) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.modal = Modal::Delete(DeletePrompt {
            id,
            gated: R::DELETE_GATED,
            acknowledged: false,
        });
        true
    }

    pub fn acknowledge_delete(&mut self, acknowledged: bool) {
        if let Modal::Delete(prompt) = &mut self.modal {
            prompt.acknowledged = acknowledged;
        }
    }

    /// The form of an open create or edit modal.
    pub fn form(&self) -> Option<&R::Form> {
        match &self.modal {
            Modal::Create(form) | Modal::Edit { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut R::Form> {
        match &mut self.modal {
            Modal::Create(form) | Modal::Edit { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        if !self.saving {
            self.modal = Modal::Closed;
        }
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    // ── Mutations ──

    /// Validate the open form and turn it into a create or update call.
    ///
    /// A validation failure is also shown as an error notice; the modal
    /// stays open so the user can correct the form.
    pub fn submit(&mut self) -> Result<Mutation<R::Form>, AppError> {
        if self.saving {
            return Err(AppError::conflict("A save is already in progress"));
        }
        let (form, editing) = match &self.modal {
            Modal::Create(form) => (form.clone(), None),
            Modal::Edit { id, form } => (form.clone(), Some(*id)),
            _ => return Err(AppError::bad_request("No form is open")),
        };
        if let Err(err) = R::validate(&form, &self.records, editing) {
            self.notice = Some(Notice::error(err.friendly_message()));
            return Err(err);
        }
        self.saving = true;
        Ok(match editing {
            Some(id) => Mutation::Update { id, form },
            None => Mutation::Create(form),
        })
    }

    /// The delete call, only once the confirmation (and the checkbox, when
    /// gated) has happened.
    pub fn confirm_delete(&mut self) -> Option<Mutation<R::Form>> {
        if self.saving {
            return None;
        }
        match &self.modal {
            Modal::Delete(prompt) if prompt.can_confirm() => {
                self.saving = true;
                Some(Mutation::Delete { id: prompt.id })
            }
            _ => None,
        }
    }

    /// Record the outcome of a mutation returned by this view.
    pub fn finish_mutation(
        &mut self,
        mutation: &Mutation<R::Form>,
        result: Result<(), AppError>,
    ) -> FollowUp {
        match mutation {
            Mutation::Transition { id, transition } => {
                self.pending.remove(id);
                return match result {
                    Ok(()) => {
                        self.notice = Some(Notice::success(format!(
                            "{} {}",
                            R::NOUN,
                            transition.past_tense()
                        )));
                        FollowUp::Reload
                    }
                    Err(err) => {
                        self.notice = Some(Notice::error(err.friendly_message()));
                        FollowUp::Reload
                    }
                };
            }
            _ => self.saving = false,
        }

        match (mutation, result) {
            (Mutation::Create(_), Ok(())) => {
                self.modal = Modal::Closed;
                self.notice = Some(Notice::success(format!("{} created", R::NOUN)));
                FollowUp::Reload
            }
            (Mutation::Update { .. }, Ok(())) => {
                self.modal = Modal::Closed;
                self.notice = Some(Notice::success(format!("{} updated", R::NOUN)));
                FollowUp::Reload
            }
            (Mutation::Delete { id }, Ok(())) => {
                self.records.retain(|r| r.id() != *id);
                self.modal = Modal::Closed;
                self.notice = Some(Notice::success(format!("{} deleted", R::NOUN)));
                FollowUp::Nothing
            }
            (Mutation::Delete { .. }, Err(err)) => {
                self.modal = Modal::Closed;
                self.notice = Some(Notice::error(err.friendly_message()));
                FollowUp::Nothing
            }
            (_, Err(err)) => {
                self.notice = Some(Notice::error(err.friendly_message()));
                FollowUp::Nothing
            }
            (Mutation::Transition { .. }, Ok(())) => FollowUp::Nothing,
        }
    }

    // ── Notices ──

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn is_pending(&self, id: i64) -> bool {
        self.pending.contains(&id)
    }
}

impl<R: Transitional> CrudView<R> {
    /// Start a status transition on one row.
    ///
    /// With `optimistic`, the local record changes right away; whatever the
    /// outcome, [`CrudView::finish_mutation`] asks for a reload so the
    /// authoritative state replaces the local guess.
    pub fn begin_transition(
        &mut self,
        id: i64,
        transition: Transition,
        optimistic: bool,
    ) -> Option<Mutation<R::Form>> {
        if self.pending.contains(&id) {
            return None;
        }
        let record = self.records.iter_mut().find(|r| r.id() == id)?;
        if !record.can_transition(transition) {
            return None;
        }
        if optimistic {
            record.apply_transition(transition);
        }
        self.pending.insert(id);
        Some(Mutation::Transition { id, transition })
    }
}
