//! Glue between a [`CrudView`] and the component tree.
//!
//! [`use_crud`] keeps the view state in a signal, loads on mount and
//! executes the mutations the state machine hands back. Views only read
//! the state and call the handle's methods from event handlers.

use std::future::Future;

use client::ApiClient;
use dioxus::prelude::*;
use shared_types::{
    AppError, CrudView, FollowUp, ListQuery, LoadState, Modal, Mutation, NoticeKind, Resource,
    SortDirection, SortSpec, Transition, Transitional,
};
use shared_ui::{ColumnSort, ConfirmDelete, NoticeBanner, NoticeTone};

use crate::{use_hospital, HospitalContext};

pub struct CrudHandle<R: Resource + 'static> {
    pub view: Signal<CrudView<R>>,
    ctx: HospitalContext,
    reload: Callback<()>,
}

impl<R: Resource + 'static> Clone for CrudHandle<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Resource + 'static> Copy for CrudHandle<R> {}

impl<R: Resource + 'static> PartialEq for CrudHandle<R> {
    fn eq(&self, other: &Self) -> bool {
        self.view == other.view
    }
}

/// Create the state for one resource list and start loading it.
///
/// `fetch` produces the records; fan-out views join their lookups inside
/// it so the list only turns ready once every request has settled.
pub fn use_crud<R, F, Fut>(fetch: F) -> CrudHandle<R>
where
    R: Resource + 'static,
    F: Fn(ApiClient) -> Fut + Copy + 'static,
    Fut: Future<Output = Result<Vec<R>, AppError>> + 'static,
{
    let ctx = use_hospital();
    let mut view = use_signal(|| CrudView::<R>::with_page_size(ctx.page_size));

    let reload = use_callback(move |()| {
        let ticket = view.write().begin_load();
        let api = ctx.client();
        spawn(async move {
            let result = fetch(api).await;
            if let Err(e) = &result {
                tracing::warn!(resource = R::PATH, error = %e, "load failed");
            }
            if !view.write().finish_load(ticket, result) {
                tracing::debug!(resource = R::PATH, "dropped stale load result");
            }
        });
    });

    use_effect(move || reload.call(()));

    CrudHandle { view, ctx, reload }
}

/// Owned copy of the visible page, taken once per render.
pub struct PageSnapshot<R: Resource> {
    pub rows: Vec<R>,
    pub page: usize,
    pub page_count: usize,
    pub filtered: usize,
    pub total: usize,
    pub state: LoadState,
    pub query: ListQuery<R::Column>,
}

impl<R: Resource> PageSnapshot<R> {
    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Idle | LoadState::Loading)
    }

    pub fn empty_message(&self, noun: &str) -> Option<String> {
        empty_message(&self.state, self.rows.len(), noun)
    }
}

impl<R: Resource + 'static> CrudHandle<R> {
    pub fn reload(&self) {
        self.reload.call(());
    }

    pub fn page(&self) -> PageSnapshot<R> {
        self.page_with(|_| true)
    }

    /// The visible page after an extra discrete filter.
    pub fn page_with(&self, keep: impl Fn(&R) -> bool) -> PageSnapshot<R> {
        let view = self.view.read();
        let page = view.page_with(keep);
        PageSnapshot {
            rows: page.rows.into_iter().cloned().collect(),
            page: page.page,
            page_count: page.page_count,
            filtered: page.filtered,
            total: page.total,
            state: view.state().clone(),
            query: view.query.clone(),
        }
    }

    /// Run `f` over every record passing the search and `keep`, across all
    /// pages.
    pub fn with_matching<T>(&self, keep: impl Fn(&R) -> bool, f: impl FnOnce(&[&R]) -> T) -> T {
        let view = self.view.read();
        f(&view.matching_with(keep))
    }

    pub fn modal(&self) -> Modal<R::Form> {
        self.view.read().modal().clone()
    }

    /// The open create/edit form, if any.
    pub fn form(&self) -> Option<R::Form> {
        self.view.read().form().cloned()
    }

    pub fn is_saving(&self) -> bool {
        self.view.read().is_saving()
    }

    pub fn is_pending(&self, id: i64) -> bool {
        self.view.read().is_pending(id)
    }

    fn update(&self, f: impl FnOnce(&mut CrudView<R>)) {
        let mut view = self.view;
        f(&mut view.write());
    }

    pub fn open_create(&self) {
        self.update(|v| v.open_create());
    }

    pub fn open_create_with(&self, form: R::Form) {
        self.update(|v| v.open_create_with(form));
    }

    pub fn open_edit(&self, id: i64) {
        self.update(|v| {
            v.open_edit(id);
        });
    }

    pub fn open_delete(&self, id: i64) {
        self.update(|v| {
            v.open_delete(id);
        });
    }

    pub fn acknowledge_delete(&self, acknowledged: bool) {
        self.update(|v| v.acknowledge_delete(acknowledged));
    }

    pub fn cancel(&self) {
        self.update(|v| v.cancel());
    }

    pub fn dismiss_notice(&self) {
        self.update(|v| v.dismiss_notice());
    }

    pub fn set_search(&self, term: String) {
        self.update(|v| v.set_search(term));
    }

    pub fn toggle_sort(&self, column: R::Column) {
        self.update(|v| v.query.toggle_sort(column));
    }

    /// Replace the sort order, e.g. to seed a view's initial ordering.
    pub fn sort_by(&self, spec: SortSpec<R::Column>) {
        self.update(|v| v.query.sort = Some(spec));
    }

    pub fn set_page(&self, page: usize) {
        self.update(|v| v.query.set_page(page));
    }

    /// Edit the open create/edit form in place.
    pub fn edit_form(&self, f: impl FnOnce(&mut R::Form)) {
        self.update(|v| {
            if let Some(form) = v.form_mut() {
                f(form);
            }
        });
    }

    /// Validate and save the open form.
    pub fn submit(&self) {
        let mut view = self.view;
        let result = view.write().submit();
        match result {
            Ok(mutation) => self.run(mutation),
            Err(e) => tracing::debug!(resource = R::PATH, error = %e, "form rejected"),
        }
    }

    pub fn confirm_delete(&self) {
        let mut view = self.view;
        let mutation = view.write().confirm_delete();
        if let Some(mutation) = mutation {
            self.run(mutation);
        }
    }

    fn run(&self, mutation: Mutation<R::Form>) {
        let mut view = self.view;
        let reload = self.reload;
        let api = self.ctx.client();
        spawn(async move {
            let result = api.execute::<R>(&mutation).await;
            if let Err(e) = &result {
                tracing::warn!(resource = R::PATH, error = %e, "mutation failed");
            }
            let follow_up = view.write().finish_mutation(&mutation, result);
            if follow_up == FollowUp::Reload {
                reload.call(());
            }
        });
    }
}

impl<R: Transitional + 'static> CrudHandle<R> {
    /// Start a status change on one row; ignored while the row is pending.
    pub fn transition(&self, id: i64, transition: Transition, optimistic: bool) {
        let mut view = self.view;
        let mutation = view.write().begin_transition(id, transition, optimistic);
        if let Some(mutation) = mutation {
            self.run(mutation);
        }
    }
}

/// Header arrow state for `column` under the current query.
pub fn column_sort<C: Copy + PartialEq>(query: &ListQuery<C>, column: C) -> ColumnSort {
    match query.sort {
        Some(spec) if spec.column == column => match spec.direction {
            SortDirection::Ascending => ColumnSort::Ascending,
            SortDirection::Descending => ColumnSort::Descending,
        },
        _ => ColumnSort::Unsorted,
    }
}

/// Message for the empty table body, or `None` while rows exist.
pub fn empty_message(state: &LoadState, rows: usize, noun: &str) -> Option<String> {
    match state {
        LoadState::Error(_) => Some(format!("Could not load {noun}.")),
        _ if rows == 0 => Some(format!("No {noun} found.")),
        _ => None,
    }
}

/// The view's dismissible banner, if any.
pub fn notice_banner<R: Resource + 'static>(crud: CrudHandle<R>) -> Element {
    let notice = crud.view.read().notice().cloned();
    match notice {
        Some(notice) => {
            let tone = match notice.kind {
                NoticeKind::Success => NoticeTone::Success,
                NoticeKind::Error => NoticeTone::Error,
            };
            rsx! {
                NoticeBanner {
                    tone,
                    text: notice.text,
                    on_dismiss: move |_| crud.dismiss_notice(),
                }
            }
        }
        None => rsx! {},
    }
}

/// Confirmation dialog bound to the view's delete prompt.
pub fn delete_dialog<R: Resource + 'static>(crud: CrudHandle<R>, description: String) -> Element {
    let (prompt, saving) = {
        let view = crud.view.read();
        let prompt = match view.modal() {
            Modal::Delete(prompt) => Some(prompt.clone()),
            _ => None,
        };
        (prompt, view.is_saving())
    };
    let Some(prompt) = prompt else {
        return rsx! {};
    };

    rsx! {
        ConfirmDelete {
            open: true,
            title: format!("Delete {}?", R::NOUN.to_lowercase()),
            description,
            gated: prompt.gated,
            acknowledged: prompt.acknowledged,
            deleting: saving,
            on_acknowledge: move |checked: bool| crud.acknowledge_delete(checked),
            on_confirm: move |_| crud.confirm_delete(),
            on_cancel: move |_| crud.cancel(),
        }
    }
}

/// Title of the create/edit sheet.
pub fn sheet_title<F>(modal: &Modal<F>, noun: &str) -> String {
    match modal {
        Modal::Edit { .. } => format!("Edit {}", noun.to_lowercase()),
        _ => format!("New {}", noun.to_lowercase()),
    }
}
