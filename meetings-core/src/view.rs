//! Client-side view state for the meeting page.
//!
//! `MeetingManager` mirrors the backend collection, keeps the type-filtered
//! projection of it and owns the form draft. Every mutation goes to the
//! store first; local state only changes once the store has answered.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::draft::{Draft, DraftField};
use crate::error::{MeetingError, MeetingResult};
use crate::filter::TypeFilter;
use crate::meeting::{Meeting, MeetingId};
use crate::store::MeetingStore;

/// The operation a `Notice` is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Create,
    Update,
    Delete,
    Edit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Load => write!(f, "load meetings"),
            Action::Create => write!(f, "create meeting"),
            Action::Update => write!(f, "update meeting"),
            Action::Delete => write!(f, "delete meeting"),
            Action::Edit => write!(f, "edit meeting"),
        }
    }
}

/// A failure waiting to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub action: Action,
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not {}: {}", self.action, self.message)
    }
}

/// Which request a successful `submit_draft` issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Created(MeetingId),
    Updated(MeetingId),
}

impl Submitted {
    pub fn id(&self) -> &MeetingId {
        match self {
            Submitted::Created(id) | Submitted::Updated(id) => id,
        }
    }
}

pub struct MeetingManager<S> {
    store: S,
    collection: Vec<Meeting>,
    filtered: Vec<Meeting>,
    draft: Draft,
    filter: TypeFilter,
    notice: Option<Notice>,
    last_synced: Option<DateTime<Utc>>,
}

impl<S: MeetingStore> MeetingManager<S> {
    pub fn new(store: S) -> Self {
        MeetingManager {
            store,
            collection: Vec::new(),
            filtered: Vec::new(),
            draft: Draft::default(),
            filter: TypeFilter::All,
            notice: None,
            last_synced: None,
        }
    }

    /// Everything the backend returned on the last successful load.
    pub fn collection(&self) -> &[Meeting] {
        &self.collection
    }

    /// `collection` restricted by the active filter.
    pub fn filtered(&self) -> &[Meeting] {
        &self.filtered
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn filter(&self) -> TypeFilter {
        self.filter
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_editing()
    }

    /// When the collection was last replaced from the backend.
    pub fn last_synced(&self) -> Option<DateTime<Utc>> {
        self.last_synced
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Remove and return the pending notice.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn find(&self, id: &MeetingId) -> Option<&Meeting> {
        self.collection.iter().find(|m| &m.id == id)
    }

    /// First load of the collection. Until it succeeds both views stay empty.
    pub async fn initialize_load(&mut self) -> MeetingResult<()> {
        self.refresh().await
    }

    /// Replace the collection with the backend's current list.
    ///
    /// On failure the previous collection is kept as is. Rows the store
    /// could not decode are left out and reported in a Load notice.
    pub async fn refresh(&mut self) -> MeetingResult<()> {
        let listing = match self.store.list().await {
            Ok(listing) => listing,
            Err(err) => return self.fail(Action::Load, err),
        };

        if !listing.skipped.is_empty() {
            warn!(skipped = listing.skipped.len(), "some meetings could not be read");
            self.notice = Some(Notice {
                action: Action::Load,
                message: format!(
                    "skipped {} unreadable {} ({})",
                    listing.skipped.len(),
                    if listing.skipped.len() == 1 { "entry" } else { "entries" },
                    listing.skipped.join("; ")
                ),
            });
        }

        self.replace_collection(listing.meetings);
        Ok(())
    }

    pub fn update_draft_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Create or update from the draft, then reload.
    ///
    /// The draft is only reset once the store accepted the request. A
    /// failing reload after that is reported as a notice but does not undo
    /// the submit.
    pub async fn submit_draft(&mut self) -> MeetingResult<Submitted> {
        let action = if self.draft.is_editing() {
            Action::Update
        } else {
            Action::Create
        };

        let fields = match self.draft.to_fields() {
            Ok(fields) => fields,
            Err(err) => return self.fail(action, err),
        };

        let result = match self.draft.editing_id.clone() {
            Some(id) => self
                .store
                .update(&id, &fields)
                .await
                .map(|()| Submitted::Updated(id)),
            None => self.store.create(&fields).await.map(Submitted::Created),
        };

        let submitted = match result {
            Ok(submitted) => submitted,
            Err(err) => return self.fail(action, err),
        };

        info!(id = %submitted.id(), ?action, "meeting saved");
        self.draft = Draft::default();

        if self.refresh().await.is_err() {
            debug!("reload after submit failed; keeping previous collection");
        }

        Ok(submitted)
    }

    /// Bind the draft to `meeting`. The meeting stays in both views.
    pub fn begin_edit(&mut self, meeting: &Meeting) {
        debug!(id = %meeting.id, "editing meeting");
        self.draft = Draft::from_meeting(meeting);
    }

    pub fn begin_edit_by_id(&mut self, id: &MeetingId) -> MeetingResult<()> {
        match self.find(id).cloned() {
            Some(meeting) => {
                self.begin_edit(&meeting);
                Ok(())
            }
            None => self.fail(Action::Edit, MeetingError::NotFound(id.to_string())),
        }
    }

    /// Drop the draft, including any edit binding.
    pub fn cancel_edit(&mut self) {
        self.draft = Draft::default();
    }

    /// Delete on the backend, then drop the meeting from both views.
    pub async fn delete_meeting(&mut self, id: &MeetingId) -> MeetingResult<()> {
        if let Err(err) = self.store.delete(id).await {
            return self.fail(Action::Delete, err);
        }

        info!(%id, "meeting deleted");
        self.collection.retain(|m| &m.id != id);
        self.filtered.retain(|m| &m.id != id);

        if self.draft.editing_id.as_ref() == Some(id) {
            self.draft = Draft::default();
        }

        Ok(())
    }

    /// Recompute the filtered view from the full collection.
    pub fn apply_filter(&mut self, selection: TypeFilter) {
        self.filter = selection;
        self.filtered = selection.apply(&self.collection);
    }

    fn replace_collection(&mut self, meetings: Vec<Meeting>) {
        self.collection = meetings;
        self.filtered = self.filter.apply(&self.collection);
        self.last_synced = Some(Utc::now());
    }

    fn fail<T>(&mut self, action: Action, err: MeetingError) -> MeetingResult<T> {
        warn!(%action, error = %err, "meeting request failed");
        self.notice = Some(Notice {
            action,
            message: err.to_string(),
        });
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::{MeetingFields, MeetingType};
    use crate::store::Listing;
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Create(MeetingFields),
        Update(MeetingId, MeetingFields),
        Delete(MeetingId),
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Op {
        List,
        Create,
        Update,
        Delete,
    }

    #[derive(Default)]
    struct FakeState {
        meetings: Vec<Meeting>,
        next_id: u64,
        calls: Vec<Call>,
        failing: Vec<Op>,
        skipped: Vec<String>,
    }

    impl FakeState {
        fn record(&mut self, call: Call, op: Op) -> MeetingResult<()> {
            self.calls.push(call);
            if self.failing.contains(&op) {
                return Err(unreachable());
            }
            Ok(())
        }
    }

    /// In-memory backend that records every request.
    #[derive(Clone, Default)]
    struct FakeStore(Arc<Mutex<FakeState>>);

    impl FakeStore {
        fn with(meetings: Vec<Meeting>) -> Self {
            let next_id = meetings.len() as u64;
            FakeStore(Arc::new(Mutex::new(FakeState {
                meetings,
                next_id,
                ..FakeState::default()
            })))
        }

        fn calls(&self) -> Vec<Call> {
            self.0.lock().unwrap().calls.clone()
        }

        fn fail_on(&self, ops: &[Op]) {
            self.0.lock().unwrap().failing = ops.to_vec();
        }

        fn fail_all(&self) {
            self.fail_on(&[Op::List, Op::Create, Op::Update, Op::Delete]);
        }
    }

    fn unreachable() -> MeetingError {
        MeetingError::Transport("connection refused".to_string())
    }

    #[async_trait]
    impl MeetingStore for FakeStore {
        async fn list(&self) -> MeetingResult<Listing> {
            let mut state = self.0.lock().unwrap();
            state.record(Call::List, Op::List)?;
            Ok(Listing {
                meetings: state.meetings.clone(),
                skipped: state.skipped.clone(),
            })
        }

        async fn create(&self, fields: &MeetingFields) -> MeetingResult<MeetingId> {
            let mut state = self.0.lock().unwrap();
            state.record(Call::Create(fields.clone()), Op::Create)?;
            state.next_id += 1;
            let id = MeetingId::from(state.next_id);
            state.meetings.push(Meeting::from_fields(id.clone(), fields.clone()));
            Ok(id)
        }

        async fn update(&self, id: &MeetingId, fields: &MeetingFields) -> MeetingResult<()> {
            let mut state = self.0.lock().unwrap();
            state.record(Call::Update(id.clone(), fields.clone()), Op::Update)?;
            if let Some(existing) = state.meetings.iter_mut().find(|m| &m.id == id) {
                *existing = Meeting::from_fields(id.clone(), fields.clone());
            }
            Ok(())
        }

        async fn delete(&self, id: &MeetingId) -> MeetingResult<()> {
            let mut state = self.0.lock().unwrap();
            state.record(Call::Delete(id.clone()), Op::Delete)?;
            state.meetings.retain(|m| &m.id != id);
            Ok(())
        }
    }

    fn meeting(id: u64, title: &str, kind: MeetingType) -> Meeting {
        Meeting {
            id: MeetingId::from(id),
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            description: String::new(),
            kind,
        }
    }

    fn seeded() -> FakeStore {
        FakeStore::with(vec![
            meeting(1, "Standup", MeetingType::Business),
            meeting(2, "Football", MeetingType::Sport),
            meeting(3, "Planning", MeetingType::Business),
        ])
    }

    fn fill_draft<S: MeetingStore>(view: &mut MeetingManager<S>, title: &str, kind: &str) {
        view.update_draft_field(DraftField::Title, title);
        view.update_draft_field(DraftField::Date, "2024-01-10");
        view.update_draft_field(DraftField::Time, "09:00");
        view.update_draft_field(DraftField::Type, kind);
    }

    fn titles(meetings: &[Meeting]) -> Vec<&str> {
        meetings.iter().map(|m| m.title.as_str()).collect()
    }

    #[tokio::test]
    async fn initial_load_fills_both_views() {
        let mut view = MeetingManager::new(seeded());
        assert!(view.last_synced().is_none());

        view.initialize_load().await.unwrap();

        assert_eq!(view.collection().len(), 3);
        assert_eq!(view.filtered(), view.collection());
        assert_eq!(view.filter(), TypeFilter::All);
        assert!(view.last_synced().is_some());
    }

    #[tokio::test]
    async fn failed_initial_load_leaves_views_empty() {
        let store = seeded();
        store.fail_all();
        let mut view = MeetingManager::new(store);

        assert!(view.initialize_load().await.is_err());

        assert!(view.collection().is_empty());
        assert!(view.filtered().is_empty());
        assert!(view.last_synced().is_none());
        let notice = view.take_notice().unwrap();
        assert_eq!(notice.action, Action::Load);
        assert!(view.notice().is_none());
    }

    #[tokio::test]
    async fn filter_recomputes_from_collection() {
        let mut view = MeetingManager::new(seeded());
        view.initialize_load().await.unwrap();

        view.apply_filter(TypeFilter::Only(MeetingType::Sport));
        assert_eq!(titles(view.filtered()), vec!["Football"]);

        view.apply_filter(TypeFilter::Only(MeetingType::Business));
        assert_eq!(titles(view.filtered()), vec!["Standup", "Planning"]);

        view.apply_filter(TypeFilter::Only(MeetingType::Business));
        assert_eq!(titles(view.filtered()), vec!["Standup", "Planning"]);

        view.apply_filter(TypeFilter::All);
        assert_eq!(view.filtered(), view.collection());
        assert_eq!(view.collection().len(), 3);
    }

    #[tokio::test]
    async fn submit_without_edit_creates_and_reloads() {
        let store = seeded();
        let mut view = MeetingManager::new(store.clone());
        view.initialize_load().await.unwrap();
        let prior: Vec<MeetingId> = view.collection().iter().map(|m| m.id.clone()).collect();

        fill_draft(&mut view, "Workshop prep", "Workshop");
        let submitted = view.submit_draft().await.unwrap();

        let Submitted::Created(id) = submitted.clone() else {
            panic!("expected a create, got {submitted:?}");
        };
        assert!(!prior.contains(&id));
        assert!(view.find(&id).is_some());
        assert_eq!(view.collection().len(), 4);
        assert!(view.draft().is_empty());

        let calls = store.calls();
        assert!(matches!(calls[1], Call::Create(_)));
        assert_eq!(calls[2], Call::List);
    }

    #[tokio::test]
    async fn begin_edit_then_submit_updates() {
        let store = seeded();
        let mut view = MeetingManager::new(store.clone());
        view.initialize_load().await.unwrap();

        let target = view.collection()[1].clone();
        view.begin_edit(&target);
        assert!(view.is_editing());
        assert_eq!(view.draft().title, "Football");
        assert_eq!(view.draft().kind, "Sport");
        assert!(view.filtered().iter().any(|m| m.id == target.id));

        view.update_draft_field(DraftField::Title, "Five-a-side");
        let submitted = view.submit_draft().await.unwrap();

        assert_eq!(submitted, Submitted::Updated(target.id.clone()));
        assert!(view.draft().is_empty());
        assert!(!view.is_editing());
        assert_eq!(view.find(&target.id).unwrap().title, "Five-a-side");
        assert_eq!(view.collection().len(), 3);

        let calls = store.calls();
        assert!(matches!(&calls[1], Call::Update(id, fields) if *id == target.id && fields.title == "Five-a-side"));
        assert!(!calls.iter().any(|c| matches!(c, Call::Create(_))));
    }

    #[tokio::test]
    async fn invalid_draft_issues_no_request() {
        let store = seeded();
        let mut view = MeetingManager::new(store.clone());
        view.update_draft_field(DraftField::Title, "No date");

        let err = view.submit_draft().await.unwrap_err();

        assert!(matches!(err, MeetingError::InvalidDraft(_)));
        assert!(store.calls().is_empty());
        assert_eq!(view.draft().title, "No date");
        assert_eq!(view.take_notice().unwrap().action, Action::Create);
    }

    #[tokio::test]
    async fn failed_submit_keeps_draft_and_edit_binding() {
        let store = seeded();
        let mut view = MeetingManager::new(store.clone());
        view.initialize_load().await.unwrap();
        let target = view.collection()[0].clone();
        view.begin_edit(&target);
        view.update_draft_field(DraftField::Description, "moved to the big room");

        store.fail_all();
        assert!(view.submit_draft().await.is_err());

        assert_eq!(view.draft().editing_id, Some(target.id.clone()));
        assert_eq!(view.draft().description, "moved to the big room");
        assert_eq!(view.collection().len(), 3);
        assert_eq!(view.take_notice().unwrap().action, Action::Update);
    }

    #[tokio::test]
    async fn submit_succeeds_when_reload_fails() {
        let store = seeded();
        let mut view = MeetingManager::new(store.clone());
        view.initialize_load().await.unwrap();
        let before = view.collection().to_vec();

        store.fail_on(&[Op::List]);
        fill_draft(&mut view, "Retro", "Business");
        let submitted = view.submit_draft().await.unwrap();

        assert_eq!(submitted, Submitted::Created(MeetingId::from(4)));
        assert!(view.draft().is_empty());
        assert_eq!(view.collection(), before.as_slice());
        assert_eq!(view.take_notice().unwrap().action, Action::Load);
        assert_eq!(store.calls().last(), Some(&Call::List));
    }

    #[tokio::test]
    async fn unreadable_rows_are_reported_but_the_rest_load() {
        let store = seeded();
        store.0.lock().unwrap().skipped = vec!["meeting 9: unknown variant `General`".to_string()];
        let mut view = MeetingManager::new(store);

        view.initialize_load().await.unwrap();

        assert_eq!(view.collection().len(), 3);
        assert_eq!(view.filtered().len(), 3);
        let notice = view.take_notice().unwrap();
        assert_eq!(notice.action, Action::Load);
        assert!(notice.message.starts_with("skipped 1 unreadable entry"), "{notice}");
        assert!(notice.message.contains("General"), "{notice}");
    }

    #[tokio::test]
    async fn delete_removes_from_both_views() {
        let mut view = MeetingManager::new(seeded());
        view.initialize_load().await.unwrap();
        view.apply_filter(TypeFilter::Only(MeetingType::Business));

        view.delete_meeting(&MeetingId::from(3)).await.unwrap();

        assert_eq!(titles(view.collection()), vec!["Standup", "Football"]);
        assert_eq!(titles(view.filtered()), vec!["Standup"]);
    }

    #[tokio::test]
    async fn delete_of_filtered_out_meeting_leaves_filtered_alone() {
        let mut view = MeetingManager::new(seeded());
        view.initialize_load().await.unwrap();
        view.apply_filter(TypeFilter::Only(MeetingType::Business));
        let before = view.filtered().to_vec();

        view.delete_meeting(&MeetingId::from(2)).await.unwrap();

        assert_eq!(view.filtered(), before.as_slice());
        assert_eq!(view.collection().len(), 2);
    }

    #[tokio::test]
    async fn failed_delete_keeps_entry() {
        let store = seeded();
        let mut view = MeetingManager::new(store.clone());
        view.initialize_load().await.unwrap();

        store.fail_all();
        assert!(view.delete_meeting(&MeetingId::from(1)).await.is_err());

        assert_eq!(view.collection().len(), 3);
        assert_eq!(view.filtered().len(), 3);
        assert_eq!(view.take_notice().unwrap().action, Action::Delete);
    }

    #[tokio::test]
    async fn deleting_edited_meeting_resets_draft() {
        let mut view = MeetingManager::new(seeded());
        view.initialize_load().await.unwrap();
        view.begin_edit_by_id(&MeetingId::from(1)).unwrap();

        view.delete_meeting(&MeetingId::from(1)).await.unwrap();

        assert!(!view.is_editing());
        assert!(view.draft().is_empty());
    }

    #[tokio::test]
    async fn reload_keeps_active_filter() {
        let mut view = MeetingManager::new(seeded());
        view.initialize_load().await.unwrap();
        view.apply_filter(TypeFilter::Only(MeetingType::Sport));

        fill_draft(&mut view, "Tennis", "Sport");
        view.submit_draft().await.unwrap();
        fill_draft(&mut view, "Board meeting", "Business");
        view.submit_draft().await.unwrap();

        assert_eq!(titles(view.filtered()), vec!["Football", "Tennis"]);
        assert_eq!(view.collection().len(), 5);
    }

    #[tokio::test]
    async fn begin_edit_by_unknown_id_reports_not_found() {
        let mut view = MeetingManager::new(seeded());
        view.initialize_load().await.unwrap();

        let err = view.begin_edit_by_id(&MeetingId::from(99)).unwrap_err();

        assert!(matches!(err, MeetingError::NotFound(_)));
        assert!(!view.is_editing());
        assert_eq!(view.take_notice().unwrap().action, Action::Edit);
    }

    #[tokio::test]
    async fn standup_scenario() {
        let store = FakeStore::default();
        let mut view = MeetingManager::new(store.clone());

        view.initialize_load().await.unwrap();
        assert!(view.filtered().is_empty());

        fill_draft(&mut view, "Standup", "Business");
        let created = view.submit_draft().await.unwrap();
        assert_eq!(created, Submitted::Created(MeetingId::from(1)));
        assert_eq!(view.filtered().len(), 1);
        assert_eq!(
            view.filtered()[0].to_string(),
            "Standup — 2024-01-10 at 09:00 — Business"
        );

        view.apply_filter("Academic".parse().unwrap());
        assert!(view.filtered().is_empty());
        view.apply_filter("All".parse().unwrap());
        assert_eq!(view.filtered().len(), 1);

        let standup = view.filtered()[0].clone();
        view.begin_edit(&standup);
        view.update_draft_field(DraftField::Type, "Academic");
        let updated = view.submit_draft().await.unwrap();
        assert_eq!(updated, Submitted::Updated(MeetingId::from(1)));
        assert_eq!(view.filtered()[0].kind, MeetingType::Academic);

        view.delete_meeting(&MeetingId::from(1)).await.unwrap();
        assert!(view.collection().is_empty());
        assert!(view.filtered().is_empty());

        let calls = store.calls();
        assert_eq!(calls.last(), Some(&Call::Delete(MeetingId::from(1))));
    }
}
