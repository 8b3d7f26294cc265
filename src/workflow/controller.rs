use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tokio::task::JoinHandle;
use uuid::Uuid;

use super::{AnalysisResult, Direction, HostShell, Phase, SelectedFile};
use crate::{
    client::{ClientError, PracticeApi},
    config::ACKNOWLEDGE_DELAY,
    curriculum::{Track, WorksheetStep, completed_worksheets},
    models::{
        profile::Profile,
        submission::{PracticeData, Submission},
    },
    utils::upload::{UploadRejection, validate_image},
};

const DELETE_PROMPT: &str = "Delete this submission? This can't be undone.";

/// Everything the practice page renders.
#[derive(Debug, Clone, Default)]
pub struct PracticeState {
    pub current_step: usize,
    pub selected_file: Option<SelectedFile>,
    pub is_uploading: bool,
    pub upload_success: bool,
    pub analysis: Option<AnalysisResult>,
    pub show_grading: bool,
    pub profile: Option<Profile>,
    pub submissions: Vec<Submission>,
    /// Worksheets of this track with at least one submission.
    pub completed: BTreeSet<String>,
    /// Submission whose deletion is in flight.
    pub deleting_id: Option<Uuid>,
    /// Last user-facing error, cleared by the next attempt.
    pub error: Option<String>,
    /// Bumped whenever the step changes or the controller is torn down;
    /// delayed work compares it before touching state.
    epoch: u64,
    torn_down: bool,
}

impl PracticeState {
    pub fn phase(&self) -> Phase {
        if self.is_uploading {
            Phase::Uploading
        } else if self.show_grading {
            Phase::GradingDisplayed
        } else if self.upload_success {
            Phase::Acknowledged
        } else if self.selected_file.is_some() {
            Phase::FileSelected
        } else {
            Phase::Idle
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Grade received and displayed.
    Graded,
    /// The request failed; the message is in [`PracticeState::error`].
    Failed,
    NoFileSelected,
    /// Another upload is still in flight.
    AlreadyUploading,
    /// The controller was torn down before the response arrived.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The request failed; the message is in [`PracticeState::error`].
    Failed,
    /// The user declined the confirmation.
    Cancelled,
    /// Another deletion is still in flight.
    Busy,
}

struct Shared {
    track: Track,
    api: Arc<dyn PracticeApi>,
    shell: Arc<dyn HostShell>,
    state: Mutex<PracticeState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, PracticeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn steps(&self) -> &'static [WorksheetStep] {
        self.track.steps()
    }
}

/// Practice workflow for one track.
///
/// Cheap to clone; clones share state. The state lock is never held across
/// an `.await`, so an upload and a deletion can be in flight together. Must
/// be used from within a tokio runtime.
#[derive(Clone)]
pub struct PracticeController {
    shared: Arc<Shared>,
}

impl PracticeController {
    pub fn new(
        track: Track,
        api: Arc<dyn PracticeApi>,
        shell: Arc<dyn HostShell>,
        data: PracticeData,
    ) -> Self {
        let controller = Self {
            shared: Arc::new(Shared {
                track,
                api,
                shell,
                state: Mutex::new(PracticeState::default()),
            }),
        };
        controller.sync(data);
        controller
    }

    pub fn track(&self) -> Track {
        self.shared.track
    }

    pub fn steps(&self) -> &'static [WorksheetStep] {
        self.shared.steps()
    }

    pub fn current_step(&self) -> &'static WorksheetStep {
        let index = self.shared.lock().current_step;
        &self.steps()[index]
    }

    pub fn snapshot(&self) -> PracticeState {
        self.shared.lock().clone()
    }

    /// Replaces profile and submissions with freshly fetched server data and
    /// recomputes the completed set.
    pub fn sync(&self, data: PracticeData) {
        let mut state = self.shared.lock();
        if state.torn_down {
            return;
        }
        state.completed = completed_worksheets(self.shared.track, &data.submissions);
        state.profile = data.profile;
        state.submissions = data.submissions;
    }

    /// Fetches practice data through the API and syncs it.
    pub async fn reload(&self) -> Result<(), ClientError> {
        let data = self.shared.api.load_practice(self.shared.track).await?;
        self.sync(data);
        Ok(())
    }

    /// Validates and selects a worksheet photo. A rejected file leaves
    /// nothing selected and the reason in [`PracticeState::error`].
    pub fn select_file(&self, file: SelectedFile) -> Result<(), UploadRejection> {
        let mut state = self.shared.lock();

        if let Err(rejection) = validate_image(&file.content_type, file.size()) {
            tracing::debug!("Rejected {}: {}", file.name, rejection);
            state.selected_file = None;
            state.error = Some(rejection.to_string());
            return Err(rejection);
        }

        state.selected_file = Some(file);
        state.error = None;
        state.upload_success = false;
        state.analysis = None;
        Ok(())
    }

    pub fn remove_file(&self) {
        self.shared.lock().selected_file = None;
    }

    pub fn dismiss_error(&self) {
        self.shared.lock().error = None;
    }

    /// Sends the selected photo for grading against the current step.
    pub async fn upload(&self) -> UploadOutcome {
        let (file, worksheet_id) = {
            let mut state = self.shared.lock();
            if state.is_uploading {
                return UploadOutcome::AlreadyUploading;
            }
            let Some(file) = state.selected_file.clone() else {
                return UploadOutcome::NoFileSelected;
            };
            state.is_uploading = true;
            state.error = None;
            (file, self.steps()[state.current_step].id.clone())
        };

        let result = self.shared.api.grade(&file, &worksheet_id).await;

        let mut state = self.shared.lock();
        state.is_uploading = false;
        if state.torn_down {
            return UploadOutcome::Discarded;
        }

        match result {
            Ok(grade) => {
                tracing::debug!("Graded {}: {:.1}", worksheet_id, grade.score);
                state.analysis = Some(AnalysisResult {
                    worksheet_id,
                    grade,
                    preview_url: file.preview_url(),
                });
                state.show_grading = true;
                UploadOutcome::Graded
            }
            Err(e) => {
                tracing::warn!("Grading {} failed: {}", worksheet_id, e);
                state.error = Some(e.to_string());
                UploadOutcome::Failed
            }
        }
    }

    /// Confirms the displayed grade.
    ///
    /// Asks the host to refresh, marks the worksheet complete and schedules
    /// the auto-advance. Returns the handle of that delayed task, or `None`
    /// when no grade was on display.
    pub fn acknowledge_grading(&self) -> Option<JoinHandle<()>> {
        {
            let state = self.shared.lock();
            if !state.show_grading || state.torn_down {
                return None;
            }
        }

        self.shared.shell.request_refresh();

        let epoch = {
            let mut state = self.shared.lock();
            let worksheet_id = match state.analysis.take() {
                Some(analysis) => analysis.worksheet_id,
                None => self.steps()[state.current_step].id.clone(),
            };
            state.show_grading = false;
            state.upload_success = true;
            state.completed.insert(worksheet_id);
            state.epoch
        };

        let shared = Arc::downgrade(&self.shared);
        Some(tokio::spawn(async move {
            tokio::time::sleep(ACKNOWLEDGE_DELAY).await;

            let Some(shared) = shared.upgrade() else {
                return;
            };
            let last = shared.steps().len() - 1;
            let mut state = shared.lock();
            if state.torn_down || state.epoch != epoch {
                tracing::debug!("Skipping stale auto-advance");
                return;
            }

            state.upload_success = false;
            state.selected_file = None;
            if state.current_step < last {
                state.current_step += 1;
                state.epoch += 1;
            }
        }))
    }

    /// Deletes a past submission after the user confirms.
    ///
    /// Only one deletion runs at a time; calls made meanwhile return
    /// [`DeleteOutcome::Busy`] without sending anything.
    pub async fn delete_submission(&self, submission_id: Uuid, image_path: &str) -> DeleteOutcome {
        if self.shared.lock().deleting_id.is_some() {
            return DeleteOutcome::Busy;
        }
        if !self.shared.shell.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Cancelled;
        }
        {
            let mut state = self.shared.lock();
            if state.deleting_id.is_some() {
                return DeleteOutcome::Busy;
            }
            state.deleting_id = Some(submission_id);
            state.error = None;
        }

        let result = self.shared.api.delete_submission(submission_id, image_path).await;

        let mut state = self.shared.lock();
        state.deleting_id = None;

        match result {
            Ok(()) => {
                if !state.torn_down {
                    state.submissions.retain(|s| s.id != submission_id);
                    state.completed = completed_worksheets(self.shared.track, &state.submissions);
                }
                DeleteOutcome::Deleted
            }
            Err(e) => {
                tracing::warn!("Deleting submission {} failed: {}", submission_id, e);
                if !state.torn_down {
                    state.error = Some(e.to_string());
                }
                DeleteOutcome::Failed
            }
        }
    }

    /// Moves one step back or forward. Returns the resulting index.
    pub fn navigate(&self, direction: Direction) -> usize {
        let current = self.shared.lock().current_step as isize;
        match direction {
            Direction::Previous => self.go_to(current - 1),
            Direction::Next => self.go_to(current + 1),
        }
    }

    /// Jumps to `index`, clamped to the track. Returns the resulting index.
    pub fn go_to(&self, index: isize) -> usize {
        let last = self.steps().len() - 1;
        let target = index.clamp(0, last as isize) as usize;

        let mut state = self.shared.lock();
        if state.current_step != target {
            state.current_step = target;
            state.epoch += 1;
        }
        target
    }

    /// Detaches the controller from its view. Pending timers and late
    /// responses no longer change state.
    pub fn teardown(&self) {
        let mut state = self.shared.lock();
        state.torn_down = true;
        state.epoch += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicBool, AtomicUsize, Ordering},
        time::Duration,
    };

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::{config::MAX_UPLOAD_BYTES, models::submission::GradeResponse};

    #[derive(Default)]
    struct FakeApi {
        grade_calls: AtomicUsize,
        delete_calls: AtomicUsize,
        grade_error: Option<(u16, String)>,
        delete_error: Option<(u16, String)>,
        /// When set, gradings wait for a notification before answering.
        grade_gate: Option<Arc<Notify>>,
        /// When set, deletions wait for a notification before answering.
        delete_gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl PracticeApi for FakeApi {
        async fn load_practice(&self, _track: Track) -> Result<PracticeData, ClientError> {
            Ok(PracticeData::default())
        }

        async fn grade(&self, file: &SelectedFile, _worksheet_id: &str) -> Result<GradeResponse, ClientError> {
            self.grade_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.grade_gate {
                gate.notified().await;
            }
            if let Some((status, message)) = &self.grade_error {
                return Err(ClientError::Api { status: *status, message: message.clone() });
            }
            Ok(GradeResponse {
                submission_id: Uuid::new_v4(),
                score: 88.0,
                steadiness: 75.0,
                accuracy: 92.0,
                feedback: Some("Lovely round shapes".to_string()),
                image_path: format!("user/{}", file.name),
            })
        }

        async fn delete_submission(&self, _id: Uuid, _image_path: &str) -> Result<(), ClientError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.delete_gate {
                gate.notified().await;
            }
            if let Some((status, message)) = &self.delete_error {
                return Err(ClientError::Api { status: *status, message: message.clone() });
            }
            Ok(())
        }
    }

    struct FakeShell {
        answer: AtomicBool,
        refreshes: AtomicUsize,
    }

    impl FakeShell {
        fn confirming(answer: bool) -> Arc<Self> {
            Arc::new(Self {
                answer: AtomicBool::new(answer),
                refreshes: AtomicUsize::new(0),
            })
        }
    }

    impl HostShell for FakeShell {
        fn confirm(&self, _prompt: &str) -> bool {
            self.answer.load(Ordering::SeqCst)
        }

        fn request_refresh(&self) {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn submission(id: Uuid, worksheet_id: &str) -> Submission {
        Submission {
            id,
            user_id: Uuid::nil(),
            worksheet_id: worksheet_id.to_string(),
            score: 70.0,
            steadiness: 60.0,
            accuracy: 80.0,
            feedback: None,
            image_path: format!("u/{worksheet_id}/{id}.png"),
            created_at: chrono::Utc::now(),
        }
    }

    fn png() -> SelectedFile {
        SelectedFile::new("sheet.png", "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    fn controller(api: Arc<FakeApi>, shell: Arc<FakeShell>, data: PracticeData) -> PracticeController {
        PracticeController::new(Track::Lowercase, api, shell, data)
    }

    fn ids(state: &PracticeState) -> Vec<&str> {
        state.completed.iter().map(String::as_str).collect()
    }

    #[tokio::test]
    async fn select_then_upload_sends_one_request_and_shows_grade() {
        let api = Arc::new(FakeApi::default());
        let c = controller(api.clone(), FakeShell::confirming(true), PracticeData::default());

        c.select_file(png()).unwrap();
        assert_eq!(c.snapshot().phase(), Phase::FileSelected);

        assert_eq!(c.upload().await, UploadOutcome::Graded);
        assert_eq!(api.grade_calls.load(Ordering::SeqCst), 1);

        let state = c.snapshot();
        assert_eq!(state.phase(), Phase::GradingDisplayed);
        assert!(!state.is_uploading);
        let analysis = state.analysis.unwrap();
        assert_eq!(analysis.worksheet_id, "letter-a");
        assert_eq!(analysis.grade.score, 88.0);
        assert!(analysis.preview_url.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn rejected_files_are_never_selected_or_sent() {
        let api = Arc::new(FakeApi::default());
        let c = controller(api.clone(), FakeShell::confirming(true), PracticeData::default());

        let gif = SelectedFile::new("anim.gif", "image/gif", vec![1, 2, 3]);
        assert!(matches!(c.select_file(gif), Err(UploadRejection::UnsupportedType(_))));

        let huge = SelectedFile::new("huge.jpg", "image/jpeg", vec![0; MAX_UPLOAD_BYTES + 1]);
        assert!(matches!(c.select_file(huge), Err(UploadRejection::TooLarge { .. })));

        let state = c.snapshot();
        assert!(state.selected_file.is_none());
        assert!(state.error.unwrap().contains("10 MB"));

        assert_eq!(c.upload().await, UploadOutcome::NoFileSelected);
        assert_eq!(api.grade_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn selecting_clears_previous_error_and_result() {
        let c = controller(Arc::new(FakeApi::default()), FakeShell::confirming(true), PracticeData::default());

        let _ = c.select_file(SelectedFile::new("x.pdf", "application/pdf", vec![1]));
        assert!(c.snapshot().error.is_some());

        c.select_file(png()).unwrap();
        let state = c.snapshot();
        assert!(state.error.is_none());
        assert!(state.analysis.is_none());
        assert!(!state.upload_success);

        c.remove_file();
        assert_eq!(c.snapshot().phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn failed_upload_surfaces_server_message() {
        let api = Arc::new(FakeApi {
            grade_error: Some((500, "grading service unavailable".to_string())),
            ..FakeApi::default()
        });
        let c = controller(api, FakeShell::confirming(true), PracticeData::default());

        c.select_file(png()).unwrap();
        assert_eq!(c.upload().await, UploadOutcome::Failed);

        let state = c.snapshot();
        assert_eq!(state.error.as_deref(), Some("grading service unavailable"));
        assert_eq!(state.selected_file, Some(png()));
        assert!(!state.show_grading);
        assert!(!state.is_uploading);
        assert_eq!(state.phase(), Phase::FileSelected);
    }

    #[tokio::test(start_paused = true)]
    async fn acknowledging_marks_complete_then_advances() {
        let shell = FakeShell::confirming(true);
        let c = controller(Arc::new(FakeApi::default()), shell.clone(), PracticeData::default());

        c.select_file(png()).unwrap();
        c.upload().await;
        let timer = c.acknowledge_grading().expect("grade was displayed");

        let state = c.snapshot();
        assert_eq!(shell.refreshes.load(Ordering::SeqCst), 1);
        assert!(state.upload_success);
        assert!(state.analysis.is_none());
        assert!(!state.show_grading);
        assert_eq!(ids(&state), ["letter-a"]);
        assert_eq!(state.current_step, 0);

        tokio::time::advance(Duration::from_millis(1900)).await;
        tokio::task::yield_now().await;
        let state = c.snapshot();
        assert_eq!(state.current_step, 0);
        assert!(state.upload_success);

        timer.await.unwrap();

        let state = c.snapshot();
        assert_eq!(state.current_step, 1);
        assert!(!state.upload_success);
        assert!(state.selected_file.is_none());
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(c.current_step().id, "letter-b");
    }

    #[tokio::test(start_paused = true)]
    async fn last_step_does_not_advance() {
        let c = controller(Arc::new(FakeApi::default()), FakeShell::confirming(true), PracticeData::default());
        let last = c.go_to(100);
        assert_eq!(last, 25);

        c.select_file(png()).unwrap();
        c.upload().await;
        c.acknowledge_grading().unwrap().await.unwrap();

        let state = c.snapshot();
        assert_eq!(state.current_step, 25);
        assert!(state.completed.contains("letter-z"));
        assert!(state.selected_file.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn navigating_during_the_pause_cancels_auto_advance() {
        let c = controller(Arc::new(FakeApi::default()), FakeShell::confirming(true), PracticeData::default());

        c.select_file(png()).unwrap();
        c.upload().await;
        let timer = c.acknowledge_grading().unwrap();
        c.go_to(5);
        timer.await.unwrap();

        let state = c.snapshot();
        assert_eq!(state.current_step, 5);
        // Stale timer left the success banner alone too.
        assert!(state.upload_success);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_cancels_auto_advance() {
        let c = controller(Arc::new(FakeApi::default()), FakeShell::confirming(true), PracticeData::default());

        c.select_file(png()).unwrap();
        c.upload().await;
        let timer = c.acknowledge_grading().unwrap();
        c.teardown();
        timer.await.unwrap();

        let state = c.snapshot();
        assert!(state.is_torn_down());
        assert_eq!(state.current_step, 0);
        assert!(c.acknowledge_grading().is_none());
    }

    #[tokio::test]
    async fn teardown_discards_a_late_grade() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(FakeApi {
            grade_gate: Some(gate.clone()),
            ..FakeApi::default()
        });
        let c = controller(api.clone(), FakeShell::confirming(true), PracticeData::default());
        c.select_file(png()).unwrap();

        let upload = c.upload();
        let detach = async {
            while api.grade_calls.load(Ordering::SeqCst) == 0 {
                tokio::task::yield_now().await;
            }
            assert!(c.snapshot().is_uploading);
            c.teardown();
            gate.notify_one();
        };
        let (outcome, ()) = tokio::join!(upload, detach);

        assert_eq!(outcome, UploadOutcome::Discarded);
        let state = c.snapshot();
        assert!(!state.show_grading);
        assert!(state.analysis.is_none());
        assert!(!state.is_uploading);
    }

    #[tokio::test]
    async fn teardown_leaves_submissions_after_a_late_delete() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(FakeApi {
            delete_gate: Some(gate.clone()),
            ..FakeApi::default()
        });
        let s1 = Uuid::new_v4();
        let data = PracticeData {
            profile: None,
            submissions: vec![submission(s1, "letter-a")],
        };
        let c = controller(api.clone(), FakeShell::confirming(true), data);

        let delete = c.delete_submission(s1, "u/letter-a/s1.png");
        let detach = async {
            while api.delete_calls.load(Ordering::SeqCst) == 0 {
                tokio::task::yield_now().await;
            }
            c.teardown();
            gate.notify_one();
        };
        let (outcome, ()) = tokio::join!(delete, detach);

        assert_eq!(outcome, DeleteOutcome::Deleted);
        let state = c.snapshot();
        assert_eq!(state.submissions.len(), 1);
        assert_eq!(ids(&state), ["letter-a"]);
        assert_eq!(state.deleting_id, None);
    }

    #[tokio::test]
    async fn dismiss_error_clears_the_message() {
        let c = controller(Arc::new(FakeApi::default()), FakeShell::confirming(true), PracticeData::default());

        let _ = c.select_file(SelectedFile::new("x.pdf", "application/pdf", vec![1]));
        assert!(c.snapshot().error.is_some());

        c.dismiss_error();
        assert!(c.snapshot().error.is_none());
    }

    #[tokio::test]
    async fn acknowledge_without_grade_is_a_no_op() {
        let shell = FakeShell::confirming(true);
        let c = controller(Arc::new(FakeApi::default()), shell.clone(), PracticeData::default());

        assert!(c.acknowledge_grading().is_none());
        assert_eq!(shell.refreshes.load(Ordering::SeqCst), 0);
        assert!(c.snapshot().completed.is_empty());
    }

    #[tokio::test]
    async fn second_delete_while_first_is_pending_is_a_no_op() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(FakeApi {
            delete_gate: Some(gate.clone()),
            ..FakeApi::default()
        });
        let (s1, s2) = (Uuid::new_v4(), Uuid::new_v4());
        let data = PracticeData {
            profile: None,
            submissions: vec![submission(s1, "letter-a"), submission(s2, "letter-b")],
        };
        let c = controller(api.clone(), FakeShell::confirming(true), data);

        let first = c.delete_submission(s1, "u/letter-a/1.png");
        let second = async {
            let outcome = c.delete_submission(s2, "u/letter-b/2.png").await;
            assert_eq!(c.snapshot().deleting_id, Some(s1));
            assert_eq!(api.delete_calls.load(Ordering::SeqCst), 1);
            gate.notify_one();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first, DeleteOutcome::Deleted);
        assert_eq!(second, DeleteOutcome::Busy);
        assert_eq!(api.delete_calls.load(Ordering::SeqCst), 1);
        assert_eq!(c.snapshot().deleting_id, None);
    }

    #[tokio::test]
    async fn completed_set_follows_submissions() {
        let (s1, s2) = (Uuid::new_v4(), Uuid::new_v4());
        let data = PracticeData {
            profile: None,
            submissions: vec![submission(s1, "letter-a"), submission(s2, "letter-b")],
        };
        let c = controller(Arc::new(FakeApi::default()), FakeShell::confirming(true), data);
        assert_eq!(ids(&c.snapshot()), ["letter-a", "letter-b"]);

        assert_eq!(c.delete_submission(s1, "u/letter-a/s1.png").await, DeleteOutcome::Deleted);

        let state = c.snapshot();
        assert_eq!(ids(&state), ["letter-b"]);
        assert_eq!(state.submissions.len(), 1);
    }

    #[tokio::test]
    async fn failed_delete_keeps_submission_and_reports() {
        let api = Arc::new(FakeApi {
            delete_error: Some((403, "You can only delete your own submissions".to_string())),
            ..FakeApi::default()
        });
        let s1 = Uuid::new_v4();
        let data = PracticeData {
            profile: None,
            submissions: vec![submission(s1, "letter-a")],
        };
        let c = controller(api, FakeShell::confirming(true), data);

        assert_eq!(c.delete_submission(s1, "p").await, DeleteOutcome::Failed);

        let state = c.snapshot();
        assert_eq!(state.submissions.len(), 1);
        assert_eq!(state.deleting_id, None);
        assert_eq!(state.error.as_deref(), Some("You can only delete your own submissions"));
    }

    #[tokio::test]
    async fn declined_confirmation_sends_nothing() {
        let api = Arc::new(FakeApi::default());
        let s1 = Uuid::new_v4();
        let data = PracticeData {
            profile: None,
            submissions: vec![submission(s1, "letter-a")],
        };
        let c = controller(api.clone(), FakeShell::confirming(false), data);

        assert_eq!(c.delete_submission(s1, "p").await, DeleteOutcome::Cancelled);
        assert_eq!(api.delete_calls.load(Ordering::SeqCst), 0);
        assert_eq!(c.snapshot().submissions.len(), 1);
    }

    #[tokio::test]
    async fn go_to_clamps_to_the_track() {
        let c = PracticeController::new(
            Track::MagicC,
            Arc::new(FakeApi::default()),
            FakeShell::confirming(true),
            PracticeData::default(),
        );
        assert_eq!(c.steps().len(), 6);

        assert_eq!(c.go_to(-1), 0);
        assert_eq!(c.go_to(10), 5);
        assert_eq!(c.navigate(Direction::Next), 5);
        assert_eq!(c.navigate(Direction::Previous), 4);
        c.go_to(0);
        assert_eq!(c.navigate(Direction::Previous), 0);
    }

    #[tokio::test]
    async fn sync_replaces_data_and_ignores_other_tracks() {
        let c = controller(Arc::new(FakeApi::default()), FakeShell::confirming(true), PracticeData::default());

        c.sync(PracticeData {
            profile: Some(Profile {
                id: Uuid::nil(),
                display_mode: crate::models::profile::DisplayMode::Kids,
                xp: 120,
                streak: 3,
                last_practice_on: None,
            }),
            submissions: vec![
                submission(Uuid::new_v4(), "letter-c"),
                submission(Uuid::new_v4(), "number-4"),
            ],
        });

        let state = c.snapshot();
        assert_eq!(state.profile.as_ref().map(|p| p.xp), Some(120));
        assert_eq!(state.submissions.len(), 2);
        assert_eq!(ids(&state), ["letter-c"]);
    }
}
