//! Service-level flows over file storage.

use std::sync::Arc;

use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

use notes_api::config::Config;
use notes_api::domain::NoteResponse;
use notes_api::errors::ErrorKind;
use notes_api::infra::{FileRepository, Repository};
use notes_api::services::{ServiceContainer, Services};

const PASSWORD: &str = "Password1234$";

struct Harness {
    services: Services,
    repo: Arc<FileRepository>,
    _dir: TempDir,
}

impl Harness {
    async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(FileRepository::open(dir.path()).await.unwrap());
        let shared: Arc<dyn Repository> = repo.clone();
        Self {
            services: Services::new(shared, Config::new("test-secret-key-for-testing-only-32chars")),
            repo,
            _dir: dir,
        }
    }

    async fn user(&self, login: &str) -> i32 {
        self.services
            .users()
            .create_user(login, PASSWORD, "John", "Doe")
            .await
            .unwrap()
    }
}

fn ids(notes: &[NoteResponse]) -> Vec<i32> {
    notes.iter().map(|n| n.id).collect()
}

#[tokio::test]
async fn test_folder_titles_are_unique_per_user() {
    let h = Harness::new().await;
    let a = h.user("johndoe42").await;
    let b = h.user("janedoe42").await;
    let folders = h.services.folders();

    assert_ok!(folders.create_folder(a, "X").await);
    assert_ok!(folders.create_folder(b, "X").await);

    let err = assert_err!(folders.create_folder(a, "X").await);
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_note_titles_are_unique_per_user() {
    let h = Harness::new().await;
    let a = h.user("johndoe42").await;
    let b = h.user("janedoe42").await;
    let notes = h.services.notes();

    let first = notes.create_note(a, "Groceries", "milk", None).await.unwrap();
    let second = notes.create_note(a, "Chores", "laundry", None).await.unwrap();

    let err = assert_err!(notes.create_note(a, "Groceries", "eggs", None).await);
    assert_eq!(err.kind(), ErrorKind::Validation);

    // Another user may reuse the title
    let theirs = assert_ok!(notes.create_note(b, "Groceries", "eggs", None).await);
    assert!(theirs > 0);
    assert_ne!(theirs, first);

    // Renaming onto another note's title is rejected, keeping one's own is not
    let err = assert_err!(notes.update_note(a, second, "Groceries", "x", None).await);
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_ok!(notes.update_note(a, first, "Groceries", "milk, bread", None).await);
}

#[tokio::test]
async fn test_deleting_missing_or_foreign_entities_changes_nothing() {
    let h = Harness::new().await;
    let owner = h.user("johndoe42").await;
    let intruder = h.user("janedoe42").await;
    let folder = h.services.folders().create_folder(owner, "Work").await.unwrap();
    let note = h
        .services
        .notes()
        .create_note(owner, "Plan", "quarterly", None)
        .await
        .unwrap();

    assert_ok!(h.services.folders().delete_folder(intruder, folder).await);
    assert_ok!(h.services.folders().delete_folder(owner, 999).await);
    assert_ok!(h.services.notes().delete_note(intruder, note).await);
    assert_ok!(h.services.notes().delete_note(owner, 999).await);

    assert_eq!(h.repo.get_folders().await.unwrap().len(), 1);
    assert_eq!(h.repo.get_notes().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_favorites_round_trip() {
    let h = Harness::new().await;
    let user = h.user("johndoe42").await;
    let notes = h.services.notes();
    let id = notes.create_note(user, "Plan", "quarterly", None).await.unwrap();

    notes.add_to_favorites(user, id).await.unwrap();
    assert_eq!(ids(&notes.get_favorite_notes(user).await.unwrap()), vec![id]);

    notes.delete_from_favorites(user, id).await.unwrap();
    assert!(!h.repo.get_note_by_id(id, user).await.unwrap().is_favorite);

    let err = assert_err!(notes.add_to_favorites(user, 999).await);
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_move_to_folder() {
    let h = Harness::new().await;
    let user = h.user("johndoe42").await;
    let folder = h.services.folders().create_folder(user, "Work").await.unwrap();
    let notes = h.services.notes();
    let note = notes.create_note(user, "Plan", "quarterly", None).await.unwrap();

    notes.move_to_folder(user, note, Some(folder)).await.unwrap();
    assert_eq!(
        h.repo.get_note_by_id(note, user).await.unwrap().folder_id,
        Some(folder)
    );

    let err = assert_err!(notes.move_to_folder(user, note, Some(folder + 1)).await);
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(
        h.repo.get_note_by_id(note, user).await.unwrap().folder_id,
        Some(folder)
    );

    notes.move_to_folder(user, note, None).await.unwrap();
    assert_eq!(h.repo.get_note_by_id(note, user).await.unwrap().folder_id, None);
}

#[tokio::test]
async fn test_cannot_move_into_foreign_folder() {
    let h = Harness::new().await;
    let owner = h.user("johndoe42").await;
    let other = h.user("janedoe42").await;
    let foreign = h.services.folders().create_folder(other, "Theirs").await.unwrap();
    let note = h
        .services
        .notes()
        .create_note(owner, "Plan", "quarterly", None)
        .await
        .unwrap();

    let err = assert_err!(h.services.notes().move_to_folder(owner, note, Some(foreign)).await);
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_search_scenarios() {
    let h = Harness::new().await;
    let user = h.user("johndoe42").await;
    let notes = h.services.notes();
    let groceries = notes
        .create_note(user, "Groceries", "milk, eggs", Some(vec!["shopping".into()]))
        .await
        .unwrap();
    let chores = notes.create_note(user, "Chores", "laundry", None).await.unwrap();

    let found = |query: &'static str| {
        let notes = notes.clone();
        async move { ids(&notes.find_notes_by_query_phrase(user, query).await.unwrap()) }
    };

    assert_eq!(found("milk").await, vec![groceries]);
    assert_eq!(found("shopping").await, vec![groceries]);
    assert!(found("bread").await.is_empty());
    // Empty query returns every note in storage order
    assert_eq!(found("").await, vec![groceries, chores]);
}

#[tokio::test]
async fn test_notebook_groups_by_folder() {
    let h = Harness::new().await;
    let user = h.user("johndoe42").await;
    let other = h.user("janedoe42").await;
    let folder = h.services.folders().create_folder(user, "Work").await.unwrap();
    let notes = h.services.notes();
    let filed = notes.create_note(user, "Plan", "quarterly", None).await.unwrap();
    let loose = notes.create_note(user, "Idea", "someday", None).await.unwrap();
    notes.create_note(other, "Theirs", "private", None).await.unwrap();
    notes.move_to_folder(user, filed, Some(folder)).await.unwrap();

    let notebook = h.services.notebook().get_user_notebook(user).await.unwrap();

    assert_eq!(notebook.folders.len(), 1);
    assert_eq!(notebook.folders[0].id, folder);
    assert_eq!(ids(&notebook.folders[0].notes), vec![filed]);
    assert_eq!(ids(&notebook.notes), vec![loose]);
}

#[tokio::test]
async fn test_login_and_verify_through_services() {
    let h = Harness::new().await;
    let user = h.user("johndoe42").await;
    let auth = h.services.auth();

    let token = auth.login("johndoe42", PASSWORD).await.unwrap();
    let claims = auth.verify_token(&token.access_token).await.unwrap();
    assert_eq!(claims.sub, user);

    h.services.users().delete_user(user).await.unwrap();
    let err = assert_err!(auth.verify_token(&token.access_token).await);
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_reregistration_starts_from_a_clean_slate() {
    let h = Harness::new().await;
    h.user("alice1234").await;
    let bob = h.user("bobby1234").await;
    h.services.folders().create_folder(bob, "Private").await.unwrap();
    h.services
        .notes()
        .create_note(bob, "bob's secret", "hidden", None)
        .await
        .unwrap();
    let bob_token = h.services.auth().login("bobby1234", PASSWORD).await.unwrap();

    h.services.users().delete_user(bob).await.unwrap();
    let carol = h.user("carol1234").await;
    assert_ne!(carol, bob);

    let notebook = h.services.notebook().get_user_notebook(carol).await.unwrap();
    assert!(notebook.folders.is_empty());
    assert!(notebook.notes.is_empty());

    let err = assert_err!(h.services.auth().verify_token(&bob_token.access_token).await);
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
