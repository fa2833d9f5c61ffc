use std::path::PathBuf;

use access::{Role, Session, SessionStore, User};

use super::*;

fn temp_path() -> PathBuf {
    std::env::temp_dir().join(format!("workhub-cli-{}", uuid::Uuid::new_v4())).join("session.json")
}

fn client_user() -> User {
    User {
        id: "u-9".to_owned(),
        email: "buyer@acme.test".to_owned(),
        name: "Buyer".to_owned(),
        role: Role::Client,
        company: Some("Acme".to_owned()),
        contact_number: Some("555-0100".to_owned()),
        client_id: Some("c-3".to_owned()),
    }
}

#[test]
fn missing_file_opens_empty() {
    let storage = FileStorage::open(temp_path()).unwrap();
    assert_eq!(storage.get("token"), None);
}

#[test]
fn writes_survive_reopen() {
    let path = temp_path();
    let storage = FileStorage::open(&path).unwrap();
    storage.set("token", "abc").unwrap();

    let reopened = FileStorage::open(&path).unwrap();
    assert_eq!(reopened.get("token").as_deref(), Some("abc"));
}

#[test]
fn removal_survives_reopen() {
    let path = temp_path();
    let storage = FileStorage::open(&path).unwrap();
    storage.set("token", "abc").unwrap();
    storage.set("user", "{}").unwrap();
    storage.remove("token");

    let reopened = FileStorage::open(&path).unwrap();
    assert_eq!(reopened.get("token"), None);
    assert_eq!(reopened.get("user").as_deref(), Some("{}"));
}

#[test]
fn corrupted_file_opens_empty() {
    let path = temp_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json").unwrap();
    let storage = FileStorage::open(&path).unwrap();
    assert_eq!(storage.get("token"), None);
}

#[test]
fn session_store_round_trips_through_file() {
    let path = temp_path();
    let store = SessionStore::new(FileStorage::open(&path).unwrap());
    let session = Session::new("tok-1", client_user());
    store.write(&session);

    let reopened = SessionStore::new(FileStorage::open(&path).unwrap());
    assert_eq!(reopened.read(), Some(session));
    assert_eq!(reopened.storage().get("clientId").as_deref(), Some("c-3"));

    reopened.clear();
    let cleared = FileStorage::open(&path).unwrap();
    assert_eq!(cleared.get("token"), None);
    assert_eq!(cleared.get("user"), None);
    assert_eq!(cleared.get("clientId"), None);
}
