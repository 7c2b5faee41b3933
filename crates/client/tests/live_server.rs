//! The blocking client against a real server on an ephemeral port.

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::JoinHandle;

use rolodex_client::{ClientConfig, ContactDraft, ContactId, ContactPatch, ContactsClient, Error};
use rolodex_engine::RecordStore;
use rolodex_server::AppState;
use tokio::sync::oneshot;

struct TestServer {
    addr: SocketAddr,
    store: Arc<RecordStore>,
    stop: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl TestServer {
    fn start() -> Self {
        let store = Arc::new(RecordStore::ephemeral().unwrap());
        let state = AppState::new(store.clone());
        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let thread = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                addr_tx.send(listener.local_addr().unwrap()).unwrap();
                rolodex_server::serve(listener, state, async {
                    let _ = stop_rx.await;
                })
                .await
                .unwrap();
            });
        });

        let addr = addr_rx.recv().unwrap();
        Self {
            addr,
            store,
            stop: Some(stop_tx),
            thread: Some(thread),
        }
    }

    fn client(&self) -> ContactsClient {
        ContactsClient::new(ClientConfig::new(format!("http://{}", self.addr)))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn draft(first: &str, last: &str) -> ContactDraft {
    ContactDraft {
        first: Some(first.to_string()),
        last: Some(last.to_string()),
        ..ContactDraft::default()
    }
}

#[test]
fn test_create_list_update_delete() {
    let server = TestServer::start();
    let client = server.client();

    let ada = client.create_contact(draft("Ada", "Lovelace")).unwrap();
    assert!(ada.created_at.is_some());
    assert_eq!(ada.first.as_deref(), Some("Ada"));
    assert!(server.store.contains(&ada.object_id));

    let grace = client.create_contact(draft("Grace", "Hopper")).unwrap();
    assert_ne!(ada.object_id, grace.object_id);

    // Sorted by last name.
    let listed = client.list_contacts(None).unwrap();
    let firsts: Vec<_> = listed.iter().map(|c| c.first.as_deref().unwrap()).collect();
    assert_eq!(firsts, ["Grace", "Ada"]);

    let updated = client
        .update_contact(&ada.object_id, ContactPatch::new().favorite(true))
        .unwrap()
        .unwrap();
    assert_eq!(updated.favorite, Some(true));
    assert_eq!(updated.last.as_deref(), Some("Lovelace"));

    let fetched = client.get_contact(&ada.object_id).unwrap().unwrap();
    assert_eq!(fetched, updated);

    let removed = client.delete_contact(&ada.object_id).unwrap().unwrap();
    assert_eq!(removed.object_id, ada.object_id);
    assert!(client.get_contact(&ada.object_id).unwrap().is_none());
}

#[test]
fn test_query_filters_and_ranks() {
    let server = TestServer::start();
    let client = server.client();

    client.create_contact(draft("Ada", "Lovelace")).unwrap();
    client.create_contact(draft("Grace", "Hopper")).unwrap();
    client.create_contact(draft("Adam", "Smith")).unwrap();

    let hits = client.list_contacts(Some("ada")).unwrap();
    let firsts: Vec<_> = hits.iter().map(|c| c.first.as_deref().unwrap()).collect();
    assert_eq!(firsts, ["Ada", "Adam"]);

    assert!(client.list_contacts(Some("zzz")).unwrap().is_empty());
    assert_eq!(client.list_contacts(Some("  ")).unwrap().len(), 3);
}

#[test]
fn test_missing_records_are_none() {
    let server = TestServer::start();
    let client = server.client();
    let ghost = ContactId::new("ghost").unwrap();

    assert!(client.get_contact(&ghost).unwrap().is_none());
    assert!(client
        .update_contact(&ghost, ContactPatch::new().notes("x"))
        .unwrap()
        .is_none());
    assert!(client.delete_contact(&ghost).unwrap().is_none());
}

#[test]
fn test_identifiers_needing_escapes() {
    let server = TestServer::start();
    let client = server.client();
    server
        .store
        .insert(rolodex_client::Contact::new(ContactId::new("a b/c").unwrap()))
        .unwrap();

    let fetched = client
        .get_contact(&ContactId::new("a b/c").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(fetched.object_id.as_str(), "a b/c");
}

#[test]
fn test_rejected_update_is_status_error() {
    let server = TestServer::start();
    let client = server.client();
    let ada = client.create_contact(draft("Ada", "Lovelace")).unwrap();

    // `favorite` must be a boolean; the patch builder cannot express this, so
    // go through an extra member with the wrong type.
    let mut patch = ContactPatch::new();
    patch.extra.insert("favorite".into(), serde_json::json!("yes"));
    let err = client.update_contact(&ada.object_id, patch).unwrap_err();
    match err {
        Error::Status { code, .. } => assert_eq!(code, 400),
        other => panic!("Expected Status error, got {:?}", other),
    }
}
