//! Full stack: HTTP server over a store file, driven by the blocking client,
//! then reopened through the embedded facade.

use super::*;
use rolodex_client::{ClientConfig, ContactsClient};
use rolodex_engine::RecordStore;
use rolodex_server::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::JoinHandle;
use tempfile::tempdir;
use tokio::sync::oneshot;

struct Served {
    addr: SocketAddr,
    store: Arc<RecordStore>,
    stop: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl Served {
    fn start(store: RecordStore) -> Self {
        let store = Arc::new(store);
        let state = AppState::new(Arc::clone(&store));
        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let thread = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
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

        Self {
            addr: addr_rx.recv().unwrap(),
            store,
            stop: Some(stop_tx),
            thread: Some(thread),
        }
    }

    fn client(&self) -> ContactsClient {
        ContactsClient::new(ClientConfig::new(format!("http://{}", self.addr)))
    }

    fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        self.store.shutdown();
    }
}

#[test]
fn test_client_mutations_survive_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data").join("data.json");

    let served = Served::start(RecordStore::open(&path).unwrap());
    let client = served.client();

    let ada = client.create_contact(draft("Ada", "Lovelace")).unwrap();
    let grace = client.create_contact(draft("Grace", "Hopper")).unwrap();
    let alan = client.create_contact(draft("Alan", "Turing")).unwrap();

    client
        .update_contact(&ada.object_id, ContactPatch::new().favorite(true))
        .unwrap()
        .expect("ada exists");
    client.delete_contact(&alan.object_id).unwrap().expect("alan exists");

    let listed: Vec<_> = client
        .list_contacts(None)
        .unwrap()
        .into_iter()
        .map(|c| c.object_id)
        .collect();
    // Hopper sorts before Lovelace.
    assert_eq!(listed, vec![grace.object_id.clone(), ada.object_id.clone()]);

    served.stop();

    let book = Rolodex::open(&path).unwrap();
    let stored = book.list().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].object_id, ada.object_id);
    assert!(stored[0].is_favorite());
    assert_eq!(stored[1], grace);
    assert!(book.get(alan.object_id.as_str()).unwrap().is_none());
}

#[test]
fn test_facade_writes_are_served() {
    let book = ephemeral();
    book.create("x1", json!({"first": "Edsger", "last": "Dijkstra"}))
        .unwrap();
    book.create("x2", json!({"first": "Barbara", "last": "Liskov"}))
        .unwrap();

    let served = Served::start(RecordStore::ephemeral().unwrap());
    for contact in book.list().unwrap() {
        served.store.insert(contact).unwrap();
    }

    let client = served.client();
    let hits = client.list_contacts(Some("lisk")).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].object_id.as_str(), "x2");

    let missing = client
        .get_contact(&ContactId::new("x3").unwrap())
        .unwrap();
    assert!(missing.is_none());

    served.stop();
}
