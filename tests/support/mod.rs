// Shared one-time relay bootstrap for integration tests.
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

// Websocket URL of the shared relay once it is accepting connections.
static RELAY_URL: OnceLock<String> = OnceLock::new();
static RELAY_READY: OnceLock<()> = OnceLock::new();

// Ensure the test relay is running and return its websocket URL.
pub fn ensure_relay() -> &'static str {
    RELAY_READY.get_or_init(|| {
        let published_addr = Arc::new(OnceLock::<String>::new());
        let published_addr_thread = Arc::clone(&published_addr);
        // Own OS thread and runtime so the relay outlives each `#[tokio::test]` runtime.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_addr_thread.set(addr.to_string());
                aero_express::run_relay(listener).await.expect("relay failed");
            });
        });
        wait_for_relay(published_addr);
    });

    RELAY_URL
        .get()
        .expect("relay url should be initialized")
        .as_str()
}

fn wait_for_relay(published_addr: Arc<OnceLock<String>>) {
    let addr = loop {
        if let Some(addr) = published_addr.get() {
            break addr.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    for _ in 0..100 {
        if std::net::TcpStream::connect(&addr).is_ok() {
            let _ = RELAY_URL.set(format!("ws://{addr}/ws"));
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("relay did not become ready in time");
}
