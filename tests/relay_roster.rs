mod support;

use aero_express::domain::{Attitude, PoseSnapshot};
use aero_express::interface_adapters::clients::relay::{ConnectionStatus, RelayClient};
use glam::Vec3;
use std::time::Duration;

fn pose(id: &str, z: f32) -> PoseSnapshot {
    PoseSnapshot {
        id: id.to_string(),
        position: Vec3::new(0.0, 120.0, z),
        rotation: Attitude::default(),
        skin: "skin_default".to_string(),
        name_tag: format!("tag-{id}"),
    }
}

async fn wait_online(client: &RelayClient) {
    let mut status = client.subscribe_status();
    tokio::time::timeout(
        Duration::from_secs(5),
        status.wait_for(|s| *s == ConnectionStatus::Online),
    )
    .await
    .expect("client never came online")
    .expect("status channel closed");
}

/// Keeps both clients publishing until `done` holds for `observer`'s roster.
async fn pump_until(
    sender: &RelayClient,
    observer: &RelayClient,
    sender_id: &str,
    observer_id: &str,
    done: impl Fn(&RelayClient) -> bool,
) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    let mut z = 0.0;
    while tokio::time::Instant::now() < deadline {
        sender.send_pose(pose(sender_id, z));
        observer.send_pose(pose(observer_id, -z));
        if done(observer) {
            return;
        }
        z -= 10.0;
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("roster never reached the expected state");
}

#[tokio::test]
async fn each_pilot_sees_the_other_but_not_itself() {
    let url = support::ensure_relay();
    let alpha = RelayClient::connect(url, "alpha0001", 8);
    let bravo = RelayClient::connect(url, "bravo0001", 8);
    wait_online(&alpha).await;
    wait_online(&bravo).await;

    pump_until(&alpha, &bravo, "alpha0001", "bravo0001", |c| {
        c.roster().iter().any(|p| p.id == "alpha0001")
    })
    .await;
    pump_until(&bravo, &alpha, "bravo0001", "alpha0001", |c| {
        c.roster().iter().any(|p| p.id == "bravo0001")
    })
    .await;

    let seen_by_bravo = bravo.roster();
    assert!(seen_by_bravo.iter().all(|p| p.id != "bravo0001"));
    let alpha_entry = seen_by_bravo
        .iter()
        .find(|p| p.id == "alpha0001")
        .expect("alpha listed");
    assert_eq!(alpha_entry.name_tag.as_deref(), Some("tag-alpha0001"));
    assert!(alpha.roster().iter().all(|p| p.id != "alpha0001"));

    alpha.disconnect().await;
    bravo.disconnect().await;
}

#[tokio::test]
async fn departed_pilot_leaves_the_roster() {
    let url = support::ensure_relay();
    let charlie = RelayClient::connect(url, "charlie01", 8);
    let delta = RelayClient::connect(url, "delta0001", 8);
    wait_online(&charlie).await;
    wait_online(&delta).await;

    pump_until(&charlie, &delta, "charlie01", "delta0001", |c| {
        c.roster().iter().any(|p| p.id == "charlie01")
    })
    .await;

    charlie.disconnect().await;

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        delta.send_pose(pose("delta0001", 0.0));
        if delta.roster().iter().all(|p| p.id != "charlie01") {
            break;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "departed pilot still listed"
        );
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    delta.disconnect().await;
}
