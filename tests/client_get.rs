//! GET tests against an in-process agent.

mod common;

use common::{TestAgent, if_in_octets_1, nonexistent_oid, sys_descr, sys_name, sys_uptime};
use snmp_adapter::{Auth, Client, Error, ErrorStatus, Retry, Value};
use std::time::Duration;

async fn client(agent: &TestAgent, auth: Auth) -> snmp_adapter::UdpClient {
    Client::builder(agent.addr().to_string(), auth)
        .timeout(Duration::from_millis(300))
        .retry(Retry::none())
        .connect()
        .await
        .unwrap()
}

/// Basic GET returns expected value.
#[tokio::test]
async fn get_returns_value() {
    let agent = TestAgent::new().await;
    let client = client(&agent, Auth::v2c("public")).await;

    let result = client.get(&sys_descr()).await.unwrap();

    assert_eq!(result.oid, sys_descr());
    assert_eq!(result.value.as_str(), Some("Test SNMP Agent"));
}

#[tokio::test]
async fn v1_get_returns_value() {
    let agent = TestAgent::new().await;
    let client = client(&agent, Auth::v1("public")).await;

    let result = client.get(&sys_name()).await.unwrap();

    assert_eq!(result.value.as_str(), Some("test-agent"));
}

/// v2c reports a missing object in the varbind.
#[tokio::test]
async fn get_missing_oid_returns_no_such_instance() {
    let agent = TestAgent::new().await;
    let client = client(&agent, Auth::v2c("public")).await;

    let result = client.get(&nonexistent_oid()).await.unwrap();

    assert_eq!(result.value, Value::NoSuchInstance);
}

/// v1 fails the request with noSuchName and points at the varbind.
#[tokio::test]
async fn v1_missing_oid_is_an_error() {
    let agent = TestAgent::new().await;
    let client = client(&agent, Auth::v1("public")).await;

    let err = client
        .get_many(&[sys_descr(), nonexistent_oid()])
        .await
        .unwrap_err();

    match *err {
        Error::Snmp {
            status, index, oid, ..
        } => {
            assert_eq!(status, ErrorStatus::NoSuchName);
            assert_eq!(index, 2);
            assert_eq!(oid, Some(nonexistent_oid()));
        }
        other => panic!("expected SNMP error, got {other}"),
    }
}

/// The error index counts across batches, not within the failing one.
#[tokio::test]
async fn v1_error_index_spans_batches() {
    let agent = TestAgent::new().await;
    let client = Client::builder(agent.addr().to_string(), Auth::v1("public"))
        .timeout(Duration::from_millis(300))
        .retry(Retry::none())
        .max_oids_per_request(2)
        .connect()
        .await
        .unwrap();

    let err = client
        .get_many(&[sys_descr(), sys_name(), nonexistent_oid()])
        .await
        .unwrap_err();

    match *err {
        Error::Snmp { index, oid, .. } => {
            assert_eq!(index, 3);
            assert_eq!(oid, Some(nonexistent_oid()));
        }
        other => panic!("expected SNMP error, got {other}"),
    }
    assert_eq!(agent.request_count(), 2);
}

/// GET multiple OIDs keeps request order.
#[tokio::test]
async fn get_many_keeps_order() {
    let agent = TestAgent::new().await;
    let client = client(&agent, Auth::v2c("public")).await;

    let oids = [sys_uptime(), sys_descr(), if_in_octets_1()];
    let results = client.get_many(&oids).await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].value, Value::TimeTicks(123456));
    assert_eq!(results[1].value.as_str(), Some("Test SNMP Agent"));
    assert_eq!(results[2].value, Value::Counter32(1_234_567));
}

#[tokio::test]
async fn get_many_batches_large_requests() {
    let agent = TestAgent::new().await;
    let client = Client::builder(agent.addr().to_string(), Auth::v2c("public"))
        .timeout(Duration::from_millis(300))
        .max_oids_per_request(1)
        .connect()
        .await
        .unwrap();

    let oids = [sys_descr(), sys_name(), sys_uptime()];
    let results = client.get_many(&oids).await.unwrap();

    let returned: Vec<_> = results.iter().map(|vb| vb.oid.clone()).collect();
    assert_eq!(returned, oids);
    assert_eq!(agent.request_count(), 3);
}

/// Wrong community is silently ignored, so the client times out.
#[tokio::test]
async fn wrong_community_times_out() {
    let agent = TestAgent::new().await;
    let client = client(&agent, Auth::v2c("private")).await;

    let err = client.get(&sys_descr()).await.unwrap_err();

    assert!(matches!(*err, Error::Timeout { retries: 0, .. }), "{err}");
}

#[tokio::test]
async fn stopped_agent_times_out_after_retries() {
    let agent = TestAgent::new().await;
    agent.stop();
    let client = Client::builder(agent.addr().to_string(), Auth::v2c("public"))
        .timeout(Duration::from_millis(100))
        .retry(Retry::fixed(2, Duration::from_millis(10)))
        .connect()
        .await
        .unwrap();

    let err = client.get(&sys_descr()).await.unwrap_err();

    assert!(matches!(*err, Error::Timeout { retries: 2, .. }), "{err}");
    assert!(err.to_string().starts_with("No SNMP response received before timeout"));
}

/// A dropped first request is recovered by a retry.
#[tokio::test]
async fn retry_recovers_dropped_request() {
    let agent = TestAgent::builder().drop_first(1).build().await;
    let client = Client::builder(agent.addr().to_string(), Auth::v2c("public"))
        .timeout(Duration::from_millis(200))
        .retry(Retry::fixed(2, Duration::ZERO))
        .connect()
        .await
        .unwrap();

    let result = client.get(&sys_descr()).await.unwrap();

    assert_eq!(result.value.as_str(), Some("Test SNMP Agent"));
    assert_eq!(agent.request_count(), 2);
}
