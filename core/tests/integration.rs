//! Send-SMS round-trips against the live mock gateway.
//!
//! # Design
//! Starts the mock server on a random port, then drives `SmsClient` over a
//! real `TcpTransport`. Replies are read with `ReadMode::UntilComplete`
//! because the server keeps the connection alive and may flush the head and
//! body separately.

use std::net::SocketAddr;
use std::sync::Arc;

use mock_server::Credentials;
use sms_core::log::Level;
use sms_core::{
    Credential, HttpRequest, HttpResponse, ReadMode, RecordingLogger, SendSms, ServiceConfig, SmsClient,
    TcpTransport, Transport,
};

/// Spawn the mock gateway on its own runtime and return its address.
fn start_mock_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, Credentials::new("test_login_1", "test_password_1")).await
        })
        .unwrap();
    });

    addr
}

fn service(addr: SocketAddr, password: &str) -> ServiceConfig {
    ServiceConfig {
        url: format!("http://{addr}"),
        username: "test_login_1".to_string(),
        password: password.to_string(),
        path: "/send_sms".to_string(),
    }
}

fn transport() -> TcpTransport {
    TcpTransport::with_read_mode(ReadMode::UntilComplete)
}

#[test]
fn send_sms_lifecycle() {
    // Step 1: start the gateway.
    let addr = start_mock_server();
    let logger = Arc::new(RecordingLogger::new());
    let client = SmsClient::new(&service(addr, "test_password_1"), logger.clone());

    // Step 2: send a message and check the composed reply line.
    let sms = SendSms::new("123456789", "987654321", "Hello_World!");
    let line = client.send_sms(&mut transport(), &sms).unwrap();
    let body = line.strip_prefix("200 OK ").expect("success line");
    let reply: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(reply["status"], "success");
    let message_id = reply["message_id"].as_str().unwrap().to_string();
    assert_eq!(logger.count(Level::Info), 1);
    assert_eq!(logger.count(Level::Warn), 0);

    // Step 3: a non-ASCII message is framed by its byte length.
    let sms = SendSms::new("123456789", "987654321", "Привет, мир");
    let line = client.send_sms(&mut transport(), &sms).unwrap();
    assert!(line.starts_with("200 OK "), "{line}");

    // Step 4: list what the gateway stored, using the codec directly.
    let request = HttpRequest::builder("GET", client.host(), "/messages")
        .header("Accept", "application/json")
        .credential(Credential::token("unused"))
        .build(&*logger);
    let raw = transport().round_trip(client.host(), &request.to_bytes()).unwrap();
    let response = HttpResponse::from_bytes(&raw).unwrap();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.status_message, "OK");

    let messages: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["message_id"], message_id.as_str());
    assert_eq!(messages[0]["sender"], "123456789");
    assert_eq!(messages[0]["recipient"], "987654321");
    assert_eq!(messages[0]["message"], "Hello_World!");
    assert_eq!(messages[1]["message"], "Привет, мир");
}

#[test]
fn wrong_password_is_reported_not_raised() {
    let addr = start_mock_server();
    let logger = Arc::new(RecordingLogger::new());
    let client = SmsClient::new(&service(addr, "wrong"), logger.clone());

    let sms = SendSms::new("123456789", "987654321", "Hello_World!");
    let line = client.send_sms(&mut transport(), &sms).unwrap();
    assert_eq!(line, r#"401 Unauthorized {"error":"Invalid credentials"}"#);
    assert_eq!(logger.count(Level::Info), 1);
}

#[test]
fn missing_username_still_sends_and_is_rejected() {
    let addr = start_mock_server();
    let logger = Arc::new(RecordingLogger::new());
    let mut service = service(addr, "test_password_1");
    service.username.clear();
    let client = SmsClient::new(&service, logger.clone());

    let sms = SendSms::new("123456789", "987654321", "Hello_World!");
    let line = client.send_sms(&mut transport(), &sms).unwrap();
    assert!(line.starts_with("401 Unauthorized "), "{line}");
    assert_eq!(logger.count(Level::Warn), 1);
    assert_eq!(logger.count(Level::Info), 1);
}
