use mock_server::Credentials;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "4010".to_string());
    let username = std::env::var("MOCK_USERNAME").unwrap_or_else(|_| "test_login_1".to_string());
    let password = std::env::var("MOCK_PASSWORD").unwrap_or_else(|_| "test_password_1".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("listening on {addr}");
    mock_server::run(listener, Credentials::new(username, password)).await
}
