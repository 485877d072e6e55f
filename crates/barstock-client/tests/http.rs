//! `HttpTransport` against a one-shot server on the loopback interface.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use barstock_client::{ClientConfig, HttpTransport};
use barstock_core::{DeleteRequest, Transport, TransportError, UpdateRequest};

/// Answers one request with `status` and `body`; the handle yields the raw
/// request text.
fn serve(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        request
    });
    (format!("http://{addr}"), handle)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut head = String::new();
    let mut content_length = 0;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        if line == "\r\n" || line.is_empty() {
            break;
        }
        if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap();
        }
        head.push_str(&line);
    }
    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).unwrap();
    format!("{head}\r\n{}", String::from_utf8(body).unwrap())
}

fn transport(base_url: &str) -> HttpTransport {
    let config = ClientConfig {
        system_proxy: false,
        ..ClientConfig::default()
    }
    .with_base_url(base_url)
    .unwrap();
    HttpTransport::new(config).unwrap()
}

#[test]
fn load_reads_enveloped_collection() {
    let (url, server) = serve(
        200,
        r#"{"data": [{"Bottle": "Fresh", "Type": "Lime Juice", "ABV": 0}]}"#,
    );
    let rows = transport(&url).load().unwrap();
    let request = server.join().unwrap();

    assert!(request.starts_with("GET /api/ingredients HTTP/1.1"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].natural_key().to_string(), "Fresh (Lime Juice)");
}

#[test]
fn update_is_form_encoded_put() {
    let (url, server) = serve(
        200,
        r#"{"status": "success", "row_index": 1, "data": {"Bottle": "Cocchi Torino"}}"#,
    );
    let reply = transport(&url)
        .update(&UpdateRequest {
            row_index: 1,
            bottle: "Cocchi Torino".to_string(),
            ingredient_type: "Sweet Vermouth".to_string(),
            field: "ABV".to_string(),
            value: "16.5".to_string(),
        })
        .unwrap();
    let request = server.join().unwrap();

    assert_eq!(reply.row_index, Some(1));
    assert!(request.starts_with("PUT /api/ingredient HTTP/1.1"));
    assert!(
        request
            .to_ascii_lowercase()
            .contains("content-type: application/x-www-form-urlencoded")
    );
    assert!(request.ends_with("row_index=1&Bottle=Cocchi+Torino&Type=Sweet+Vermouth&field=ABV&value=16.5"));
}

#[test]
fn rejected_delete_keeps_server_message() {
    let (url, server) = serve(400, r#"{"status": "error", "message": "Ingredient not found"}"#);
    let reply = transport(&url)
        .delete(&DeleteRequest {
            row_index: 0,
            bottle: "Luxardo".to_string(),
            ingredient_type: "Maraschino".to_string(),
        })
        .unwrap();
    let request = server.join().unwrap();

    assert!(request.starts_with("DELETE /api/ingredient HTTP/1.1"));
    assert_eq!(reply.message.as_deref(), Some("Ingredient not found"));
}

#[test]
fn server_failure_is_a_status_error() {
    let (url, server) = serve(500, r#"Internal Server Error"#);
    let result = transport(&url).load();
    server.join().unwrap();
    assert_eq!(result.unwrap_err(), TransportError::Status { code: 500 });
}

#[test]
fn unreachable_server_is_a_connection_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let result = transport(&format!("http://{addr}")).load();
    assert!(matches!(result, Err(TransportError::Connection(_))));
}
