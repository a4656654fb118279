use std::io::Read;
use std::sync::Arc;
use std::thread;

use chunkpad::config::PrintBodyFormat;
use chunkpad::export::{HttpTransport, PrintManager, PrintRequest, PrintStatus, PrintTransport};
use tiny_http::{Response, Server};

/// Serves exactly one request with the given status and body, returning what was received.
fn one_shot_server(
    status: u16,
    body: &'static str,
) -> (String, thread::JoinHandle<(String, String)>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let url = format!("http://{}/print_drawing", server.server_addr());
    let handle = thread::spawn(move || {
        let mut request = server.recv().unwrap();
        let content_type = request
            .headers()
            .iter()
            .find(|h| h.field.equiv("Content-Type"))
            .map(|h| h.value.to_string())
            .unwrap_or_default();
        let mut received = Vec::new();
        request.as_reader().read_to_end(&mut received).unwrap();
        let received = String::from_utf8_lossy(&received).into_owned();
        let response = Response::from_string(body).with_status_code(status);
        request.respond(response).unwrap();
        (content_type, received)
    });
    (url, handle)
}

fn png() -> Vec<u8> {
    vec![137, 80, 78, 71, 13, 10, 26, 10]
}

#[tokio::test]
async fn json_body_carries_data_url() {
    let (url, server) = one_shot_server(200, r#"{"success": true}"#);
    let transport = HttpTransport::new(url, PrintBodyFormat::Json).unwrap();

    let response = transport.submit(PrintRequest { png: png() }).await.unwrap();
    assert_eq!(response.status, 200);

    let (content_type, body) = server.join().unwrap();
    assert!(content_type.starts_with("application/json"));
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let image = json["image"].as_str().unwrap();
    assert!(image.starts_with("data:image/png;base64,iVBORw0KGgo"));
}

#[tokio::test]
async fn multipart_body_has_image_part() {
    let (url, server) = one_shot_server(200, "{}");
    let transport = HttpTransport::new(url, PrintBodyFormat::Multipart).unwrap();

    transport.submit(PrintRequest { png: png() }).await.unwrap();

    let (content_type, body) = server.join().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    assert!(body.contains("name=\"image\""));
    assert!(body.contains("filename=\"drawing.png\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn manager_distinguishes_success_rejection_and_unreachable() {
    let handle = tokio::runtime::Handle::current();

    let (ok_url, ok_server) = one_shot_server(200, r#"{"success": true}"#);
    let ok = PrintManager::with_transport(
        &handle,
        Arc::new(HttpTransport::new(ok_url, PrintBodyFormat::Json).unwrap()),
    );
    ok.request_print(png()).unwrap();
    assert_eq!(ok.wait_until_settled().await, PrintStatus::Printed);
    ok_server.join().unwrap();

    let (bad_url, bad_server) = one_shot_server(500, "printer on fire");
    let bad = PrintManager::with_transport(
        &handle,
        Arc::new(HttpTransport::new(bad_url, PrintBodyFormat::Json).unwrap()),
    );
    bad.request_print(png()).unwrap();
    let rejected = bad.wait_until_settled().await;
    assert_eq!(
        rejected,
        PrintStatus::Rejected {
            status: 500,
            reason: "printer on fire".into()
        }
    );
    bad_server.join().unwrap();

    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let closed = PrintManager::with_transport(
        &handle,
        Arc::new(
            HttpTransport::new(
                format!("http://127.0.0.1:{port}/print_drawing"),
                PrintBodyFormat::Json,
            )
            .unwrap(),
        ),
    );
    closed.request_print(png()).unwrap();
    let unreachable = closed.wait_until_settled().await;
    assert!(matches!(unreachable, PrintStatus::TransportFailed(_)));

    assert_ne!(rejected.message(), unreachable.message());
}
