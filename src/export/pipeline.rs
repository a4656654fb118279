use std::sync::Arc;

use super::{
    transport::{PrintRequest, PrintResponse, PrintTransport},
    types::PrintOutcome,
};

/// Longest slice of a response body quoted in a rejection reason.
const MAX_REASON_LEN: usize = 120;

pub(crate) async fn perform_print(
    request: PrintRequest,
    transport: Arc<dyn PrintTransport>,
) -> PrintOutcome {
    log::info!("Submitting drawing for printing ({} bytes)", request.png.len());

    match transport.submit(request).await {
        Ok(response) => classify_response(&response),
        Err(err) => PrintOutcome::TransportFailed(err.to_string()),
    }
}

/// Maps an endpoint answer onto an outcome.
///
/// Non-2xx is a rejection. A 2xx whose JSON body carries `"success": false`
/// is a rejection too; any other 2xx is a successful print.
pub(crate) fn classify_response(response: &PrintResponse) -> PrintOutcome {
    let json: Option<serde_json::Value> = serde_json::from_str(&response.body).ok();

    if !(200..300).contains(&response.status) {
        return PrintOutcome::Rejected {
            status: response.status,
            reason: rejection_reason(json.as_ref(), &response.body, response.status),
        };
    }

    let reported_failure = json
        .as_ref()
        .and_then(|v| v.get("success"))
        .and_then(serde_json::Value::as_bool)
        == Some(false);

    if reported_failure {
        PrintOutcome::Rejected {
            status: response.status,
            reason: rejection_reason(json.as_ref(), "", response.status),
        }
    } else {
        PrintOutcome::Printed
    }
}

fn rejection_reason(json: Option<&serde_json::Value>, body: &str, status: u16) -> String {
    let from_json = json.and_then(|v| {
        ["error", "message"]
            .iter()
            .find_map(|key| v.get(*key).and_then(serde_json::Value::as_str))
    });
    if let Some(reason) = from_json {
        return reason.to_string();
    }

    let body = body.trim();
    if body.is_empty() {
        if (200..300).contains(&status) {
            "endpoint reported failure".to_string()
        } else {
            format!("HTTP {status}")
        }
    } else {
        body.chars().take(MAX_REASON_LEN).collect()
    }
}
