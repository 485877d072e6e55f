//! Blocking HTTP transport for the inventory server.

use barstock_core::{
    CollectionReply, DeleteRequest, ServerReply, Transport, TransportError, UpdateRequest,
};
use barstock_model::Row;
use reqwest::Method;
use reqwest::blocking::{Client, Request};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{BodyEncoding, ClientConfig};
use crate::error::Result;

/// Talks to the collection and item endpoints named in a [`ClientConfig`].
///
/// Every call blocks until the server answers or the configured timeout
/// expires. Requests are never retried.
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let mut builder = Client::builder().timeout(config.timeout());
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds a mutation request with the configured body encoding.
    fn build<B: Serialize>(&self, method: Method, body: &B) -> reqwest::Result<Request> {
        let builder = self
            .client
            .request(method, self.config.item_url())
            .header(USER_AGENT, user_agent())
            .header(ACCEPT, "application/json");
        match self.config.body_encoding {
            BodyEncoding::Form => builder.form(body),
            BodyEncoding::Json => builder.json(body),
        }
        .build()
    }

    fn execute(&self, request: Request) -> std::result::Result<(u16, String), TransportError> {
        let method = request.method().clone();
        debug!(%method, url = %request.url(), "sending request");
        let response = self
            .client
            .execute(request)
            .map_err(|error| TransportError::Connection(error.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|error| TransportError::Connection(error.to_string()))?;
        debug!(%method, status, bytes = body.len(), "response received");
        Ok((status, body))
    }

    fn mutate<B: Serialize>(
        &self,
        method: Method,
        body: &B,
    ) -> std::result::Result<ServerReply, TransportError> {
        let request = self
            .build(method, body)
            .map_err(|error| TransportError::Connection(error.to_string()))?;
        let (status, body) = self.execute(request)?;
        decode_reply(status, &body)
    }
}

impl Transport for HttpTransport {
    fn load(&self) -> std::result::Result<Vec<Row>, TransportError> {
        let request = self
            .client
            .get(self.config.collection_url())
            .header(USER_AGENT, user_agent())
            .header(ACCEPT, "application/json")
            .build()
            .map_err(|error| TransportError::Connection(error.to_string()))?;
        let (status, body) = self.execute(request)?;
        decode_collection(status, &body)
    }

    fn update(&self, request: &UpdateRequest) -> std::result::Result<ServerReply, TransportError> {
        self.mutate(Method::PUT, request)
    }

    fn delete(&self, request: &DeleteRequest) -> std::result::Result<ServerReply, TransportError> {
        self.mutate(Method::DELETE, request)
    }
}

fn user_agent() -> String {
    format!("barstock/{}", env!("CARGO_PKG_VERSION"))
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Decodes an update or delete reply.
///
/// A non-2xx status whose body is a well-formed `{"status": "error"}` reply
/// is passed through so the server's message reaches the operator. Any
/// other non-2xx answer is a status error.
pub fn decode_reply(status: u16, body: &str) -> std::result::Result<ServerReply, TransportError> {
    let parsed = serde_json::from_str::<ServerReply>(body);
    if is_success(status) {
        return parsed.map_err(|error| TransportError::Decode(format!("invalid reply: {error}")));
    }
    match parsed {
        Ok(reply) if reply.status.as_deref() == Some(barstock_core::protocol::STATUS_ERROR) => {
            warn!(status, "server returned an error reply");
            Ok(reply)
        }
        _ => Err(TransportError::Status { code: status }),
    }
}

/// Decodes the collection body, a bare array or a `{"data": [...]}` envelope.
pub fn decode_collection(status: u16, body: &str) -> std::result::Result<Vec<Row>, TransportError> {
    if !is_success(status) {
        return Err(TransportError::Status { code: status });
    }
    serde_json::from_str::<CollectionReply>(body)
        .map(CollectionReply::into_rows)
        .map_err(|error| TransportError::Decode(format!("invalid collection: {error}")))
}

#[cfg(test)]
mod tests {
    use barstock_model::column::BOTTLE;

    use super::*;

    fn update() -> UpdateRequest {
        UpdateRequest {
            row_index: 3,
            bottle: "Cocchi Torino".to_string(),
            ingredient_type: "Sweet Vermouth".to_string(),
            field: "Price_Paid".to_string(),
            value: "21.50".to_string(),
        }
    }

    fn body_of(request: &Request) -> String {
        let bytes = request
            .body()
            .and_then(reqwest::blocking::Body::as_bytes)
            .unwrap_or_default();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn form_body_uses_wire_names() {
        let transport = HttpTransport::new(ClientConfig::default()).unwrap();
        let request = transport.build(Method::PUT, &update()).unwrap();
        assert_eq!(request.method(), &Method::PUT);
        assert_eq!(
            request.url().as_str(),
            "http://127.0.0.1:5000/api/ingredient"
        );
        assert_eq!(
            body_of(&request),
            "row_index=3&Bottle=Cocchi+Torino&Type=Sweet+Vermouth&field=Price_Paid&value=21.50"
        );
        assert_eq!(
            request.headers()[reqwest::header::CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn json_body_when_configured() {
        let config = ClientConfig {
            body_encoding: BodyEncoding::Json,
            ..ClientConfig::default()
        };
        let transport = HttpTransport::new(config).unwrap();
        let delete = DeleteRequest {
            row_index: 0,
            bottle: "Angostura".to_string(),
            ingredient_type: "Aromatic Bitters".to_string(),
        };
        let request = transport.build(Method::DELETE, &delete).unwrap();
        let body: serde_json::Value = serde_json::from_str(&body_of(&request)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"row_index": 0, "Bottle": "Angostura", "Type": "Aromatic Bitters"})
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ClientConfig {
            base_url: "localhost:5000".to_string(),
            ..ClientConfig::default()
        };
        assert!(HttpTransport::new(config).is_err());
    }

    #[test]
    fn success_reply_decodes() {
        let reply = decode_reply(
            200,
            r#"{"status": "success", "row_index": 2, "data": {"Bottle": "Fresh"}}"#,
        )
        .unwrap();
        assert_eq!(reply.row_index, Some(2));
        assert_eq!(
            reply.data.unwrap().value(BOTTLE).as_text(),
            "Fresh"
        );
    }

    #[test]
    fn error_reply_on_bad_request_keeps_message() {
        let reply = decode_reply(400, r#"{"status": "error", "message": "Invalid ABV"}"#).unwrap();
        assert_eq!(reply.message.as_deref(), Some("Invalid ABV"));
    }

    #[test]
    fn bare_status_failure() {
        assert_eq!(
            decode_reply(502, "<html>Bad Gateway</html>"),
            Err(TransportError::Status { code: 502 })
        );
        assert_eq!(
            decode_collection(404, ""),
            Err(TransportError::Status { code: 404 })
        );
    }

    #[test]
    fn undecodable_success_is_decode_error() {
        assert!(matches!(
            decode_reply(200, "not json"),
            Err(TransportError::Decode(_))
        ));
        assert!(matches!(
            decode_collection(200, r#"{"rows": []}"#),
            Err(TransportError::Decode(_))
        ));
    }

    #[test]
    fn nested_fields_do_not_break_decoding() {
        let rows = decode_collection(200, r#"[{"Bottle": "A", "Type": "B", "tags": ["x"]}]"#).unwrap();
        assert_eq!(rows[0].value("tags").as_text(), r#"["x"]"#);

        let reply = decode_reply(
            200,
            r#"{"status": "success", "row_index": 0, "data": {"Bottle": "A", "meta": {"k": 1}}}"#,
        )
        .unwrap();
        let data = reply.data.unwrap();
        assert_eq!(data.value(BOTTLE).as_text(), "A");
        assert_eq!(data.value("meta").as_text(), r#"{"k":1}"#);
    }

    #[test]
    fn collection_decodes_both_shapes() {
        assert_eq!(decode_collection(200, "[]").unwrap().len(), 0);
        assert_eq!(
            decode_collection(200, r#"{"data": [{"Bottle": "A"}]}"#)
                .unwrap()
                .len(),
            1
        );
    }
}
