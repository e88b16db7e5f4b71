//! Mock Consul HTTP API for exercising the real client

use base64::Engine;
use kvbackup::config::ConsulConfig;
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_bytes, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub struct MockConsulServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockConsulServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    pub fn config(&self, token: Option<&str>) -> ConsulConfig {
        ConsulConfig {
            address: self.base_url.clone(),
            use_tls: false,
            token: token.map(str::to_string),
            datacenter: None,
        }
    }

    /// One listing entry in Consul's wire format. `None` value is sent as null.
    pub fn entry(key: &str, value: Option<&[u8]>, create_index: u64) -> Value {
        json!({
            "Key": key,
            "CreateIndex": create_index,
            "ModifyIndex": create_index + 1,
            "LockIndex": 0,
            "Flags": 0,
            "Value": value.map(|v| base64::engine::general_purpose::STANDARD.encode(v)),
        })
    }

    pub async fn mock_list(&self, entries: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path("/v1/kv/"))
            .and(query_param("recurse", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(entries)))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_list_requiring_token(&self, token: &str, entries: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path("/v1/kv/"))
            .and(header("X-Consul-Token", token))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(entries)))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_list_empty(&self) {
        Mock::given(method("GET"))
            .and(path("/v1/kv/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_list_error(&self, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path("/v1/kv/"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Accept exactly one write of `value` to `key`
    pub async fn mock_put(&self, key: &str, value: &[u8]) {
        Mock::given(method("PUT"))
            .and(path(format!("/v1/kv/{}", key)))
            .and(body_bytes(value.to_vec()))
            .respond_with(ResponseTemplate::new(200).set_body_string("true"))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_put_refused(&self, key: &str) {
        Mock::given(method("PUT"))
            .and(path(format!("/v1/kv/{}", key)))
            .respond_with(ResponseTemplate::new(200).set_body_string("false"))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_put_forbidden(&self, key: &str) {
        Mock::given(method("PUT"))
            .and(path(format!("/v1/kv/{}", key)))
            .respond_with(ResponseTemplate::new(403).set_body_string("Permission denied"))
            .mount(&self.server)
            .await;
    }
}
