//! Request builder.

use reqwest::Method;
use serde::Serialize;

use crate::Result;

/// An API request relative to the configured base URL.
#[derive(Clone, Debug)]
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) params: Vec<(String, String)>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) obj: Option<serde_json::Value>,
    pub(crate) body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            headers: Vec::new(),
            obj: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Object to encode as the JSON body.
    pub fn obj<T: Serialize>(mut self, obj: &T) -> Result<Self> {
        self.obj = Some(serde_json::to_value(obj)?);
        Ok(self)
    }

    /// Pre-encoded body. Takes precedence over [`obj`](Self::obj).
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Body bytes, wrapping the object as `{"entity": obj}` when `wrap` is set.
    pub(crate) fn encode_body(&self, wrap: bool) -> Result<Option<Vec<u8>>> {
        if let Some(body) = &self.body {
            return Ok(Some(body.clone()));
        }
        let Some(obj) = &self.obj else {
            return Ok(None);
        };
        let bytes = if wrap {
            serde_json::to_vec(&serde_json::json!({ "entity": obj }))?
        } else {
            serde_json::to_vec(obj)?
        };
        Ok(Some(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_entity_wrapping() {
        let request = Request::post("/stack")
            .obj(&json!({"name": "prod"}))
            .unwrap();

        let wrapped: Value =
            serde_json::from_slice(&request.encode_body(true).unwrap().unwrap()).unwrap();
        assert_eq!(wrapped, json!({"entity": {"name": "prod"}}));

        let raw: Value =
            serde_json::from_slice(&request.encode_body(false).unwrap().unwrap()).unwrap();
        assert_eq!(raw, json!({"name": "prod"}));
    }

    #[test]
    fn test_explicit_body_wins() {
        let request = Request::post("/stack")
            .obj(&json!({"name": "prod"}))
            .unwrap()
            .body("raw");
        assert_eq!(request.encode_body(true).unwrap().unwrap(), b"raw".to_vec());
    }

    #[test]
    fn test_no_body() {
        assert!(Request::get("/stack").encode_body(true).unwrap().is_none());
    }
}
