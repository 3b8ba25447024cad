//! Request descriptors.
//!
//! A descriptor is built by the caller, consumed once by
//! [`ApiClient::request`](super::client::ApiClient::request), and not retained.

use serde::Serialize;
use serde_json::Value;

/// HTTP verbs used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One outbound API call: verb, relative path and optional JSON body.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    body: Option<Value>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            body: None,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn patch(path: &str) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: &str) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append a path parameter as its own URL-escaped segment.
    ///
    /// `"/auth/child-profile-fields"` + `"a/b"` becomes
    /// `"/auth/child-profile-fields/a%2Fb"`.
    pub fn param(mut self, value: &str) -> Self {
        if !self.path.ends_with('/') {
            self.path.push('/');
        }
        self.path.push_str(&urlencoding::encode(value));
        self
    }

    /// Attach an already-built JSON body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` as the JSON payload.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, serde_json::Error> {
        let value = serde_json::to_value(body)?;
        Ok(self.body(value))
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body_ref(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Method, String, Option<Value>) {
        (self.method, self.path, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_escapes_reserved_characters() {
        let req = RequestDescriptor::patch("/auth/child-profile-fields").param("a/b?c#d e");
        assert_eq!(req.path(), "/auth/child-profile-fields/a%2Fb%3Fc%23d%20e");
        assert_eq!(req.method(), Method::Patch);
    }

    #[test]
    fn test_param_after_trailing_slash() {
        let req = RequestDescriptor::get("/children/").param("42");
        assert_eq!(req.path(), "/children/42");
    }

    #[test]
    fn test_json_body() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body {
            new_password: &'static str,
        }

        let req = RequestDescriptor::patch("/auth/change-password")
            .json(&Body {
                new_password: "secret",
            })
            .unwrap();
        assert_eq!(
            req.body_ref(),
            Some(&serde_json::json!({ "newPassword": "secret" }))
        );
    }

    #[test]
    fn test_no_body_by_default() {
        let req = RequestDescriptor::get("/auth/parent-name");
        assert!(req.body_ref().is_none());
        assert_eq!(req.method().as_str(), "GET");
    }
}
