//! JSON envelopes shared by the CRUD handlers.

use serde::Serialize;

/// `{success: true, count, data: [...]}`
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// `{success: true, data}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{success: true, message}`, used by deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_response_counts() {
        let body = serde_json::to_value(ListResponse::new(vec!["a", "b"])).unwrap();
        assert_eq!(body, json!({"success": true, "count": 2, "data": ["a", "b"]}));
    }

    #[test]
    fn test_message_response() {
        let body = serde_json::to_value(MessageResponse::new("Event deleted")).unwrap();
        assert_eq!(body, json!({"success": true, "message": "Event deleted"}));
    }
}
