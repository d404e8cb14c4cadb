use serde::Serialize;

/// Success body shared by every JSON endpoint. `error` is always `false`
/// here; the failing counterpart is rendered by [`crate::error::ApiError`].
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub error: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, result: T) -> Self {
        Self {
            error: false,
            message: message.into(),
            result: Some(result),
        }
    }
}

impl ApiResponse<()> {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            error: false,
            message: message.into(),
            result: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_with_result() {
        let body = ApiResponse::new("All movies are listed!", vec![1, 2, 3]);
        let json = serde_json::to_value(&body).expect("serializes");
        assert_eq!(json["error"], false);
        assert_eq!(json["message"], "All movies are listed!");
        assert_eq!(json["result"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn message_only_envelope_omits_result() {
        let body = ApiResponse::message_only("Logout successful!");
        let json = serde_json::to_value(&body).expect("serializes");
        assert!(json.get("result").is_none());
    }
}
