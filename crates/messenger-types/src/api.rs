use serde::{Deserialize, Serialize};

use crate::models::Message;

// -- Session --

/// Claims carried by the signed session cookie. Shared by the login handler
/// (issue) and the admin guard (validate).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub logged_in: bool,
}

// -- Messages --

#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub message: String,
    pub sender: String,
}

/// Body of every successful REST read, including the 201 returned on create.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub result: bool,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
