use serde::{Deserialize, Serialize};

/// Doctor directory entry shown to patients when choosing a doctor.
#[derive(Debug, Serialize)]
pub struct DoctorOption {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

/// Request body for a patient query submission.
#[derive(Debug, Deserialize)]
pub struct SubmitQueryRequest {
    pub name: String,
    pub age: i64,
    pub symptoms: String,
    pub doctor_id: i64,
}

#[derive(Debug, Serialize)]
pub struct QuerySubmitted {
    pub id: i64,
    pub query_token: String,
}

/// Query params for the patient "my queries" view.
#[derive(Debug, Deserialize)]
pub struct MyQueriesParams {
    pub name: String,
}

/// A patient query with its first reply, if any.
#[derive(Debug, Serialize)]
pub struct MyQueryItem {
    pub id: i64,
    pub age: i64,
    pub symptoms: String,
    pub doctor_id: i64,
    pub query_token: String,
    pub reply: Option<String>,
}

/// Inbox entry for the logged-in doctor.
#[derive(Debug, Serialize)]
pub struct InboxItem {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub symptoms: String,
    pub query_token: String,
    pub reply: Option<String>,
}

/// Request body for a doctor's reply to a query token.
#[derive(Debug, Deserialize)]
pub struct SendReplyRequest {
    pub query_token: String,
    pub reply_text: String,
}
