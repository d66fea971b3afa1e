use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::{
    auth::{jwt::AuthDoctor, repo::Doctor},
    db::AppState,
};

use super::dto::{
    DoctorOption, InboxItem, MyQueriesParams, MyQueryItem, QuerySubmitted, SendReplyRequest,
    SubmitQueryRequest,
};
use super::repo::{self, Reply};

// --- public routers ---

pub fn patient_router() -> Router<AppState> {
    Router::new()
        .route("/doctors", get(list_doctors))
        .route("/queries", post(submit_query).get(my_queries))
}

pub fn inbox_router() -> Router<AppState> {
    Router::new()
        .route("/inbox", get(inbox))
        .route("/inbox/replies", post(send_reply))
}

// --- handlers ---

#[instrument(skip(state))]
pub async fn list_doctors(
    State(state): State<AppState>,
) -> Result<Json<Vec<DoctorOption>>, (StatusCode, String)> {
    let doctors = Doctor::list_all(&state.db).await.map_err(internal)?;
    let items = doctors
        .into_iter()
        .map(|d| DoctorOption {
            id: d.id,
            name: d.name,
            phone: d.phone,
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state, payload))]
pub async fn submit_query(
    State(state): State<AppState>,
    Json(payload): Json<SubmitQueryRequest>,
) -> Result<(StatusCode, Json<QuerySubmitted>), (StatusCode, String)> {
    // Same clamp the submission form applies; name and symptoms stay unchecked.
    let age = payload.age.clamp(1, 120);
    let query_token = Uuid::new_v4().to_string();

    let query = repo::create_query(
        &state.db,
        &payload.name,
        age,
        &payload.symptoms,
        payload.doctor_id,
        &query_token,
    )
    .await
    .map_err(internal)?;

    info!(query_id = %query.id, doctor_id = %query.doctor_id, "patient query submitted");
    Ok((
        StatusCode::CREATED,
        Json(QuerySubmitted {
            id: query.id,
            query_token: query.query_token,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn my_queries(
    State(state): State<AppState>,
    Query(params): Query<MyQueriesParams>,
) -> Result<Json<Vec<MyQueryItem>>, (StatusCode, String)> {
    let queries = repo::list_by_name(&state.db, &params.name)
        .await
        .map_err(internal)?;

    let mut items = Vec::with_capacity(queries.len());
    for q in queries {
        let reply = repo::first_reply_for_token(&state.db, &q.query_token)
            .await
            .map_err(internal)?;
        items.push(MyQueryItem {
            id: q.id,
            age: q.age,
            symptoms: q.symptoms,
            doctor_id: q.doctor_id,
            query_token: q.query_token,
            reply: reply.map(|r: Reply| r.reply_text),
        });
    }
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn inbox(
    State(state): State<AppState>,
    AuthDoctor(doctor_id): AuthDoctor,
) -> Result<Json<Vec<InboxItem>>, (StatusCode, String)> {
    let queries = repo::list_by_doctor(&state.db, doctor_id)
        .await
        .map_err(internal)?;

    let mut items = Vec::with_capacity(queries.len());
    for q in queries {
        let reply = repo::first_reply_for_token(&state.db, &q.query_token)
            .await
            .map_err(internal)?;
        items.push(InboxItem {
            id: q.id,
            name: q.name,
            age: q.age,
            symptoms: q.symptoms,
            query_token: q.query_token,
            reply: reply.map(|r| r.reply_text),
        });
    }
    Ok(Json(items))
}

#[instrument(skip(state, payload))]
pub async fn send_reply(
    State(state): State<AppState>,
    AuthDoctor(doctor_id): AuthDoctor,
    Json(payload): Json<SendReplyRequest>,
) -> Result<(StatusCode, Json<Reply>), (StatusCode, String)> {
    // Re-sending is allowed; extra rows simply never surface on the read path.
    let reply = repo::create_reply(&state.db, &payload.query_token, &payload.reply_text)
        .await
        .map_err(internal)?;

    info!(reply_id = %reply.id, doctor_id = %doctor_id, "reply sent");
    Ok((StatusCode::CREATED, Json(reply)))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    error!(error = %e, "storage failure");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::db::test_state;

    async fn add_doctor(state: &AppState, username: &str) -> Doctor {
        Doctor::create(&state.db, "Ana", "555-1111", username, &hash_password("pw1"))
            .await
            .expect("create doctor")
    }

    fn bob_payload(doctor_id: i64, age: i64) -> SubmitQueryRequest {
        SubmitQueryRequest {
            name: "Bob".into(),
            age,
            symptoms: "cough".into(),
            doctor_id,
        }
    }

    #[tokio::test]
    async fn submit_clamps_age_into_range() {
        let state = test_state().await;
        let ana = add_doctor(&state, "ana1").await;

        let (status, Json(submitted)) =
            submit_query(State(state.clone()), Json(bob_payload(ana.id, 400)))
                .await
                .expect("submit");
        assert_eq!(status, StatusCode::CREATED);

        let inbox = repo::list_by_doctor(&state.db, ana.id)
            .await
            .expect("inbox");
        assert_eq!(inbox[0].age, 120);
        assert_eq!(inbox[0].query_token, submitted.query_token);
    }

    #[tokio::test]
    async fn list_doctors_exposes_name_and_phone() {
        let state = test_state().await;
        add_doctor(&state, "ana1").await;

        let Json(items) = list_doctors(State(state)).await.expect("list");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Ana");
        assert_eq!(items[0].phone, "555-1111");
    }

    #[tokio::test]
    async fn my_queries_reports_missing_reply_as_null() {
        let state = test_state().await;
        let ana = add_doctor(&state, "ana1").await;
        submit_query(State(state.clone()), Json(bob_payload(ana.id, 30)))
            .await
            .expect("submit");

        let Json(items) = my_queries(
            State(state),
            Query(MyQueriesParams { name: "Bob".into() }),
        )
        .await
        .expect("list");
        assert_eq!(items.len(), 1);
        assert!(items[0].reply.is_none());

        let json = serde_json::to_string(&items[0]).expect("serialize");
        assert!(json.contains("\"reply\":null"));
    }

    #[tokio::test]
    async fn reply_flows_back_to_the_patient_view() {
        let state = test_state().await;
        let ana = add_doctor(&state, "ana1").await;
        let (_, Json(submitted)) = submit_query(State(state.clone()), Json(bob_payload(ana.id, 30)))
            .await
            .expect("submit");

        send_reply(
            State(state.clone()),
            AuthDoctor(ana.id),
            Json(SendReplyRequest {
                query_token: submitted.query_token.clone(),
                reply_text: "rest and fluids".into(),
            }),
        )
        .await
        .expect("reply");

        let Json(items) = my_queries(
            State(state),
            Query(MyQueriesParams { name: "Bob".into() }),
        )
        .await
        .expect("list");
        assert_eq!(items[0].reply.as_deref(), Some("rest and fluids"));
    }
}
