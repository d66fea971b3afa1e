use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// Patient query row. `query_token` correlates reply rows to this submission.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PatientQuery {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub symptoms: String,
    pub doctor_id: i64,
    pub query_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reply {
    pub id: i64,
    pub query_token: String,
    pub reply_text: String,
}

pub async fn create_query(
    db: &SqlitePool,
    name: &str,
    age: i64,
    symptoms: &str,
    doctor_id: i64,
    query_token: &str,
) -> anyhow::Result<PatientQuery> {
    let row = sqlx::query_as::<_, PatientQuery>(
        r#"
        INSERT INTO patients (name, age, symptoms, doctor_id, query_token)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, name, age, symptoms, doctor_id, query_token
        "#,
    )
    .bind(name)
    .bind(age)
    .bind(symptoms)
    .bind(doctor_id)
    .bind(query_token)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Inbox listing: id order is the store's insertion order.
pub async fn list_by_doctor(db: &SqlitePool, doctor_id: i64) -> anyhow::Result<Vec<PatientQuery>> {
    let rows = sqlx::query_as::<_, PatientQuery>(
        r#"
        SELECT id, name, age, symptoms, doctor_id, query_token
        FROM patients
        WHERE doctor_id = ?
        ORDER BY id
        "#,
    )
    .bind(doctor_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Exact name match; the name string is the only patient identity.
pub async fn list_by_name(db: &SqlitePool, name: &str) -> anyhow::Result<Vec<PatientQuery>> {
    let rows = sqlx::query_as::<_, PatientQuery>(
        r#"
        SELECT id, name, age, symptoms, doctor_id, query_token
        FROM patients
        WHERE name = ?
        ORDER BY id
        "#,
    )
    .bind(name)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn create_reply(
    db: &SqlitePool,
    query_token: &str,
    reply_text: &str,
) -> anyhow::Result<Reply> {
    let row = sqlx::query_as::<_, Reply>(
        r#"
        INSERT INTO replies (query_token, reply_text)
        VALUES (?, ?)
        RETURNING id, query_token, reply_text
        "#,
    )
    .bind(query_token)
    .bind(reply_text)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// The first reply row for a token wins; later rows stay stored but unread.
pub async fn first_reply_for_token(
    db: &SqlitePool,
    query_token: &str,
) -> anyhow::Result<Option<Reply>> {
    let reply = sqlx::query_as::<_, Reply>(
        r#"
        SELECT id, query_token, reply_text
        FROM replies
        WHERE query_token = ?
        ORDER BY id
        LIMIT 1
        "#,
    )
    .bind(query_token)
    .fetch_optional(db)
    .await?;
    Ok(reply)
}
