use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use thiserror::Error;

use crate::auth::password::hash_password;

/// Doctor record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Registration outcome: a duplicate username is expected and reportable,
/// anything else from the store is not.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("username already exists")]
    UsernameTaken,
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

impl Doctor {
    /// Insert a new doctor. The UNIQUE constraint on username is the only
    /// duplicate check; there is no pre-check query.
    pub async fn create(
        db: &SqlitePool,
        name: &str,
        phone: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<Doctor, RegisterError> {
        let res = sqlx::query_as::<_, Doctor>(
            r#"
            INSERT INTO doctors (name, phone, username, password_hash)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, phone, username, password_hash
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(username)
        .bind(password_hash)
        .fetch_one(db)
        .await;

        match res {
            Ok(doctor) => Ok(doctor),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(RegisterError::UsernameTaken)
            }
            Err(e) => Err(RegisterError::Db(e)),
        }
    }

    /// Credential match in a single query: username and digest must both be
    /// equal. Unknown username and wrong password are indistinguishable.
    pub async fn find_by_credentials(
        db: &SqlitePool,
        username: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<Doctor>> {
        let doctor = sqlx::query_as::<_, Doctor>(
            r#"
            SELECT id, name, phone, username, password_hash
            FROM doctors
            WHERE username = ? AND password_hash = ?
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(db)
        .await?;
        Ok(doctor)
    }

    pub async fn verify(
        db: &SqlitePool,
        username: &str,
        password: &str,
    ) -> anyhow::Result<Option<Doctor>> {
        Self::find_by_credentials(db, username, &hash_password(password)).await
    }

    pub async fn list_all(db: &SqlitePool) -> anyhow::Result<Vec<Doctor>> {
        let rows = sqlx::query_as::<_, Doctor>(
            r#"
            SELECT id, name, phone, username, password_hash
            FROM doctors
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    async fn register(
        db: &SqlitePool,
        username: &str,
        password: &str,
    ) -> Result<Doctor, RegisterError> {
        Doctor::create(db, "Ana", "555-1111", username, &hash_password(password)).await
    }

    #[tokio::test]
    async fn register_then_verify_roundtrip() {
        let db = test_pool().await;
        let doctor = register(&db, "ana1", "pw1").await.expect("create doctor");
        let found = Doctor::verify(&db, "ana1", "pw1")
            .await
            .expect("verify query")
            .expect("doctor matches");
        assert_eq!(found.id, doctor.id);
        assert_eq!(found.name, "Ana");
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected_once() {
        let db = test_pool().await;
        register(&db, "ana1", "pw1").await.expect("first registration");
        let err = register(&db, "ana1", "other").await.unwrap_err();
        assert!(matches!(err, RegisterError::UsernameTaken));

        let doctors = Doctor::list_all(&db).await.expect("list");
        assert_eq!(doctors.len(), 1);
    }

    #[tokio::test]
    async fn verify_rejects_any_single_field_mismatch() {
        let db = test_pool().await;
        register(&db, "ana1", "pw1").await.expect("create doctor");
        assert!(Doctor::verify(&db, "ana1", "wrong").await.unwrap().is_none());
        assert!(Doctor::verify(&db, "nobody", "pw1").await.unwrap().is_none());
        assert!(Doctor::verify(&db, "nobody", "wrong").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn usernames_are_case_sensitive() {
        let db = test_pool().await;
        register(&db, "ana1", "pw1").await.expect("lowercase username");
        register(&db, "Ana1", "pw1").await.expect("capitalized username is distinct");
        assert!(Doctor::verify(&db, "ANA1", "pw1").await.unwrap().is_none());
    }
}
