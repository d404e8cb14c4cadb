use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Movie record. Wire names stay what clients already send (`movieTitle`,
/// `image`); `user_id` is a stored reference to the creating user.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Movie {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "movieTitle")]
    pub title: String,
    pub year: i32,
    #[serde(rename = "image")]
    pub image_url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Movie {
    pub async fn find_all(db: &PgPool) -> sqlx::Result<Vec<Movie>> {
        sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, user_id, title, year, image_url, created_at, updated_at
            FROM movies
            ORDER BY created_at
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Movie>> {
        sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, user_id, title, year, image_url, created_at, updated_at
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        title: &str,
        year: i32,
        image_url: &str,
    ) -> sqlx::Result<Movie> {
        sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (user_id, title, year, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, title, year, image_url, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(year)
        .bind(image_url)
        .fetch_one(db)
        .await
    }

    /// Full replace of the mutable fields. Returns the number of rows the
    /// update touched so callers can verify the mutation was observed.
    pub async fn replace(
        db: &PgPool,
        id: Uuid,
        title: &str,
        year: i32,
        image_url: &str,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET title = $2, year = $3, image_url = $4, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(year)
        .bind(image_url)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    /// Partial update: absent fields keep their stored value.
    pub async fn apply_patch(
        db: &PgPool,
        id: Uuid,
        title: Option<&str>,
        year: Option<i32>,
        image_url: Option<&str>,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET title = COALESCE($2, title),
                year = COALESCE($3, year),
                image_url = COALESCE($4, image_url),
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(year)
        .bind(image_url)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<u64> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_serializes_with_wire_names() {
        let movie = Movie {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Inception".into(),
            year: 2010,
            image_url: "https://example.com/inception.jpg".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };

        let json = serde_json::to_value(&movie).expect("serializes");
        assert_eq!(json["movieTitle"], "Inception");
        assert_eq!(json["image"], "https://example.com/inception.jpg");
        assert_eq!(json["year"], 2010);
        assert!(json.get("title").is_none());
        assert!(json.get("image_url").is_none());
    }
}
