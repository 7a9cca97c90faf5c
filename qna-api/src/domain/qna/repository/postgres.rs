//! PostgreSQL repository backed by pgvector similarity.

use async_trait::async_trait;
use pgvector::Vector;
use sqlx::{PgPool, QueryBuilder};

use crate::domain::qna::traits::{QnaRepository, Result};
use crate::domain::qna::types::{QnaMatch, SearchPage};
use crate::domain::QueryType;

#[derive(Clone)]
pub struct PgQnaRepository {
    pool: PgPool,
}

impl PgQnaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct QnaMatchRow {
    question: String,
    answer: String,
    similarity: f64,
}

impl From<QnaMatchRow> for QnaMatch {
    fn from(row: QnaMatchRow) -> Self {
        Self {
            question: row.question,
            answer: row.answer,
            similarity: row.similarity,
        }
    }
}

#[async_trait]
impl QnaRepository for PgQnaRepository {
    async fn best_match(
        &self,
        query_type: QueryType,
        embedding: &[f32],
    ) -> Result<Option<QnaMatch>> {
        Ok(self
            .top_matches(query_type, embedding, 1)
            .await?
            .into_iter()
            .next())
    }

    async fn top_matches(
        &self,
        query_type: QueryType,
        embedding: &[f32],
        k: i64,
    ) -> Result<Vec<QnaMatch>> {
        // The table name comes from the QueryType enum, never from
        // request input.
        let sql = format!(
            r#"
            SELECT question, answer, 1 - (embedding <=> $1) AS similarity
            FROM {}
            WHERE embedding IS NOT NULL
            ORDER BY embedding <=> $1
            LIMIT $2
            "#,
            query_type.qna_table()
        );

        let rows = sqlx::query_as::<_, QnaMatchRow>(&sql)
            .bind(Vector::from(embedding.to_vec()))
            .bind(k)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(QnaMatch::from).collect())
    }

    async fn increment_search_count(
        &self,
        query_type: QueryType,
        question: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO popular_question (question, category, search_count)
            VALUES ($1, $2, 1)
            ON CONFLICT (question, category)
            DO UPDATE SET search_count = popular_question.search_count + 1
            "#,
        )
        .bind(question)
        .bind(query_type.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn popular_questions(
        &self,
        query_type: QueryType,
        limit: i64,
    ) -> Result<Vec<String>> {
        let questions = sqlx::query_scalar::<_, String>(
            r#"
            SELECT question
            FROM popular_question
            WHERE category = $1
            ORDER BY search_count DESC
            LIMIT $2
            "#,
        )
        .bind(query_type.to_string())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn keyword_search(
        &self,
        query_type: QueryType,
        keywords: &[String],
        limit: i64,
        offset: i64,
    ) -> Result<SearchPage> {
        if keywords.is_empty() {
            return Ok(SearchPage::empty());
        }

        // Rows come back in storage order; no secondary sort is applied.
        let mut page_query = QueryBuilder::new("SELECT question FROM ");
        page_query.push(query_type.qna_table());
        push_keyword_predicate(&mut page_query, keywords);
        page_query.push(" LIMIT ");
        page_query.push_bind(limit);
        page_query.push(" OFFSET ");
        page_query.push_bind(offset);

        let matching_questions: Vec<String> = page_query
            .build_query_scalar()
            .fetch_all(&self.pool)
            .await?;

        // Same predicate and binds as the page query. The total is
        // computed independently and can drift from the page under
        // concurrent writes.
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM ");
        count_query.push(query_type.qna_table());
        push_keyword_predicate(&mut count_query, keywords);

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok(SearchPage {
            matching_questions,
            total,
        })
    }
}

/// Appends `WHERE question ILIKE '%kw%' AND ...` for every keyword.
fn push_keyword_predicate(query: &mut QueryBuilder<'_, sqlx::Postgres>, keywords: &[String]) {
    query.push(" WHERE ");
    let mut conditions = query.separated(" AND ");
    for keyword in keywords {
        conditions.push("question ILIKE ");
        conditions.push_bind_unseparated(format!("%{keyword}%"));
    }
}
