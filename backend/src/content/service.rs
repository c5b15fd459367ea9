use std::collections::HashMap;

use chrono::Utc;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::content::model::{
    CreatePageRequest, Page, PageWithSections, Section, SectionInput, SectionRow,
    UpdatePageRequest,
};
use crate::error::ApiError;

#[derive(Clone)]
pub struct PageService {
    db_pool: PgPool,
}

impl PageService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    pub async fn list_pages(&self) -> Result<Vec<PageWithSections>, ApiError> {
        let pages = sqlx::query_as::<_, Page>("SELECT * FROM pages ORDER BY created_at DESC")
            .fetch_all(&self.db_pool)
            .await?;

        let ids: Vec<Uuid> = pages.iter().map(|p| p.id).collect();
        let rows = sqlx::query_as::<_, SectionRow>(
            "SELECT * FROM sections WHERE page_id = ANY($1) ORDER BY position",
        )
        .bind(&ids)
        .fetch_all(&self.db_pool)
        .await?;

        let mut by_page: HashMap<Uuid, Vec<Section>> = HashMap::new();
        for row in rows {
            by_page.entry(row.page_id).or_default().push(row.into());
        }

        Ok(pages
            .into_iter()
            .map(|page| {
                let sections = by_page.remove(&page.id).unwrap_or_default();
                PageWithSections::new(page, sections)
            })
            .collect())
    }

    pub async fn get_page(&self, id: Uuid) -> Result<PageWithSections, ApiError> {
        let page = sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("Page not found".to_string()))?;

        self.with_sections(page).await
    }

    pub async fn get_page_by_slug(&self, slug: &str) -> Result<PageWithSections, ApiError> {
        let page = sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Page '{}' not found", slug)))?;

        self.with_sections(page).await
    }

    /// Unpublished pages are reported as missing
    pub async fn get_published_page(&self, slug: &str) -> Result<PageWithSections, ApiError> {
        let page = self.get_page_by_slug(slug).await?;
        if !page.page.is_published {
            return Err(ApiError::NotFound(format!("Page '{}' not found", slug)));
        }
        Ok(page)
    }

    async fn with_sections(&self, page: Page) -> Result<PageWithSections, ApiError> {
        let rows = sqlx::query_as::<_, SectionRow>(
            "SELECT * FROM sections WHERE page_id = $1 ORDER BY position",
        )
        .bind(page.id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(PageWithSections::new(
            page,
            rows.into_iter().map(Section::from).collect(),
        ))
    }

    pub async fn create_page(&self, request: CreatePageRequest) -> Result<PageWithSections, ApiError> {
        let mut tx = self.db_pool.begin().await?;
        let now = Utc::now();

        let page = sqlx::query_as::<_, Page>(
            r#"
            INSERT INTO pages (id, title, slug, description, is_published, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.title)
        .bind(&request.slug)
        .bind(&request.description)
        .bind(request.is_published)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let sections = insert_sections(&mut tx, page.id, request.sections).await?;
        tx.commit().await?;

        tracing::info!(page_id = %page.id, slug = %page.slug, sections = sections.len(), "Page created");

        Ok(PageWithSections::new(page, sections))
    }

    /// Update page fields; supplied sections replace the existing ones in the same transaction
    pub async fn update_page(
        &self,
        id: Uuid,
        request: UpdatePageRequest,
    ) -> Result<PageWithSections, ApiError> {
        let mut tx = self.db_pool.begin().await?;

        let page = sqlx::query_as::<_, Page>(
            r#"
            UPDATE pages SET
                title = COALESCE($1, title),
                slug = COALESCE($2, slug),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                is_published = COALESCE($5, is_published),
                updated_at = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&request.title)
        .bind(&request.slug)
        .bind(request.description.is_some())
        .bind(request.description.clone().flatten())
        .bind(request.is_published)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Page not found".to_string()))?;

        let sections = match request.sections {
            Some(inputs) => {
                sqlx::query("DELETE FROM sections WHERE page_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                insert_sections(&mut tx, id, inputs).await?
            }
            None => sqlx::query_as::<_, SectionRow>(
                "SELECT * FROM sections WHERE page_id = $1 ORDER BY position",
            )
            .bind(id)
            .fetch_all(&mut *tx)
            .await?
            .into_iter()
            .map(Section::from)
            .collect(),
        };

        tx.commit().await?;

        tracing::info!(page_id = %id, "Page updated");

        Ok(PageWithSections::new(page, sections))
    }

    pub async fn delete_page(&self, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Page with ID {} not found", id)));
        }

        tracing::info!(page_id = %id, "Page deleted");

        Ok(())
    }
}

async fn insert_sections(
    tx: &mut Transaction<'_, Postgres>,
    page_id: Uuid,
    inputs: Vec<SectionInput>,
) -> Result<Vec<Section>, ApiError> {
    let mut sections = Vec::with_capacity(inputs.len());

    for (index, input) in inputs.into_iter().enumerate() {
        let section = input.into_section(page_id, index as i32);
        sqlx::query(
            r#"
            INSERT INTO sections (id, page_id, section_type, position, is_visible, content)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(section.id)
        .bind(section.page_id)
        .bind(section.section_type)
        .bind(section.order)
        .bind(section.is_visible)
        .bind(Json(&section.content))
        .execute(&mut **tx)
        .await?;
        sections.push(section);
    }

    Ok(sections)
}
