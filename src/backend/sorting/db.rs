//! Database operations for sorting applications
//!
//! An application and its children (process steps, market segments, target
//! materials) are written in one transaction. Updates replace the children
//! wholesale.

use chrono::Utc;
use sqlx::{Row, SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::shared::sorting::{
    MarketSegment, ProcessStep, SortingApplication, SortingApplicationRequest, TargetMaterial,
};

async fn insert_children(
    conn: &mut SqliteConnection,
    application_id: Uuid,
    request: &SortingApplicationRequest,
) -> Result<(Vec<ProcessStep>, Vec<MarketSegment>, Vec<TargetMaterial>), sqlx::Error> {
    let mut steps = Vec::with_capacity(request.process_steps.len());
    for (order, step) in request.ordered_steps() {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO sorting_process_steps (id, application_id, name, description, step_order)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(application_id)
        .bind(step.name.trim())
        .bind(step.description.as_deref())
        .bind(order)
        .execute(&mut *conn)
        .await?;

        steps.push(ProcessStep {
            id,
            name: step.name.trim().to_string(),
            description: step.description.clone(),
            step_order: order,
        });
    }

    let mut segments = Vec::with_capacity(request.market_segments.len());
    for name in &request.market_segments {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO sorting_market_segments (id, application_id, name) VALUES (?, ?, ?)")
            .bind(id)
            .bind(application_id)
            .bind(name.trim())
            .execute(&mut *conn)
            .await?;
        segments.push(MarketSegment { id, name: name.trim().to_string() });
    }

    let mut materials = Vec::with_capacity(request.target_materials.len());
    for material in &request.target_materials {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO sorting_target_materials (id, application_id, name, description)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(application_id)
        .bind(material.name.trim())
        .bind(material.description.as_deref())
        .execute(&mut *conn)
        .await?;
        materials.push(TargetMaterial {
            id,
            name: material.name.trim().to_string(),
            description: material.description.clone(),
        });
    }

    Ok((steps, segments, materials))
}

async fn load_children(
    pool: &SqlitePool,
    application: &mut SortingApplication,
) -> Result<(), sqlx::Error> {
    let steps = sqlx::query(
        r#"
        SELECT id, name, description, step_order
        FROM sorting_process_steps
        WHERE application_id = ?
        ORDER BY step_order ASC, rowid ASC
        "#,
    )
    .bind(application.id)
    .fetch_all(pool)
    .await?;
    application.process_steps = steps
        .into_iter()
        .map(|row| ProcessStep {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            step_order: row.get("step_order"),
        })
        .collect();

    let segments = sqlx::query("SELECT id, name FROM sorting_market_segments WHERE application_id = ? ORDER BY rowid ASC")
        .bind(application.id)
        .fetch_all(pool)
        .await?;
    application.market_segments = segments
        .into_iter()
        .map(|row| MarketSegment { id: row.get("id"), name: row.get("name") })
        .collect();

    let materials = sqlx::query(
        "SELECT id, name, description FROM sorting_target_materials WHERE application_id = ? ORDER BY rowid ASC",
    )
    .bind(application.id)
    .fetch_all(pool)
    .await?;
    application.target_materials = materials
        .into_iter()
        .map(|row| TargetMaterial {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
        })
        .collect();

    Ok(())
}

/// List all applications with their children, by name
pub async fn list_applications(pool: &SqlitePool) -> Result<Vec<SortingApplication>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT id, name, description, created_at, updated_at FROM sorting_applications ORDER BY name ASC",
    )
    .fetch_all(pool)
    .await?;

    let mut applications = Vec::with_capacity(rows.len());
    for row in rows {
        let mut application = SortingApplication {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            process_steps: Vec::new(),
            market_segments: Vec::new(),
            target_materials: Vec::new(),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        };
        load_children(pool, &mut application).await?;
        applications.push(application);
    }
    Ok(applications)
}

pub async fn get_application(pool: &SqlitePool, id: Uuid) -> Result<Option<SortingApplication>, sqlx::Error> {
    let row = sqlx::query(
        "SELECT id, name, description, created_at, updated_at FROM sorting_applications WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let mut application = SortingApplication {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        process_steps: Vec::new(),
        market_segments: Vec::new(),
        target_materials: Vec::new(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    };
    load_children(pool, &mut application).await?;
    Ok(Some(application))
}

pub async fn create_application(
    pool: &SqlitePool,
    request: &SortingApplicationRequest,
) -> Result<SortingApplication, sqlx::Error> {
    let id = request.id.unwrap_or_else(Uuid::new_v4);
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO sorting_applications (id, name, description, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(request.name.trim())
    .bind(request.description.as_deref())
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    let (process_steps, market_segments, target_materials) = insert_children(&mut *tx, id, request).await?;
    tx.commit().await?;

    Ok(SortingApplication {
        id,
        name: request.name.trim().to_string(),
        description: request.description.clone(),
        process_steps,
        market_segments,
        target_materials,
        created_at: now,
        updated_at: now,
    })
}

/// Replace an application's fields and children; returns `false` if missing
pub async fn update_application(
    pool: &SqlitePool,
    id: Uuid,
    request: &SortingApplicationRequest,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("UPDATE sorting_applications SET name = ?, description = ?, updated_at = ? WHERE id = ?")
        .bind(request.name.trim())
        .bind(request.description.as_deref())
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Ok(false);
    }

    for table in ["sorting_process_steps", "sorting_market_segments", "sorting_target_materials"] {
        sqlx::query(&format!("DELETE FROM {} WHERE application_id = ?", table))
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    insert_children(&mut *tx, id, request).await?;

    tx.commit().await?;
    Ok(true)
}

pub async fn delete_application(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sorting_applications WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
