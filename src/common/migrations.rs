// src/common/migrations.rs
//! Database schema management

use sqlx::SqlitePool;
use tracing::info;

/// Create all tables and indexes if they do not exist yet.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    create_user_tables(pool).await?;
    create_job_tables(pool).await?;
    create_application_tables(pool).await?;
    create_indexes(pool).await?;

    info!("Database migration completed");

    Ok(())
}

async fn create_user_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // id is the identity-provider subject, not a generated ID
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL,
            role TEXT CHECK (role IN ('candidate', 'recruiter')),
            created_at TEXT,
            updated_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_job_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id TEXT PRIMARY KEY,
            recruiter_id TEXT NOT NULL REFERENCES users(id),
            job_title TEXT NOT NULL,
            company_name TEXT NOT NULL,
            company_linkedin_url TEXT,
            workplace_type TEXT NOT NULL CHECK (workplace_type IN ('On-site', 'Hybrid', 'Remote')),
            job_location TEXT NOT NULL,
            employment_type TEXT NOT NULL,
            job_description TEXT NOT NULL,
            skills TEXT,
            industry TEXT NOT NULL,
            job_function TEXT NOT NULL,
            salary_min INTEGER,
            salary_max INTEGER,
            salary_currency TEXT DEFAULT 'USD',
            status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'closed')),
            expiry_date TEXT,
            applicants_count INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_application_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS applications (
            id TEXT PRIMARY KEY,
            job_id TEXT NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
            candidate_id TEXT NOT NULL REFERENCES users(id),
            full_name TEXT,
            email TEXT,
            phone TEXT,
            education_level TEXT,
            years_of_experience REAL,
            cover_letter TEXT,
            resume_url TEXT NOT NULL,
            resume_text TEXT,
            status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'shortlisted', 'rejected')),
            rejection_feedback TEXT,
            created_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Written by the external scoring backend, read-only here
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS scores (
            id TEXT PRIMARY KEY,
            application_id TEXT NOT NULL REFERENCES applications(id) ON DELETE CASCADE,
            score REAL NOT NULL,
            created_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // One application per (job, candidate), enforced by the store itself so
    // concurrent submissions cannot both slip past an application-level check
    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_applications_job_candidate
         ON applications(job_id, candidate_id)",
    )
    .execute(pool)
    .await?;

    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_jobs_recruiter ON jobs(recruiter_id)",
        "CREATE INDEX IF NOT EXISTS idx_jobs_status ON jobs(status)",
        "CREATE INDEX IF NOT EXISTS idx_applications_job ON applications(job_id)",
        "CREATE INDEX IF NOT EXISTS idx_scores_application ON scores(application_id)",
    ];

    for index_sql in indexes {
        sqlx::query(index_sql).execute(pool).await?;
    }

    Ok(())
}
