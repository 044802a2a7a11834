//! Hosted relational roster backend
//!
//! Teams, shared species records and positional member associations live
//! in three tables. Mutations on unknown ids affect zero rows and report
//! success, matching the store's uniform no-op policy.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::Row;

use crate::domain::{DomainError, RosterBackend, SpeciesId, SpeciesRecord, Team, TeamId, UserId};

const MAX_CONNECTIONS: u32 = 10;
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Hosted backend over a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct HostedRosterBackend {
    pool: PgPool,
}

impl HostedRosterBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and bootstrap the schema
    pub async fn connect(url: &str) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .connect(url)
            .await
            .map_err(|e| DomainError::backend(format!("Failed to connect to PostgreSQL: {}", e)))?;

        let backend = Self::new(pool);
        backend.ensure_schema().await?;
        Ok(backend)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ensures the roster tables exist
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS teams (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                user_id TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS species (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                image TEXT,
                types JSONB NOT NULL DEFAULT '[]',
                base_experience INTEGER NOT NULL DEFAULT 0
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS team_members (
                team_id TEXT NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
                species_id INTEGER NOT NULL REFERENCES species(id),
                position INTEGER NOT NULL,
                added_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (team_id, species_id)
            )
            "#,
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::backend(format!("Failed to create table: {}", e)))?;
        }

        Ok(())
    }

    /// Member records per team id, ordered by stored position
    async fn fetch_members(
        &self,
        team_ids: &[String],
    ) -> Result<HashMap<String, Vec<SpeciesRecord>>, DomainError> {
        let mut members: HashMap<String, Vec<SpeciesRecord>> = HashMap::new();

        if team_ids.is_empty() {
            return Ok(members);
        }

        let rows = sqlx::query(
            r#"
            SELECT m.team_id, s.id AS species_id, s.name, s.image, s.types, s.base_experience
            FROM team_members m
            JOIN species s ON s.id = m.species_id
            WHERE m.team_id = ANY($1)
            ORDER BY m.position
            "#,
        )
        .bind(team_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::backend(format!("Failed to list team members: {}", e)))?;

        for row in rows {
            let team_id: String = row.try_get("team_id").map_err(decode_error)?;
            let species_id: i32 = row.try_get("species_id").map_err(decode_error)?;
            let name: String = row.try_get("name").map_err(decode_error)?;
            let image: Option<String> = row.try_get("image").map_err(decode_error)?;
            let types: Json<Vec<String>> = row.try_get("types").map_err(decode_error)?;
            let base_experience: i32 = row.try_get("base_experience").map_err(decode_error)?;

            let mut record = SpeciesRecord::new(species_id as u32, name)
                .with_types(types.0)
                .with_base_experience(base_experience as u32);
            if let Some(image) = image {
                record = record.with_image(image);
            }

            members.entry(team_id).or_default().push(record);
        }

        Ok(members)
    }
}

fn decode_error(e: sqlx::Error) -> DomainError {
    DomainError::backend(format!("Failed to decode row: {}", e))
}

#[async_trait]
impl RosterBackend for HostedRosterBackend {
    async fn list_teams(&self, user: &UserId) -> Result<Vec<Team>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, user_id, created_at, updated_at
            FROM teams
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::backend(format!("Failed to list teams: {}", e)))?;

        let ids: Vec<String> = rows
            .iter()
            .map(|row| row.try_get("id").map_err(decode_error))
            .collect::<Result<_, _>>()?;
        let mut members = self.fetch_members(&ids).await?;

        let mut teams = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.try_get("id").map_err(decode_error)?;
            let team_members = members.remove(&id).unwrap_or_default();

            teams.push(Team::restore(
                TeamId::new(id),
                row.try_get("name").map_err(decode_error)?,
                UserId::new(row.try_get::<String, _>("user_id").map_err(decode_error)?),
                team_members,
                row.try_get("created_at").map_err(decode_error)?,
                row.try_get("updated_at").map_err(decode_error)?,
            ));
        }

        Ok(teams)
    }

    async fn insert_team(&self, team: &Team) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO teams (id, name, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(team.id().as_str())
        .bind(team.name())
        .bind(team.user_id().as_str())
        .bind(team.created_at())
        .bind(team.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::backend(format!("Failed to create team: {}", e)))?;

        Ok(())
    }

    async fn rename_team(&self, id: &TeamId, name: &str) -> Result<(), DomainError> {
        // Zero affected rows means the team is unknown here; that is a no-op.
        sqlx::query("UPDATE teams SET name = $2, updated_at = NOW() WHERE id = $1")
            .bind(id.as_str())
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::backend(format!("Failed to rename team: {}", e)))?;

        Ok(())
    }

    async fn delete_team(&self, id: &TeamId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::backend(format!("Failed to delete team: {}", e)))?;

        Ok(())
    }

    async fn add_member(
        &self,
        id: &TeamId,
        species: &SpeciesRecord,
        position: usize,
    ) -> Result<(), DomainError> {
        // Species records are shared, referentially-keyed data: upsert on
        // first use, never delete.
        sqlx::query(
            r#"
            INSERT INTO species (id, name, image, types, base_experience)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                image = EXCLUDED.image,
                types = EXCLUDED.types,
                base_experience = EXCLUDED.base_experience
            "#,
        )
        .bind(species.id() as i32)
        .bind(species.name())
        .bind(species.image())
        .bind(Json(species.types().to_vec()))
        .bind(species.base_experience() as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::backend(format!("Failed to upsert species: {}", e)))?;

        sqlx::query("INSERT INTO team_members (team_id, species_id, position) VALUES ($1, $2, $3)")
            .bind(id.as_str())
            .bind(species.id() as i32)
            .bind(position as i32)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::backend(format!("Failed to add team member: {}", e)))?;

        Ok(())
    }

    async fn remove_member(&self, id: &TeamId, species_id: SpeciesId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM team_members WHERE team_id = $1 AND species_id = $2")
            .bind(id.as_str())
            .bind(species_id as i32)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::backend(format!("Failed to remove team member: {}", e)))?;

        Ok(())
    }
}
