//! Database migrations: schema and stored procedures
//!
//! The API talks to the database exclusively through the five functions
//! installed here; every function returns a `{success, message, data}` JSON
//! reply. Applied migrations are recorded in a `_migrations` ledger so
//! startup is idempotent.

use sqlx::PgPool;
use tracing::info;

use crate::domain::DomainError;

/// Represents a database migration
#[derive(Debug, Clone)]
pub struct Migration {
    /// Monotonically increasing version
    pub version: i64,
    /// Human-readable description
    pub description: String,
    /// SQL to run when applying the migration
    pub up: String,
}

impl Migration {
    pub fn new(version: i64, description: impl Into<String>, up: impl Into<String>) -> Self {
        Self {
            version,
            description: description.into(),
            up: up.into(),
        }
    }
}

/// Applies embedded migrations against PostgreSQL
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs all pending migrations in version order
    pub async fn run(&self, migrations: &[Migration]) -> Result<(), DomainError> {
        self.ensure_migrations_table().await?;

        for migration in migrations {
            self.run_migration(migration).await?;
        }

        Ok(())
    }

    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::raw_sql(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    async fn run_migration(&self, migration: &Migration) -> Result<(), DomainError> {
        let applied: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
                .bind(migration.version)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::storage(format!("Failed to check migration status: {}", e))
                })?;

        if applied {
            return Ok(());
        }

        sqlx::raw_sql(&migration.up)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to run migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to record migration {}: {}",
                    migration.version, e
                ))
            })?;

        info!(
            version = migration.version,
            description = %migration.description,
            "Applied migration"
        );

        Ok(())
    }
}

/// Migrations for the user store
pub fn user_migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "Create users table",
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id SERIAL PRIMARY KEY,
                full_name VARCHAR(100) NOT NULL,
                email VARCHAR(100) NOT NULL,
                phone VARCHAR(20) NOT NULL,
                password_hash VARCHAR(64) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email);
            "#,
        ),
        Migration::new(
            2,
            "Create user functions",
            r#"
            CREATE OR REPLACE FUNCTION create_user(
                p_full_name VARCHAR, p_email VARCHAR, p_phone VARCHAR, p_password_hash VARCHAR
            ) RETURNS json AS $$
            DECLARE
                v_id INTEGER;
            BEGIN
                IF EXISTS (SELECT 1 FROM users WHERE email = p_email) THEN
                    RETURN json_build_object(
                        'success', false, 'message', 'Email already exists', 'data', NULL);
                END IF;

                INSERT INTO users (full_name, email, phone, password_hash)
                VALUES (p_full_name, p_email, p_phone, p_password_hash)
                RETURNING id INTO v_id;

                RETURN json_build_object(
                    'success', true, 'message', 'User created successfully',
                    'data', json_build_object('id', v_id));
            EXCEPTION WHEN OTHERS THEN
                RETURN json_build_object('success', false, 'message', SQLERRM, 'data', NULL);
            END;
            $$ LANGUAGE plpgsql;

            CREATE OR REPLACE FUNCTION get_all_users() RETURNS json AS $$
            DECLARE
                v_data json;
            BEGIN
                SELECT json_agg(json_build_object(
                    'id', u.id, 'fullName', u.full_name, 'email', u.email,
                    'phone', u.phone, 'createdAt', u.created_at
                ) ORDER BY u.id) INTO v_data FROM users u;

                RETURN json_build_object(
                    'success', true, 'message', 'Users retrieved successfully', 'data', v_data);
            END;
            $$ LANGUAGE plpgsql;

            CREATE OR REPLACE FUNCTION get_user_by_id(p_id INTEGER) RETURNS json AS $$
            DECLARE
                v_data json;
            BEGIN
                SELECT json_build_object(
                    'id', u.id, 'fullName', u.full_name, 'email', u.email,
                    'phone', u.phone, 'createdAt', u.created_at)
                INTO v_data FROM users u WHERE u.id = p_id;

                RETURN json_build_object(
                    'success', true, 'message', 'User retrieved successfully', 'data', v_data);
            END;
            $$ LANGUAGE plpgsql;

            CREATE OR REPLACE FUNCTION update_user(
                p_id INTEGER, p_full_name VARCHAR, p_email VARCHAR, p_phone VARCHAR,
                p_password_hash VARCHAR
            ) RETURNS json AS $$
            BEGIN
                IF EXISTS (SELECT 1 FROM users WHERE email = p_email AND id <> p_id) THEN
                    RETURN json_build_object(
                        'success', false, 'message', 'Email already exists', 'data', NULL);
                END IF;

                UPDATE users
                SET full_name = p_full_name,
                    email = p_email,
                    phone = p_phone,
                    password_hash = COALESCE(p_password_hash, password_hash)
                WHERE id = p_id;

                IF NOT FOUND THEN
                    RETURN json_build_object(
                        'success', false, 'message', 'User not found', 'data', NULL);
                END IF;

                RETURN json_build_object(
                    'success', true, 'message', 'User updated successfully', 'data', NULL);
            EXCEPTION WHEN OTHERS THEN
                RETURN json_build_object('success', false, 'message', SQLERRM, 'data', NULL);
            END;
            $$ LANGUAGE plpgsql;

            CREATE OR REPLACE FUNCTION delete_user(p_id INTEGER) RETURNS json AS $$
            BEGIN
                DELETE FROM users WHERE id = p_id;

                IF NOT FOUND THEN
                    RETURN json_build_object(
                        'success', false, 'message', 'User not found', 'data', NULL);
                END IF;

                RETURN json_build_object(
                    'success', true, 'message', 'User deleted successfully', 'data', NULL);
            END;
            $$ LANGUAGE plpgsql;
            "#,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_and_unique() {
        let migrations = user_migrations();

        assert!(!migrations.is_empty());

        for pair in migrations.windows(2) {
            assert!(pair[0].version < pair[1].version);
        }
    }

    #[test]
    fn test_migrations_cover_all_procedures() {
        let sql: String = user_migrations().iter().map(|m| m.up.clone()).collect();

        for function in [
            "create_user",
            "get_all_users",
            "get_user_by_id",
            "update_user",
            "delete_user",
        ] {
            assert!(sql.contains(&format!("FUNCTION {}", function)));
        }
    }
}
