//! Shared database error helpers (SQLSTATE categorization, etc.)

/// Returns true if the given SQLSTATE code represents a unique constraint violation
/// across popular backends (Postgres 23505, SQLite 2067/1555).
pub fn is_unique_violation_code(code: &str) -> bool {
    matches!(code, "23505" | "2067" | "1555")
}

/// Returns true if a SeaORM error was caused by a unique constraint violation.
pub fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    #[cfg(any(feature = "pg", feature = "sqlite"))]
    if matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ) {
        return true;
    }

    let msg = err.to_string().to_lowercase();
    msg.contains("unique constraint") || msg.contains("duplicate key")
}
