use anyhow::Context;
use rusqlite::Connection;

/// Ordered, named migrations applied exactly once each and recorded in the
/// `_migrations` table.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "0001_initial_schema",
        "CREATE TABLE venues (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            sport TEXT NOT NULL,
            description TEXT,
            base_price_per_hour REAL NOT NULL,
            open_time TEXT NOT NULL,
            close_time TEXT NOT NULL,
            approved INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE courts (
            id TEXT PRIMARY KEY,
            venue_id TEXT NOT NULL REFERENCES venues(id),
            name TEXT NOT NULL,
            sport TEXT NOT NULL,
            price_per_hour REAL,
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );

        CREATE TABLE bookings (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            venue_id TEXT NOT NULL REFERENCES venues(id),
            court_id TEXT NOT NULL REFERENCES courts(id),
            date TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            total_price REAL NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            services TEXT NOT NULL DEFAULT '[]',
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX idx_bookings_court_date ON bookings (court_id, date);

        CREATE TABLE reviews (
            id TEXT PRIMARY KEY,
            venue_id TEXT NOT NULL REFERENCES venues(id),
            user_id TEXT NOT NULL,
            rating INTEGER NOT NULL,
            comment TEXT,
            hidden INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );

        CREATE TABLE reports (
            id TEXT PRIMARY KEY,
            reporter_id TEXT NOT NULL,
            subject_kind TEXT NOT NULL,
            subject_id TEXT NOT NULL,
            reason TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'open',
            created_at TEXT NOT NULL,
            resolved_at TEXT
        );",
    ),
    (
        "0002_booking_slot_guard",
        // Backs the transactional check-and-reserve on booking creation:
        // two racing inserts for the same slot cannot both commit.
        "CREATE UNIQUE INDEX idx_bookings_slot_guard
            ON bookings (court_id, date, start_time)
            WHERE status NOT IN ('cancelled', 'refunded', 'expired');",
    ),
];

pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .context("failed to create migrations table")?;

    for (name, sql) in MIGRATIONS {
        let already_applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM _migrations WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .context("failed to check migration status")?;

        if already_applied {
            continue;
        }

        conn.execute_batch(sql)
            .with_context(|| format!("failed to apply migration: {name}"))?;

        conn.execute("INSERT INTO _migrations (name) VALUES (?1)", [name])
            .with_context(|| format!("failed to record migration: {name}"))?;

        tracing::info!("applied migration: {name}");
    }

    Ok(())
}
