use sea_orm::{ConnectionTrait, DbBackend, EntityTrait, QuerySelect, Select};

pub mod cascade;
pub mod classrooms;
pub mod discussions;
pub mod forums;
pub mod groups;
pub mod permissions;
pub mod roles;

/// Adds `FOR UPDATE` on backends with row locks. SQLite already serialises
/// writers for the whole database, and rejects the clause.
pub(crate) fn for_update<E, C>(select: Select<E>, conn: &C) -> Select<E>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    match conn.get_database_backend() {
        DbBackend::Sqlite => select,
        _ => select.lock_exclusive(),
    }
}
