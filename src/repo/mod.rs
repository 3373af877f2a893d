//!
//! # Repositories
//!
//! Explicit persistence handles over a shared `PgPool`, injected into the
//! services instead of a process-wide connection. Task lifecycle guards are
//! encoded directly in the SQL predicates: id-scoped transitions are single
//! conditional `UPDATE`/`DELETE` statements, so concurrent attempts on the
//! same task serialize in the database — one matches, the rest see zero rows.

pub mod albums;
pub mod tasks;
pub mod users;

pub use albums::AlbumRepo;
pub use tasks::TaskRepo;
pub use users::UserRepo;
