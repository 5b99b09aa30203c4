pub mod memory;
pub mod refresh_token;
pub mod save;
pub mod user;

pub use memory::InMemoryStore;
pub use refresh_token::PostgresRefreshTokenRepository;
pub use save::PostgresSaveRepository;
pub use user::PostgresUserRepository;
