pub mod domain;
pub mod ports;

pub use domain::{seed_catalog, Book, Review, SessionClaims, User};
pub use ports::{CatalogService, PortError, PortResult, TokenService, UserService};
