pub mod catalog;
pub mod token;
pub mod users;

pub use catalog::InMemoryCatalog;
pub use token::HmacTokenAdapter;
pub use users::InMemoryUsers;
