//! Page Components for Bookshelf
//!
//! - **LibraryPage**: The book collection (root route, authenticated)
//! - **LoginPage**: Landing page for unauthenticated users

pub mod library;
pub mod login;

pub use library::LibraryPage;
pub use login::LoginPage;
