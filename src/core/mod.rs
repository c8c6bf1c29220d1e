pub mod locks;
pub mod replies;
pub mod sentiment;
pub mod services;
pub mod traits;
