pub mod chat;
pub mod upload;

pub use chat::get_response;
pub use upload::upload_pdf;
