pub mod delete_button;
pub mod resize_handle;

pub use delete_button::DeleteButton;
pub use resize_handle::ResizeHandle;
