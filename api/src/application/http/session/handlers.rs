pub mod confirm_ingredients;
pub mod create_session;
pub mod delete_session;
pub mod get_session;
pub mod go_back;
pub mod reset_session;
pub mod toggle_ingredient;
pub mod update_manual_entry;
pub mod upload_photo;
