pub mod activate;
pub mod create;
pub mod deactivate;
pub mod delete;
pub mod list;
pub mod set_default;
