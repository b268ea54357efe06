pub mod admins;
pub mod delivery_log;
pub mod entries;
pub mod feeds;
pub mod forms;
pub mod settings;
