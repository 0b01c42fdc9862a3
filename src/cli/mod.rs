pub mod ask;
pub mod list;
pub mod manage;
pub mod onboard;
pub mod setup;
pub mod show;
pub mod stats;
pub mod ui;
