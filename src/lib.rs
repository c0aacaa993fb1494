pub mod config;
pub mod contact;
pub mod controller;
pub mod message;
pub mod presenter;
pub mod repository;
pub mod server;
pub mod storage;
pub mod store;
pub mod theme;
pub mod validator;

use std::env::var_os;
use std::path::PathBuf;

pub fn data_path_from_env() -> PathBuf {
    var_os("DATA_PATH")
        .expect("Environment variable DATA_PATH not set")
        .into()
}
