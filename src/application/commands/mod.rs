// src/application/commands/mod.rs
//
// Tauri Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the webview and the controller
// - Commands handle error conversion for Tauri
// - Commands NEVER contain playback logic

pub mod playback_commands;

pub use playback_commands::*;
