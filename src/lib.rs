// src/lib.rs
//
// DevForge: tool logic in the top-level modules, Yew UI in `components`.

pub mod ai;
pub mod base64_codec;
pub mod clipboard;
pub mod components;
pub mod json;
pub mod jwt;
pub mod uuid_gen;
pub mod webp;

pub use components::App;
