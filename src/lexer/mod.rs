// src/lexer/mod.rs
pub mod cpu;
pub mod keywords;
