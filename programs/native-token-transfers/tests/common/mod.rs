#![allow(dead_code)]

pub mod publisher;
pub mod setup;
