#![no_std]

pub mod config;
pub mod integration;
pub mod se;
