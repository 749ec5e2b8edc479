//! Escape: a small blog backend serving featured and recent post listings,
//! single post pages, and a JSON endpoint for submitting posts with images.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
