//! View models, assembler functions and askama templates.

pub mod views;
