//! Chunky pixel-art drawing engine for 576px receipt printers.
//!
//! The library holds everything a host page needs: the raster surface and
//! brush rasterizer ([`draw`]), input normalization and the tool state
//! machine ([`input`]), saving and print submission ([`export`]), the page
//! control contract ([`host`]) and a scripted driver for it ([`script`]).

pub mod config;
pub mod draw;
pub mod export;
pub mod host;
pub mod input;
pub mod script;
pub mod util;

pub use config::Config;
pub use host::{Host, HostControl};
