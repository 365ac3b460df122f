//! Driver library for the Princeton PT6312 VFD controller and its clones (AD16312, HT16512,
//! ET16312N).
//!
//! The controller multiplexes up to 11 grids of up to 16 segments, scans a small key matrix, and
//! drives four LEDs, all over a three-wire serial port. This crate renders text, numbers, icons
//! and a busy spinner onto the glass through a [`Layout`] that describes how a particular glass
//! is wired, and reads the keys and switches back.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate embedded_hal as hal;

pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod interface;
pub mod layout;

// Re-exports for primary API.
pub use command::{consts, GridMode};
pub use config::Config;
pub use display::{Display, KeySample, Scroll};
pub use error::{ConfigError, Error};
pub use interface::bitbang::{BitBangInterface, DataLine, OpenDrainDataLine, ReadPolarity};
pub use interface::BusInterface;
pub use layout::{presets, Layout};
