#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for spout
//!
//! This crate handles all HTTP operations: registry document fetches and
//! checksum-verified artifact downloads, over a pooled client with retry
//! logic.

mod client;
mod download;
mod registry;

pub use client::{NetClient, NetConfig};
pub use download::{
    ChecksumSource, DownloadOptions, DownloadRequest, DownloadResult, DownloadSession,
    DownloadStatus, Downloader,
};
pub use registry::RegistryClient;
