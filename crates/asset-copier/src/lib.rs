//! Copier of prebuilt shared libraries into build output directories.
//!
//! Native dependencies (DLLs on Windows) usually live in some library cache outside of
//! the project checkout, but the executables produced by each build configuration
//! need them next to themselves. This crate copies a list of such files into
//! the output directory of every build configuration.
//!
//! # How it works
//!
//! An [`AssetManifest`] describes where the libraries live, where the project is
//! and which files every configuration needs. For each configuration,
//! [`assemble_build`] resolves every [`AssetEntry`] to a source path
//! and copies it into `<project root>/<output root>/<configuration>/`,
//! keeping only the file name.
//!
//! Without a manifest file, [`AssetManifest::default`] provides the table
//! the project has always used.

#![expect(clippy::pub_use, reason = "part of public API")]

pub mod copy;
pub mod manifest;

pub use self::{
    copy::{assemble_build, AssetEntry, BuildReport, CopiedAsset, CopyError, Layout},
    manifest::{AssetManifest, BuildConfiguration, ManifestError},
};
