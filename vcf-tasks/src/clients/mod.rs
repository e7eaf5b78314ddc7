//! Clients for the VCF control-plane API.
//!
//! - vcf: task status lookups over the REST API

pub mod vcf;

pub use vcf::{ClientConfig, VcfClient};
