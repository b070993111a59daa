//! The solvers, extractors, and checker that make up the core of this
//! crate (spec §2 components 2-5).

pub mod checker;
pub mod cle;
pub mod frank;
pub mod phase2;
pub mod scc;

pub use checker::{check_dual_certificate, CertificateError};
pub use cle::min_arborescence_cle;
pub use frank::{min_arborescence_frank, DualStep, FrankResult};
pub use phase2::{extract_v1, extract_v2};
