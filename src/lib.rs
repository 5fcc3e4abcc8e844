//MIT License
//! Symbolic calculator: parses math expressions typed by a user and
//! differentiates, integrates, solves, takes limits, expands into series
//! or plots them. The symbolic engine lives in [`symbolic`]; the
//! request-level pipeline (normalization, dispatch, plotting, errors)
//! lives in [`solver`].
pub mod solver;
pub mod symbolic;
