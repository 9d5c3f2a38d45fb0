//! Statistical helpers for the Rotacourt project.
//!
//! The fairness calculator and both lineup selectors summarize per-player
//! quantities (minutes played, periods played). This crate keeps those
//! summaries in one place:
//!
//! - [`descriptive`]: count, min, max, mean, population variance, standard deviation
//!
//! # Example
//!
//! ```
//! use rotacourt_stats::descriptive::DescriptiveStats;
//!
//! let minutes = [4.0, 8.0, 2.0];
//! let stats = DescriptiveStats::new(minutes).unwrap();
//! assert_eq!(stats.range(), 6.0);
//! ```

pub mod descriptive;
