#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod cache;
mod config;
pub mod error;
mod graph;
pub mod hooks;
mod metrics;
pub mod synthesizer;

pub use cache::{CacheLock, PatternCache};
pub use config::SlurperConfig;
pub use graph::SlurpyGraph;
pub use metrics::SlurpStats;

pub mod model {
    pub use sparql_slurper_model::*;
}

pub mod common {
    pub use sparql_slurper_common::*;
}

pub mod storage {
    pub use sparql_slurper_storage::*;
}

pub mod http {
    pub use sparql_slurper_http::*;
}

pub use oxrdfio::RdfFormat;
