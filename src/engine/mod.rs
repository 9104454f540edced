//! The two exact B&B engines (spec §4.5/§4.6) and the incremental
//! search state they share (spec §4.4 common delta machinery).

pub mod common;
pub mod furini;
pub mod sewell;
