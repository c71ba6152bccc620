pub mod run;
pub mod sequence;
