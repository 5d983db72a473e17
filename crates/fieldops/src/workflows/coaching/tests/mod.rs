mod banding;
mod common;
mod scoring;
