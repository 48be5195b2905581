//! Internal data structures shared by the encoder and decoder

pub mod dictionary;
