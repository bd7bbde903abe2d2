mod common;
mod encoder;
mod point;
