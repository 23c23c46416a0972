//! integrated tests

mod mixed;
mod nav_v3;
