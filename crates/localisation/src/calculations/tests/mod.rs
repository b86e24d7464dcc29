mod common;
mod housing;
