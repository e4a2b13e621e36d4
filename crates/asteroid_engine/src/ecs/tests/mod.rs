//! Integration tests driving the world through whole frames

mod world_integration;
